//! Canvas rendering for the explore scene.
//!
//! Translates the scene's current state into 2D context calls each frame:
//! background, connector lines, item dots, then topic labels on top. Items
//! and lines are drawn only while a mode's container is attached.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::scene::{ItemKind, Scene};
use super::theme::Theme;

/// Renders the complete scene to the canvas.
pub fn render(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(scene, ctx, theme);

	if !scene.container_attached() {
		return;
	}

	draw_lines(scene, ctx, theme);
	draw_items(scene, ctx, theme);
	draw_labels(scene, ctx, theme);
}

fn draw_background(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let size = scene.canvas_size();

	if theme.background.use_gradient {
		let gradient = ctx
			.create_radial_gradient(
				size.x / 2.0,
				size.y / 2.0,
				0.0,
				size.x / 2.0,
				size.y / 2.0,
				size.x.max(size.y) * 0.8,
			)
			.unwrap();

		gradient
			.add_color_stop(0.0, &theme.background.color_secondary.to_css())
			.unwrap();
		gradient
			.add_color_stop(1.0, &theme.background.color.to_css())
			.unwrap();

		#[allow(deprecated)]
		ctx.set_fill_style(&gradient);
	} else {
		ctx.set_fill_style_str(&theme.background.color.to_css());
	}

	ctx.fill_rect(0.0, 0.0, size.x, size.y);
}

fn draw_lines(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_line_width(theme.line.width);

	for line in scene.lines() {
		if line.alpha < 0.005 {
			continue;
		}
		ctx.set_stroke_style_str(&line.color.with_alpha(line.alpha).to_css());
		ctx.begin_path();
		ctx.move_to(line.from.x, line.from.y);
		ctx.line_to(line.to.x, line.to.y);
		ctx.stroke();
	}
}

fn draw_items(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	for item in scene.items() {
		if item.alpha < 0.01 {
			continue;
		}
		let (radius, color) = match item.kind {
			ItemKind::Issue => (theme.item.issue_radius, theme.item.issue_color),
			ItemKind::Fake => (theme.item.fake_radius, theme.item.fake_color),
		};
		ctx.set_fill_style_str(&color.with_alpha(color.a * item.alpha).to_css());
		ctx.begin_path();
		let _ = ctx.arc(item.position.x, item.position.y, radius, 0.0, PI * 2.0);
		ctx.fill();
	}
}

fn draw_labels(scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_font(theme.label.font);
	ctx.set_text_align("center");

	for label in scene.labels() {
		if label.alpha < 0.01 {
			continue;
		}
		let color = theme.label.color;
		ctx.set_fill_style_str(&color.with_alpha(color.a * label.alpha).to_css());
		let _ = ctx.fill_text(&label.text, label.position.x, label.position.y);
	}
}
