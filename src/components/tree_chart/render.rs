//! Canvas rendering for the tree chart.
//!
//! Draws one [`Scene`] per frame. Rendering uses passes for z-ordering:
//! 1. Background (screen space)
//! 2. Link halos, then link strokes (chart space)
//! 3. Node markers, then labels on top

use std::f64::consts::PI;

use log::warn;
use web_sys::{CanvasRenderingContext2d, Path2d};

use super::config::{ChartConfig, MarkerStyle};
use super::hierarchy::{Hierarchy, NodeState};
use super::scene::{LinkSprite, NodeSprite, Scene};
use super::state::ChartState;
use super::theme::{Color, Theme};

/// Renders a complete frame to the canvas.
pub fn render(state: &ChartState, scene: &Scene, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	draw_background(state, ctx, theme);

	let fit = state.fit(scene.view_box);
	ctx.save();
	if ctx.set_transform(fit.k, 0.0, 0.0, fit.k, fit.x, fit.y).is_err() {
		ctx.restore();
		return;
	}

	let tree = state.controller.tree();
	let config = state.config();
	draw_links(scene, tree, ctx, config, theme);
	draw_nodes(scene, tree, ctx, config, theme);
	draw_labels(scene, tree, ctx, config, theme);

	ctx.restore();
	ctx.set_global_alpha(1.0);
}

fn draw_background(state: &ChartState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	ctx.set_fill_style_str(&theme.background.to_css());
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn link_path(sprite: &LinkSprite) -> Option<Path2d> {
	match Path2d::new_with_path_string(&sprite.path.to_svg_path()) {
		Ok(path) => Some(path),
		Err(err) => {
			warn!("tree-chart: skipping link to node {}: {:?}", sprite.target.0, err);
			None
		}
	}
}

fn draw_links(scene: &Scene, tree: &Hierarchy, ctx: &CanvasRenderingContext2d, config: &ChartConfig, theme: &Theme) {
	ctx.set_line_join("round");
	ctx.set_line_cap("butt");

	let paths: Vec<(&LinkSprite, Path2d)> = scene
		.links
		.values()
		.filter(|sprite| sprite.opacity > 0.0)
		.filter_map(|sprite| link_path(sprite).map(|path| (sprite, path)))
		.collect();

	if config.link.outer > 0.0 {
		ctx.set_stroke_style_str(&theme.link.halo.to_css());
		ctx.set_line_width(config.link.outer);
		for (sprite, path) in &paths {
			ctx.set_global_alpha(sprite.opacity);
			ctx.stroke_with_path(path);
		}
	}

	ctx.set_line_width(config.link.inner);
	for (sprite, path) in &paths {
		let color = tree
			.get(sprite.target)
			.and_then(|node| node.color)
			.unwrap_or(theme.link.color);
		ctx.set_global_alpha(sprite.opacity);
		ctx.set_stroke_style_str(&color.to_css());
		ctx.stroke_with_path(path);
	}
	ctx.set_global_alpha(1.0);
}

/// Marker fill: hollow for nodes that can be toggled, solid for leaves.
fn marker_fill(tree: &Hierarchy, sprite: &NodeSprite, theme: &Theme) -> Color {
	match tree.state(sprite.id) {
		Some(NodeState::Leaf) | None => theme.node.leaf_fill,
		Some(_) => theme.node.toggle_fill,
	}
}

fn draw_nodes(scene: &Scene, tree: &Hierarchy, ctx: &CanvasRenderingContext2d, config: &ChartConfig, theme: &Theme) {
	for sprite in scene.nodes.values().filter(|s| s.opacity > 0.0) {
		ctx.set_global_alpha(sprite.opacity);
		let fill = marker_fill(tree, sprite, theme);
		let (x, y) = (sprite.position.x, sprite.position.y);

		match config.marker {
			MarkerStyle::Bar => {
				// Round caps keep zero-extent markers visible as dots.
				let half = sprite.extent / 2.0;
				ctx.set_line_cap("round");
				for (width, color) in [(config.node.outer, theme.node.outline), (config.node.inner, fill)] {
					if width <= 0.0 {
						continue;
					}
					ctx.begin_path();
					ctx.move_to(x, y - half);
					ctx.line_to(x, y + half);
					ctx.set_stroke_style_str(&color.to_css());
					ctx.set_line_width(width);
					ctx.stroke();
				}
			}
			MarkerStyle::Circle { radius } => {
				ctx.begin_path();
				let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
				ctx.set_fill_style_str(&fill.to_css());
				ctx.fill();
				if config.node.outer > 0.0 {
					ctx.set_stroke_style_str(&theme.node.outline.to_css());
					ctx.set_line_width(config.node.outer);
					ctx.stroke();
				}
			}
		}
	}
	ctx.set_line_cap("butt");
	ctx.set_global_alpha(1.0);
}

fn draw_labels(scene: &Scene, tree: &Hierarchy, ctx: &CanvasRenderingContext2d, config: &ChartConfig, theme: &Theme) {
	let label = &theme.label;
	ctx.set_font(&label.font());
	ctx.set_text_align("start");
	ctx.set_line_join("round");
	ctx.set_line_width(label.halo_width);

	for sprite in scene.nodes.values().filter(|s| s.opacity > 0.0) {
		let Some(node) = tree.get(sprite.id) else {
			continue;
		};
		let x = sprite.position.x + config.label.offset_x;
		let y = sprite.position.y - sprite.extent / 2.0 + config.label.dy_em * label.font_size;

		ctx.set_global_alpha(sprite.opacity);
		ctx.set_stroke_style_str(&label.halo.to_css());
		let _ = ctx.stroke_text(&node.name, x, y);
		ctx.set_fill_style_str(&label.color.to_css());
		let _ = ctx.fill_text(&node.name, x, y);
	}
	ctx.set_global_alpha(1.0);
}
