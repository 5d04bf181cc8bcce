//! Expand/collapse orchestration.
//!
//! The controller owns the node graph, the layout engine and the animator.
//! Activation of a node is the only event that changes diagram state; each
//! one toggles the node, captures the previous coordinates, reruns the layout,
//! recomputes the view box and starts a transition rooted at the activated
//! node.

use log::debug;

use super::config::ChartConfig;
use super::error::LoadError;
use super::flextree::FlexTree;
use super::geometry::{Anchor, Point, link_path};
use super::hierarchy::{Hierarchy, Link, NodeId, default_expansion};
use super::layout::{self, Bounds, TreeLayout, ViewBox};
use super::scene::{LinkSprite, NodeSprite, Scene};
use super::transition::{Animator, Origin};
use super::types::TreeData;

/// Owns one diagram instance.
pub struct DiagramController<L: TreeLayout = FlexTree> {
	tree: Hierarchy,
	config: ChartConfig,
	engine: L,
	surface_width: f64,
	bounds: Bounds,
	view_box: ViewBox,
	animator: Animator,
}

impl DiagramController<FlexTree> {
	/// Load `data` with the default expansion policy and layout engine, and
	/// start the initial transition at `now_ms`.
	pub fn new(data: &TreeData, config: ChartConfig, surface_width: f64, now_ms: f64) -> Result<Self, LoadError> {
		let tree = Hierarchy::load(data, default_expansion)?;
		Ok(Self::with_engine(tree, config, FlexTree, surface_width, now_ms))
	}
}

impl<L: TreeLayout> DiagramController<L> {
	/// Build a controller around an already loaded tree and any layout engine.
	pub fn with_engine(mut tree: Hierarchy, config: ChartConfig, engine: L, surface_width: f64, now_ms: f64) -> Self {
		if let Some(palette) = &config.palette {
			tree.assign_colors(palette);
		}
		// The first transition grows out of the middle of the first column.
		let root = tree.root_id();
		if let Some(node) = tree.get_mut(root) {
			node.x0 = config.column_width(surface_width) / 2.0;
			node.y0 = 0.0;
		}

		let mut controller = Self {
			tree,
			config,
			engine,
			surface_width,
			bounds: Bounds::default(),
			view_box: ViewBox::default(),
			animator: Animator::default(),
		};
		controller.update(root, now_ms);
		controller
	}

	/// Node graph with the coordinates of the latest layout pass.
	pub fn tree(&self) -> &Hierarchy {
		&self.tree
	}

	/// Configuration the chart was built with.
	pub fn config(&self) -> &ChartConfig {
		&self.config
	}

	/// Cross-axis range of the visible nodes after the latest layout pass.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Target view box of the latest layout pass.
	pub fn view_box(&self) -> ViewBox {
		self.view_box
	}

	/// Width the layout was computed for.
	pub fn surface_width(&self) -> f64 {
		self.surface_width
	}

	/// Currently active parent→child edges.
	pub fn links(&self) -> Vec<Link> {
		self.tree.links()
	}

	/// Scene to draw at `now_ms`.
	pub fn frame(&self, now_ms: f64) -> Scene {
		self.animator.sample(now_ms)
	}

	/// Whether a transition is still running at `now_ms`.
	pub fn is_animating(&self, now_ms: f64) -> bool {
		self.animator.is_running(now_ms)
	}

	/// Toggle `id` between expanded and collapsed.
	///
	/// Returns `false` (and changes nothing) for leaves and unknown ids.
	pub fn handle_activate(&mut self, id: NodeId, now_ms: f64) -> bool {
		let Some(state) = self.tree.toggle(id) else {
			return false;
		};
		debug!("tree-chart: node {} is now {:?}", id.0, state);
		self.tree.stash_positions();
		self.update(id, now_ms);
		true
	}

	/// Relayout for a new surface width.
	pub fn resize(&mut self, surface_width: f64, now_ms: f64) {
		if surface_width == self.surface_width {
			return;
		}
		self.surface_width = surface_width;
		self.tree.stash_positions();
		self.update(self.tree.root_id(), now_ms);
	}

	fn update(&mut self, source: NodeId, now_ms: f64) {
		let params = self.config.layout_params(self.surface_width);
		self.bounds = layout::layout(&mut self.tree, &self.engine, &params);
		self.view_box = ViewBox::for_bounds(
			&self.bounds,
			self.surface_width,
			self.config.margin.top,
			self.config.margin.bottom,
		);

		let target = self.build_scene();
		let Some(node) = self.tree.get(source) else {
			return;
		};
		let origin = Origin {
			enter_from: Anchor::new(node.x0, node.y0),
			exit_to: Anchor::new(node.x, node.y),
		};
		debug!(
			"tree-chart: layout of {} nodes spans {:.1}..{:.1}",
			target.nodes.len(),
			self.bounds.min_x,
			self.bounds.max_x
		);
		self.animator.start(target, origin, now_ms, self.config.duration_ms);
	}

	/// Target scene for the current layout. Geometry reads the coordinates the
	/// layout pass just wrote, so this must run after it.
	fn build_scene(&self) -> Scene {
		let mut scene = Scene {
			view_box: self.view_box,
			..Scene::default()
		};
		for id in self.tree.visible() {
			let Some(node) = self.tree.get(id) else {
				continue;
			};
			scene.nodes.insert(
				id,
				NodeSprite {
					id,
					position: Point::from_layout(node.x, node.y),
					extent: node.extent,
					opacity: 1.0,
				},
			);

			let Some(children) = node.active_children() else {
				continue;
			};
			let children_x: Vec<f64> = children
				.iter()
				.filter_map(|&c| self.tree.get(c))
				.map(|c| c.x)
				.collect();
			let source = Anchor::new(node.x, node.y);
			for (index, &child) in children.iter().enumerate() {
				let Some(target) = self.tree.get(child) else {
					continue;
				};
				let path = link_path(
					self.config.link_style,
					source,
					Anchor::new(target.x, target.y),
					&children_x,
					index,
					self.config.link.outer,
				);
				scene.links.insert(
					child,
					LinkSprite {
						target: child,
						path,
						opacity: 1.0,
					},
				);
			}
		}
		scene
	}
}
