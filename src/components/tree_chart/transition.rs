//! Timed transitions between scenes.
//!
//! A transition interpolates every sprite from where it is drawn when the
//! transition starts to where the new layout puts it. Starting a transition
//! while another is still running supersedes it: the new one begins from the
//! interpolated in-flight scene, so elements never jump.

use std::collections::{BTreeMap, BTreeSet};

use super::geometry::{Anchor, LinkPath};
use super::hierarchy::NodeId;
use super::scene::{LinkSprite, NodeSprite, Scene};

/// Cubic ease-in-out, the default easing of the charting toolkits this chart
/// is styled after.
pub fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t.clamp(0.0, 1.0) * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

/// A single in-flight transition.
#[derive(Clone, Debug)]
struct Transition {
	from: Scene,
	to: Scene,
	/// Nodes and links removed once the transition completes.
	exiting_nodes: BTreeSet<NodeId>,
	exiting_links: BTreeSet<NodeId>,
	start_ms: f64,
	duration_ms: f64,
}

impl Transition {
	fn progress(&self, now_ms: f64) -> f64 {
		if self.duration_ms <= 0.0 {
			return 1.0;
		}
		((now_ms - self.start_ms) / self.duration_ms).clamp(0.0, 1.0)
	}

	fn settled(&self) -> Scene {
		let mut scene = self.to.clone();
		scene.nodes.retain(|id, _| !self.exiting_nodes.contains(id));
		scene.links.retain(|id, _| !self.exiting_links.contains(id));
		scene
	}

	fn sample(&self, now_ms: f64) -> Scene {
		let t = self.progress(now_ms);
		if t >= 1.0 {
			return self.settled();
		}
		let e = ease_cubic_in_out(t);
		Scene {
			nodes: lerp_map(&self.from.nodes, &self.to.nodes, e, NodeSprite::lerp),
			links: lerp_map(&self.from.links, &self.to.links, e, LinkSprite::lerp),
			view_box: self.from.view_box.lerp(&self.to.view_box, e),
		}
	}
}

fn lerp_map<T: Copy>(
	from: &BTreeMap<NodeId, T>,
	to: &BTreeMap<NodeId, T>,
	t: f64,
	lerp: impl Fn(&T, &T, f64) -> T,
) -> BTreeMap<NodeId, T> {
	to.iter()
		.map(|(id, end)| {
			let sprite = from.get(id).map_or(*end, |start| lerp(start, end, t));
			(*id, sprite)
		})
		.collect()
}

/// Where entering elements appear from and exiting ones collapse into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Origin {
	/// The activated node's coordinates before the layout pass.
	pub enter_from: Anchor,
	/// The activated node's coordinates after the layout pass.
	pub exit_to: Anchor,
}

/// Owns the displayed scene and the transition towards the latest layout.
#[derive(Clone, Debug, Default)]
pub struct Animator {
	current: Option<Transition>,
}

impl Animator {
	/// Scene to draw at `now_ms`.
	pub fn sample(&self, now_ms: f64) -> Scene {
		self.current
			.as_ref()
			.map(|t| t.sample(now_ms))
			.unwrap_or_default()
	}

	pub fn is_running(&self, now_ms: f64) -> bool {
		self.current
			.as_ref()
			.is_some_and(|t| t.progress(now_ms) < 1.0)
	}

	/// Begin animating towards `target`, superseding any running transition.
	pub fn start(&mut self, target: Scene, origin: Origin, now_ms: f64, duration_ms: f64) {
		let displayed = self.sample(now_ms);
		let had_scene = self.current.is_some();

		let mut from = Scene {
			view_box: if had_scene {
				displayed.view_box
			} else {
				target.view_box
			},
			..Scene::default()
		};
		let mut to = target;
		let mut exiting_nodes = BTreeSet::new();
		let mut exiting_links = BTreeSet::new();

		let enter_point = origin.enter_from.point();
		let exit_point = origin.exit_to.point();

		for (id, end) in &to.nodes {
			let start = displayed.nodes.get(id).copied().unwrap_or(NodeSprite {
				position: enter_point,
				opacity: 0.0,
				..*end
			});
			from.nodes.insert(*id, start);
		}
		for (id, end) in &to.links {
			let start = displayed.links.get(id).copied().unwrap_or(LinkSprite {
				path: LinkPath::degenerate(end.path.style, origin.enter_from),
				opacity: 0.0,
				..*end
			});
			from.links.insert(*id, start);
		}

		for (id, sprite) in &displayed.nodes {
			if to.nodes.contains_key(id) {
				continue;
			}
			exiting_nodes.insert(*id);
			from.nodes.insert(*id, *sprite);
			to.nodes.insert(
				*id,
				NodeSprite {
					position: exit_point,
					opacity: 0.0,
					..*sprite
				},
			);
		}
		for (id, sprite) in &displayed.links {
			if to.links.contains_key(id) {
				continue;
			}
			exiting_links.insert(*id);
			from.links.insert(*id, *sprite);
			to.links.insert(
				*id,
				LinkSprite {
					path: LinkPath::degenerate(sprite.path.style, origin.exit_to),
					opacity: 0.0,
					..*sprite
				},
			);
		}

		self.current = Some(Transition {
			from,
			to,
			exiting_nodes,
			exiting_links,
			start_ms: now_ms,
			duration_ms,
		});
	}
}
