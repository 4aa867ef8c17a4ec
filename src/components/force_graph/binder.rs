use std::collections::{HashMap, HashSet};

use log::debug;

use super::store::{ActiveSubgraph, Body, GraphStore};
use super::types::{NodeGroup, NodeIdx};
use crate::error::GraphError;

pub const NODE_RADIUS: f64 = 10.0;
pub const LABEL_DX: f64 = 12.0;
pub const LABEL_FONT_PX: f64 = 12.0;
pub const LINK_OPACITY: f64 = 0.6;

pub const COMPANY_COLOR: &str = "#1f77b4";
pub const DRIVER_COLOR: &str = "#2ca02c";
pub const ANTI_COLOR: &str = "#d62728";
pub const LINK_COLOR: &str = "#2ca02c";
pub const ALERT_LINK_COLOR: &str = "#d62728";

pub fn group_color(group: NodeGroup) -> &'static str {
	match group {
		NodeGroup::Company => COMPANY_COLOR,
		NodeGroup::Driver => DRIVER_COLOR,
		NodeGroup::Anti => ANTI_COLOR,
	}
}

/// Links pointing at an `anti` node are drawn in the alert color; unknown
/// targets fall back to the normal one.
pub fn link_color(target_group: Option<NodeGroup>) -> &'static str {
	match target_group {
		Some(NodeGroup::Anti) => ALERT_LINK_COLOR,
		_ => LINK_COLOR,
	}
}

pub fn link_width(value: f64) -> f64 {
	value.abs().sqrt()
}

#[derive(Clone, Debug, PartialEq)]
pub struct CircleStyle {
	pub radius: f64,
	pub fill: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
	pub text: String,
	pub dx: f64,
	pub font_px: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LineStyle {
	pub stroke: &'static str,
	pub width: f64,
	pub opacity: f64,
}

/// Drawing backend for the visual primitives.
pub trait Surface {
	type Element;

	fn create_circle(&mut self, style: &CircleStyle) -> Result<Self::Element, GraphError>;
	fn create_label(&mut self, style: &LabelStyle) -> Result<Self::Element, GraphError>;
	fn create_line(&mut self, style: &LineStyle) -> Result<Self::Element, GraphError>;
	fn remove(&mut self, element: &Self::Element);

	fn move_circle(&mut self, element: &Self::Element, cx: f64, cy: f64);
	fn move_label(&mut self, element: &Self::Element, x: f64, y: f64);
	fn move_line(&mut self, element: &Self::Element, from: (f64, f64), to: (f64, f64));
}

struct NodePrimitive<E> {
	node: NodeIdx,
	circle: E,
	label: E,
}

struct LinkPrimitive<E> {
	source: NodeIdx,
	target: NodeIdx,
	line: E,
}

/// What a [`ViewBinder::bind`] call changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BindStats {
	pub created: usize,
	pub removed: usize,
	pub reused: usize,
}

/// Keeps one circle and label per active node and one line per active link,
/// keyed by node id and by `source-target`.
pub struct ViewBinder<S: Surface> {
	surface: S,
	nodes: HashMap<String, NodePrimitive<S::Element>>,
	links: HashMap<String, LinkPrimitive<S::Element>>,
	/// Node keys in draw order; later entries are on top.
	node_order: Vec<String>,
}

impl<S: Surface> ViewBinder<S> {
	pub fn new(surface: S) -> Self {
		Self {
			surface,
			nodes: HashMap::new(),
			links: HashMap::new(),
			node_order: Vec::new(),
		}
	}

	/// Bound nodes, bottom to top.
	pub fn bound_nodes(&self) -> impl DoubleEndedIterator<Item = NodeIdx> + '_ {
		self.node_order.iter().filter_map(|id| self.nodes.get(id).map(|p| p.node))
	}

	/// Reconcile the primitives against a new active subgraph.
	pub fn bind(
		&mut self,
		store: &GraphStore,
		active: &ActiveSubgraph,
	) -> Result<BindStats, GraphError> {
		let mut stats = BindStats::default();

		let mut wanted_nodes = HashSet::new();
		let mut appended = Vec::new();
		for &idx in &active.nodes {
			let node = store.node(idx);
			if !wanted_nodes.insert(node.id.clone()) {
				continue;
			}
			if let Some(existing) = self.nodes.get_mut(&node.id) {
				existing.node = idx;
				stats.reused += 1;
				continue;
			}
			let circle = self.surface.create_circle(&CircleStyle {
				radius: NODE_RADIUS,
				fill: group_color(node.group),
			})?;
			let label = self.surface.create_label(&LabelStyle {
				text: node.id.clone(),
				dx: LABEL_DX,
				font_px: LABEL_FONT_PX,
			})?;
			appended.push(node.id.clone());
			self.nodes.insert(
				node.id.clone(),
				NodePrimitive {
					node: idx,
					circle,
					label,
				},
			);
			stats.created += 1;
		}

		let mut wanted_links = HashSet::new();
		for &idx in &active.links {
			let link = store.link(idx);
			// endpoints that are not nodes have nothing to draw between
			let Some(resolved) = store.resolved(idx) else {
				continue;
			};
			let key = link.key();
			if !wanted_links.insert(key.clone()) {
				continue;
			}
			if let Some(existing) = self.links.get_mut(&key) {
				existing.source = resolved.source;
				existing.target = resolved.target;
				stats.reused += 1;
				continue;
			}
			let line = self.surface.create_line(&LineStyle {
				stroke: link_color(store.group_of(&link.target)),
				width: link_width(link.value),
				opacity: LINK_OPACITY,
			})?;
			self.links.insert(
				key,
				LinkPrimitive {
					source: resolved.source,
					target: resolved.target,
					line,
				},
			);
			stats.created += 1;
		}

		let surface = &mut self.surface;
		self.nodes.retain(|id, primitive| {
			let keep = wanted_nodes.contains(id);
			if !keep {
				surface.remove(&primitive.circle);
				surface.remove(&primitive.label);
				stats.removed += 1;
			}
			keep
		});
		self.links.retain(|key, primitive| {
			let keep = wanted_links.contains(key);
			if !keep {
				surface.remove(&primitive.line);
				stats.removed += 1;
			}
			keep
		});
		// surviving primitives keep their place, new ones go on top
		self.node_order.retain(|id| wanted_nodes.contains(id));
		self.node_order.extend(appended);

		debug!(
			"bound {} nodes, {} links ({:?})",
			self.nodes.len(),
			self.links.len(),
			stats
		);
		Ok(stats)
	}

	/// Copy the current body positions onto every bound primitive.
	pub fn sync_positions(&mut self, bodies: &[Body]) {
		for primitive in self.nodes.values() {
			let body = &bodies[primitive.node.0];
			self.surface.move_circle(&primitive.circle, body.x, body.y);
			self.surface.move_label(&primitive.label, body.x, body.y);
		}
		for primitive in self.links.values() {
			let (s, t) = (&bodies[primitive.source.0], &bodies[primitive.target.0]);
			self.surface.move_line(&primitive.line, (s.x, s.y), (t.x, t.y));
		}
	}
}

#[cfg(test)]
impl<S: Surface> ViewBinder<S> {
	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	pub fn has_node(&self, id: &str) -> bool {
		self.nodes.contains_key(id)
	}

	pub fn has_link(&self, key: &str) -> bool {
		self.links.contains_key(key)
	}
}


#[cfg(test)]
mod tests {
	use super::testing::RecordingSurface;
	use super::*;
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode, Selection};

	fn store() -> GraphStore {
		let node = |id: &str, group| GraphNode {
			id: id.into(),
			group,
		};
		let link = |s: &str, t: &str, value| GraphLink {
			source: s.into(),
			target: t.into(),
			value,
		};
		GraphStore::new(GraphData {
			nodes: vec![
				node("A", NodeGroup::Company),
				node("B", NodeGroup::Driver),
				node("C", NodeGroup::Anti),
				node("D", NodeGroup::Company),
			],
			links: vec![
				link("A", "B", 4.0),
				link("A", "C", -2.0),
				link("D", "B", 9.0),
				link("D", "ghost", 1.0),
			],
		})
	}

	fn bind(
		binder: &mut ViewBinder<RecordingSurface>,
		store: &GraphStore,
		selection: &str,
	) -> BindStats {
		binder
			.bind(store, &store.active_subgraph(&Selection::from(selection)))
			.unwrap()
	}

	fn line_styles(binder: &ViewBinder<RecordingSurface>) -> Vec<LineStyle> {
		let mut styles: Vec<_> = binder.surface().lines.values().map(|(s, _)| s.clone()).collect();
		styles.sort_by(|a, b| a.width.total_cmp(&b.width));
		styles
	}

	#[test]
	fn colors_follow_group_and_target() {
		assert_eq!(group_color(NodeGroup::Company), "#1f77b4");
		assert_eq!(group_color(NodeGroup::Driver), "#2ca02c");
		assert_eq!(group_color(NodeGroup::Anti), "#d62728");
		assert_eq!(link_color(Some(NodeGroup::Anti)), ALERT_LINK_COLOR);
		assert_eq!(link_color(Some(NodeGroup::Company)), LINK_COLOR);
		assert_eq!(link_color(None), LINK_COLOR);
	}

	#[test]
	fn creates_styled_primitives() {
		let store = store();
		let mut binder = ViewBinder::new(RecordingSurface::default());
		let stats = bind(&mut binder, &store, "A");

		assert_eq!(stats, BindStats { created: 5, removed: 0, reused: 0 });
		assert_eq!(binder.node_count(), 3);
		assert_eq!(binder.link_count(), 2);
		assert!(binder.has_link("A-C"));

		let styles = line_styles(&binder);
		assert_eq!(styles[0].stroke, ALERT_LINK_COLOR);
		assert!((styles[0].width - 2f64.sqrt()).abs() < 1e-12);
		assert_eq!(styles[1].stroke, LINK_COLOR);
		assert_eq!(styles[1].width, 2.0);
		assert!(styles.iter().all(|s| s.opacity == 0.6));

		let fills: HashSet<_> = binder.surface().circles.values().map(|(s, _)| s.fill).collect();
		assert_eq!(fills, HashSet::from([COMPANY_COLOR, DRIVER_COLOR, ANTI_COLOR]));
		assert!(binder.surface().circles.values().all(|(s, _)| s.radius == NODE_RADIUS));
	}

	#[test]
	fn rebinding_same_selection_reuses_everything() {
		let store = store();
		let mut binder = ViewBinder::new(RecordingSurface::default());
		bind(&mut binder, &store, "A");
		let created = binder.surface().created;

		let stats = bind(&mut binder, &store, "A");
		assert_eq!(stats, BindStats { created: 0, removed: 0, reused: 5 });
		assert_eq!(binder.surface().created, created);
		assert_eq!(binder.surface().removed, 0);
	}

	#[test]
	fn switching_selection_diffs_by_key() {
		let store = store();
		let mut binder = ViewBinder::new(RecordingSurface::default());
		bind(&mut binder, &store, "A");

		// D keeps B, drops A, C and both A links, adds D and D-B
		let stats = bind(&mut binder, &store, "D");
		assert_eq!(stats.reused, 1);
		assert_eq!(stats.created, 2);
		assert_eq!(stats.removed, 4);
		assert!(binder.has_node("B") && binder.has_node("D"));
		assert!(!binder.has_node("A") && !binder.has_node("C"));
		assert!(binder.has_link("D-B") && !binder.has_link("D-ghost"));
		// circle + label for A and C, two lines
		assert_eq!(binder.surface().removed, 6);
		assert_eq!(binder.surface().circles.len(), 2);
		assert_eq!(binder.surface().lines.len(), 1);
	}

	#[test]
	fn empty_selection_clears_view() {
		let store = store();
		let mut binder = ViewBinder::new(RecordingSurface::default());
		bind(&mut binder, &store, "ALL");
		bind(&mut binder, &store, "B");
		assert_eq!(binder.node_count(), 0);
		assert_eq!(binder.link_count(), 0);
		assert!(binder.surface().circles.is_empty());
		assert_eq!(binder.bound_nodes().count(), 0);
	}

	#[test]
	fn sync_writes_body_positions() {
		let mut store = store();
		let mut binder = ViewBinder::new(RecordingSurface::default());
		bind(&mut binder, &store, "A");
		for (i, body) in store.bodies_mut().iter_mut().enumerate() {
			body.x = i as f64 * 10.0;
			body.y = i as f64 * 20.0;
		}
		binder.sync_positions(store.bodies());

		assert_eq!(binder.surface().label_position("C"), Some((20.0, 40.0)));
		let mut ends: Vec<_> = binder.surface().lines.values().map(|(_, p)| *p).collect();
		ends.sort_by(|a, b| a[2].total_cmp(&b[2]));
		assert_eq!(ends, vec![[0.0, 0.0, 10.0, 20.0], [0.0, 0.0, 20.0, 40.0]]);
	}

	#[test]
	fn bound_nodes_follow_node_order() {
		let store = store();
		let mut binder = ViewBinder::new(RecordingSurface::default());
		bind(&mut binder, &store, "ALL");
		let ids: Vec<_> = binder.bound_nodes().map(|n| store.node(n).id.as_str()).collect();
		assert_eq!(ids, vec!["A", "B", "C", "D"]);
	}

	#[test]
	fn new_nodes_stack_above_reused_ones() {
		let store = store();
		let mut binder = ViewBinder::new(RecordingSurface::default());
		bind(&mut binder, &store, "D");
		bind(&mut binder, &store, "ALL");
		let ids: Vec<_> = binder.bound_nodes().map(|n| store.node(n).id.as_str()).collect();
		assert_eq!(ids, vec!["B", "D", "A", "C"]);

		bind(&mut binder, &store, "A");
		let ids: Vec<_> = binder.bound_nodes().map(|n| store.node(n).id.as_str()).collect();
		assert_eq!(ids, vec!["B", "A", "C"]);
	}
}
