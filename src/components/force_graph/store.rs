use std::collections::HashMap;

use super::filter::{active_nodes, filter_links};
use super::types::{GraphData, GraphLink, GraphNode, LinkIdx, NodeGroup, NodeIdx, Selection};

/// Physics state of one node.
///
/// `x`/`y` are written by the simulation; `fx`/`fy` hold the pinned override
/// while the node is dragged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Body {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub fx: Option<f64>,
	pub fy: Option<f64>,
	/// Whether the node ever received a position.
	pub placed: bool,
}

impl Body {
	pub fn pin(&mut self, x: f64, y: f64) {
		self.fx = Some(x);
		self.fy = Some(y);
	}

	pub fn unpin(&mut self) {
		self.fx = None;
		self.fy = None;
	}

	#[cfg(test)]
	pub fn is_pinned(&self) -> bool {
		self.fx.is_some() || self.fy.is_some()
	}
}

/// Link endpoints resolved to node handles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedLink {
	pub source: NodeIdx,
	pub target: NodeIdx,
}

/// Links and nodes visible under the current selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveSubgraph {
	pub links: Vec<LinkIdx>,
	pub nodes: Vec<NodeIdx>,
}

#[cfg(test)]
impl ActiveSubgraph {
	pub fn is_empty(&self) -> bool {
		self.links.is_empty() && self.nodes.is_empty()
	}
}

/// The loaded graph. Node and link records are immutable after construction;
/// only the bodies change.
pub struct GraphStore {
	data: GraphData,
	index: HashMap<String, NodeIdx>,
	resolved: Vec<Option<ResolvedLink>>,
	bodies: Vec<Body>,
}

impl GraphStore {
	pub fn new(data: GraphData) -> Self {
		let mut index = HashMap::with_capacity(data.nodes.len());
		for (i, node) in data.nodes.iter().enumerate() {
			// first occurrence owns the id
			index.entry(node.id.clone()).or_insert(NodeIdx(i));
		}

		let resolved = data
			.links
			.iter()
			.map(|link| match (index.get(&link.source), index.get(&link.target)) {
				(Some(&source), Some(&target)) => Some(ResolvedLink { source, target }),
				_ => None,
			})
			.collect();

		let bodies = vec![Body::default(); data.nodes.len()];
		Self {
			data,
			index,
			resolved,
			bodies,
		}
	}

	pub fn nodes(&self) -> &[GraphNode] {
		&self.data.nodes
	}

	pub fn links(&self) -> &[GraphLink] {
		&self.data.links
	}

	pub fn node(&self, idx: NodeIdx) -> &GraphNode {
		&self.data.nodes[idx.0]
	}

	pub fn link(&self, idx: LinkIdx) -> &GraphLink {
		&self.data.links[idx.0]
	}

	pub fn lookup(&self, id: &str) -> Option<NodeIdx> {
		self.index.get(id).copied()
	}

	pub fn group_of(&self, id: &str) -> Option<NodeGroup> {
		self.lookup(id).map(|idx| self.node(idx).group)
	}

	/// `None` when one of the endpoints is not a known node.
	pub fn resolved(&self, idx: LinkIdx) -> Option<ResolvedLink> {
		self.resolved[idx.0]
	}

	pub fn bodies(&self) -> &[Body] {
		&self.bodies
	}

	pub fn bodies_mut(&mut self) -> &mut [Body] {
		&mut self.bodies
	}

	pub fn body(&self, idx: NodeIdx) -> &Body {
		&self.bodies[idx.0]
	}

	pub fn body_mut(&mut self, idx: NodeIdx) -> &mut Body {
		&mut self.bodies[idx.0]
	}

	pub fn active_subgraph(&self, selection: &Selection) -> ActiveSubgraph {
		let links = filter_links(selection, self.links());
		let nodes = active_nodes(self.links(), &links, self.nodes());
		ActiveSubgraph { links, nodes }
	}
}
