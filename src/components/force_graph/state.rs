use log::debug;

use super::binder::{NODE_RADIUS, Surface, ViewBinder};
use super::events::GraphEvent;
use super::interaction::{DragState, HoverState, Tooltip};
use super::simulation::{AlphaSettings, ForceParameters, Simulation};
use super::store::{ActiveSubgraph, GraphStore};
use super::types::{GraphData, NodeIdx, Selection};
use crate::error::GraphError;

/// Everything the graph view owns: data, layout, primitives and input state.
pub struct ForceGraphState<S: Surface> {
	store: GraphStore,
	simulation: Simulation,
	binder: ViewBinder<S>,
	selection: Selection,
	active: ActiveSubgraph,
	pub drag: DragState,
	pub hover: HoverState,
	pub tooltip: Tooltip,
}

impl<S: Surface> ForceGraphState<S> {
	pub fn new(data: GraphData, surface: S, width: f64, height: f64) -> Self {
		Self {
			store: GraphStore::new(data),
			simulation: Simulation::new(
				ForceParameters::default().centered(width, height),
				AlphaSettings::default(),
			),
			binder: ViewBinder::new(surface),
			selection: Selection::All,
			active: ActiveSubgraph::default(),
			drag: DragState::default(),
			hover: HoverState::default(),
			tooltip: Tooltip::default(),
		}
	}

	pub fn dispatch(&mut self, event: GraphEvent) -> Result<(), GraphError> {
		match event {
			GraphEvent::FilterChanged(selection) => self.apply_filter(selection)?,
			GraphEvent::DragStart { node } => self.drag_start(node),
			GraphEvent::DragMove { x, y } => self.drag_move(x, y),
			GraphEvent::DragEnd => self.drag_end(),
			GraphEvent::DragEndAll => self.drag_end_all(),
			GraphEvent::PointerEnter {
				node,
				page_x,
				page_y,
				time,
			} => self.pointer_enter(node, page_x, page_y, time),
			GraphEvent::PointerLeave { time } => self.pointer_leave(time),
			GraphEvent::Tick { time } => self.tick(time),
		}
		Ok(())
	}

	fn apply_filter(&mut self, selection: Selection) -> Result<(), GraphError> {
		let active = self.store.active_subgraph(&selection);
		let pairs: Vec<_> = active
			.links
			.iter()
			.filter_map(|&link| self.store.resolved(link))
			.map(|r| (r.source, r.target))
			.collect();

		self.simulation
			.set_graph(active.nodes.clone(), &pairs, self.store.bodies_mut());
		self.simulation.set_alpha(1.0).restart();
		self.binder.bind(&self.store, &active)?;

		debug!(
			"selection {} -> {}: {} links, {} nodes",
			self.selection,
			selection,
			active.links.len(),
			active.nodes.len()
		);
		self.selection = selection;
		self.active = active;
		Ok(())
	}

	fn drag_start(&mut self, node: NodeIdx) {
		if self.drag.begin(node) {
			let target = self.simulation.settings().drag_target;
			self.simulation.set_alpha_target(target).restart();
		}
		let body = self.store.body_mut(node);
		let (x, y) = (body.x, body.y);
		body.pin(x, y);
	}

	fn drag_move(&mut self, x: f64, y: f64) {
		if let Some(node) = self.drag.current() {
			self.store.body_mut(node).pin(x, y);
		}
	}

	fn drag_end(&mut self) {
		if let Some((node, last)) = self.drag.end() {
			if last {
				self.simulation.set_alpha_target(0.0);
			}
			self.store.body_mut(node).unpin();
		}
	}

	fn drag_end_all(&mut self) {
		let nodes = self.drag.end_all();
		if nodes.is_empty() {
			return;
		}
		self.simulation.set_alpha_target(0.0);
		for node in nodes {
			self.store.body_mut(node).unpin();
		}
	}

	fn pointer_enter(&mut self, node: NodeIdx, page_x: f64, page_y: f64, time: f64) {
		self.hover.node = Some(node);
		let info = self.store.node(node);
		self.tooltip.show(&info.id, info.group, page_x, page_y, time);
	}

	fn pointer_leave(&mut self, time: f64) {
		self.hover.node = None;
		self.tooltip.hide(time);
	}

	fn tick(&mut self, time: f64) {
		if self.simulation.step(self.store.bodies_mut()) && !self.active.nodes.is_empty() {
			self.binder.sync_positions(self.store.bodies());
		}
		self.tooltip.advance(time);
	}

	/// Topmost bound node whose circle contains the point.
	pub fn node_at(&self, x: f64, y: f64) -> Option<NodeIdx> {
		self.binder.bound_nodes().rev().find(|&idx| {
			let body = self.store.body(idx);
			let (dx, dy) = (body.x - x, body.y - y);
			(dx * dx + dy * dy).sqrt() < NODE_RADIUS
		})
	}
}

#[cfg(test)]
impl<S: Surface> ForceGraphState<S> {
	pub fn store(&self) -> &GraphStore {
		&self.store
	}

	pub fn simulation(&self) -> &Simulation {
		&self.simulation
	}

	pub fn binder(&self) -> &ViewBinder<S> {
		&self.binder
	}

	pub fn selection(&self) -> &Selection {
		&self.selection
	}

	pub fn active(&self) -> &ActiveSubgraph {
		&self.active
	}
}
