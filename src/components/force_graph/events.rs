//! Input to [`ForceGraphState::dispatch`](super::state::ForceGraphState::dispatch).

use super::types::{NodeIdx, Selection};

/// Everything that can happen to the graph view.
///
/// Times are in milliseconds on the animation-frame clock.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// The company selection changed.
	FilterChanged(Selection),

	/// A drag gesture started on a node.
	DragStart { node: NodeIdx },

	/// The dragged node should follow the pointer.
	DragMove { x: f64, y: f64 },

	/// The most recent drag gesture ended.
	DragEnd,

	/// Every drag gesture ended, e.g. the pointer left the graph.
	DragEndAll,

	/// The pointer entered a node.
	PointerEnter {
		node: NodeIdx,
		page_x: f64,
		page_y: f64,
		time: f64,
	},

	/// The pointer left the hovered node.
	PointerLeave { time: f64 },

	/// An animation frame.
	Tick { time: f64 },
}
