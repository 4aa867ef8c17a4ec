use super::types::{NodeGroup, NodeIdx};

pub const TOOLTIP_OPACITY: f64 = 0.9;
pub const TOOLTIP_FADE_IN_MS: f64 = 200.0;
pub const TOOLTIP_FADE_OUT_MS: f64 = 300.0;
pub const TOOLTIP_OFFSET_X: f64 = 12.0;
pub const TOOLTIP_OFFSET_Y: f64 = -28.0;

fn ease_cubic_in_out(t: f64) -> f64 {
	let t = t * 2.0;
	if t <= 1.0 {
		t * t * t / 2.0
	} else {
		let t = t - 2.0;
		(t * t * t + 2.0) / 2.0
	}
}

/// Only the primary button without ctrl starts a drag.
pub fn starts_drag(button: i16, ctrl_key: bool) -> bool {
	button == 0 && !ctrl_key
}

/// Active drag gestures. Several pointers may drag at once; the simulation
/// is only re-energized by the first and calmed by the last.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub gestures: Vec<NodeIdx>,
}

impl DragState {
	pub fn is_active(&self) -> bool {
		!self.gestures.is_empty()
	}

	/// Returns whether this is the only gesture.
	pub fn begin(&mut self, node: NodeIdx) -> bool {
		self.gestures.push(node);
		self.gestures.len() == 1
	}

	/// The most recent gesture, which pointer moves apply to.
	pub fn current(&self) -> Option<NodeIdx> {
		self.gestures.last().copied()
	}

	/// Ends the most recent gesture. Returns its node and whether no other
	/// gesture remains.
	pub fn end(&mut self) -> Option<(NodeIdx, bool)> {
		let node = self.gestures.pop()?;
		Some((node, self.gestures.is_empty()))
	}

	/// Ends every gesture, most recent first.
	pub fn end_all(&mut self) -> Vec<NodeIdx> {
		let mut nodes: Vec<_> = self.gestures.drain(..).collect();
		nodes.reverse();
		nodes
	}
}

#[derive(Clone, Debug, Default)]
pub struct HoverState {
	pub node: Option<NodeIdx>,
}

/// Opacity animation between two values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Fade {
	from: f64,
	to: f64,
	start: f64,
	duration: f64,
}

impl Fade {
	pub fn value(&self, now: f64) -> f64 {
		if self.duration <= 0.0 || now >= self.start + self.duration {
			return self.to;
		}
		let t = ((now - self.start) / self.duration).max(0.0);
		self.from + (self.to - self.from) * ease_cubic_in_out(t)
	}

	pub fn is_done(&self, now: f64) -> bool {
		now >= self.start + self.duration
	}

	pub fn target(&self) -> f64 {
		self.to
	}

	/// Start a new fade from wherever the current one is at `now`.
	pub fn retarget(&mut self, now: f64, to: f64, duration: f64) {
		self.from = self.value(now);
		self.to = to;
		self.start = now;
		self.duration = duration;
	}
}

/// Floating info box shown while hovering a node.
#[derive(Clone, Debug, Default)]
pub struct Tooltip {
	pub id: String,
	pub group: Option<NodeGroup>,
	pub left: f64,
	pub top: f64,
	fade: Fade,
	opacity: f64,
	visible: bool,
}

impl Tooltip {
	pub fn show(&mut self, id: &str, group: NodeGroup, page_x: f64, page_y: f64, now: f64) {
		self.id = id.to_string();
		self.group = Some(group);
		self.left = page_x + TOOLTIP_OFFSET_X;
		self.top = page_y + TOOLTIP_OFFSET_Y;
		self.visible = true;
		self.fade.retarget(now, TOOLTIP_OPACITY, TOOLTIP_FADE_IN_MS);
		self.opacity = self.fade.value(now);
	}

	pub fn hide(&mut self, now: f64) {
		self.fade.retarget(now, 0.0, TOOLTIP_FADE_OUT_MS);
		self.opacity = self.fade.value(now);
	}

	/// Advance the fade; the box disappears once fully faded out.
	pub fn advance(&mut self, now: f64) {
		self.opacity = self.fade.value(now);
		if self.fade.target() == 0.0 && self.fade.is_done(now) {
			self.visible = false;
		}
	}

	pub fn opacity(&self) -> f64 {
		self.opacity
	}

	pub fn is_visible(&self) -> bool {
		self.visible
	}

	/// Second line of the box.
	pub fn caption(&self) -> String {
		match self.group {
			Some(group) => format!("Type: {}", group),
			None => String::new(),
		}
	}
}
