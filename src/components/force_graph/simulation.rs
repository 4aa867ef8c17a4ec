use std::f64::consts::PI;

use super::forces::{Jiggle, Spring, apply_center, apply_collide, apply_links, apply_many_body};
use super::store::Body;
use super::types::NodeIdx;

const INITIAL_RADIUS: f64 = 10.0;

/// Strengths and distances of the individual forces.
#[derive(Clone, Debug, PartialEq)]
pub struct ForceParameters {
	pub link_distance: f64,
	pub charge_strength: f64,
	pub center_x: f64,
	pub center_y: f64,
	pub center_strength: f64,
	pub collide_radius: f64,
	pub collide_strength: f64,
}

impl Default for ForceParameters {
	fn default() -> Self {
		Self {
			link_distance: 160.0,
			charge_strength: -800.0,
			center_x: 0.0,
			center_y: 0.0,
			center_strength: 1.0,
			collide_radius: 45.0,
			collide_strength: 1.0,
		}
	}
}

impl ForceParameters {
	/// Center the layout on a viewport of the given size.
	pub fn centered(mut self, width: f64, height: f64) -> Self {
		self.center_x = width / 2.0;
		self.center_y = height / 2.0;
		self
	}
}

/// How fast the simulation cools down.
#[derive(Clone, Debug, PartialEq)]
pub struct AlphaSettings {
	pub alpha_min: f64,
	pub alpha_decay: f64,
	/// Fraction of velocity removed every tick.
	pub velocity_decay: f64,
	/// Target alpha held while a node is dragged.
	pub drag_target: f64,
}

impl Default for AlphaSettings {
	fn default() -> Self {
		let alpha_min = 0.001;
		Self {
			alpha_min,
			// reach alpha_min after ~300 ticks
			alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
			velocity_decay: 0.4,
			drag_target: 0.3,
		}
	}
}

/// Force-directed layout over the active subset of the store's bodies.
///
/// The simulation does not own positions; it is handed the body table on
/// every call and only touches the entries of its active nodes.
pub struct Simulation {
	forces: ForceParameters,
	settings: AlphaSettings,
	alpha: f64,
	alpha_target: f64,
	running: bool,
	nodes: Vec<NodeIdx>,
	springs: Vec<Spring>,
	jiggle: Jiggle,
}

impl Simulation {
	pub fn new(forces: ForceParameters, settings: AlphaSettings) -> Self {
		Self {
			forces,
			settings,
			alpha: 1.0,
			alpha_target: 0.0,
			running: true,
			nodes: Vec::new(),
			springs: Vec::new(),
			jiggle: Jiggle::default(),
		}
	}

	pub fn settings(&self) -> &AlphaSettings {
		&self.settings
	}

	#[cfg(test)]
	pub fn alpha(&self) -> f64 {
		self.alpha
	}

	pub fn set_alpha(&mut self, alpha: f64) -> &mut Self {
		self.alpha = alpha;
		self
	}

	#[cfg(test)]
	pub fn alpha_target(&self) -> f64 {
		self.alpha_target
	}

	pub fn set_alpha_target(&mut self, target: f64) -> &mut Self {
		self.alpha_target = target;
		self
	}

	#[cfg(test)]
	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn restart(&mut self) -> &mut Self {
		self.running = true;
		self
	}

	pub fn stop(&mut self) -> &mut Self {
		self.running = false;
		self
	}

	/// Replace the active nodes and links.
	///
	/// Pinned nodes snap to their override, never-placed nodes are seeded on
	/// a spiral and existing positions are kept.
	pub fn set_graph(
		&mut self,
		nodes: Vec<NodeIdx>,
		links: &[(NodeIdx, NodeIdx)],
		bodies: &mut [Body],
	) {
		let golden_angle = PI * (3.0 - 5f64.sqrt());
		for (i, idx) in nodes.iter().enumerate() {
			let body = &mut bodies[idx.0];
			if !body.placed {
				let radius = INITIAL_RADIUS * (0.5 + i as f64).sqrt();
				let angle = i as f64 * golden_angle;
				body.x = radius * angle.cos();
				body.y = radius * angle.sin();
				body.vx = 0.0;
				body.vy = 0.0;
				body.placed = true;
			}
			if let Some(fx) = body.fx {
				body.x = fx;
			}
			if let Some(fy) = body.fy {
				body.y = fy;
			}
		}
		self.springs = Spring::from_pairs(links, bodies.len());
		self.nodes = nodes;
	}

	/// Advance one frame. Returns whether positions changed.
	pub fn step(&mut self, bodies: &mut [Body]) -> bool {
		if !self.running {
			return false;
		}
		self.tick(bodies);
		if self.alpha < self.settings.alpha_min {
			self.stop();
		}
		true
	}

	/// One integration step, regardless of whether the simulation is running.
	pub fn tick(&mut self, bodies: &mut [Body]) {
		self.alpha += (self.alpha_target - self.alpha) * self.settings.alpha_decay;
		let alpha = self.alpha;
		let f = &self.forces;

		apply_links(&self.springs, bodies, f.link_distance, alpha, &mut self.jiggle);
		apply_many_body(&self.nodes, bodies, f.charge_strength, alpha, &mut self.jiggle);
		apply_center(&self.nodes, bodies, f.center_x, f.center_y, f.center_strength);
		apply_collide(
			&self.nodes,
			bodies,
			f.collide_radius,
			f.collide_strength,
			&mut self.jiggle,
		);

		let keep = 1.0 - self.settings.velocity_decay;
		for idx in &self.nodes {
			let body = &mut bodies[idx.0];
			match body.fx {
				Some(fx) => {
					body.x = fx;
					body.vx = 0.0;
				}
				None => {
					body.vx *= keep;
					body.x += body.vx;
				}
			}
			match body.fy {
				Some(fy) => {
					body.y = fy;
					body.vy = 0.0;
				}
				None => {
					body.vy *= keep;
					body.y += body.vy;
				}
			}
		}
	}
}
