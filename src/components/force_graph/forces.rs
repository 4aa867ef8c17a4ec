//! Velocity contributions applied on every simulation tick.
//!
//! Each force reads positions from the bodies and nudges their velocities,
//! except centering which translates positions directly.

use super::store::Body;
use super::types::NodeIdx;

/// Deterministic source for the tiny offsets that separate coincident nodes.
#[derive(Clone, Debug)]
pub struct Jiggle {
	state: u64,
}

impl Default for Jiggle {
	fn default() -> Self {
		Self { state: 1 }
	}
}

impl Jiggle {
	const A: u64 = 1_664_525;
	const C: u64 = 1_013_904_223;
	const M: u64 = 1 << 32;

	fn next_unit(&mut self) -> f64 {
		self.state = (Self::A * self.state + Self::C) % Self::M;
		self.state as f64 / Self::M as f64
	}

	pub fn offset(&mut self) -> f64 {
		(self.next_unit() - 0.5) * 1e-6
	}

	fn or_jiggle(&mut self, v: f64) -> f64 {
		if v == 0.0 || v.is_nan() { self.offset() } else { v }
	}
}

/// A spring between two active nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
	pub source: NodeIdx,
	pub target: NodeIdx,
	pub strength: f64,
	/// Share of the correction applied to the target.
	pub bias: f64,
}

impl Spring {
	/// Build springs with strength and bias derived from endpoint degrees.
	pub fn from_pairs(pairs: &[(NodeIdx, NodeIdx)], body_count: usize) -> Vec<Spring> {
		let mut degree = vec![0usize; body_count];
		for &(s, t) in pairs {
			degree[s.0] += 1;
			degree[t.0] += 1;
		}
		pairs
			.iter()
			.map(|&(source, target)| {
				let (ds, dt) = (degree[source.0] as f64, degree[target.0] as f64);
				Spring {
					source,
					target,
					strength: 1.0 / ds.min(dt),
					bias: ds / (ds + dt),
				}
			})
			.collect()
	}
}

/// Pull linked nodes toward `distance` apart.
pub fn apply_links(
	springs: &[Spring],
	bodies: &mut [Body],
	distance: f64,
	alpha: f64,
	jiggle: &mut Jiggle,
) {
	for spring in springs {
		let (s, t) = (spring.source.0, spring.target.0);
		let x = jiggle.or_jiggle(bodies[t].x + bodies[t].vx - bodies[s].x - bodies[s].vx);
		let y = jiggle.or_jiggle(bodies[t].y + bodies[t].vy - bodies[s].y - bodies[s].vy);
		let l = (x * x + y * y).sqrt();
		let l = (l - distance) / l * alpha * spring.strength;
		let (x, y) = (x * l, y * l);

		let b = spring.bias;
		bodies[t].vx -= x * b;
		bodies[t].vy -= y * b;
		bodies[s].vx += x * (1.0 - b);
		bodies[s].vy += y * (1.0 - b);
	}
}

/// Pairwise inverse-square interaction; negative strength repels.
pub fn apply_many_body(
	nodes: &[NodeIdx],
	bodies: &mut [Body],
	strength: f64,
	alpha: f64,
	jiggle: &mut Jiggle,
) {
	const DISTANCE_MIN_SQ: f64 = 1.0;

	let positions: Vec<(f64, f64)> = nodes
		.iter()
		.map(|n| (bodies[n.0].x, bodies[n.0].y))
		.collect();
	for (i, node) in nodes.iter().enumerate() {
		let (xi, yi) = positions[i];
		let (mut dvx, mut dvy) = (0.0, 0.0);
		for (j, &(xj, yj)) in positions.iter().enumerate() {
			if i == j {
				continue;
			}
			let (mut x, mut y) = (xj - xi, yj - yi);
			let mut l = x * x + y * y;
			if x == 0.0 {
				x = jiggle.offset();
				l += x * x;
			}
			if y == 0.0 {
				y = jiggle.offset();
				l += y * y;
			}
			if l < DISTANCE_MIN_SQ {
				l = (DISTANCE_MIN_SQ * l).sqrt();
			}
			let w = strength * alpha / l;
			dvx += x * w;
			dvy += y * w;
		}
		bodies[node.0].vx += dvx;
		bodies[node.0].vy += dvy;
	}
}

/// Translate all nodes so their mean position sits on `(cx, cy)`.
pub fn apply_center(nodes: &[NodeIdx], bodies: &mut [Body], cx: f64, cy: f64, strength: f64) {
	if nodes.is_empty() {
		return;
	}
	let n = nodes.len() as f64;
	let (sx, sy) = nodes.iter().fold((0.0, 0.0), |(sx, sy), idx| {
		(sx + bodies[idx.0].x, sy + bodies[idx.0].y)
	});
	let (sx, sy) = ((sx / n - cx) * strength, (sy / n - cy) * strength);
	for idx in nodes {
		bodies[idx.0].x -= sx;
		bodies[idx.0].y -= sy;
	}
}

/// Push apart nodes whose next positions overlap circles of `radius`.
pub fn apply_collide(
	nodes: &[NodeIdx],
	bodies: &mut [Body],
	radius: f64,
	strength: f64,
	jiggle: &mut Jiggle,
) {
	let r = radius + radius;
	// equal radii split the correction evenly
	let share = (radius * radius) / (radius * radius + radius * radius);

	for (i, a) in nodes.iter().enumerate() {
		let xi = bodies[a.0].x + bodies[a.0].vx;
		let yi = bodies[a.0].y + bodies[a.0].vy;
		for b in &nodes[i + 1..] {
			let mut x = xi - bodies[b.0].x - bodies[b.0].vx;
			let mut y = yi - bodies[b.0].y - bodies[b.0].vy;
			let mut l = x * x + y * y;
			if l >= r * r {
				continue;
			}
			if x == 0.0 {
				x = jiggle.offset();
				l += x * x;
			}
			if y == 0.0 {
				y = jiggle.offset();
				l += y * y;
			}
			let d = l.sqrt();
			let k = (r - d) / d * strength;
			x *= k;
			y *= k;
			bodies[a.0].vx += x * share;
			bodies[a.0].vy += y * share;
			bodies[b.0].vx -= x * (1.0 - share);
			bodies[b.0].vy -= y * (1.0 - share);
		}
	}
}
