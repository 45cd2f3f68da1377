//! Particle and spring physics the viewer delegates its layout to.
//!
//! A small particle system with three kinds of force: global gravity and
//! drag, damped Hooke springs with a rest length, and inverse-square
//! attractions (negative strength repels). Time is advanced with a
//! fourth-order Runge-Kutta integrator. Fixed particles never move and do
//! not accumulate force.

use glam::Vec2;

/// Smallest mass a particle may have. Forces are divided by mass.
pub const MIN_MASS: f32 = 1e-3;

/// Handle to a particle. Particles are never removed, so handles stay valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId(usize);

/// Handle to a spring. Stays unique after the spring is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpringId(u64);

/// Handle to an attraction. Stays unique after the attraction is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttractionId(u64);

/// A point mass.
#[derive(Clone, Debug)]
pub struct Particle {
	/// World position.
	pub position: Vec2,
	/// World units per unit of simulated time.
	pub velocity: Vec2,
	/// Force accumulated during the current integration stage.
	pub force: Vec2,
	/// Never below [`MIN_MASS`] for particles made by a [`ParticleSystem`].
	pub mass: f32,
	/// Seconds of simulated time this particle has existed.
	pub age: f32,
	fixed: bool,
}

impl Particle {
	fn new(mass: f32, position: Vec2) -> Self {
		Self {
			position,
			velocity: Vec2::ZERO,
			force: Vec2::ZERO,
			mass,
			age: 0.0,
			fixed: false,
		}
	}

	/// Pin the particle in place. Velocity is discarded.
	pub fn make_fixed(&mut self) {
		self.fixed = true;
		self.velocity = Vec2::ZERO;
	}

	/// Let the particle respond to forces again.
	pub fn make_free(&mut self) {
		self.fixed = false;
	}

	/// True while pinned.
	pub fn is_fixed(&self) -> bool {
		self.fixed
	}

	/// True while the particle responds to forces.
	pub fn is_free(&self) -> bool {
		!self.fixed
	}

	/// Move the particle without touching its velocity.
	pub fn set_position(&mut self, x: f32, y: f32) {
		self.position = Vec2::new(x, y);
	}
}

/// Damped spring between two particles.
#[derive(Clone, Debug)]
pub struct Spring {
	id: SpringId,
	/// One end.
	pub a: ParticleId,
	/// The other end.
	pub b: ParticleId,
	/// Hooke constant.
	pub strength: f32,
	/// Opposes the relative velocity of the ends along the spring.
	pub damping: f32,
	/// Length at which the spring exerts no force.
	pub rest_length: f32,
}

impl Spring {
	/// Handle this spring was created with.
	pub fn id(&self) -> SpringId {
		self.id
	}

	/// True if this spring joins `p1` and `p2` in either orientation.
	pub fn connects(&self, p1: ParticleId, p2: ParticleId) -> bool {
		(self.a == p1 && self.b == p2) || (self.a == p2 && self.b == p1)
	}
}

/// Inverse-square force between two particles.
#[derive(Clone, Debug)]
pub struct Attraction {
	id: AttractionId,
	/// One end.
	pub a: ParticleId,
	/// The other end.
	pub b: ParticleId,
	/// Positive attracts, negative repels.
	pub strength: f32,
	/// Distance below which the force stops growing.
	pub min_distance: f32,
}

impl Attraction {
	/// Handle this attraction was created with.
	pub fn id(&self) -> AttractionId {
		self.id
	}

	/// True if this attraction joins `p1` and `p2` in either orientation.
	pub fn connects(&self, p1: ParticleId, p2: ParticleId) -> bool {
		(self.a == p1 && self.b == p2) || (self.a == p2 && self.b == p1)
	}
}

/// Owns every particle, spring and attraction in a simulation.
#[derive(Clone, Debug)]
pub struct ParticleSystem {
	gravity: Vec2,
	drag: f32,
	particles: Vec<Particle>,
	springs: Vec<Spring>,
	attractions: Vec<Attraction>,
	next_id: u64,
}

impl ParticleSystem {
	/// Empty system with a gravity vector and drag coefficient.
	pub fn new(gravity: Vec2, drag: f32) -> Self {
		Self {
			gravity,
			drag,
			particles: Vec::new(),
			springs: Vec::new(),
			attractions: Vec::new(),
			next_id: 0,
		}
	}

	/// Drag on every particle, proportional to velocity.
	pub fn set_drag(&mut self, drag: f32) {
		self.drag = drag;
	}

	/// Current drag coefficient.
	pub fn drag(&self) -> f32 {
		self.drag
	}

	/// Acceleration applied to every free particle.
	pub fn set_gravity(&mut self, gravity: Vec2) {
		self.gravity = gravity;
	}

	/// Current gravity vector.
	pub fn gravity(&self) -> Vec2 {
		self.gravity
	}

	/// Add a free particle at rest. `mass` is raised to at least [`MIN_MASS`].
	pub fn make_particle(&mut self, mass: f32, x: f32, y: f32) -> ParticleId {
		let mass = if mass >= MIN_MASS { mass } else { MIN_MASS };
		self.particles.push(Particle::new(mass, Vec2::new(x, y)));
		ParticleId(self.particles.len() - 1)
	}

	/// Look up a particle.
	pub fn particle(&self, id: ParticleId) -> Option<&Particle> {
		self.particles.get(id.0)
	}

	/// Look up a particle for modification.
	pub fn particle_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
		self.particles.get_mut(id.0)
	}

	/// All particles in creation order.
	pub fn particles(&self) -> impl Iterator<Item = &Particle> {
		self.particles.iter()
	}

	/// Number of particles.
	pub fn num_particles(&self) -> usize {
		self.particles.len()
	}

	/// Join two particles with a damped spring.
	pub fn make_spring(
		&mut self,
		a: ParticleId,
		b: ParticleId,
		strength: f32,
		damping: f32,
		rest_length: f32,
	) -> SpringId {
		let id = SpringId(self.bump_id());
		self.springs.push(Spring {
			id,
			a,
			b,
			strength,
			damping,
			rest_length,
		});
		id
	}

	/// Look up a spring.
	pub fn spring(&self, id: SpringId) -> Option<&Spring> {
		self.springs.iter().find(|s| s.id == id)
	}

	/// All springs in creation order.
	pub fn springs(&self) -> impl Iterator<Item = &Spring> {
		self.springs.iter()
	}

	/// Number of springs.
	pub fn num_springs(&self) -> usize {
		self.springs.len()
	}

	/// First spring joining the two particles that also satisfies `filter`.
	pub fn find_spring(
		&self,
		p1: ParticleId,
		p2: ParticleId,
		filter: impl Fn(&Spring) -> bool,
	) -> Option<SpringId> {
		self.springs
			.iter()
			.find(|s| s.connects(p1, p2) && filter(s))
			.map(|s| s.id)
	}

	/// Remove a spring, returning it if it existed.
	pub fn remove_spring(&mut self, id: SpringId) -> Option<Spring> {
		let pos = self.springs.iter().position(|s| s.id == id)?;
		Some(self.springs.remove(pos))
	}

	/// Add an inverse-square force between two particles.
	pub fn make_attraction(
		&mut self,
		a: ParticleId,
		b: ParticleId,
		strength: f32,
		min_distance: f32,
	) -> AttractionId {
		let id = AttractionId(self.bump_id());
		self.attractions.push(Attraction {
			id,
			a,
			b,
			strength,
			min_distance,
		});
		id
	}

	/// Look up an attraction.
	pub fn attraction(&self, id: AttractionId) -> Option<&Attraction> {
		self.attractions.iter().find(|a| a.id == id)
	}

	/// All attractions in creation order.
	pub fn attractions(&self) -> impl Iterator<Item = &Attraction> {
		self.attractions.iter()
	}

	/// Number of attractions.
	pub fn num_attractions(&self) -> usize {
		self.attractions.len()
	}

	/// First attraction joining the two particles.
	pub fn find_attraction(&self, p1: ParticleId, p2: ParticleId) -> Option<AttractionId> {
		self.attractions
			.iter()
			.find(|a| a.connects(p1, p2))
			.map(|a| a.id)
	}

	/// Remove an attraction, returning it if it existed.
	pub fn remove_attraction(&mut self, id: AttractionId) -> Option<Attraction> {
		let pos = self.attractions.iter().position(|a| a.id == id)?;
		Some(self.attractions.remove(pos))
	}

	fn bump_id(&mut self) -> u64 {
		let id = self.next_id;
		self.next_id += 1;
		id
	}

	/// Advance the simulation by `dt` using RK4.
	pub fn tick(&mut self, dt: f32) {
		let n = self.particles.len();
		if n == 0 {
			return;
		}

		let start: Vec<(Vec2, Vec2)> = self
			.particles
			.iter()
			.map(|p| (p.position, p.velocity))
			.collect();
		// (velocity, force) samples for each of the four stages
		let mut k = [
			vec![(Vec2::ZERO, Vec2::ZERO); n],
			vec![(Vec2::ZERO, Vec2::ZERO); n],
			vec![(Vec2::ZERO, Vec2::ZERO); n],
			vec![(Vec2::ZERO, Vec2::ZERO); n],
		];
		let stage_step = [0.5 * dt, 0.5 * dt, dt];

		for stage in 0..4 {
			self.apply_forces();
			for (i, p) in self.particles.iter().enumerate() {
				k[stage][i] = (p.velocity, p.force);
			}
			if stage == 3 {
				break;
			}
			let h = stage_step[stage];
			for (i, p) in self.particles.iter_mut().enumerate() {
				if p.fixed {
					continue;
				}
				let (pos0, vel0) = start[i];
				let (kv, kf) = k[stage][i];
				p.position = pos0 + kv * h;
				p.velocity = vel0 + kf * (h / p.mass);
			}
		}

		for (i, p) in self.particles.iter_mut().enumerate() {
			p.age += dt;
			if p.fixed {
				continue;
			}
			let (pos0, vel0) = start[i];
			let dv = k[0][i].0 + 2.0 * k[1][i].0 + 2.0 * k[2][i].0 + k[3][i].0;
			let df = k[0][i].1 + 2.0 * k[1][i].1 + 2.0 * k[2][i].1 + k[3][i].1;
			p.position = pos0 + dv * (dt / 6.0);
			p.velocity = vel0 + df * (dt / (6.0 * p.mass));
		}
	}

	fn apply_forces(&mut self) {
		let (gravity, drag) = (self.gravity, self.drag);
		for p in &mut self.particles {
			p.force = Vec2::ZERO;
			if p.fixed {
				continue;
			}
			p.force += gravity * p.mass;
			p.force -= p.velocity * drag;
		}

		for s in &self.springs {
			let (pa, pb) = (&self.particles[s.a.0], &self.particles[s.b.0]);
			let delta = pa.position - pb.position;
			let len = delta.length();
			let dir = if len > 0.0 { delta / len } else { Vec2::ZERO };
			let spring_force = -(len - s.rest_length) * s.strength;
			let damping_force = -s.damping * dir.dot(pa.velocity - pb.velocity);
			let f = dir * (spring_force + damping_force);
			push_force(&mut self.particles, s.a, f);
			push_force(&mut self.particles, s.b, -f);
		}

		for a in &self.attractions {
			let (pa, pb) = (&self.particles[a.a.0], &self.particles[a.b.0]);
			let delta = pa.position - pb.position;
			let d2 = delta.length_squared().max(a.min_distance * a.min_distance);
			let magnitude = a.strength * pa.mass * pb.mass / d2;
			let len = delta.length();
			let dir = if len > 0.0 { delta / len } else { Vec2::ZERO };
			let f = dir * magnitude;
			push_force(&mut self.particles, a.a, -f);
			push_force(&mut self.particles, a.b, f);
		}
	}
}

fn push_force(particles: &mut [Particle], id: ParticleId, f: Vec2) {
	let p = &mut particles[id.0];
	if !p.fixed {
		p.force += f;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn distance(sys: &ParticleSystem, a: ParticleId, b: ParticleId) -> f32 {
		let (pa, pb) = (sys.particle(a).unwrap(), sys.particle(b).unwrap());
		pa.position.distance(pb.position)
	}

	#[test]
	fn stretched_spring_settles_near_rest_length() {
		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.75);
		let a = sys.make_particle(1.0, 0.0, 0.0);
		let b = sys.make_particle(1.0, 100.0, 0.0);
		sys.make_spring(a, b, 0.5, 0.1, 40.0);

		for _ in 0..2000 {
			sys.tick(0.3);
		}
		assert!((distance(&sys, a, b) - 40.0).abs() < 0.5);
	}

	#[test]
	fn fixed_particle_does_not_move() {
		let mut sys = ParticleSystem::new(Vec2::new(0.0, 1.0), 0.1);
		let a = sys.make_particle(1.0, 0.0, 0.0);
		let b = sys.make_particle(1.0, 50.0, 0.0);
		sys.make_spring(a, b, 1.0, 0.1, 10.0);
		sys.particle_mut(a).unwrap().make_fixed();

		for _ in 0..100 {
			sys.tick(0.3);
		}
		let pa = sys.particle(a).unwrap();
		assert_eq!(pa.position, Vec2::ZERO);
		assert_eq!(pa.velocity, Vec2::ZERO);
		assert_ne!(sys.particle(b).unwrap().position, Vec2::new(50.0, 0.0));
	}

	#[test]
	fn attraction_sign_controls_direction() {
		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.0);
		let a = sys.make_particle(1.0, 0.0, 0.0);
		let b = sys.make_particle(1.0, 10.0, 0.0);
		sys.make_attraction(a, b, 50.0, 0.1);
		sys.tick(0.1);
		assert!(distance(&sys, a, b) < 10.0);

		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.0);
		let a = sys.make_particle(1.0, 0.0, 0.0);
		let b = sys.make_particle(1.0, 10.0, 0.0);
		sys.make_attraction(a, b, -50.0, 0.1);
		sys.tick(0.1);
		assert!(distance(&sys, a, b) > 10.0);
	}

	#[test]
	fn drag_slows_free_particle() {
		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.75);
		let a = sys.make_particle(1.0, 0.0, 0.0);
		sys.particle_mut(a).unwrap().velocity = Vec2::new(10.0, 0.0);
		sys.tick(0.3);
		let v = sys.particle(a).unwrap().velocity.x;
		assert!(v > 0.0 && v < 10.0);
	}

	#[test]
	fn springs_found_in_either_orientation_and_removed() {
		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.75);
		let a = sys.make_particle(1.0, 0.0, 0.0);
		let b = sys.make_particle(1.0, 1.0, 0.0);
		let edge = sys.make_spring(a, b, 1.0, 0.1, 1.0);
		let extra = sys.make_spring(b, a, 0.5, 0.1, 3.0);

		assert_eq!(sys.find_spring(b, a, |_| true), Some(edge));
		assert_eq!(sys.find_spring(a, b, |s| s.strength != 1.0), Some(extra));

		assert!(sys.remove_spring(edge).is_some());
		assert!(sys.remove_spring(edge).is_none());
		assert_eq!(sys.num_springs(), 1);
		assert_eq!(sys.spring(extra).map(|s| s.rest_length), Some(3.0));
	}

	#[test]
	fn coincident_particles_stay_finite() {
		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.75);
		let a = sys.make_particle(1.0, 5.0, 5.0);
		let b = sys.make_particle(1.0, 5.0, 5.0);
		sys.make_spring(a, b, 1.0, 0.1, 10.0);
		sys.make_attraction(a, b, -1.0, 0.1);
		sys.tick(0.3);
		assert!(sys.particles().all(|p| p.position.is_finite()));
	}

	#[test]
	fn massless_particle_is_given_minimum_mass() {
		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.75);
		let a = sys.make_particle(0.0, 0.0, 0.0);
		let b = sys.make_particle(-2.0, 30.0, 0.0);
		sys.make_spring(a, b, 1.0, 0.1, 10.0);
		assert!(sys.particles().all(|p| p.mass == MIN_MASS));

		sys.tick(0.3);
		assert!(sys.particles().all(|p| p.position.is_finite() && p.velocity.is_finite()));
	}

	#[test]
	fn tick_ages_every_particle() {
		let mut sys = ParticleSystem::new(Vec2::ZERO, 0.75);
		let a = sys.make_particle(1.0, 0.0, 0.0);
		sys.particle_mut(a).unwrap().make_fixed();
		sys.make_particle(1.0, 1.0, 0.0);
		sys.tick(0.3);
		sys.tick(0.3);
		assert!(sys.particles().all(|p| (p.age - 0.6).abs() < 1e-6));
	}
}
