//! The particle viewer: nodes and edges mapped onto a particle system.
//!
//! Every node owns one particle and every edge one spring. Extra forces and
//! weaker springs can be placed between any pair of nodes. Each frame the
//! camera eases towards the bounding box of all particles, the simulation
//! advances unless paused, and a mouse-selected node is pinned under the
//! cursor.

use std::collections::HashMap;

use glam::Vec2;
use log::{debug, warn};

use super::camera::{self, Smoother3};
use super::config::ViewerConfig;
use super::error::{PairEnd, Result, ViewerError};
use super::physics::{ParticleId, ParticleSystem, SpringId};
use super::types::{Edge, Node};
use super::zoom_pan::ZoomPan;

/// Animated, interactive spring-embedder layout of a network.
pub struct ParticleViewer<N: Node, E: Edge<N>> {
	physics: ParticleSystem,
	centroid: Smoother3,
	zoomer: ZoomPan,
	nodes: HashMap<N, ParticleId>,
	edges: HashMap<E, SpringId>,
	selected: Option<N>,
	config: ViewerConfig,
	width: f32,
	height: f32,
	paused: bool,
}

impl<N: Node, E: Edge<N>> ParticleViewer<N, E> {
	/// Empty viewer for a `width` x `height` view with default tuning.
	pub fn new(width: f32, height: f32) -> Self {
		Self::with_config(width, height, ViewerConfig::default())
	}

	/// Empty viewer with explicit tuning.
	pub fn with_config(width: f32, height: f32, config: ViewerConfig) -> Self {
		Self {
			physics: ParticleSystem::new(Vec2::new(0.0, config.gravity), config.drag),
			centroid: Smoother3::new(config.camera_smoothness, [0.0, 0.0, 1.0]),
			zoomer: ZoomPan::new(config.mouse_mask),
			nodes: HashMap::new(),
			edges: HashMap::new(),
			selected: None,
			config,
			width,
			height,
			paused: false,
		}
	}

	/// Everything a frame does apart from drawing: centre the camera,
	/// advance the simulation unless paused, and keep any selected node
	/// under the mouse.
	pub fn advance_frame(&mut self) {
		self.update_centroid();
		self.centroid.tick();

		if !self.paused {
			self.update_particles();
		}

		if let Some(node) = &self.selected {
			let mouse = self.mouse_world();
			if let Some(p) = self
				.nodes
				.get(node)
				.and_then(|&id| self.physics.particle_mut(id))
			{
				p.make_fixed();
				p.set_position(mouse.x, mouse.y);
			}
		}
	}

	/// Advance the simulation one step without touching the camera. Call
	/// more than once per frame to speed the layout up.
	pub fn update_particles(&mut self) {
		self.physics.tick(self.config.time_step);
	}

	/// Drag on all particles (larger is slower). Defaults to 0.75.
	pub fn set_drag(&mut self, drag: f32) {
		self.physics.set_drag(drag);
	}

	/// Current drag on all particles.
	pub fn drag(&self) -> f32 {
		self.physics.drag()
	}

	/// Create an attractive (positive) or repulsive (negative) force between
	/// two nodes, replacing any force already between them.
	pub fn add_force(&mut self, node1: &N, node2: &N, force: f32) -> Result<()> {
		let (p1, p2) = self.particle_pair(node1, node2)?;

		if let Some(old) = self.physics.find_attraction(p1, p2) {
			self.physics.remove_attraction(old);
		}
		self.physics
			.make_attraction(p1, p2, force, self.config.attraction_min_distance);
		Ok(())
	}

	/// Create a spring of the given rest length between two nodes. Replaces
	/// an earlier `add_spring` spring between the same pair, but never an
	/// edge's spring. Weaker than edge springs.
	pub fn add_spring(&mut self, node1: &N, node2: &N, length: f32) -> Result<()> {
		let (p1, p2) = self.particle_pair(node1, node2)?;

		let edge_strength = self.config.edge_strength;
		if let Some(old) = self
			.physics
			.find_spring(p1, p2, |s| s.strength != edge_strength)
		{
			self.physics.remove_spring(old);
		}
		self.physics.make_spring(
			p1,
			p2,
			self.config.spring_strength,
			self.config.damping,
			length,
		);
		Ok(())
	}

	/// Add a node with a particle at its location.
	pub fn add_node(&mut self, node: N) {
		let at = node.location();
		let p = self.physics.make_particle(self.config.node_mass, at.x, at.y);
		self.nodes.insert(node, p);
	}

	/// Add an edge between two nodes already in the viewer. The edge's
	/// spring rests at the current distance between them. Adding an edge
	/// that is already present changes nothing.
	pub fn add_edge(&mut self, edge: E) -> Result<()> {
		let Some(&p1) = self.nodes.get(edge.node1()) else {
			warn!("particle-view: node1 not found when creating edge");
			return Err(ViewerError::MissingNode {
				end: PairEnd::First,
			});
		};
		let Some(&p2) = self.nodes.get(edge.node2()) else {
			warn!("particle-view: node2 not found when creating edge");
			return Err(ViewerError::MissingNode {
				end: PairEnd::Second,
			});
		};

		if !self.edges.contains_key(&edge) {
			let rest = self.position_of(p1).distance(self.position_of(p2));
			let spring = self.physics.make_spring(
				p1,
				p2,
				self.config.edge_strength,
				self.config.damping,
				rest,
			);
			self.edges.insert(edge, spring);
		}
		Ok(())
	}

	/// Select the node nearest the mouse, unless the zoomer owns the mouse or
	/// a node is already selected.
	pub fn select_nearest_with_mouse(&mut self) {
		if self.zoomer.is_mouse_captured() || self.selected.is_some() {
			return;
		}
		let mouse = self.mouse_world();

		let mut nearest = f32::MAX;
		for (node, &id) in &self.nodes {
			let d2 = self.position_of(id).distance_squared(mouse);
			if d2 < nearest {
				nearest = d2;
				self.selected = Some(node.clone());
			}
		}
		if self.selected.is_some() {
			debug!("particle-view: selected node at distance {}", nearest.sqrt());
		}
	}

	/// Release the selected node so it moves with the layout again.
	pub fn drop_selected(&mut self) {
		if self.zoomer.is_mouse_captured() {
			return;
		}
		if let Some(node) = self.selected.take() {
			if let Some(p) = self
				.nodes
				.get(&node)
				.and_then(|&id| self.physics.particle_mut(id))
			{
				p.make_free();
			}
		}
	}

	/// Undo any interactive zoom or pan.
	pub fn reset_view(&mut self) {
		self.zoomer.reset();
	}

	/// Stop or resume the simulation. The camera keeps easing either way.
	pub fn set_paused(&mut self, paused: bool) {
		self.paused = paused;
	}

	/// True while the simulation is stopped.
	pub fn is_paused(&self) -> bool {
		self.paused
	}

	/// Flip the paused state.
	pub fn toggle_paused(&mut self) {
		self.paused = !self.paused;
	}

	/// Node currently held by the mouse.
	pub fn selected(&self) -> Option<&N> {
		self.selected.as_ref()
	}

	/// Current world position of a node's particle.
	pub fn position(&self, node: &N) -> Option<Vec2> {
		let id = self.nodes.get(node)?;
		self.physics.particle(*id).map(|p| p.position)
	}

	/// Number of nodes added.
	pub fn num_nodes(&self) -> usize {
		self.nodes.len()
	}

	/// Number of distinct edges added.
	pub fn num_edges(&self) -> usize {
		self.edges.len()
	}

	/// The underlying particle system.
	pub fn physics(&self) -> &ParticleSystem {
		&self.physics
	}

	/// Interactive zoom/pan state.
	pub fn zoomer(&self) -> &ZoomPan {
		&self.zoomer
	}

	/// Interactive zoom/pan state, for feeding mouse events.
	pub fn zoomer_mut(&mut self) -> &mut ZoomPan {
		&mut self.zoomer
	}

	/// Tuning in effect.
	pub fn config(&self) -> &ViewerConfig {
		&self.config
	}

	/// View width and height.
	pub fn size(&self) -> (f32, f32) {
		(self.width, self.height)
	}

	/// Change the view size the camera fits the layout into.
	pub fn resize(&mut self, width: f32, height: f32) {
		self.width = width;
		self.height = height;
	}

	/// Smoothed camera centre and scale.
	pub fn centroid(&self) -> (Vec2, f32) {
		(
			Vec2::new(self.centroid.x(), self.centroid.y()),
			self.centroid.z(),
		)
	}

	/// Nodes with their particle positions.
	pub fn nodes(&self) -> impl Iterator<Item = (&N, Vec2)> {
		self.nodes
			.iter()
			.map(|(n, &id)| (n, self.position_of(id)))
	}

	/// Edges with the positions of both ends.
	pub fn edges(&self) -> impl Iterator<Item = (&E, Vec2, Vec2)> {
		self.edges.iter().filter_map(|(e, &id)| {
			let s = self.physics.spring(id)?;
			Some((e, self.position_of(s.a), self.position_of(s.b)))
		})
	}

	/// End positions of springs that do not belong to an edge.
	pub fn springs(&self) -> impl Iterator<Item = (Vec2, Vec2)> {
		let edge_strength = self.config.edge_strength;
		self.physics
			.springs()
			.filter(move |s| s.strength != edge_strength)
			.map(|s| (self.position_of(s.a), self.position_of(s.b)))
	}

	/// Mouse position mapped through the zoomer and the camera.
	pub fn mouse_world(&self) -> Vec2 {
		let (centre, scale) = self.centroid();
		let scale = if scale > 0.0 { scale } else { 1.0 };
		camera::screen_to_world(
			self.zoomer.mouse_coord(),
			self.width,
			self.height,
			centre,
			scale,
		)
	}

	fn update_centroid(&mut self) {
		let target = camera::centroid_target(
			self.physics.particles().map(|p| p.position),
			self.width,
			self.height,
			self.config.camera_margin,
		);
		if let Some([x, y, z]) = target {
			self.centroid.set_target(x, y, z);
		}
	}

	fn particle_pair(&self, node1: &N, node2: &N) -> Result<(ParticleId, ParticleId)> {
		let p1 = *self.nodes.get(node1).ok_or(ViewerError::MissingNode {
			end: PairEnd::First,
		})?;
		let p2 = *self.nodes.get(node2).ok_or(ViewerError::MissingNode {
			end: PairEnd::Second,
		})?;
		Ok((p1, p2))
	}

	fn position_of(&self, id: ParticleId) -> Vec2 {
		self.physics
			.particle(id)
			.map(|p| p.position)
			.unwrap_or(Vec2::ZERO)
	}
}

#[cfg(test)]
mod tests {
	use super::super::types::{NetworkEdge, NetworkNode};
	use super::super::zoom_pan::{Modifiers, MouseButton};
	use super::*;

	type Viewer = ParticleViewer<NetworkNode, NetworkEdge>;

	fn node(id: &str, x: f32, y: f32) -> NetworkNode {
		NetworkNode::new(id, Vec2::new(x, y))
	}

	fn edge(a: &NetworkNode, b: &NetworkNode) -> NetworkEdge {
		NetworkEdge {
			node1: a.clone(),
			node2: b.clone(),
		}
	}

	#[test]
	fn edge_requires_both_nodes() {
		let mut v = Viewer::new(400.0, 400.0);
		let (a, b) = (node("a", 0.0, 0.0), node("b", 30.0, 40.0));
		v.add_node(a.clone());

		assert_eq!(
			v.add_edge(edge(&a, &b)),
			Err(ViewerError::MissingNode {
				end: PairEnd::Second
			})
		);
		assert_eq!(
			v.add_edge(edge(&b, &a)),
			Err(ViewerError::MissingNode {
				end: PairEnd::First
			})
		);
		assert_eq!(v.num_edges(), 0);
	}

	#[test]
	fn edge_rests_at_current_distance_and_is_added_once() {
		let mut v = Viewer::new(400.0, 400.0);
		let (a, b) = (node("a", 0.0, 0.0), node("b", 30.0, 40.0));
		v.add_node(a.clone());
		v.add_node(b.clone());

		assert!(v.add_edge(edge(&a, &b)).is_ok());
		assert!(v.add_edge(edge(&b, &a)).is_ok());
		assert_eq!(v.num_edges(), 1);
		assert_eq!(v.physics().num_springs(), 1);

		let spring = v.physics().springs().next().unwrap();
		assert!((spring.rest_length - 50.0).abs() < 1e-4);
		assert_eq!(spring.strength, 1.0);
		assert_eq!(spring.damping, 0.1);
	}

	#[test]
	fn add_force_replaces_existing_pair_force() {
		let mut v = Viewer::new(400.0, 400.0);
		let (a, b, c) = (node("a", 0.0, 0.0), node("b", 10.0, 0.0), node("c", 0.0, 10.0));
		for n in [&a, &b, &c] {
			v.add_node(n.clone());
		}

		v.add_force(&a, &b, 5.0).unwrap();
		v.add_force(&b, &a, -2.0).unwrap();
		v.add_force(&a, &c, 1.0).unwrap();

		let forces: Vec<f32> = v.physics().attractions().map(|f| f.strength).collect();
		assert_eq!(forces, vec![-2.0, 1.0]);
		assert!(v.physics().attractions().all(|f| f.min_distance == 0.1));

		let ghost = node("ghost", 0.0, 0.0);
		assert!(v.add_force(&a, &ghost, 1.0).is_err());
		assert_eq!(v.physics().num_attractions(), 2);
	}

	#[test]
	fn add_spring_never_replaces_edge_spring() {
		let mut v = Viewer::new(400.0, 400.0);
		let (a, b) = (node("a", 0.0, 0.0), node("b", 10.0, 0.0));
		v.add_node(a.clone());
		v.add_node(b.clone());
		v.add_edge(edge(&a, &b)).unwrap();

		v.add_spring(&a, &b, 80.0).unwrap();
		v.add_spring(&b, &a, 60.0).unwrap();

		let springs: Vec<(f32, f32)> = v
			.physics()
			.springs()
			.map(|s| (s.strength, s.rest_length))
			.collect();
		assert_eq!(springs.len(), 2);
		assert!(springs.contains(&(1.0, 10.0)));
		assert!(springs.contains(&(0.5, 60.0)));
		assert_eq!(v.springs().count(), 1);
	}

	#[test]
	fn paused_viewer_still_centres_camera() {
		let mut v = Viewer::new(200.0, 200.0);
		let (a, b) = (node("a", 0.0, 0.0), node("b", 100.0, 0.0));
		v.add_node(a.clone());
		v.add_node(b.clone());
		v.add_spring(&a, &b, 10.0).unwrap();

		v.set_paused(true);
		v.advance_frame();
		assert_eq!(v.position(&b), Some(Vec2::new(100.0, 0.0)));
		let (centre, scale) = v.centroid();
		assert_eq!(centre, Vec2::new(50.0, 0.0));
		assert!((scale - 200.0 / 120.0).abs() < 1e-4);

		v.toggle_paused();
		v.advance_frame();
		assert!(v.position(&b).unwrap().x < 100.0);
	}

	#[test]
	fn selected_node_follows_mouse_until_dropped() {
		let mut v = Viewer::new(200.0, 200.0);
		let (a, b) = (node("a", 0.0, 0.0), node("b", 100.0, 0.0));
		v.add_node(a.clone());
		v.add_node(b.clone());
		v.add_edge(edge(&a, &b)).unwrap();
		v.set_paused(true);
		v.advance_frame();

		// Camera centre (50, 0) at scale 200/120; the right of screen is b.
		v.zoomer_mut().mouse_moved(Vec2::new(180.0, 100.0));
		v.select_nearest_with_mouse();
		assert_eq!(v.selected(), Some(&b));

		// A second select keeps the first choice.
		v.zoomer_mut().mouse_moved(Vec2::new(10.0, 100.0));
		v.select_nearest_with_mouse();
		assert_eq!(v.selected(), Some(&b));

		v.advance_frame();
		let mouse = v.mouse_world();
		assert!((v.position(&b).unwrap() - mouse).length() < 1e-4);
		let id = v.nodes[&b];
		assert!(v.physics().particle(id).unwrap().is_fixed());

		v.drop_selected();
		assert!(v.selected().is_none());
		assert!(v.physics().particle(id).unwrap().is_free());
	}

	#[test]
	fn captured_mouse_blocks_selection() {
		let mut v = Viewer::new(200.0, 200.0);
		v.add_node(node("a", 0.0, 0.0));
		let shift = Modifiers {
			shift: true,
			..Modifiers::default()
		};
		v.zoomer_mut()
			.mouse_pressed(Vec2::new(5.0, 5.0), MouseButton::Left, shift);
		v.select_nearest_with_mouse();
		assert!(v.selected().is_none());

		v.zoomer_mut().mouse_released();
		v.select_nearest_with_mouse();
		assert!(v.selected().is_some());
	}

	#[test]
	fn empty_viewer_keeps_initial_camera() {
		let mut v = Viewer::new(200.0, 200.0);
		for _ in 0..60 {
			v.advance_frame();
		}
		assert_eq!(v.centroid(), (Vec2::ZERO, 1.0));
		assert_eq!(v.mouse_world(), Vec2::new(-100.0, -100.0));
	}

	#[test]
	fn captured_mouse_blocks_drop() {
		let mut v = Viewer::new(200.0, 200.0);
		let a = node("a", 0.0, 0.0);
		v.add_node(a.clone());
		v.select_nearest_with_mouse();
		assert_eq!(v.selected(), Some(&a));
		v.advance_frame();
		let id = v.nodes[&a];
		assert!(v.physics().particle(id).unwrap().is_fixed());

		let shift = Modifiers {
			shift: true,
			..Modifiers::default()
		};
		v.zoomer_mut()
			.mouse_pressed(Vec2::new(5.0, 5.0), MouseButton::Left, shift);
		v.drop_selected();
		assert_eq!(v.selected(), Some(&a));
		assert!(v.physics().particle(id).unwrap().is_fixed());

		v.zoomer_mut().mouse_released();
		v.drop_selected();
		assert!(v.selected().is_none());
		assert!(v.physics().particle(id).unwrap().is_free());
	}

	#[test]
	fn zero_node_mass_keeps_layout_finite() {
		let config = ViewerConfig {
			node_mass: 0.0,
			..ViewerConfig::default()
		};
		let mut v = Viewer::with_config(200.0, 200.0, config);
		let (a, b) = (node("a", 0.0, 0.0), node("b", 50.0, 0.0));
		v.add_node(a.clone());
		v.add_node(b.clone());
		v.add_spring(&a, &b, 20.0).unwrap();
		for _ in 0..10 {
			v.advance_frame();
		}
		assert!(v.nodes().all(|(_, p)| p.is_finite()));
		assert!(v.centroid().1.is_finite());
	}

	#[test]
	fn set_drag_and_reset_view() {
		let mut v = Viewer::new(200.0, 200.0);
		assert_eq!(v.drag(), 0.75);
		v.set_drag(0.2);
		assert_eq!(v.drag(), 0.2);

		v.zoomer_mut().mouse_wheel(Vec2::new(20.0, 20.0), -1.0);
		assert_ne!(v.zoomer().zoom(), 1.0);
		v.reset_view();
		assert_eq!(v.zoomer().zoom(), 1.0);
	}
}
