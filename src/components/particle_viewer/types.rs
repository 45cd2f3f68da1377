//! Node and edge abstractions plus the JSON graph format that feeds them.

use std::collections::HashMap;
use std::f32::consts::TAU;
use std::hash::{Hash, Hasher};

use glam::Vec2;
use serde::Deserialize;
use web_sys::CanvasRenderingContext2d;

use super::render;
use super::scale::ScaledValues;
use super::theme::{Color, Theme};

/// Something that can be laid out as a particle.
///
/// Used as a map key, so equal nodes must hash equally. Override `draw` to
/// customise how the node looks; coordinates are in world space.
pub trait Node: Clone + Eq + Hash {
	/// Starting position of the node's particle.
	fn location(&self) -> Vec2;

	fn draw(
		&self,
		ctx: &CanvasRenderingContext2d,
		x: f64,
		y: f64,
		scale: &ScaledValues,
		theme: &Theme,
	) {
		render::draw_node_dot(ctx, x, y, scale.node_radius, theme.node.fill);
	}
}

/// A connection between two nodes, laid out as a spring.
pub trait Edge<N: Node>: Clone + Eq + Hash {
	fn node1(&self) -> &N;
	fn node2(&self) -> &N;

	#[allow(clippy::too_many_arguments)]
	fn draw(
		&self,
		ctx: &CanvasRenderingContext2d,
		x1: f64,
		y1: f64,
		x2: f64,
		y2: f64,
		scale: &ScaledValues,
		theme: &Theme,
	) {
		render::draw_edge_line(ctx, x1, y1, x2, y2, scale.edge_line_width, theme.edge.stroke);
	}
}

/// A node as supplied in graph data.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphNode {
	/// Unique identifier, referenced by links, forces and springs.
	pub id: String,
	/// Optional display label drawn beside the node.
	pub label: Option<String>,
	/// Optional CSS color override (`#rrggbb` or `rgb()`/`rgba()`).
	pub color: Option<String>,
	/// Starting x position. Nodes without both coordinates are placed on a
	/// circle around the view centre.
	pub x: Option<f32>,
	/// Starting y position.
	pub y: Option<f32>,
}

/// An edge between two node ids.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphLink {
	/// Id of the first node.
	pub source: String,
	/// Id of the second node.
	pub target: String,
}

/// An extra attractive (positive) or repulsive (negative) force.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphForce {
	/// Id of the first node.
	pub source: String,
	/// Id of the second node.
	pub target: String,
	/// Force strength.
	pub strength: f32,
}

/// An extra spring that is weaker than an edge.
#[derive(Clone, Debug, Deserialize)]
pub struct GraphSpring {
	/// Id of the first node.
	pub source: String,
	/// Id of the second node.
	pub target: String,
	/// Rest length.
	pub length: f32,
}

/// Complete graph data.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct GraphData {
	/// Nodes, in the order they are added.
	pub nodes: Vec<GraphNode>,
	/// Edges; each becomes a spring resting at its initial length.
	pub links: Vec<GraphLink>,
	/// Extra pairwise forces.
	#[serde(default)]
	pub forces: Vec<GraphForce>,
	/// Extra springs.
	#[serde(default)]
	pub springs: Vec<GraphSpring>,
}

/// A node resolved from [`GraphData`]. Identity is the id alone.
#[derive(Clone, Debug)]
pub struct NetworkNode {
	/// Identity of the node.
	pub id: String,
	/// Text drawn beside the node.
	pub label: Option<String>,
	/// Fill override.
	pub color: Option<Color>,
	/// Where the node's particle starts.
	pub location: Vec2,
}

impl NetworkNode {
	/// A bare node with no label or color.
	pub fn new(id: impl Into<String>, location: Vec2) -> Self {
		Self {
			id: id.into(),
			label: None,
			color: None,
			location,
		}
	}
}

impl PartialEq for NetworkNode {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
	}
}

impl Eq for NetworkNode {}

impl Hash for NetworkNode {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.id.hash(state);
	}
}

impl Node for NetworkNode {
	fn location(&self) -> Vec2 {
		self.location
	}

	fn draw(
		&self,
		ctx: &CanvasRenderingContext2d,
		x: f64,
		y: f64,
		scale: &ScaledValues,
		theme: &Theme,
	) {
		let fill = self.color.unwrap_or(theme.node.fill);
		render::draw_node_dot(ctx, x, y, scale.node_radius, fill);
		if let Some(label) = &self.label {
			render::draw_label(ctx, label, x + scale.node_radius + scale.label_gap, y, scale, theme);
		}
	}
}

/// An undirected edge between two resolved nodes.
#[derive(Clone, Debug)]
pub struct NetworkEdge {
	/// One end.
	pub node1: NetworkNode,
	/// The other end.
	pub node2: NetworkNode,
}

impl PartialEq for NetworkEdge {
	fn eq(&self, other: &Self) -> bool {
		(self.node1 == other.node1 && self.node2 == other.node2)
			|| (self.node1 == other.node2 && self.node2 == other.node1)
	}
}

impl Eq for NetworkEdge {}

impl Hash for NetworkEdge {
	fn hash<H: Hasher>(&self, state: &mut H) {
		// Order-independent so (a, b) and (b, a) collide.
		let (lo, hi) = if self.node1.id <= self.node2.id {
			(&self.node1.id, &self.node2.id)
		} else {
			(&self.node2.id, &self.node1.id)
		};
		lo.hash(state);
		hi.hash(state);
	}
}

impl Edge<NetworkNode> for NetworkEdge {
	fn node1(&self) -> &NetworkNode {
		&self.node1
	}

	fn node2(&self) -> &NetworkNode {
		&self.node2
	}
}

/// Graph data resolved into viewer-ready nodes and edges.
#[derive(Clone, Debug, Default)]
pub struct Network {
	/// Every node in the data.
	pub nodes: Vec<NetworkNode>,
	/// Edges between resolved nodes.
	pub edges: Vec<NetworkEdge>,
	/// Node pairs with a force strength.
	pub forces: Vec<(NetworkNode, NetworkNode, f32)>,
	/// Node pairs with a spring rest length.
	pub springs: Vec<(NetworkNode, NetworkNode, f32)>,
}

impl GraphData {
	/// Resolve ids into nodes, seeding missing positions on a circle of
	/// radius 100 around the centre of a `width` x `height` view.
	///
	/// Ids that name no node resolve to bare nodes at the origin, which the
	/// viewer will reject when they are connected.
	pub fn to_network(&self, width: f32, height: f32) -> Network {
		let centre = Vec2::new(width / 2.0, height / 2.0);
		let count = self.nodes.len().max(1) as f32;

		let nodes: Vec<NetworkNode> = self
			.nodes
			.iter()
			.enumerate()
			.map(|(i, n)| {
				let location = match (n.x, n.y) {
					(Some(x), Some(y)) => Vec2::new(x, y),
					_ => centre + Vec2::from_angle(i as f32 * TAU / count) * 100.0,
				};
				NetworkNode {
					id: n.id.clone(),
					label: n.label.clone(),
					color: n.color.as_deref().map(Color::parse),
					location,
				}
			})
			.collect();

		let by_id: HashMap<&str, &NetworkNode> =
			nodes.iter().map(|n| (n.id.as_str(), n)).collect();
		let resolve = |id: &str| {
			by_id
				.get(id)
				.map(|n| (*n).clone())
				.unwrap_or_else(|| NetworkNode::new(id, Vec2::ZERO))
		};

		let edges = self
			.links
			.iter()
			.map(|l| NetworkEdge {
				node1: resolve(&l.source),
				node2: resolve(&l.target),
			})
			.collect();
		let forces = self
			.forces
			.iter()
			.map(|f| (resolve(&f.source), resolve(&f.target), f.strength))
			.collect();
		let springs = self
			.springs
			.iter()
			.map(|s| (resolve(&s.source), resolve(&s.target), s.length))
			.collect();

		Network {
			nodes,
			edges,
			forces,
			springs,
		}
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use super::*;

	const DATA: &str = r##"{
		"nodes": [
			{ "id": "a", "label": "Alpha", "x": 10, "y": 20, "color": "#ff0000" },
			{ "id": "b" },
			{ "id": "c" }
		],
		"links": [
			{ "source": "a", "target": "b" },
			{ "source": "b", "target": "ghost" }
		],
		"springs": [ { "source": "a", "target": "c", "length": 50 } ]
	}"##;

	#[test]
	fn resolves_positions_and_ids() {
		let data: GraphData = serde_json::from_str(DATA).expect("valid graph");
		assert!(data.forces.is_empty());

		let net = data.to_network(400.0, 300.0);
		assert_eq!(net.nodes[0].location, Vec2::new(10.0, 20.0));
		assert_eq!(net.nodes[0].color.map(|c| (c.r, c.g, c.b)), Some((255, 0, 0)));

		let seeded = net.nodes[1].location;
		assert!((seeded.distance(Vec2::new(200.0, 150.0)) - 100.0).abs() < 1e-3);

		assert_eq!(net.edges[1].node2.id, "ghost");
		assert!(!net.nodes.contains(&net.edges[1].node2));
		assert_eq!(net.springs[0].2, 50.0);
	}

	#[test]
	fn edges_are_undirected_keys() {
		let a = NetworkNode::new("a", Vec2::ZERO);
		let b = NetworkNode::new("b", Vec2::ONE);
		let ab = NetworkEdge {
			node1: a.clone(),
			node2: b.clone(),
		};
		let ba = NetworkEdge { node1: b, node2: a };
		assert_eq!(ab, ba);

		let set: HashSet<_> = [ab, ba].into_iter().collect();
		assert_eq!(set.len(), 1);
	}
}
