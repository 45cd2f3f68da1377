//! Spring-embedder network viewer.
//!
//! Nodes become particles and edges become springs in a small physics
//! simulation that is animated and drawn on an HTML canvas each frame:
//! - Particle/spring physics with drag, extra pairwise forces and springs
//! - A camera that eases towards the bounding box of all particles
//! - Modifier-gated zoom and pan, click-and-drag node selection
//!
//! # Example
//!
//! ```ignore
//! use particle_view::{ParticleViewer, NetworkEdge, NetworkNode};
//!
//! let a = NetworkNode::new("a", Vec2::new(0.0, 0.0));
//! let b = NetworkNode::new("b", Vec2::new(40.0, 0.0));
//! let mut viewer = ParticleViewer::<NetworkNode, NetworkEdge>::new(800.0, 600.0);
//! viewer.add_node(a.clone());
//! viewer.add_node(b.clone());
//! viewer.add_edge(NetworkEdge { node1: a.clone(), node2: b.clone() })?;
//! viewer.add_force(&a, &b, -20.0)?;
//!
//! // each frame
//! viewer.advance_frame();
//! render(&viewer, &ctx, &ScaleConfig::default(), &Theme::default());
//! ```

pub mod camera;
mod component;
mod config;
mod error;
pub mod physics;
mod render;
pub mod scale;
pub mod theme;
mod types;
mod viewer;
pub mod zoom_pan;

pub use component::{ParticleViewerCanvas, build_viewer};
pub use config::ViewerConfig;
pub use error::{PairEnd, Result, ViewerError};
pub use render::render;
pub use theme::Theme;
pub use types::{
	Edge, GraphData, GraphForce, GraphLink, GraphNode, GraphSpring, Network, NetworkEdge,
	NetworkNode, Node,
};
pub use viewer::ParticleViewer;
