use glam::Vec2;
use particle_view::components::particle_viewer::{
	GraphData, NetworkEdge, NetworkNode, PairEnd, ParticleViewer, ViewerConfig, ViewerError,
	build_viewer,
};

const TRIANGLE: &str = r#"{
	"nodes": [
		{ "id": "a", "x": 0, "y": 0 },
		{ "id": "b", "x": 60, "y": 0 },
		{ "id": "c", "x": 30, "y": 50 },
		{ "id": "d", "x": 300, "y": 300 }
	],
	"links": [
		{ "source": "a", "target": "b" },
		{ "source": "b", "target": "c" },
		{ "source": "c", "target": "a" },
		{ "source": "a", "target": "nowhere" }
	],
	"forces": [ { "source": "a", "target": "d", "strength": -200 } ],
	"springs": [ { "source": "d", "target": "c", "length": 40 } ]
}"#;

fn node(id: &str, x: f32, y: f32) -> NetworkNode {
	NetworkNode::new(id, Vec2::new(x, y))
}

#[test]
fn builds_viewer_from_graph_data() {
	let data: GraphData = serde_json::from_str(TRIANGLE).expect("valid graph");
	let viewer = build_viewer(&data, 800.0, 600.0, ViewerConfig::default());

	assert_eq!(viewer.num_nodes(), 4);
	assert_eq!(viewer.num_edges(), 3);
	assert_eq!(viewer.physics().num_attractions(), 1);
	assert_eq!(viewer.springs().count(), 1);
}

#[test]
fn layout_pulls_sprung_node_in_and_keeps_camera_on_it() {
	let data: GraphData = serde_json::from_str(TRIANGLE).expect("valid graph");
	let mut viewer = build_viewer(&data, 800.0, 600.0, ViewerConfig::default());
	let d = node("d", 0.0, 0.0);
	let c = node("c", 0.0, 0.0);

	let start = viewer.position(&d).unwrap().distance(viewer.position(&c).unwrap());
	for _ in 0..600 {
		viewer.advance_frame();
	}
	let end = viewer.position(&d).unwrap().distance(viewer.position(&c).unwrap());
	assert!(end < start);

	let (centre, scale) = viewer.centroid();
	assert!(centre.is_finite() && scale.is_finite() && scale > 0.0);
	let positions: Vec<Vec2> = viewer.nodes().map(|(_, p)| p).collect();
	let min = positions.iter().copied().reduce(Vec2::min).unwrap();
	let max = positions.iter().copied().reduce(Vec2::max).unwrap();
	assert!(centre.x > min.x && centre.x < max.x);
	assert!(centre.y > min.y && centre.y < max.y);
}

#[test]
fn update_particles_speeds_layout_without_moving_camera() {
	let mut viewer: ParticleViewer<NetworkNode, NetworkEdge> = ParticleViewer::new(400.0, 400.0);
	let (a, b) = (node("a", 0.0, 0.0), node("b", 200.0, 0.0));
	viewer.add_node(a.clone());
	viewer.add_node(b.clone());
	viewer.add_spring(&a, &b, 20.0).unwrap();
	viewer.advance_frame();
	let camera = viewer.centroid();

	let before = viewer.position(&b).unwrap();
	viewer.update_particles();
	viewer.update_particles();
	assert!(viewer.position(&b).unwrap().x < before.x);
	assert_eq!(viewer.centroid(), camera);
}

#[test]
fn pair_operations_report_missing_nodes() {
	let mut viewer: ParticleViewer<NetworkNode, NetworkEdge> = ParticleViewer::new(400.0, 400.0);
	let (a, ghost) = (node("a", 0.0, 0.0), node("ghost", 1.0, 1.0));
	viewer.add_node(a.clone());

	assert_eq!(
		viewer.add_spring(&ghost, &a, 10.0),
		Err(ViewerError::MissingNode {
			end: PairEnd::First
		})
	);
	assert_eq!(
		viewer.add_force(&a, &ghost, 10.0),
		Err(ViewerError::MissingNode {
			end: PairEnd::Second
		})
	);
	assert_eq!(
		ViewerError::MissingNode {
			end: PairEnd::Second
		}
		.to_string(),
		"second node has not been added to the viewer"
	);
}
