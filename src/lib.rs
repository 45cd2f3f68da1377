//! particle-view: interactive spring-embedder network viewer.
//!
//! This crate provides a WASM-based component that lays networks out as
//! particles joined by springs, animates the simulation, keeps the camera
//! centred on the whole network and lets nodes be dragged with the mouse.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_viewer::{
	Edge, GraphData, GraphLink, GraphNode, NetworkEdge, NetworkNode, Node, ParticleViewer,
	ParticleViewerCanvas, Theme, ViewerConfig, ViewerError,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("particle-view: logging initialized");
}

/// Page-level settings: viewer tuning plus an optional theme name.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageConfig {
	#[serde(default)]
	pub theme: Option<String>,
	#[serde(flatten)]
	pub viewer: ViewerConfig,
}

fn script_text(id: &str) -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(id)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Load graph data from a script element with id="graph-data".
/// Expected format: JSON with { nodes: [...], links: [...], forces?, springs? }
fn load_graph_data() -> Option<GraphData> {
	let json_text = script_text("graph-data")?;

	match serde_json::from_str::<GraphData>(&json_text) {
		Ok(data) => {
			info!(
				"particle-view: loaded {} nodes, {} links",
				data.nodes.len(),
				data.links.len()
			);
			Some(data)
		}
		Err(e) => {
			warn!("particle-view: failed to parse graph data: {}", e);
			None
		}
	}
}

/// Load optional settings from a script element with id="viewer-config".
fn load_page_config() -> PageConfig {
	let Some(json_text) = script_text("viewer-config") else {
		return PageConfig::default();
	};
	serde_json::from_str(&json_text).unwrap_or_else(|e| {
		warn!("particle-view: ignoring invalid viewer config: {}", e);
		PageConfig::default()
	})
}

/// Main application component.
/// Loads graph data and settings from the DOM and renders the viewer.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data = load_graph_data().unwrap_or_default();
	let graph_signal = Signal::derive(move || graph_data.clone());

	let page = load_page_config();
	let theme = page.theme.as_deref().and_then(|name| {
		let found = Theme::by_name(name);
		if found.is_none() {
			warn!("particle-view: unknown theme `{}`", name);
		}
		found
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Particle Viewer" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ParticleViewerCanvas data=graph_signal config=page.viewer theme=theme fullscreen=true />
			<div class="graph-overlay">
				<h1>"Network"</h1>
				<p class="subtitle">"Drag nodes to reposition. Shift-drag to pan, scroll to zoom. R resets, P pauses."</p>
			</div>
		</div>
	}
}
