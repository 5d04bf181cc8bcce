//! tree-chart: Collapsible, animated tree diagrams for the browser.
//!
//! This crate provides a WASM-based tree chart component that lays out a
//! hierarchy with a tidy tree algorithm, draws it with bus-bar or diagonal
//! links, and animates expand/collapse on click.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::tree_chart::{
	ChartConfig, DiagramController, FlexTree, Hierarchy, LoadError, NodeId, NodeState, Placement, SizedNode, Theme,
	TreeChartCanvas, TreeData, TreeLayout, default_expansion, validate_tree,
};

/// Id of the script element carrying the tree document.
const TREE_DATA_ID: &str = "tree-data";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("tree-chart: logging initialized");
}

fn tree_data_element() -> Option<HtmlScriptElement> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	document.get_element_by_id(TREE_DATA_ID)?.dyn_into().ok()
}

/// Load the tree from a script element with id="tree-data".
/// Expected format: nested `{ "name": ..., "children": [...] }` objects.
pub fn load_tree_data() -> Result<TreeData, LoadError> {
	let script = tree_data_element().ok_or_else(|| LoadError::MissingSource(TREE_DATA_ID.to_string()))?;
	let json_text = script.text().unwrap_or_default();
	let data = parse_tree_data(&json_text)?;
	info!(
		"tree-chart: loaded `{}` with {} top-level branches",
		data.name,
		data.children.as_ref().map_or(0, Vec::len)
	);
	Ok(data)
}

/// Parse and validate a tree document. Every load failure surfaces here,
/// before anything is mounted.
pub fn parse_tree_data(json_text: &str) -> Result<TreeData, LoadError> {
	let data: TreeData = serde_json::from_str(json_text)?;
	validate_tree(&data)?;
	Ok(data)
}

/// Chart preset selected by the `data-link-style` attribute of the data
/// element: `diagonal` for curved links, anything else for bus bars.
fn chart_style() -> (ChartConfig, Theme) {
	let style = tree_data_element().and_then(|script| script.get_attribute("data-link-style"));
	match style.as_deref() {
		Some("diagonal") => (ChartConfig::diagonal(), Theme::classic()),
		_ => (ChartConfig::bus_bar(), Theme::transit()),
	}
}

/// Main application component.
/// Loads the tree from the DOM and renders the chart.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let chart = match load_tree_data() {
		Ok(tree) => {
			let (config, theme) = chart_style();
			let tree_signal = Signal::derive(move || tree.clone());
			view! {
				<TreeChartCanvas data=tree_signal fullscreen=true config=config theme=theme />
			}
			.into_any()
		}
		Err(err) => {
			warn!("tree-chart: {}", err);
			view! { <p class="tree-chart-error">{err.to_string()}</p> }.into_any()
		}
	};

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Tree Chart" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-chart">
			{chart}
			<div class="chart-overlay">
				<p class="subtitle">"Click a node to expand or collapse it. Scroll to zoom. Drag to pan."</p>
			</div>
		</div>
	}
}
