//! Collapsible tree chart.
//!
//! Renders a hierarchy as an animated, left-to-right tree on an HTML canvas:
//! - Tidy layout via a pluggable [`TreeLayout`] engine ([`FlexTree`] by default)
//! - Bus-bar (side-by-side orthogonal) or diagonal links
//! - Click to expand/collapse, with transitions rooted at the clicked node
//! - Pan and zoom on top of an automatic fit to the visible tree
//!
//! # Example
//!
//! ```ignore
//! use tree_chart::{ChartConfig, TreeChartCanvas, TreeData};
//!
//! let data = TreeData::branch("flare", vec![
//!     TreeData::branch("analytics", vec![TreeData::leaf("cluster")]),
//!     TreeData::leaf("util"),
//! ]);
//!
//! view! { <TreeChartCanvas data=data fullscreen=true config=ChartConfig::bus_bar() /> }
//! ```

mod component;
mod config;
mod controller;
mod error;
mod flextree;
mod geometry;
mod hierarchy;
mod layout;
mod render;
mod scene;
mod state;
mod theme;
mod transition;
mod types;

pub use component::TreeChartCanvas;
pub use config::ChartConfig;
pub use controller::DiagramController;
pub use error::LoadError;
pub use flextree::FlexTree;
pub use hierarchy::{Hierarchy, NodeId, NodeState, default_expansion, validate_tree};
pub use layout::{Placement, SizedNode, TreeLayout};
pub use theme::Theme;
pub use types::TreeData;
