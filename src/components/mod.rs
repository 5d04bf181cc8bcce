//! UI components.

pub mod tree_chart;
