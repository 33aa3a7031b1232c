//! Label search over a graph widget, with exclusive node highlighting.
//!
//! [`SearchController`] holds the behavior. It reaches the graph through
//! [`GraphWidget`] and the page through [`SearchPorts`], so neither a browser
//! nor a canvas is needed to drive it.

mod config;
mod controller;
mod error;
mod node;
mod ports;
mod widget;

pub use config::SearchConfig;
pub use controller::SearchController;
pub use error::{ConfigError, SearchError};
pub use node::{
	DEFAULT_BORDER_WIDTH, DEFAULT_NODE_SIZE, HighlightColor, NodeColor, NodeId, NodePatch,
	NodeStyle, NodeView,
};
pub use ports::{ClickTarget, KeyResponse, ResultsView, SearchPorts, SearchResult, SearchTrigger};
pub use widget::{Easing, FocusOptions, GraphWidget};
