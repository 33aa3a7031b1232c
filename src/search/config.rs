use serde::Deserialize;

use super::error::ConfigError;
use super::node::{NodeColor, NodeStyle};
use super::widget::{Easing, FocusOptions};

/// Presentation parameters for search and highlight.
///
/// Every field has a default, so a JSON document only needs to name the
/// fields it overrides:
///
/// ```
/// use movie_graph_search::search::SearchConfig;
///
/// let config = SearchConfig::from_json(r#"{ "zoomScale": 2.5, "debounceMs": 0 }"#).unwrap();
/// assert_eq!(config.zoom_scale, 2.5);
/// assert_eq!(config.min_query_len, 2);
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
	/// Fill of the selected node.
	pub highlight_color: String,
	/// Outline of the selected node.
	pub highlight_border: String,
	/// Outline width of the selected node; `None` keeps the node's own.
	pub highlight_border_width: Option<f64>,
	/// Radius of the selected node; `None` keeps the node's own.
	pub highlight_size: Option<f64>,
	/// Camera zoom when focusing the selected node.
	pub zoom_scale: f64,
	/// Camera animation length.
	pub animation_duration_ms: u32,
	/// Camera animation curve.
	pub easing: Easing,
	/// Quiet period before a typed query runs; zero searches on every keystroke.
	pub debounce_ms: u32,
	/// Restore all node colors when the query is emptied.
	pub reset_on_empty_query: bool,
	/// Shortest query that produces results.
	pub min_query_len: usize,
	/// Delay before binding to the graph.
	pub warmup_ms: u32,
}

impl Default for SearchConfig {
	fn default() -> Self {
		Self {
			reset_on_empty_query: true,
			..Self::vivid()
		}
	}
}

impl SearchConfig {
	/// Cyan fill, blue outline, enlarged node and a close zoom.
	pub fn vivid() -> Self {
		Self {
			highlight_color: "#00FFFF".into(),
			highlight_border: "#0000FF".into(),
			highlight_border_width: Some(3.0),
			highlight_size: Some(9.0),
			zoom_scale: 15.0,
			animation_duration_ms: 1000,
			easing: Easing::EaseInOutQuad,
			debounce_ms: 300,
			reset_on_empty_query: false,
			min_query_len: 2,
			warmup_ms: 1000,
		}
	}

	/// Plain yellow fill, gentle zoom, searches on every keystroke.
	pub fn subtle() -> Self {
		Self {
			highlight_color: "#FFFF00".into(),
			highlight_border: "#FFFF00".into(),
			highlight_border_width: None,
			highlight_size: None,
			zoom_scale: 1.2,
			animation_duration_ms: 800,
			easing: Easing::EaseInOutQuad,
			debounce_ms: 0,
			reset_on_empty_query: true,
			min_query_len: 2,
			warmup_ms: 1000,
		}
	}

	/// Parse a JSON document; missing fields take their defaults.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Style applied to the selected node, derived from its current one.
	pub fn highlight_style(&self, base: &NodeStyle) -> NodeStyle {
		NodeStyle {
			color: NodeColor::with_border(&self.highlight_color, &self.highlight_border),
			border_width: self.highlight_border_width.unwrap_or(base.border_width),
			size: self.highlight_size.unwrap_or(base.size),
		}
	}

	/// Camera parameters for focusing the selected node.
	pub fn focus_options(&self) -> FocusOptions {
		FocusOptions {
			scale: self.zoom_scale,
			animation_duration_ms: self.animation_duration_ms,
			easing: self.easing,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_json_yields_defaults() {
		let config = SearchConfig::from_json("{}").unwrap();
		assert_eq!(config, SearchConfig::default());
		assert!(config.reset_on_empty_query);
		assert_eq!(config.debounce_ms, 300);
	}

	#[test]
	fn json_overrides_named_fields() {
		let config = SearchConfig::from_json(
			r##"{ "highlightColor": "#FFFF00", "easing": "linear", "resetOnEmptyQuery": false }"##,
		)
		.unwrap();
		assert_eq!(config.highlight_color, "#FFFF00");
		assert_eq!(config.easing, Easing::Linear);
		assert!(!config.reset_on_empty_query);
		assert_eq!(config.zoom_scale, 15.0);
	}

	#[test]
	fn malformed_json_is_a_parse_error() {
		let err = SearchConfig::from_json("{ zoomScale: ").unwrap_err();
		assert!(matches!(err, ConfigError::Parse(_)));
	}

	#[test]
	fn subtle_highlight_keeps_node_geometry() {
		let base = NodeStyle {
			color: NodeColor::solid("#1f77b4"),
			border_width: 2.0,
			size: 7.0,
		};
		let style = SearchConfig::subtle().highlight_style(&base);
		assert_eq!(style.color, NodeColor::solid("#FFFF00"));
		assert_eq!(style.border_width, 2.0);
		assert_eq!(style.size, 7.0);

		let vivid = SearchConfig::vivid().highlight_style(&base);
		assert_eq!(vivid.color.border, "#0000FF");
		assert_eq!(vivid.border_width, 3.0);
	}
}
