//! Crate-wide error type.

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failures that can occur while loading the graph or driving the DOM.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GraphError {
	/// The graph resource could not be fetched.
	#[error("failed to fetch {url}: {message}")]
	Fetch {
		/// Resource location.
		url: String,
		/// Reason reported by the browser.
		message: String,
	},
	/// The graph resource is not a valid `{ nodes, links }` document.
	#[error("invalid graph data: {0}")]
	Parse(String),
	/// A DOM call was rejected.
	#[error("DOM operation failed: {0}")]
	Dom(String),
}

impl From<serde_json::Error> for GraphError {
	fn from(err: serde_json::Error) -> Self {
		GraphError::Parse(err.to_string())
	}
}

/// Best effort readable message out of a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
	if let Some(err) = value.dyn_ref::<js_sys::Error>() {
		return String::from(err.message());
	}
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

impl GraphError {
	pub(crate) fn dom(value: JsValue) -> Self {
		GraphError::Dom(js_message(&value))
	}
}
