use log::{error, info};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

use super::types::GraphData;
use crate::error::{GraphError, js_message};

async fn fetch_text(url: &str) -> Result<String, GraphError> {
	let fetch_error = |message: String| GraphError::Fetch {
		url: url.to_string(),
		message,
	};

	let window = web_sys::window().ok_or_else(|| fetch_error("no window".into()))?;
	let resp_value = JsFuture::from(window.fetch_with_str(url))
		.await
		.map_err(|e| fetch_error(js_message(&e)))?;
	let resp: Response = resp_value
		.dyn_into()
		.map_err(|_| fetch_error("response is not a Response".into()))?;

	if !resp.ok() {
		return Err(fetch_error(format!("HTTP {}", resp.status())));
	}

	let text = JsFuture::from(resp.text().map_err(|e| fetch_error(js_message(&e)))?)
		.await
		.map_err(|e| fetch_error(js_message(&e)))?;
	text.as_string()
		.ok_or_else(|| fetch_error("body is not text".into()))
}

/// Fetch and parse the graph resource. There is no retry.
pub async fn load_graph_data(url: &str) -> Result<GraphData, GraphError> {
	let result = match fetch_text(url).await {
		Ok(text) => GraphData::from_json(&text),
		Err(err) => Err(err),
	};
	match &result {
		Ok(data) => info!(
			"loaded {} nodes and {} links from {}",
			data.nodes.len(),
			data.links.len(),
			url
		),
		Err(err) => error!("{}", err),
	}
	result
}
