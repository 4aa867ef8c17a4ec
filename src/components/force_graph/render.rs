use web_sys::{Document, Element, HtmlElement};

use super::binder::{CircleStyle, LabelStyle, LineStyle, Surface};
use super::interaction::Tooltip;
use crate::error::GraphError;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

fn escape_html(text: &str) -> String {
	let mut out = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => out.push_str("&amp;"),
			'<' => out.push_str("&lt;"),
			'>' => out.push_str("&gt;"),
			'"' => out.push_str("&quot;"),
			'\'' => out.push_str("&#39;"),
			_ => out.push(c),
		}
	}
	out
}

fn tooltip_html(tooltip: &Tooltip) -> String {
	format!(
		"<strong>{}</strong><br>{}",
		escape_html(&tooltip.id),
		escape_html(&tooltip.caption())
	)
}

/// SVG backend: every primitive is a child of one `<g>` container.
pub struct SvgSurface {
	document: Document,
	container: Element,
}

impl SvgSurface {
	/// Append an `<svg>` of the given size to `host` and draw into it.
	pub fn mount(host: &Element, width: f64, height: f64) -> Result<Self, GraphError> {
		let document = host
			.owner_document()
			.ok_or_else(|| GraphError::Dom("host is not attached to a document".into()))?;
		let svg = document
			.create_element_ns(Some(SVG_NS), "svg")
			.map_err(GraphError::dom)?;
		svg.set_attribute("width", &width.to_string())
			.map_err(GraphError::dom)?;
		svg.set_attribute("height", &height.to_string())
			.map_err(GraphError::dom)?;
		host.append_child(&svg).map_err(GraphError::dom)?;

		let container = document
			.create_element_ns(Some(SVG_NS), "g")
			.map_err(GraphError::dom)?;
		svg.append_child(&container).map_err(GraphError::dom)?;
		Ok(Self {
			document,
			container,
		})
	}

	fn append(&self, tag: &str, attrs: &[(&str, String)]) -> Result<Element, GraphError> {
		let element = self
			.document
			.create_element_ns(Some(SVG_NS), tag)
			.map_err(GraphError::dom)?;
		for (name, value) in attrs {
			element.set_attribute(name, value).map_err(GraphError::dom)?;
		}
		self.container
			.append_child(&element)
			.map_err(GraphError::dom)?;
		Ok(element)
	}
}

impl Surface for SvgSurface {
	type Element = Element;

	fn create_circle(&mut self, style: &CircleStyle) -> Result<Element, GraphError> {
		self.append(
			"circle",
			&[
				("r", style.radius.to_string()),
				("fill", style.fill.to_string()),
			],
		)
	}

	fn create_label(&mut self, style: &LabelStyle) -> Result<Element, GraphError> {
		let label = self.append(
			"text",
			&[
				("dx", style.dx.to_string()),
				("dy", "0.35em".to_string()),
				("style", format!("font-size: {}px", style.font_px)),
			],
		)?;
		label.set_text_content(Some(&style.text));
		Ok(label)
	}

	fn create_line(&mut self, style: &LineStyle) -> Result<Element, GraphError> {
		self.append(
			"line",
			&[
				("stroke", style.stroke.to_string()),
				("stroke-width", style.width.to_string()),
				("stroke-opacity", style.opacity.to_string()),
			],
		)
	}

	fn remove(&mut self, element: &Element) {
		element.remove();
	}

	fn move_circle(&mut self, element: &Element, cx: f64, cy: f64) {
		let _ = element.set_attribute("cx", &cx.to_string());
		let _ = element.set_attribute("cy", &cy.to_string());
	}

	fn move_label(&mut self, element: &Element, x: f64, y: f64) {
		let _ = element.set_attribute("x", &x.to_string());
		let _ = element.set_attribute("y", &y.to_string());
	}

	fn move_line(&mut self, element: &Element, from: (f64, f64), to: (f64, f64)) {
		let _ = element.set_attribute("x1", &from.0.to_string());
		let _ = element.set_attribute("y1", &from.1.to_string());
		let _ = element.set_attribute("x2", &to.0.to_string());
		let _ = element.set_attribute("y2", &to.1.to_string());
	}
}

/// Write the tooltip state onto its floating element.
pub fn render_tooltip(tooltip: &Tooltip, element: &HtmlElement) {
	let style = element.style();
	let _ = style.set_property("opacity", &tooltip.opacity().to_string());
	let _ = style.set_property(
		"visibility",
		if tooltip.is_visible() { "visible" } else { "hidden" },
	);
	let _ = style.set_property("left", &format!("{}px", tooltip.left));
	let _ = style.set_property("top", &format!("{}px", tooltip.top));

	let html = tooltip_html(tooltip);
	if element.inner_html() != html {
		element.set_inner_html(&html);
	}
}
