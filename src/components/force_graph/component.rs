use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, MouseEvent, Window};

use super::events::GraphEvent;
use super::interaction::starts_drag;
use super::render::{self, SvgSurface};
use super::state::ForceGraphState;
use super::types::{GraphData, Selection};
use crate::error::GraphError;

type SharedState = Rc<RefCell<Option<ForceGraphState<SvgSurface>>>>;

fn viewport_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	(
		dim(window.inner_width(), 800.0),
		dim(window.inner_height(), 600.0),
	)
}

fn mount(
	host: &Element,
	data: GraphData,
	width: f64,
	height: f64,
) -> Result<ForceGraphState<SvgSurface>, GraphError> {
	host.set_inner_html("");
	let surface = SvgSurface::mount(host, width, height)?;
	let mut state = ForceGraphState::new(data, surface, width, height);
	state.dispatch(GraphEvent::FilterChanged(Selection::All))?;
	info!("graph mounted at {}x{}", width, height);
	Ok(state)
}

fn dispatch(state: &SharedState, event: GraphEvent) {
	if let Some(ref mut s) = *state.borrow_mut() {
		if let Err(err) = s.dispatch(event) {
			error!("graph event failed: {}", err);
		}
	}
}

/// Pointer position relative to the graph host.
fn local_point(host: &NodeRef<leptos::html::Div>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let host: HtmlElement = host.get()?.into();
	let rect = host.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Company selector, floating tooltip and the SVG graph.
#[component]
pub fn CompanyGraph(#[prop(into)] data: Signal<GraphData>) -> impl IntoView {
	let host_ref = NodeRef::<leptos::html::Div>::new();
	let tooltip_ref = NodeRef::<leptos::html::Div>::new();
	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init) = (state.clone(), animate.clone());

	Effect::new(move |_| {
		let (Some(host), Some(tooltip)) = (host_ref.get(), tooltip_ref.get()) else {
			return;
		};
		let Some(window) = web_sys::window() else {
			return;
		};
		let host: HtmlElement = host.into();
		let tooltip: HtmlElement = tooltip.into();
		let (w, h) = viewport_size(&window);

		match mount(&host, data.get(), w, h) {
			Ok(s) => *state_init.borrow_mut() = Some(s),
			Err(err) => {
				error!("failed to mount graph: {}", err);
				return;
			}
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move |time: f64| {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if let Err(err) = s.dispatch(GraphEvent::Tick { time }) {
					error!("graph tick failed: {}", err);
				}
				render::render_tooltip(&s.tooltip, &tooltip);
			}
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_sel = state.clone();
	let on_change = move |ev: web_sys::Event| {
		let selection = Selection::from(event_target_value(&ev));
		dispatch(&state_sel, GraphEvent::FilterChanged(selection));
	};

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if !starts_drag(ev.button(), ev.ctrl_key()) {
			return;
		}
		let Some((x, y)) = local_point(&host_ref, &ev) else {
			return;
		};
		let node = state_md.borrow().as_ref().and_then(|s| s.node_at(x, y));
		if let Some(node) = node {
			ev.prevent_default();
			dispatch(&state_md, GraphEvent::DragStart { node });
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(&host_ref, &ev) else {
			return;
		};
		let mut events = Vec::new();
		if let Some(ref s) = *state_mm.borrow() {
			if s.drag.is_active() {
				events.push(GraphEvent::DragMove { x, y });
			} else {
				let hovered = s.node_at(x, y);
				if hovered != s.hover.node {
					if s.hover.node.is_some() {
						events.push(GraphEvent::PointerLeave {
							time: ev.time_stamp(),
						});
					}
					if let Some(node) = hovered {
						events.push(GraphEvent::PointerEnter {
							node,
							page_x: ev.page_x() as f64,
							page_y: ev.page_y() as f64,
							time: ev.time_stamp(),
						});
					}
				}
			}
		}
		for event in events {
			dispatch(&state_mm, event);
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let dragging = state_mu.borrow().as_ref().is_some_and(|s| s.drag.is_active());
		if dragging {
			dispatch(&state_mu, GraphEvent::DragEndAll);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |ev: MouseEvent| {
		let (dragging, hovering) = state_ml
			.borrow()
			.as_ref()
			.map(|s| (s.drag.is_active(), s.hover.node.is_some()))
			.unwrap_or_default();
		if dragging {
			dispatch(&state_ml, GraphEvent::DragEndAll);
		}
		if hovering {
			dispatch(
				&state_ml,
				GraphEvent::PointerLeave {
					time: ev.time_stamp(),
				},
			);
		}
	};

	let companies = move || data.with(|d| d.companies());

	view! {
		<div class="company-graph">
			<select id="companySelect" class="company-select" on:change=on_change>
				<option value=Selection::ALL>{Selection::ALL}</option>
				{move || {
					companies()
						.into_iter()
						.map(|id| {
						let label = id.clone();
						view! { <option value=id>{label}</option> }
					})
						.collect_view()
				}}
			</select>
			<div node_ref=tooltip_ref id="tooltip" class="tooltip"></div>
			<div
				node_ref=host_ref
				class="graph-host"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
			></div>
		</div>
	}
}
