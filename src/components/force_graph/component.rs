use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::handle::GraphHandle;
use super::render;
use super::state::ForceGraphState;
use super::types::GraphData;

fn window_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

/// Pointer position relative to the canvas.
fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Force-directed graph drawn on a canvas. The simulation state is published
/// through `graph` once the canvas is mounted.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	graph: GraphHandle,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (graph_init, animate_init, resize_cb_init) =
		(graph.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = if fullscreen {
			window_size(&window).unwrap_or((800.0, 600.0))
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => match ctx.dyn_into() {
				Ok(ctx) => ctx,
				Err(_) => {
					warn!("2d context has an unexpected type");
					return;
				}
			},
			_ => {
				warn!("canvas has no 2d context");
				return;
			}
		};
		let data = data.get();
		graph_init.install(ForceGraphState::new(&data, w, h));
		info!("force graph mounted with {} nodes", data.nodes.len());

		if fullscreen {
			let (graph_resize, canvas_resize) = (graph_init.clone(), canvas.clone());
			*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
				let Some((nw, nh)) = web_sys::window().as_ref().and_then(window_size) else {
					return;
				};
				canvas_resize.set_width(nw as u32);
				canvas_resize.set_height(nh as u32);
				graph_resize.with_mut(|s| s.resize(nw, nh));
			}));
			if let Some(ref cb) = *resize_cb_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}

		let (graph_anim, animate_inner) = (graph_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			graph_anim.with_mut(|s| {
				if s.animation_running {
					s.tick(0.016);
				}
				render::render(s, &ctx);
			});
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let graph_md = graph.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			graph_md.with_mut(|s| s.pointer_down(x, y));
		}
	};

	let graph_mm = graph.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			graph_mm.with_mut(|s| s.pointer_move(x, y));
		}
	};

	let graph_mu = graph.clone();
	let on_mouseup = move |_: MouseEvent| {
		graph_mu.with_mut(|s| s.pointer_up());
	};

	let graph_ml = graph.clone();
	let on_mouseleave = move |_: MouseEvent| {
		graph_ml.with_mut(|s| s.pointer_up());
	};

	let graph_wh = graph;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
			graph_wh.with_mut(|s| s.zoom_at(x, y, ev.delta_y()));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
