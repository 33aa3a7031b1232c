use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::ForceGraphState;

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);

	ctx.set_stroke_style_str("rgba(100, 180, 255, 0.6)");
	ctx.set_fill_style_str("rgba(100, 180, 255, 0.8)");
	ctx.set_line_width(line_width);

	state.graph.visit_edges(|n1, n2, _| {
		let (x1, y1, x2, y2) = (n1.x() as f64, n1.y() as f64, n2.x() as f64, n2.y() as f64);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			return;
		}
		// trim to the node rims so arrows stay visible on enlarged nodes
		let r1 = state.info(n1.data.user_data).map_or(0.0, |n| n.style.size);
		let r2 = state.info(n2.data.user_data).map_or(0.0, |n| n.style.size);

		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + arrow_size), y2 - uy * (r2 + arrow_size));
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	});
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let font = format!("{}px sans-serif", 10.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let Some(info) = state.info(node.data.user_data) else {
			return;
		};
		let (x, y) = (node.x() as f64, node.y() as f64);
		let style = &info.style;
		let (fill, stroke) = if state.is_grabbed(node.index()) {
			(&style.color.highlight.background, &style.color.highlight.border)
		} else {
			(&style.color.background, &style.color.border)
		};

		ctx.begin_path();
		let _ = ctx.arc(x, y, style.size, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(fill);
		ctx.fill();
		if style.border_width > 0.0 {
			ctx.set_stroke_style_str(stroke);
			ctx.set_line_width(style.border_width / k.max(1.0));
			ctx.stroke();
		}

		if let Some(label) = &info.label {
			ctx.set_fill_style_str("rgba(255, 255, 255, 0.8)");
			ctx.set_font(&font);
			let _ = ctx.fill_text(label, x + style.size + 3.0, y + 3.0);
		}
	});
}
