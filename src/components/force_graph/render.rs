use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS};

const EDGE_RGB: &str = "94, 129, 172";
const MIN_EDGE_WIDTH: f64 = 1.0;
const MAX_EDGE_WIDTH: f64 = 10.0;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

pub fn draw(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_tooltip(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let positions = state.positions();
	let has_highlight = state.has_active_highlight();
	let t = ease_out_cubic(state.hover.highlight_t);

	for edge in state.edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};

		// Stronger relationships are thicker and more opaque
		let base_alpha = edge.value.clamp(0.15, 1.0) * edge.opacity;
		let base_width = (edge.value * 5.0).clamp(MIN_EDGE_WIDTH, MAX_EDGE_WIDTH);
		let (alpha, width) = if !has_highlight {
			(base_alpha, base_width)
		} else if state.is_highlighted(edge.source) && state.is_highlighted(edge.target) {
			(
				base_alpha + (1.0 - base_alpha) * 0.5 * t,
				base_width * (1.0 + 0.3 * t),
			)
		} else {
			(base_alpha * (1.0 - 0.7 * t), base_width * (1.0 - 0.3 * t))
		};

		ctx.set_stroke_style_str(&format!("rgba({}, {})", EDGE_RGB, alpha));
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_highlight, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let font = format!("{}px sans-serif", 12.0 / k.max(0.5));

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if has_highlight && state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (dim, radius) = if has_highlight {
			(1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t))
		} else {
			(1.0, NODE_RADIUS)
		};
		let alpha = info.opacity * dim;

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
		ctx.set_font(&font);
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 4.0);
	});

	if !has_highlight {
		return;
	}

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		if !state.is_highlighted(idx) {
			return;
		}
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(idx);
		let is_neighbor =
			state.hover.neighbors.contains(&idx) || state.hover.prev_neighbors.contains(&idx);

		let (radius, glow_radius) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
			)
		} else if is_neighbor {
			(NODE_RADIUS * (1.0 + 0.2 * t), NODE_RADIUS * (1.4 + 0.6 * t))
		} else {
			(NODE_RADIUS, 0.0)
		};

		if glow_radius > 0.0 && t > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let alpha = if is_hovered { 0.35 * t } else { 0.2 * t };
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", alpha));
				let _ =
					gradient.add_color_stop(0.6, &format!("rgba(200, 220, 255, {})", alpha * 0.3));
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.set_global_alpha(info.opacity);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(info.color);
		ctx.fill();

		if is_hovered && t > 0.01 {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
		let _ = ctx.fill_text(&info.label, x + radius + 3.0, y + 4.0);
		ctx.set_global_alpha(1.0);
	});
}

fn draw_tooltip(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some((x, y, text)) = state.tooltip() else {
		return;
	};
	let t = ease_out_cubic(state.hover.highlight_t);
	if t < 0.01 {
		return;
	}
	let k = state.transform.k.max(0.5);
	let (font_size, pad) = (12.0 / k, 6.0 / k);
	// No TextMetrics here; approximate glyph width
	let (w, h) = (text.chars().count() as f64 * font_size * 0.6 + 2.0 * pad, font_size + 2.0 * pad);
	let (bx, by) = (x + NODE_RADIUS * 1.5, y - NODE_RADIUS * 1.5 - h);

	ctx.set_global_alpha(t);
	ctx.set_fill_style_str("rgba(255, 255, 255, 0.92)");
	ctx.fill_rect(bx, by, w, h);
	ctx.set_fill_style_str("#333");
	ctx.set_font(&format!("{}px sans-serif", font_size));
	let _ = ctx.fill_text(&text, bx + pad, by + pad + font_size * 0.85);
	ctx.set_global_alpha(1.0);
}
