//! Attribute values for the SVG overlay of one beam.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::{BeamStyle, PathDescription, coord};

static NEXT_BEAM_ID: AtomicUsize = AtomicUsize::new(0);

/// Opacity of the static stroke under the travelling highlight.
pub const BASE_OPACITY: f64 = 0.15;

/// Arrowhead outline in marker units.
pub const ARROW_SHAPE: &str = "M0,0 L0,6 L9,3 z";

/// Fresh id for one beam's gradient/marker definitions.
pub fn next_beam_id() -> String {
	format!("beam-{}", NEXT_BEAM_ID.fetch_add(1, Ordering::Relaxed))
}

/// One stop of the highlight gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
	/// Position along the gradient, `0.0..=1.0`.
	pub offset: f64,
	/// Stop opacity.
	pub opacity: f64,
}

/// Transparent, solid, transparent: the highlight that travels along the
/// stroke.
pub const HIGHLIGHT_STOPS: [GradientStop; 3] = [
	GradientStop {
		offset: 0.0,
		opacity: 0.0,
	},
	GradientStop {
		offset: 0.5,
		opacity: 1.0,
	},
	GradientStop {
		offset: 1.0,
		opacity: 0.0,
	},
];

/// The attribute values of one beam that depend on its geometry.
///
/// Everything else in the overlay (stops, timing, marker) is fixed at mount,
/// so a recompute only rewrites these and the running animation keeps its
/// phase.
///
/// The gradient runs from start to end in user space and is translated from
/// one segment-length behind the start to one segment-length past the end, so
/// the bright band enters at the start anchor and leaves at the end anchor once
/// per cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamFrame {
	/// Path data shared by the base and highlight strokes.
	pub d: String,
	/// Gradient start, x.
	pub x1: f64,
	/// Gradient start, y.
	pub y1: f64,
	/// Gradient end, x.
	pub x2: f64,
	/// Gradient end, y.
	pub y2: f64,
	/// `from` of the translate animation.
	pub travel_from: String,
	/// `to` of the translate animation.
	pub travel_to: String,
}

impl BeamFrame {
	/// Attribute values for `path`.
	pub fn new(path: &PathDescription) -> Self {
		let (s, e) = (path.start, path.end);
		let (dx, dy) = (e.x - s.x, e.y - s.y);
		Self {
			d: path.to_svg_d(),
			x1: coord(s.x),
			y1: coord(s.y),
			x2: coord(e.x),
			y2: coord(e.y),
			travel_from: format!("{} {}", coord(-dx), coord(-dy)),
			travel_to: format!("{} {}", coord(dx), coord(dy)),
		}
	}
}

/// `dur` and `begin` of the highlight animation.
pub fn timing(style: &BeamStyle) -> (String, String) {
	(
		format!("{}ms", style.cycle_ms.max(1)),
		format!("{}ms", style.delay_ms),
	)
}
