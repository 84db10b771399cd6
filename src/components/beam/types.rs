use kurbo::Point;

/// Mid-blue used when a beam does not pick its own color.
pub const DEFAULT_COLOR: &str = "#3b82f6";

/// Styling half of a connector; the endpoints are supplied separately as
/// element handles.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamStyle {
	/// CSS color of both strokes and the arrowhead.
	pub color: String,
	/// Stroke width in pixels.
	pub stroke_width: f64,
	/// One pass of the highlight from start to end.
	pub cycle_ms: u32,
	/// Wait after mount before the highlight first starts.
	pub delay_ms: u32,
	/// Zero draws a straight segment, anything else bends the path through a
	/// control point this many pixels above the midpoint.
	pub curvature: f64,
	/// Draw an arrowhead at the end anchor.
	pub arrow: bool,
	/// Pulse the highlight stroke's opacity.
	pub pulse: bool,
}

impl Default for BeamStyle {
	fn default() -> Self {
		Self {
			color: DEFAULT_COLOR.into(),
			stroke_width: 2.0,
			cycle_ms: 2000,
			delay_ms: 0,
			curvature: 0.0,
			arrow: true,
			pulse: false,
		}
	}
}

/// Container-local geometry of one beam, as of the last recompute trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathDescription {
	/// Anchor of the `from` element.
	pub start: Point,
	/// Anchor of the `to` element.
	pub end: Point,
	/// Quadratic control point; `None` for a straight segment.
	pub control: Option<Point>,
}

impl PathDescription {
	/// Whether the path bends.
	pub fn is_curved(&self) -> bool {
		self.control.is_some()
	}

	/// SVG path data: `M x y L x y` or `M x y Q cx cy x y`.
	pub fn to_svg_d(&self) -> String {
		let (s, e) = (self.start, self.end);
		match self.control {
			None => format!(
				"M {} {} L {} {}",
				coord(s.x),
				coord(s.y),
				coord(e.x),
				coord(e.y)
			),
			Some(c) => format!(
				"M {} {} Q {} {} {} {}",
				coord(s.x),
				coord(s.y),
				coord(c.x),
				coord(c.y),
				coord(e.x),
				coord(e.y)
			),
		}
	}
}

/// Events that cause a beam to re-derive its path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trigger {
	/// Both endpoints and the container have mounted.
	Mount,
	/// The window was resized.
	Resize,
	/// The container asked for it, e.g. after an entrance animation.
	Refresh,
}

pub(crate) fn coord(v: f64) -> f64 {
	let rounded = (v * 100.0).round() / 100.0;
	// avoid printing "-0"
	if rounded == 0.0 { 0.0 } else { rounded }
}
