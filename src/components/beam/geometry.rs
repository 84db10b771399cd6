//! Container-relative beam geometry.
//!
//! Everything here is a pure read of the current layout. Callers decide when
//! to recompute; nothing in this module runs per animation frame.

use kurbo::{Point, Rect, Vec2};
use leptos::html::Div;
use leptos::prelude::*;

use super::types::PathDescription;

/// Something whose viewport-space bounding box can be read.
///
/// `None` means the node is not available yet (not mounted, or already
/// detached), which is a valid state rather than an error.
pub trait Measure {
	/// Current bounding box, or `None` if unavailable.
	fn measure(&self) -> Option<Rect>;
}

impl Measure for Rect {
	fn measure(&self) -> Option<Rect> {
		Some(*self)
	}
}

impl<M: Measure> Measure for Option<M> {
	fn measure(&self) -> Option<Rect> {
		self.as_ref().and_then(Measure::measure)
	}
}

impl<M: Measure + ?Sized> Measure for &M {
	fn measure(&self) -> Option<Rect> {
		(**self).measure()
	}
}

impl Measure for web_sys::Element {
	fn measure(&self) -> Option<Rect> {
		if !self.is_connected() {
			return None;
		}
		let r = self.get_bounding_client_rect();
		Some(Rect::from_origin_size(
			(r.x(), r.y()),
			(r.width(), r.height()),
		))
	}
}

impl Measure for NodeRef<Div> {
	fn measure(&self) -> Option<Rect> {
		let el = self.get_untracked()?;
		let el: &web_sys::Element = &el;
		el.measure()
	}
}

/// Anchor of an element: the center of its rectangle, shifted into the
/// container's frame.
pub fn anchor(rect: Rect, container_origin: Point) -> Point {
	rect.center() - container_origin.to_vec2()
}

/// Control point for a bent beam: the segment midpoint lifted by `curvature`
/// (negative values bow downward on screen).
pub fn control_point(start: Point, end: Point, curvature: f64) -> Point {
	start.midpoint(end) - Vec2::new(0.0, curvature)
}

/// Compute the path between the centers of `from` and `to`, expressed
/// relative to `container`'s top-left corner.
///
/// Returns `None` if any of the three nodes is unavailable.
pub fn resolve(
	container: &impl Measure,
	from: &impl Measure,
	to: &impl Measure,
	curvature: f64,
) -> Option<PathDescription> {
	let origin = container.measure()?.origin();
	let start = anchor(from.measure()?, origin);
	let end = anchor(to.measure()?, origin);
	let control = (curvature != 0.0).then(|| control_point(start, end, curvature));
	Some(PathDescription {
		start,
		end,
		control,
	})
}
