//! Pure per-section intersection state and batch resolution.

use std::collections::BTreeMap;

use log::trace;

/// Browsers report ratios at a crossing slightly off the exact threshold.
const RATIO_EPSILON: f64 = 1e-3;

/// One intersection report for a registered section.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntersectionSample {
	/// Section the report is for.
	pub index: usize,
	/// Platform `isIntersecting`.
	pub is_intersecting: bool,
	/// Platform `intersectionRatio`.
	pub ratio: f64,
}

/// Per-section intersecting/not-intersecting state.
///
/// Every report that leaves a section intersecting at or above the threshold
/// is a candidate for the active index, including crossings of a higher
/// threshold by a section that never stopped intersecting. When several
/// sections qualify in the same batch, the larger ratio wins and ties go to the
/// lower index.
#[derive(Clone, Debug)]
pub struct SectionTracker {
	threshold: f64,
	sections: BTreeMap<usize, bool>,
}

impl SectionTracker {
	/// `threshold` is clamped to `0.0..=1.0`.
	pub fn new(threshold: f64) -> Self {
		Self {
			threshold: threshold.clamp(0.0, 1.0),
			sections: BTreeMap::new(),
		}
	}

	/// Activation threshold in use.
	pub fn threshold(&self) -> f64 {
		self.threshold
	}

	/// Returns false if `index` was already registered.
	pub fn register(&mut self, index: usize) -> bool {
		if self.sections.contains_key(&index) {
			return false;
		}
		self.sections.insert(index, false);
		true
	}

	/// Returns false if `index` was not registered.
	pub fn unregister(&mut self, index: usize) -> bool {
		self.sections.remove(&index).is_some()
	}

	/// Number of registered sections.
	pub fn len(&self) -> usize {
		self.sections.len()
	}

	/// True when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.sections.is_empty()
	}

	/// Last known state of `index`; unknown sections are not intersecting.
	pub fn is_intersecting(&self, index: usize) -> bool {
		self.sections.get(&index).copied().unwrap_or(false)
	}

	/// Apply one delivered batch in order and return the section that should
	/// become active, if any.
	pub fn apply(&mut self, batch: &[IntersectionSample]) -> Option<usize> {
		let mut candidates: Vec<(usize, f64)> = Vec::new();
		for sample in batch {
			let Some(state) = self.sections.get_mut(&sample.index) else {
				trace!("ignoring report for unregistered section {}", sample.index);
				continue;
			};
			let now = sample.is_intersecting && sample.ratio + RATIO_EPSILON >= self.threshold;
			*state = now;
			candidates.retain(|(index, _)| *index != sample.index);
			if now {
				candidates.push((sample.index, sample.ratio));
			}
		}

		candidates
			.into_iter()
			.reduce(|best, next| {
				if next.1 > best.1 || (next.1 == best.1 && next.0 < best.0) {
					next
				} else {
					best
				}
			})
			.map(|(index, _)| index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample(index: usize, ratio: f64) -> IntersectionSample {
		IntersectionSample {
			index,
			is_intersecting: ratio > 0.0,
			ratio,
		}
	}

	fn tracker(count: usize) -> SectionTracker {
		let mut tracker = SectionTracker::new(0.3);
		for index in 0..count {
			tracker.register(index);
		}
		tracker
	}

	#[test]
	fn crossing_threshold_activates_section() {
		let mut tracker = tracker(5);
		assert_eq!(tracker.apply(&[sample(2, 0.1)]), None);
		assert_eq!(tracker.apply(&[sample(2, 0.3)]), Some(2));
	}

	#[test]
	fn ratio_just_under_threshold_still_counts() {
		let mut tracker = tracker(5);
		assert_eq!(tracker.apply(&[sample(1, 0.2995)]), Some(1));
	}

	#[test]
	fn higher_crossing_while_intersecting_reclaims_index() {
		let mut tracker = tracker(5);
		assert_eq!(tracker.apply(&[sample(1, 0.8)]), Some(1));
		assert_eq!(tracker.apply(&[sample(2, 0.3)]), Some(2));
		// section 1 never dropped below the threshold
		assert!(tracker.is_intersecting(1));
		assert_eq!(tracker.apply(&[sample(2, 0.29), sample(1, 0.7)]), Some(1));
	}

	#[test]
	fn falling_below_threshold_is_not_a_candidate() {
		let mut tracker = tracker(5);
		tracker.apply(&[sample(1, 0.8)]);
		assert_eq!(tracker.apply(&[sample(1, 0.2)]), None);
		assert!(!tracker.is_intersecting(1));
	}

	#[test]
	fn leaving_and_reentering_reactivates() {
		let mut tracker = tracker(3);
		tracker.apply(&[sample(0, 0.9)]);
		assert_eq!(tracker.apply(&[sample(0, 0.0)]), None);
		assert!(!tracker.is_intersecting(0));
		assert_eq!(tracker.apply(&[sample(0, 0.4)]), Some(0));
	}

	#[test]
	fn simultaneous_entries_prefer_larger_ratio() {
		let mut tracker = tracker(5);
		assert_eq!(tracker.apply(&[sample(1, 0.4), sample(2, 0.7)]), Some(2));
	}

	#[test]
	fn ties_go_to_earlier_section() {
		let mut tracker = tracker(5);
		assert_eq!(tracker.apply(&[sample(3, 0.5), sample(1, 0.5)]), Some(1));
	}

	#[test]
	fn entry_then_exit_in_one_batch_is_not_a_candidate() {
		let mut tracker = tracker(5);
		let batch = [sample(1, 0.5), sample(2, 0.4), sample(1, 0.0)];
		assert_eq!(tracker.apply(&batch), Some(2));
	}

	#[test]
	fn unregistered_sections_are_ignored() {
		let mut tracker = tracker(2);
		assert_eq!(tracker.apply(&[sample(7, 1.0)]), None);

		assert!(tracker.register(7));
		assert!(!tracker.register(7));
		assert_eq!(tracker.apply(&[sample(7, 1.0)]), Some(7));

		assert!(tracker.unregister(7));
		assert_eq!(tracker.len(), 2);
		assert_eq!(tracker.apply(&[sample(7, 0.0), sample(7, 1.0)]), None);
	}
}
