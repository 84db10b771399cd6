use leptos::prelude::*;

use super::component::use_section_deck;

/// How far through the deck the active section is, in `[0, 1]`.
///
/// Indices are zero-based, so the last of `total` sections reads as 1.0.
pub fn progress_fraction(active: Option<usize>, total: usize) -> f64 {
	let Some(index) = active else {
		return 0.0;
	};
	if total <= 1 {
		return if total == 1 { 1.0 } else { 0.0 };
	}
	(index as f64 / (total - 1) as f64).clamp(0.0, 1.0)
}

/// Fixed bar across the top of the viewport showing [`progress_fraction`].
#[component]
pub fn ProgressBar() -> impl IntoView {
	let deck = use_section_deck();
	let width = move || {
		let fraction = deck
			.map(|deck| progress_fraction(deck.active_index().get(), deck.section_count().get()))
			.unwrap_or(0.0);
		format!("{:.2}%", fraction * 100.0)
	};

	view! {
		<div class="deck-progress" role="presentation">
			<div class="deck-progress-fill" style:width=width />
		</div>
	}
}
