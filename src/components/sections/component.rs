use std::time::Duration;

use leptos::html::Section;
use leptos::prelude::*;
use log::{debug, error};
use web_sys::Element;

use super::navigator::{DEFAULT_SETTLE, ScrollNavigator};
use super::observer::{ObserverConfig, SectionObserver};
use super::state::NavError;

/// Handle to the enclosing [`SectionDeck`], available through context.
#[derive(Clone, Copy)]
pub struct DeckHandle {
	navigator: StoredValue<ScrollNavigator, LocalStorage>,
	observer: StoredValue<Option<SectionObserver>, LocalStorage>,
	active: ReadSignal<Option<usize>>,
	count: ReadSignal<usize>,
}

impl DeckHandle {
	/// Currently visible active section.
	pub fn active_index(&self) -> ReadSignal<Option<usize>> {
		self.active
	}

	/// Number of mounted sections.
	pub fn section_count(&self) -> ReadSignal<usize> {
		self.count
	}

	/// See [`ScrollNavigator::go_to`]. Fails with [`NavError::Detached`] once
	/// the deck has unmounted.
	pub fn go_to(&self, index: usize) -> Result<(), NavError> {
		self.navigator
			.try_with_value(|nav| nav.go_to(index))
			.unwrap_or(Err(NavError::Detached))
	}

	/// Track a newly mounted panel, both for navigation and observation.
	pub fn register(&self, index: usize, element: Element) {
		self.observer.try_with_value(|observer| {
			if let Some(observer) = observer {
				observer.register(index, &element);
			}
		});
		self.navigator
			.try_with_value(|nav| nav.register(index, element));
	}

	/// Forget a panel and stop observing its element.
	pub fn unregister(&self, index: usize) {
		let removed = self
			.navigator
			.try_with_value(|nav| nav.unregister(index))
			.flatten();
		if let Some(element) = removed {
			self.observer.try_with_value(|observer| {
				if let Some(observer) = observer {
					observer.unregister(index, &element);
				}
			});
		}
	}

	fn teardown(&self) {
		self.navigator.try_with_value(ScrollNavigator::cancel_pending);
		self.observer.try_update_value(|observer| {
			observer.take();
		});
	}
}

/// The [`DeckHandle`] of the nearest enclosing [`SectionDeck`].
pub fn use_section_deck() -> Option<DeckHandle> {
	use_context::<DeckHandle>()
}

/// Scroll-snapped run of full-viewport panels with a tracked active index.
///
/// Without `IntersectionObserver` the deck still scrolls natively; the
/// active index then only moves through [`DeckHandle::go_to`].
#[component]
pub fn SectionDeck(
	#[prop(optional)] config: ObserverConfig,
	#[prop(default = DEFAULT_SETTLE)] settle: Duration,
	#[prop(optional, into)] class: String,
	children: Children,
) -> impl IntoView {
	let navigator = ScrollNavigator::new(settle);
	let on_active = {
		let navigator = navigator.clone();
		move |index| navigator.observe(index)
	};
	let observer = match SectionObserver::new(&config, on_active) {
		Ok(observer) => Some(observer),
		Err(err) => {
			error!("{}; falling back to native scrolling", err);
			None
		}
	};

	let deck = DeckHandle {
		active: navigator.active_index(),
		count: navigator.section_count(),
		navigator: StoredValue::new_local(navigator),
		observer: StoredValue::new_local(observer),
	};
	provide_context(deck);
	on_cleanup(move || deck.teardown());

	view! { <div class=format!("section-deck {class}")>{children()}</div> }
}

/// One full-viewport panel. `index` is its position in document order.
#[component]
pub fn SectionPanel(
	index: usize,
	#[prop(optional, into)] class: String,
	children: Children,
) -> impl IntoView {
	let panel = NodeRef::<Section>::new();
	let deck = use_section_deck();

	Effect::new(move |_| {
		let (Some(deck), Some(el)) = (deck, panel.get()) else {
			return;
		};
		debug!("section {} mounted", index);
		deck.register(index, el.into());
	});
	on_cleanup(move || {
		if let Some(deck) = deck {
			deck.unregister(index);
		}
	});

	let is_active = move || deck.is_some_and(|deck| deck.active_index().get() == Some(index));

	view! {
		<section
			node_ref=panel
			class=format!("deck-panel {class}")
			class:active=is_active
			data-section-index=index.to_string()
		>
			{children()}
		</section>
	}
}
