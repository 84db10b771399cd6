#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use beam_deck::components::beam::{
	AnimatedBeam, BeamContainer, BeamGroup, BeamNode, Measure, RecomputeBus, Trigger, resolve,
	use_beam_group,
};
use beam_deck::components::sections::{
	DeckHandle, NavError, ScrollNavigator, SectionDeck, SectionPanel, progress_fraction,
	use_section_deck,
};
use kurbo::Point;
use leptos::html::Div;
use leptos::mount::mount_to;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, Event, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

fn div(style: &str) -> Element {
	let el = document().create_element("div").unwrap();
	el.set_attribute("style", style).unwrap();
	el
}

fn mounted(style: &str) -> Element {
	let el = div(style);
	document().body().unwrap().append_child(&el).unwrap();
	el
}

/// Let queued effects and render updates run.
async fn next_tick() {
	let promise = js_sys::Promise::new(&mut |resolve, _| {
		web_sys::window()
			.unwrap()
			.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 20)
			.unwrap();
	});
	JsFuture::from(promise).await.unwrap();
}

fn fire_resize(times: usize) {
	let window = web_sys::window().unwrap();
	for _ in 0..times {
		window.dispatch_event(&Event::new("resize").unwrap()).unwrap();
	}
}

#[wasm_bindgen_test]
fn resolves_centers_of_real_elements() {
	let container = mounted("position:absolute; left:100px; top:50px; width:600px; height:400px;");
	let from = div("position:absolute; left:20px; top:30px; width:40px; height:40px;");
	let to = div("position:absolute; left:400px; top:200px; width:80px; height:20px;");
	container.append_child(&from).unwrap();
	container.append_child(&to).unwrap();

	let path = resolve(&container, &from, &to, 0.0).unwrap();
	assert_eq!(path.start, Point::new(40.0, 50.0));
	assert_eq!(path.end, Point::new(440.0, 210.0));

	container.remove();
}

#[wasm_bindgen_test]
fn detached_elements_are_unavailable() {
	let container = mounted("width:100px; height:100px;");
	let attached = div("width:10px; height:10px;");
	container.append_child(&attached).unwrap();
	let detached = div("width:10px; height:10px;");

	assert!(detached.measure().is_none());
	assert!(resolve(&container, &attached, &detached, 0.0).is_none());
	assert!(resolve(&container, &detached, &attached, 0.0).is_none());

	container.remove();
	assert!(resolve(&container, &attached, &attached, 0.0).is_none());
}

#[wasm_bindgen_test]
fn window_resize_reaches_each_subscriber_once_until_released() {
	let bus = RecomputeBus::new();
	bus.listen_window_resize().unwrap();
	let hits = Rc::new(Cell::new(0));
	let seen = hits.clone();
	let sub = bus.subscribe(move |trigger| {
		assert_eq!(trigger, Trigger::Resize);
		seen.set(seen.get() + 1);
	});

	fire_resize(1);
	assert_eq!(hits.get(), 1);

	drop(sub);
	fire_resize(4);
	assert_eq!(hits.get(), 1);
	bus.detach();
}

#[wasm_bindgen_test]
fn go_to_last_of_six_locks_and_fills_progress() {
	let navigator = ScrollNavigator::new(Duration::from_millis(1200));
	let panels: Vec<Element> = (0..6)
		.map(|_| mounted("height:100vh;"))
		.collect();
	for (index, panel) in panels.iter().enumerate() {
		navigator.register(index, panel.clone());
	}

	assert_eq!(navigator.go_to(5), Ok(()));
	assert_eq!(navigator.go_to(5), Err(NavError::Locked));
	assert!(navigator.is_locked());

	let active = navigator.active_index().get_untracked();
	assert_eq!(active, Some(5));
	let count = navigator.section_count().get_untracked();
	assert_eq!(progress_fraction(active, count), 1.0);

	// reports during the scroll stay hidden until the lock is released
	navigator.observe(3);
	assert_eq!(navigator.active_index().get_untracked(), Some(5));

	navigator.cancel_pending();
	for panel in panels {
		panel.remove();
	}
}

#[wasm_bindgen_test]
fn go_to_accepts_registered_index_past_a_gap() {
	let navigator = ScrollNavigator::new(Duration::from_millis(1200));
	let panels: Vec<(usize, Element)> = [0, 1, 3, 4, 5]
		.into_iter()
		.map(|index| (index, mounted("height:100vh;")))
		.collect();
	for (index, panel) in &panels {
		navigator.register(*index, panel.clone());
	}

	assert_eq!(
		navigator.go_to(2),
		Err(NavError::OutOfRange { index: 2, count: 5 })
	);
	assert!(!navigator.is_locked());
	assert_eq!(navigator.go_to(5), Ok(()));
	assert_eq!(navigator.active_index().get_untracked(), Some(5));

	navigator.cancel_pending();
	for (_, panel) in panels {
		panel.remove();
	}
}

#[wasm_bindgen_test]
async fn resize_keeps_beam_overlay_and_moves_its_path() {
	let host = mounted("position:absolute; left:0; top:0; width:600px;");
	let (a, b) = (NodeRef::<Div>::new(), NodeRef::<Div>::new());
	let handle = mount_to(host.clone().unchecked_into::<HtmlElement>(), move || {
		view! {
			<BeamContainer>
				<BeamNode node_ref=a>"a"</BeamNode>
				<BeamNode node_ref=b>"b"</BeamNode>
				<AnimatedBeam from=a to=b delay_ms=300 />
			</BeamContainer>
		}
	});
	next_tick().await;

	let svg = host.query_selector(".beam-svg").unwrap().unwrap();
	let stroke = svg.last_element_child().unwrap();
	let before = stroke.get_attribute("d").unwrap();

	b.get_untracked()
		.unwrap()
		.set_attribute("style", "margin-left:200px;")
		.unwrap();
	fire_resize(3);
	next_tick().await;

	let after = host.query_selector(".beam-svg").unwrap().unwrap();
	assert!(svg.is_same_node(Some(&after)));
	assert_ne!(stroke.get_attribute("d").unwrap(), before);

	drop(handle);
	host.remove();
}

#[wasm_bindgen_test]
async fn unmounted_beams_see_no_further_resizes() {
	let host = mounted("position:absolute; left:0; top:0; width:600px;");
	let group = RwSignal::new(None::<BeamGroup>);
	let (a, b, c) = (NodeRef::<Div>::new(), NodeRef::<Div>::new(), NodeRef::<Div>::new());
	let handle = mount_to(host.clone().unchecked_into::<HtmlElement>(), move || {
		view! {
			<BeamContainer>
				{group.set(use_beam_group())}
				<BeamNode node_ref=a>"a"</BeamNode>
				<BeamNode node_ref=b>"b"</BeamNode>
				<BeamNode node_ref=c>"c"</BeamNode>
				<AnimatedBeam from=a to=b />
				<AnimatedBeam from=b to=c curvature=40.0 />
			</BeamContainer>
		}
	});
	next_tick().await;

	let bus = group.get_untracked().and_then(|g| g.bus()).unwrap();
	assert_eq!(bus.len(), 2);
	assert_eq!(host.query_selector_all(".beam-svg").unwrap().length(), 2);

	drop(handle);
	next_tick().await;
	assert!(bus.is_empty());
	assert!(host.query_selector(".beam-svg").unwrap().is_none());

	// the container's window listener went with it
	let hits = Rc::new(Cell::new(0));
	let seen = hits.clone();
	let _late = bus.subscribe(move |_| seen.set(seen.get() + 1));
	fire_resize(5);
	assert_eq!(hits.get(), 0);

	host.remove();
}

#[wasm_bindgen_test]
async fn late_section_registers_and_releases() {
	let host = mounted("");
	let deck = RwSignal::new(None::<DeckHandle>);
	let extra = RwSignal::new(false);
	let handle = mount_to(host.clone().unchecked_into::<HtmlElement>(), move || {
		view! {
			<SectionDeck>
				{deck.set(use_section_deck())}
				<SectionPanel index=0>"zero"</SectionPanel>
				<SectionPanel index=1>"one"</SectionPanel>
				<SectionPanel index=2>"two"</SectionPanel>
				<Show when=move || extra.get()>
					<SectionPanel index=3>"three"</SectionPanel>
				</Show>
			</SectionDeck>
		}
	});
	next_tick().await;

	let deck = deck.get_untracked().unwrap();
	assert_eq!(deck.section_count().get_untracked(), 3);

	extra.set(true);
	next_tick().await;
	assert_eq!(deck.section_count().get_untracked(), 4);

	extra.set(false);
	next_tick().await;
	assert_eq!(deck.section_count().get_untracked(), 3);
	assert_eq!(
		deck.go_to(3),
		Err(NavError::OutOfRange { index: 3, count: 3 })
	);
	assert_eq!(deck.go_to(2), Ok(()));

	drop(handle);
	assert!(host.query_selector("section").unwrap().is_none());
	host.remove();
}
