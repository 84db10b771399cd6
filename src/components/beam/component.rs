use leptos::html::Div;
use leptos::prelude::*;
use log::{debug, warn};
use web_sys::{AnimationEvent, Event, TransitionEvent};

use super::geometry::resolve;
use super::render::{ARROW_SHAPE, BASE_OPACITY, BeamFrame, HIGHLIGHT_STOPS, next_beam_id, timing};
use super::triggers::{RecomputeBus, Subscription};
use super::types::{BeamStyle, DEFAULT_COLOR, PathDescription, Trigger};

/// Shared frame for every beam inside one [`BeamContainer`].
#[derive(Clone, Copy)]
pub struct BeamGroup {
	container: NodeRef<Div>,
	bus: StoredValue<RecomputeBus, LocalStorage>,
}

impl BeamGroup {
	/// The element whose top-left corner is the origin of every beam path.
	pub fn container(&self) -> NodeRef<Div> {
		self.container
	}

	/// The group's trigger bus, while the container is mounted.
	pub fn bus(&self) -> Option<RecomputeBus> {
		self.bus.try_get_value()
	}

	/// Ask every beam in the group to re-derive its path.
	pub fn refresh(&self) {
		self.bus.try_with_value(|bus| bus.fire(Trigger::Refresh));
	}

	fn subscribe(&self, callback: impl FnMut(Trigger) + 'static) -> Option<Subscription> {
		self.bus.try_with_value(|bus| bus.subscribe(callback))
	}
}

/// The [`BeamGroup`] of the nearest enclosing [`BeamContainer`].
pub fn use_beam_group() -> Option<BeamGroup> {
	use_context::<BeamGroup>()
}

/// Positioned box that owns the coordinate frame and the resize listener for
/// the beams rendered inside it.
#[component]
pub fn BeamContainer(#[prop(optional, into)] class: String, children: Children) -> impl IntoView {
	let container = NodeRef::<Div>::new();
	let bus = RecomputeBus::new();
	if let Err(err) = bus.listen_window_resize() {
		warn!("beam resize listener unavailable: {:?}", err);
	}
	let group = BeamGroup {
		container,
		bus: StoredValue::new_local(bus),
	};
	provide_context(group);

	on_cleanup(move || {
		group.bus.try_with_value(RecomputeBus::detach);
	});

	// Entrance transitions/animations move the anchors without resizing the
	// window; only the container's own ones matter.
	let on_transitionend = move |ev: TransitionEvent| refresh_if_own(group, &ev);
	let on_animationend = move |ev: AnimationEvent| refresh_if_own(group, &ev);

	view! {
		<div
			node_ref=container
			class=format!("beam-container {class}")
			on:transitionend=on_transitionend
			on:animationend=on_animationend
		>
			{children()}
		</div>
	}
}

fn refresh_if_own(group: BeamGroup, ev: &Event) {
	let own = match (ev.target(), ev.current_target()) {
		(Some(target), Some(current)) => target == current,
		_ => false,
	};
	if own {
		group.refresh();
	}
}

/// Anchor element a beam can attach to.
#[component]
pub fn BeamNode(
	node_ref: NodeRef<Div>,
	#[prop(optional, into)] class: String,
	#[prop(into, default = Signal::stored(false))] glow: Signal<bool>,
	children: Children,
) -> impl IntoView {
	view! {
		<div node_ref=node_ref class=format!("beam-node {class}") class:glow=move || glow.get()>
			{children()}
		</div>
	}
}

/// Animated connector from `from` to `to`, drawn in the enclosing
/// [`BeamContainer`]'s frame.
#[component]
pub fn AnimatedBeam(
	from: NodeRef<Div>,
	to: NodeRef<Div>,
	#[prop(into, default = DEFAULT_COLOR.to_string())] color: String,
	#[prop(default = 2.0)] stroke_width: f64,
	#[prop(default = 2000)] cycle_ms: u32,
	#[prop(default = 0)] delay_ms: u32,
	#[prop(default = 0.0)] curvature: f64,
	#[prop(default = true)] arrow: bool,
	#[prop(default = false)] pulse: bool,
) -> impl IntoView {
	let style = BeamStyle {
		color,
		stroke_width,
		cycle_ms,
		delay_ms,
		curvature,
		arrow,
		pulse,
	};
	let id = next_beam_id();
	let path = RwSignal::new(None::<PathDescription>);
	let frame = Memo::new(move |_| path.with(|p| p.as_ref().map(BeamFrame::new)));

	match use_beam_group() {
		Some(group) => {
			let container = group.container();
			let recompute = move |trigger: Trigger| {
				let next = resolve(&container, &from, &to, curvature);
				if next.is_none() {
					debug!("{:?}: beam endpoint not available yet", trigger);
				}
				path.set(next);
			};

			let subscription = StoredValue::new_local(group.subscribe(recompute));
			on_cleanup(move || {
				subscription.try_update_value(|sub| {
					sub.take();
				});
			});

			// Runs once every handle is mounted; NodeRefs only change on mount.
			Effect::new(move |_| {
				if container.get().is_some() && from.get().is_some() && to.get().is_some() {
					recompute(Trigger::Mount);
				}
			});
		}
		None => warn!("AnimatedBeam rendered outside a BeamContainer; nothing to draw"),
	}

	// The svg is built once; a recompute only rewrites the geometry attributes
	// so the highlight animation keeps its phase.
	let geometry = move |read: fn(&BeamFrame) -> String| {
		move || frame.with(|f| f.as_ref().map(read))
	};
	let gradient_id = format!("{id}-gradient");
	let arrow_id = format!("{id}-arrow");
	let (dur, begin) = timing(&style);
	let BeamStyle {
		color,
		stroke_width,
		arrow,
		pulse,
		..
	} = style;

	view! {
		<div class="beam-layer" aria-hidden="true">
			<Show when=move || frame.with(Option::is_some)>
				<svg class="beam-svg" width="100%" height="100%">
					<defs>
						<linearGradient
							id=gradient_id.clone()
							gradientUnits="userSpaceOnUse"
							x1=geometry(|f| f.x1.to_string())
							y1=geometry(|f| f.y1.to_string())
							x2=geometry(|f| f.x2.to_string())
							y2=geometry(|f| f.y2.to_string())
						>
							{HIGHLIGHT_STOPS
								.iter()
								.map(|stop| {
									view! {
										<stop
											offset=stop.offset.to_string()
											stop-color=color.clone()
											stop-opacity=stop.opacity.to_string()
										/>
									}
								})
								.collect_view()}
							<animateTransform
								attributeName="gradientTransform"
								type="translate"
								from=geometry(|f| f.travel_from.clone())
								to=geometry(|f| f.travel_to.clone())
								dur=dur.clone()
								begin=begin.clone()
								repeatCount="indefinite"
							/>
						</linearGradient>
						{arrow
							.then(|| {
								view! {
									<marker
										id=arrow_id.clone()
										markerWidth="10"
										markerHeight="10"
										refX="9"
										refY="3"
										orient="auto"
										markerUnits="strokeWidth"
									>
										<path d=ARROW_SHAPE fill=color.clone() />
									</marker>
								}
							})}
					</defs>
					<path
						d=geometry(|f| f.d.clone())
						stroke=color.clone()
						stroke-width=stroke_width.to_string()
						stroke-opacity=BASE_OPACITY.to_string()
						stroke-linecap="round"
						fill="none"
					/>
					<path
						class=("beam-pulse", pulse)
						d=geometry(|f| f.d.clone())
						stroke=format!("url(#{gradient_id})")
						stroke-width=stroke_width.to_string()
						stroke-linecap="round"
						fill="none"
						opacity="0.8"
						marker-end=arrow.then(|| format!("url(#{arrow_id})"))
					/>
				</svg>
			</Show>
		</div>
	}
}
