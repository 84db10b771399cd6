use std::time::Duration;

use leptos::html::Div;
use leptos::leptos_dom::helpers::set_interval_with_handle;
use leptos::prelude::*;
use log::warn;

use super::agents::{AgentPortrait, agent};
use crate::components::beam::{AnimatedBeam, BeamContainer, BeamNode};

const STEP_COUNT: usize = 6;
const STEP_PERIOD: Duration = Duration::from_secs(3);

const PORTALS: [&str; 4] = ["LinkedIn", "Indeed", "Glassdoor", "Naukri"];

/// Pipeline stages, in order, with the agent that owns each one.
const STAGES: [(&str, &str); 5] = [
	("chase", "Platform integration"),
	("atlas", "Data parsing"),
	("echo", "Voice validation"),
	("sage", "Final filtering"),
	("nova", "Interview scheduling"),
];

/// Cycles the highlighted step; purely decorative.
fn use_step_cycle() -> ReadSignal<usize> {
	let step = RwSignal::new(0usize);
	match set_interval_with_handle(
		move || step.update(|s| *s = (*s + 1) % STEP_COUNT),
		STEP_PERIOD,
	) {
		Ok(handle) => on_cleanup(move || handle.clear()),
		Err(err) => warn!("step highlighter disabled: {:?}", err),
	}
	step.read_only()
}

#[component]
pub fn WorkflowSection() -> impl IntoView {
	let step = use_step_cycle();
	let portals: [NodeRef<Div>; 4] = std::array::from_fn(|_| NodeRef::new());
	let stages: [NodeRef<Div>; 5] = std::array::from_fn(|_| NodeRef::new());

	// Beams must be built inside the container so they find its context.
	view! {
		<section class="workflow">
			<header class="workflow-header reveal">
				<span class="pill">"AI Hiring Workflow"</span>
				<h2>"Complete AI Hiring Process"</h2>
				<p class="lead">
					"Five agents take a candidate from job-portal intake to a booked interview."
				</p>
			</header>
			<BeamContainer class="workflow-board reveal">
				<div class="portal-grid">
					{PORTALS
						.iter()
						.zip(portals)
						.map(|(name, node)| {
							view! {
								<BeamNode node_ref=node class="portal">
									<span class="portal-label">{*name}</span>
								</BeamNode>
							}
						})
						.collect_view()}
				</div>
				<div class="stage-row">
					{STAGES
						.iter()
						.zip(stages)
						.enumerate()
						.map(|(i, ((key, label), node))| {
							let portrait = agent(key)
								.map(|a| view! { <AgentPortrait agent=a class="round" /> });
							view! {
								<div class="stage">
									<BeamNode
										node_ref=node
										class="agent-node"
										glow=Signal::derive(move || step.get() == i)
									>
										{portrait}
									</BeamNode>
									<span class="stage-label">
										{format!("Step {}: {}", i + 1, label)}
									</span>
								</div>
							}
						})
						.collect_view()}
				</div>
				{portals
					.into_iter()
					.enumerate()
					.map(|(i, from)| {
						view! {
							<AnimatedBeam
								from=from
								to={stages[0]}
								stroke_width=3.0
								delay_ms={i as u32 * 500}
								pulse=true
								arrow=false
							/>
						}
					})
					.collect_view()}
				// Alternate the bend so consecutive hand-offs don't overlap.
				{stages
					.windows(2)
					.enumerate()
					.map(|(i, pair)| {
						let curvature = if i % 2 == 0 { 60.0 } else { -60.0 };
						view! {
							<AnimatedBeam
								from={pair[0]}
								to={pair[1]}
								color="#8b5cf6"
								curvature=curvature
								delay_ms={i as u32 * 400}
							/>
						}
					})
					.collect_view()}
			</BeamContainer>
		</section>
	}
}
