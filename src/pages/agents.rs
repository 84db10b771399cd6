use leptos::prelude::*;
use web_sys::MouseEvent;

use crate::components::sections::{ProgressBar, SectionDeck, SectionPanel, use_section_deck};

pub struct Agent {
	pub key: &'static str,
	pub name: &'static str,
	pub title: &'static str,
	pub tagline: &'static str,
	pub description: &'static str,
	pub image: &'static str,
	pub features: [&'static str; 2],
}

pub const AGENTS: &[Agent] = &[
	Agent {
		key: "nova",
		name: "Nova",
		title: "The Talent Hunter",
		tagline: "From 1000 to 100 in minutes",
		description: "Processes large application volumes by reading profiles, repositories and portfolios side by side, filtering out unqualified candidates early.",
		image: "/assets/nova.png",
		features: [
			"Cross-platform intelligence across 50+ platforms",
			"High-accuracy first-pass filtering",
		],
	},
	Agent {
		key: "echo",
		name: "Echo",
		title: "The Voice Detective",
		tagline: "Catches lies through conversation",
		description: "Runs voice interviews that ask about claimed projects, exposing inflated resumes through contextual follow-up questions.",
		image: "/assets/Echo - The Voice Detective.png",
		features: [
			"Voice screening with follow-up questioning",
			"Dynamic questions adapted to each candidate",
		],
	},
	Agent {
		key: "atlas",
		name: "Atlas",
		title: "The Memory Keeper",
		tagline: "Never forgets, always learns",
		description: "Keeps candidate history and interaction records, learning which signals preceded successful hires.",
		image: "/assets/Atlas - The Memory Keeper.png",
		features: [
			"Pattern recognition across past hires",
			"Institutional memory that compounds over time",
		],
	},
	Agent {
		key: "chase",
		name: "Chase",
		title: "The Connection Specialist",
		tagline: "From candidate to calendar in 48 hours",
		description: "Handles outreach and interview coordination, keeping qualified candidates from dropping off between steps.",
		image: "/assets/Chase - The Connection Specialist.png",
		features: [
			"Automated scheduling with multi-channel outreach",
			"48-hour candidate-to-calendar turnaround",
		],
	},
	Agent {
		key: "sage",
		name: "Sage",
		title: "The Oracle",
		tagline: "Your hiring consultant, always available",
		description: "Answers questions about the pipeline and explains each recommendation with a full audit trail.",
		image: "/assets/Sage - The Oracle.png",
		features: [
			"Real-time insights on every candidate",
			"Decision transparency and audit trails",
		],
	},
];

pub fn agent(key: &str) -> Option<&'static Agent> {
	AGENTS.iter().find(|a| a.key == key)
}

/// Agent image that falls back to a lettered placeholder if it fails to load.
#[component]
pub fn AgentPortrait(agent: &'static Agent, #[prop(optional, into)] class: String) -> impl IntoView {
	let loaded = RwSignal::new(false);
	let failed = RwSignal::new(false);
	let initial = agent.name.chars().next().unwrap_or('?').to_string();

	view! {
		<div class=format!("agent-portrait {class}")>
			<Show when=move || !loaded.get() && !failed.get()>
				<div class="portrait-skeleton" />
			</Show>
			<Show
				when=move || !failed.get()
				fallback=move || {
					view! {
						<div class="portrait-fallback">
							<span class="portrait-initial">{initial.clone()}</span>
						</div>
					}
				}
			>
				<img
					src=agent.image
					alt=format!("{} - {}", agent.name, agent.title)
					class:loaded=move || loaded.get()
					on:load=move |_| loaded.set(true)
					on:error=move |_| failed.set(true)
				/>
			</Show>
		</div>
	}
}

#[component]
fn IntroSlide() -> impl IntoView {
	let deck = use_section_deck();
	let explore = move |_: MouseEvent| {
		if let Some(deck) = deck {
			if let Err(err) = deck.go_to(1) {
				log::debug!("explore ignored: {}", err);
			}
		}
	};

	view! {
		<div class="slide-intro">
			<span class="pill">"AI WORKFORCE"</span>
			<h1>"Meet Your " <span class="strong">"5-Agent AI Team"</span></h1>
			<p class="lead">
				"Each agent specializes in one part of technical hiring, and together they cover the whole process."
			</p>
			<button class="cta" on:click=explore>
				"Explore AI Agents"
			</button>
		</div>
	}
}

#[component]
fn AgentSlide(agent: &'static Agent) -> impl IntoView {
	view! {
		<div class="slide-agent">
			<div class="agent-copy">
				<div class="agent-heading">
					<div class="agent-badge">{agent.name.chars().next().unwrap_or('?').to_string()}</div>
					<div>
						<h2>{agent.name}</h2>
						<p class="agent-title">{agent.title}</p>
					</div>
				</div>
				<span class="pill">{agent.tagline}</span>
				<p class="agent-description">{agent.description}</p>
				<ul class="agent-features">
					{agent.features.iter().map(|f| view! { <li>{*f}</li> }).collect_view()}
				</ul>
			</div>
			<AgentPortrait agent=agent class="agent-image" />
		</div>
	}
}

/// Intro panel plus one full-viewport panel per agent.
#[component]
pub fn AgentDeck() -> impl IntoView {
	view! {
		<SectionDeck>
			<ProgressBar />
			<SectionPanel index=0>
				<IntroSlide />
			</SectionPanel>
			{AGENTS
				.iter()
				.enumerate()
				.map(|(i, agent)| {
					view! {
						<SectionPanel index={i + 1}>
							<AgentSlide agent=agent />
						</SectionPanel>
					}
				})
				.collect_view()}
		</SectionDeck>
	}
}
