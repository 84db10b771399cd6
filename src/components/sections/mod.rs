//! Scroll-snapped section deck: intersection tracking, programmatic
//! navigation and the progress bar.

mod component;
mod navigator;
pub mod observer;
mod progress;
pub mod state;
pub mod tracker;

pub use component::{DeckHandle, SectionDeck, SectionPanel, use_section_deck};
pub use navigator::{DEFAULT_SETTLE, ScrollNavigator};
pub use observer::{ObserveError, ObserverConfig, SectionObserver};
pub use progress::{ProgressBar, progress_fraction};
pub use state::{NavError, NavTicket, NavigationState};
pub use tracker::{IntersectionSample, SectionTracker};
