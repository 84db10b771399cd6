//! Animated connectors between elements inside a shared container.

mod component;
pub mod geometry;
pub mod render;
mod triggers;
mod types;

pub use component::{AnimatedBeam, BeamContainer, BeamGroup, BeamNode, use_beam_group};
pub use geometry::{Measure, resolve};
pub use triggers::{RecomputeBus, Subscription};
pub use types::{BeamStyle, DEFAULT_COLOR, PathDescription, Trigger};
