//! Connector beams and the scroll-snapped section deck.

pub mod beam;
pub mod sections;
