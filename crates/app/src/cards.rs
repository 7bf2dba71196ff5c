//! Dashboard cards that host an entity directly.

pub mod button;

pub use button::{ActionKind, ActionOutcome, ButtonCard, ButtonFace, ButtonView, LayoutOptions};
