//! Viewer input: raw pointer, wheel and modifier events mapped to actions.
//!
//! # Invariants
//! - The camera and light consume actions, never raw input events.
//! - Only one modifier key state is tracked.
//! - Ambiguous button combinations map to [`Action::Noop`].

pub mod action;
pub mod mapper;

pub use action::Action;
pub use mapper::{InputMapper, PointerButtons};
