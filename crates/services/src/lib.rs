//! # Services
//!
//! The interaction layer proper: UI events are resolved against the
//! document into tagged actions, each action runs one handler that fetches
//! through the [`domains::ports`] traits and patches the document with the
//! result. The dispatch boundary logs every failure and surfaces nothing to
//! the user.

pub mod dispatcher;
pub mod error;
pub mod event;
pub mod fragments;
pub mod scroll;

pub use dispatcher::Dispatcher;
pub use error::InteractionError;
pub use event::{ScrollMetrics, UiEvent};
pub use scroll::ScrollController;
