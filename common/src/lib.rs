//! Platform-independent core of the Ace editor binding.
//!
//! [`EditorAdapter`] keeps a text value in sync between a host UI and an
//! editor widget reached through the [`EditorEngine`] trait. Deferred
//! propagation goes through a [`Scheduler`], so the whole contract can be
//! driven without a browser.

mod adapter;
mod config;
mod engine;
mod forms;
mod scheduler;

#[cfg(test)]
mod testing;

pub use adapter::{EditorAdapter, Lifecycle};
pub use config::{mode_path, theme_path, EditorConfig, Mode, DEFAULT_MODE, DEFAULT_THEME};
pub use engine::{EditorEngine, EditorError, NativeEvent};
pub use forms::ValueAccessor;
pub use scheduler::Scheduler;
