//! radeck core data models.
//!
//! Quality objectives (objective → indicator → task) and the state of an
//! asset preload run. Everything here is plain data; the computations live
//! in `radeck-progress` and `radeck-preload`.

#![warn(missing_docs)]

// Quality objectives
mod objective;
mod task;

// Asset preloading
mod preload;

// Re-exports
pub use objective::{Objective, Indicator};
pub use task::{Task, TaskStatus};
pub use preload::{PreloadTarget, PreloadPhase, PreloadState};
