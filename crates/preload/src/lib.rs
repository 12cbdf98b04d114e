//! Asset preloading.
//!
//! Fetches a fixed list of resources concurrently ahead of rendering and
//! exposes incremental progress plus a "ready" signal.

#![warn(missing_docs)]

pub mod error;
pub mod fetcher;
pub mod preloader;

pub use error::PreloadError;
pub use fetcher::{ResourceFetcher, HttpFetcher, FsFetcher};
pub use preloader::{ImagePreloader, PreloadHandle, PreloadReport, PreloadFailure};
