//! Headless driver for the kadal lizard
//!
//! Loads layered configuration, scripts the pointer and renders the
//! simulation to an animated GIF.

pub mod config;
pub mod headless;
pub mod pointer_path;

pub use config::AppConfig;
pub use pointer_path::{PointerPath, PointerPathKind};
