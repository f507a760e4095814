//! Vitrine Core - Shared value types for the Vitrine model viewer
//!
//! This crate provides the small set of types that both the asset pipeline
//! and the viewer front end agree on:
//! - Mathematical primitives (re-exported from glam)
//! - RGB color used by material descriptions

pub mod types;

pub use glam::Vec3;
pub use types::Color;
