//! Data models for the videos service.
//!
//! Field names serialize in camelCase to match the public JSON contract.

mod video;

pub use video::*;
