//! Ambient Core - Foundational types for the ambient effect engine
//!
//! This crate provides the core types that all other ambient crates depend on:
//! - `Quality` / `CapabilityGrade` - Coarse quality and device tiers
//! - `Fps` - The three supported frame rates
//! - `Platform` - Device platform tag
//! - `Color` - Structured RGBA color with hex/HSL conversion
//! - Error types and Result alias

mod color;
mod error;
mod types;

pub use color::Color;
pub use error::{AmbientError, Result};
pub use types::{CapabilityGrade, Fps, Platform, Quality};
