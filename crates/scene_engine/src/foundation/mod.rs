//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the viewer:
//! - Math types and matrix helpers
//! - Typed handles for scene objects
//! - Frame timing
//! - Logging bootstrap

pub mod math;
pub mod collections;
pub mod time;
pub mod logging;
