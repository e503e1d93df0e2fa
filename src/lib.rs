//! Trackforged - mirror a music library into another audio format
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod convert;
pub mod dispatch;
pub mod preflight;
pub mod scanner;
