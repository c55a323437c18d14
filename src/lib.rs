//! Shadematch - perceptual tooth shade matching
//!
//! HTTP service and CLI around the `shade-engine` crate.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
