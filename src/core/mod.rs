//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Document model (Document, Link, Finding)
//! - Fatal error type
//! - Run configuration
//! - Rendering functions for different output formats
//! - Path normalization and link path resolution
//! - File reading

pub mod config;
pub mod error;
pub mod file_reader;
pub mod model;
pub mod paths;
pub mod render;
pub mod util;
