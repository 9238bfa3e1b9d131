//! Shared utilities for the CliniDesk project.
//!
//! This crate contains utility functions and types that are shared
//! across multiple crates in the workspace, including `business` and `ui`.

pub mod version_info;
