//! Shared test utilities for the gx-harness workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`galaxy`]: fake Galaxy installation roots
//! - [`workspace`]: [`workspace::TestWorkspace`] builder for tool trees

pub mod galaxy;
pub mod workspace;
