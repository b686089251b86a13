//! Shared test utilities for the dirsync workspace.
//!
//! This crate provides standardised tree fixtures so each crate's test suite
//! builds source and replica directories the same way. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`tree`]: [`tree::TestTree`] builder for a scratch directory tree

pub mod tree;
