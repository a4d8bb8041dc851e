//! Shared code generation utilities for the pac lexicon code generator.
//!
//! This crate provides language-agnostic abstractions used by the
//! language-specific generators (e.g., `pac-codegen-typescript`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`generation`] - Output bookkeeping (ImportCollector, ClientManifest)

pub mod builder;
pub mod generation;
