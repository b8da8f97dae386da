//! # Autowire Support
//!
//! Shared utilities for the autowire crates.
//!
//! This crate provides:
//! - Type name rendering for resolution errors
//! - "Did you mean?" suggestions over registered type names

pub mod rendering;
