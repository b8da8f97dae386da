//! Derive macros for autowire.

pub use autowire_macros::*;
