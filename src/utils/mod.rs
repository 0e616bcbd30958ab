//! Utility functions for Passgen

mod common;
mod id_gen;

pub use common::*;
pub use id_gen::*;
