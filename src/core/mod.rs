// src/core/mod.rs

pub mod aligner;
pub mod error;
pub mod special;
pub mod stats;
pub mod types;
