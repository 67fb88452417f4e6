// src/lib.rs

pub mod catalog;
pub mod comparison;
pub mod core;
pub mod render;

pub use crate::comparison::{builtin_comparisons, Comparison, ComparisonReport, ComparisonSummary};
pub use crate::core::error::{AlphabetError, Result};
pub use crate::render::{RenderConfig, RenderOutput, RenderTarget, Renderer};
