//! Style resolution engine.

mod engine;
pub mod layout;
pub mod rules;

pub use engine::{Explanation, StyleResolver, explain, resolve};
