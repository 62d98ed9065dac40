//! Service layer for the FORGE API.
//!
//! Services encapsulate pipeline logic that routes delegate to.

pub mod generation;

pub use generation::{Generation, GenerationService};
