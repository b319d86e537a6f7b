//! Crate-level battle tests.
//!
//! - `scenarios.rs`: end-to-end battles driven through the engine
//! - `determinism.rs`: same seed, same battle
//! - `properties.rs`: proptest invariants of the resolvers
//! - `helpers.rs`: factories and scripted generators

mod determinism;
mod helpers;
