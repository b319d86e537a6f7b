//! Resolvers turn decisions into state mutations.
//!
//! The engine decides *who* acts and *with what*; resolvers decide *what
//! happens*. They operate on [`CombatantState`](crate::state::CombatantState)
//! values only and never touch turn order or the battle log.
//!
//! # Invariants
//!
//! - Resolvers MUST draw randomness only from the generator they are given
//! - Resolvers MUST be deterministic given the same inputs and generator state
//! - Damage floors health at 0 and healing caps it at max health
//!
//! # Available Resolvers
//!
//! - [`resolve_action`]: accuracy, damage/healing, criticals, effects, message
//! - [`apply_effects`] / [`tick_effects`]: status effect lifecycle

mod action;
mod status;

pub use action::{resolve_action, ActionModifiers, ActionResult};
pub use status::{apply_effects, tick_effects, StatusTick};
