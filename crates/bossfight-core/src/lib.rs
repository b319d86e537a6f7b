//! # Bossfight Core
//!
//! Deterministic turn-based boss battle engine.
//!
//! A player and a boss alternate turns. Each action rolls for accuracy and
//! criticals, applies damage or healing and attaches timed status effects.
//! Bosses pick abilities through one of six AI archetypes and escalate
//! through health-gated phases.
//!
//! ## Architecture
//!
//! - **Catalog**: immutable abilities, effects, bosses and phases
//! - **Resolvers**: action resolution and status effect ticking
//! - **AI**: per-archetype ability selection
//! - **Phase**: health-bracket phase selection
//! - **Engine**: the turn-order state machine owning [`CombatState`]
//!
//! ## Usage
//!
//! ```
//! use bossfight_core::{Catalog, CombatEngine, Player};
//!
//! let catalog = Catalog::builtin();
//! let boss = catalog.boss("couch_golem").unwrap();
//! let strike = catalog.player_ability("power_strike").unwrap();
//! let player = Player::new("Hero", 100, 50, 15);
//!
//! let mut engine = CombatEngine::new(42);
//! engine.start_combat(boss, &player);
//! let result = engine.player_action(strike, &player);
//! assert!(result.success);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ai;
pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod phase;
pub mod resolver;
pub mod state;

pub use catalog::{
    Ability, ActionMagnitude, AiArchetype, Boss, BossAbility, BossPhase, Catalog,
    DamageCategory, Player, StatusEffect,
};
pub use config::EngineConfig;
pub use engine::{CombatEngine, StatusReport};
pub use error::{ContentError, ContentResult};
pub use resolver::ActionResult;
pub use state::{BattleEnd, BattleStatus, CombatLogEntry, CombatState, LogCategory, Turn, Winner};

#[cfg(test)]
mod tests;
