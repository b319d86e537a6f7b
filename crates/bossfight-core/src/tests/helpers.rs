//! Factories for battle tests.
//!
//! The scripted generators pin every roll to one end of `[0, 1)`:
//!
//! - [`low_rolls`] hits anything with accuracy above 0 and crits anything
//!   with a critical chance above 0
//! - [`high_rolls`] misses anything with accuracy below 1 and never crits
//!   unless the chance is 1

use rand::rngs::mock::StepRng;

use crate::catalog::{Ability, ActionMagnitude, AiArchetype, Boss, BossPhase, DamageCategory, Player, Rewards};
use crate::config::EngineConfig;
use crate::engine::CombatEngine;

// =============================================================================
// Generators
// =============================================================================

/// Every draw is `0.0`.
pub fn low_rolls() -> StepRng {
    StepRng::new(0, 0)
}

/// Every draw is just below `1.0`.
pub fn high_rolls() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

/// Engine over a scripted generator with default configuration.
pub fn scripted_engine(rng: StepRng) -> CombatEngine<StepRng> {
    CombatEngine::with_rng(rng, EngineConfig::default())
}

// =============================================================================
// Content
// =============================================================================

/// Sure-hit, never-crit physical attack.
pub fn strike(id: &str, damage: u32, cost: u32) -> Ability {
    Ability::new(id, id, ActionMagnitude::Damage(damage), DamageCategory::Physical)
        .with_cost(cost)
}

/// A player with 15 strength and full resources.
pub fn hero() -> Player {
    Player::new("Hero", 200, 50, 15)
}

/// A player with no strength, so damage equals the ability's base value
/// against a defenseless boss.
pub fn weakling() -> Player {
    Player::new("Weakling", 200, 50, 0)
}

/// 150 HP, 15 defense, no attack, one 20-damage move and no phases.
pub fn training_boss() -> Boss {
    Boss {
        id: "dummy".to_string(),
        name: "Training Dummy".to_string(),
        max_health: 150,
        max_energy: 100,
        attack: 0,
        defense: 15,
        archetype: AiArchetype::Aggressive,
        abilities: vec![strike("thump", 20, 10)],
        phases: Vec::new(),
        rewards: Rewards { xp: 10, coins: 5 },
        unlock_level: 1,
    }
}

/// 100 HP, no defense, with Normal / Enraged / Desperate phases.
pub fn phased_boss() -> Boss {
    Boss {
        max_health: 100,
        defense: 0,
        phases: vec![
            BossPhase::new("normal", "Normal", 1.0, AiArchetype::Aggressive),
            BossPhase::new("enraged", "Enraged", 0.5, AiArchetype::Berserker)
                .with_multipliers(1.25, 0.9),
            BossPhase::new("desperate", "Desperate", 0.2, AiArchetype::Berserker)
                .with_multipliers(1.5, 0.8),
        ],
        ..training_boss()
    }
}
