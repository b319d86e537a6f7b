//! Status effect definitions.

use serde::{Deserialize, Serialize};

/// A timed modifier attached to a combatant.
///
/// Catalog entries act as templates: each application clones the effect onto
/// the receiving combatant's active list, where `duration` counts down.
/// Reapplying an effect with the same id refreshes its duration instead of
/// stacking a second copy.
///
/// A negative `damage_per_turn` restores health each turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    /// Identity used for refresh-on-reapply.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Remaining turns.
    pub duration: u32,
    /// Health lost per tick (negative heals).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_per_turn: Option<i32>,
    /// Flat reduction of the owner's attack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_reduction: Option<u32>,
    /// Flat increase of the owner's attack.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_boost: Option<u32>,
    /// Fraction of incoming damage ignored by the owner.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage_reduction: Option<f64>,
}

impl StatusEffect {
    /// Creates an effect with no modifiers.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, duration: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            duration,
            damage_per_turn: None,
            attack_reduction: None,
            attack_boost: None,
            damage_reduction: None,
        }
    }

    /// Sets the per-turn damage.
    #[must_use]
    pub fn with_damage_per_turn(mut self, amount: i32) -> Self {
        self.damage_per_turn = Some(amount);
        self
    }

    /// Sets the attack reduction.
    #[must_use]
    pub fn with_attack_reduction(mut self, amount: u32) -> Self {
        self.attack_reduction = Some(amount);
        self
    }

    /// Sets the attack boost.
    #[must_use]
    pub fn with_attack_boost(mut self, amount: u32) -> Self {
        self.attack_boost = Some(amount);
        self
    }

    /// Sets the damage reduction fraction.
    #[must_use]
    pub fn with_damage_reduction(mut self, fraction: f64) -> Self {
        self.damage_reduction = Some(fraction);
        self
    }

    /// Net attack change granted by this effect.
    #[must_use]
    pub fn attack_delta(&self) -> i64 {
        i64::from(self.attack_boost.unwrap_or(0)) - i64::from(self.attack_reduction.unwrap_or(0))
    }
}
