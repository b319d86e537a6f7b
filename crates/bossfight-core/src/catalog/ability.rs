//! Ability records shared by the player and boss kits.
//!
//! Authored content describes an ability's strength either as a signed
//! `damage` field (negative meaning healing) or as a nested `effect.value`.
//! Both shapes are folded into a single [`ActionMagnitude`] when the record is
//! deserialized, so resolution code never has to ask which field is present.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::effect::StatusEffect;
use crate::error::ContentError;

/// Damage category of an ability.
///
/// The category decides who receives the ability's status effects:
/// offensive categories affect the target, the others affect the user.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageCategory {
    /// Weapon or body blow.
    Physical,
    /// Spell or elemental attack.
    Magical,
    /// Healing or recovery.
    Support,
    /// Self-enhancement or shielding.
    Buff,
}

impl DamageCategory {
    /// Returns true when status effects land on the opponent.
    #[must_use]
    pub const fn is_offensive(self) -> bool {
        matches!(self, Self::Physical | Self::Magical)
    }
}

impl fmt::Display for DamageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physical => write!(f, "physical"),
            Self::Magical => write!(f, "magical"),
            Self::Support => write!(f, "support"),
            Self::Buff => write!(f, "buff"),
        }
    }
}

/// Base strength of an ability, resolved once at load time.
///
/// `Damage(0)` describes a pure utility ability (a buff with no hit).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionMagnitude {
    /// Damage dealt to the target before stats are applied.
    Damage(u32),
    /// Health restored to the user.
    Heal(u32),
}

impl ActionMagnitude {
    /// Builds a magnitude from the signed catalog convention.
    ///
    /// # Example
    ///
    /// ```
    /// use bossfight_core::catalog::ActionMagnitude;
    ///
    /// assert_eq!(ActionMagnitude::from_signed(25), ActionMagnitude::Damage(25));
    /// assert_eq!(ActionMagnitude::from_signed(-30), ActionMagnitude::Heal(30));
    /// ```
    #[must_use]
    pub const fn from_signed(value: i32) -> Self {
        if value < 0 {
            Self::Heal(value.unsigned_abs())
        } else {
            Self::Damage(value.unsigned_abs())
        }
    }

    /// Returns the signed catalog value (negative for healing).
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn signed(self) -> i32 {
        match self {
            Self::Damage(amount) => amount as i32,
            Self::Heal(amount) => -(amount as i32),
        }
    }

    /// Returns the damage amount, or 0 for healing.
    #[must_use]
    pub const fn damage(self) -> u32 {
        match self {
            Self::Damage(amount) => amount,
            Self::Heal(_) => 0,
        }
    }

}

/// A combat ability, usable by the player or by a boss.
///
/// Abilities are immutable catalog entries. Only the [`StatusEffect`]s they
/// carry are cloned, when applied onto a combatant.
///
/// # Example
///
/// ```
/// use bossfight_core::catalog::{Ability, ActionMagnitude, DamageCategory};
///
/// let strike = Ability::new("strike", "Strike", ActionMagnitude::Damage(25), DamageCategory::Physical)
///     .with_cost(10)
///     .with_accuracy(0.9);
///
/// assert_eq!(strike.cost, 10);
/// assert_eq!(strike.magnitude.damage(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AbilityRecord", into = "AbilityRecord")]
pub struct Ability {
    /// Unique id within a kit.
    pub id: String,
    /// Display name used in log messages.
    pub name: String,
    /// Base damage or healing.
    pub magnitude: ActionMagnitude,
    /// Energy consumed on use.
    pub cost: u32,
    /// Turns the ability stays unavailable after use (boss kits only).
    pub cooldown: u32,
    /// Damage category.
    pub category: DamageCategory,
    /// Hit probability in `[0, 1]`.
    pub accuracy: f64,
    /// Critical probability in `[0, 1]`.
    pub critical_chance: f64,
    /// Effects applied on hit.
    pub effects: Vec<StatusEffect>,
    /// Marks a boss's finisher, preferred by some AI archetypes.
    pub ultimate: bool,
}

/// Boss kits use the same record as player abilities.
pub type BossAbility = Ability;

impl Ability {
    /// Creates an ability that always hits, never crits, is free and has no cooldown.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        magnitude: ActionMagnitude,
        category: DamageCategory,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            magnitude,
            cost: 0,
            cooldown: 0,
            category,
            accuracy: 1.0,
            critical_chance: 0.0,
            effects: Vec::new(),
            ultimate: false,
        }
    }

    /// Sets the energy cost.
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Sets the cooldown in turns.
    #[must_use]
    pub fn with_cooldown(mut self, cooldown: u32) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Sets the hit probability.
    #[must_use]
    pub fn with_accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = accuracy;
        self
    }

    /// Sets the critical probability.
    #[must_use]
    pub fn with_critical_chance(mut self, critical_chance: f64) -> Self {
        self.critical_chance = critical_chance;
        self
    }

    /// Appends an effect applied on hit.
    #[must_use]
    pub fn with_effect(mut self, effect: StatusEffect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Marks the ability as an ultimate.
    #[must_use]
    pub fn as_ultimate(mut self) -> Self {
        self.ultimate = true;
        self
    }

    /// Returns true when the ability applies at least one status effect.
    #[must_use]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }

    /// Checks that the probabilities are within `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::ProbabilityOutOfRange`] for the first bad field.
    pub fn validate(&self) -> Result<(), ContentError> {
        for (field, value) in [
            ("accuracy", self.accuracy),
            ("critical_chance", self.critical_chance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ContentError::ProbabilityOutOfRange {
                    owner: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// Catalog record shape
// =============================================================================

/// Nested value form used by some authored abilities.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
struct AbilityEffectValue {
    value: i32,
}

/// On-disk shape of an ability.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AbilityRecord {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    damage: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    effect: Option<AbilityEffectValue>,
    #[serde(default)]
    cost: u32,
    #[serde(default)]
    cooldown: u32,
    category: DamageCategory,
    #[serde(default = "default_accuracy")]
    accuracy: f64,
    #[serde(default)]
    critical_chance: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    status_effects: Vec<StatusEffect>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    ultimate: bool,
}

fn default_accuracy() -> f64 {
    1.0
}

impl TryFrom<AbilityRecord> for Ability {
    type Error = ContentError;

    fn try_from(record: AbilityRecord) -> Result<Self, Self::Error> {
        let signed = record
            .damage
            .or(record.effect.map(|effect| effect.value))
            .unwrap_or(0);
        let ability = Self {
            id: record.id,
            name: record.name,
            magnitude: ActionMagnitude::from_signed(signed),
            cost: record.cost,
            cooldown: record.cooldown,
            category: record.category,
            accuracy: record.accuracy,
            critical_chance: record.critical_chance,
            effects: record.status_effects,
            ultimate: record.ultimate,
        };
        ability.validate()?;
        Ok(ability)
    }
}

impl From<Ability> for AbilityRecord {
    fn from(ability: Ability) -> Self {
        Self {
            id: ability.id,
            name: ability.name,
            damage: Some(ability.magnitude.signed()),
            effect: None,
            cost: ability.cost,
            cooldown: ability.cooldown,
            category: ability.category,
            accuracy: ability.accuracy,
            critical_chance: ability.critical_chance,
            status_effects: ability.effects,
            ultimate: ability.ultimate,
        }
    }
}
