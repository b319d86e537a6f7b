//! Content catalog: the immutable records the engine consumes.
//!
//! - [`Ability`] / [`BossAbility`]: player and boss actions
//! - [`StatusEffect`]: timed modifiers
//! - [`Boss`], [`BossPhase`], [`AiArchetype`]: boss definitions
//! - [`Player`]: the player snapshot read at battle start
//! - [`Catalog`]: a validated collection of bosses and player abilities
//!
//! # Example
//!
//! ```
//! use bossfight_core::catalog::Catalog;
//!
//! let catalog = Catalog::builtin();
//! let golem = catalog.boss("couch_golem").unwrap();
//! assert_eq!(golem.max_health, 150);
//! ```

mod ability;
pub mod builtin;
mod boss;
mod effect;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

pub use ability::{Ability, ActionMagnitude, BossAbility, DamageCategory};
pub use boss::{AiArchetype, Boss, BossPhase, Player, Rewards};
pub use effect::StatusEffect;

use crate::error::{ContentError, ContentResult};

/// A validated set of bosses and player abilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Boss definitions.
    #[serde(default)]
    pub bosses: Vec<Boss>,
    /// Player abilities.
    #[serde(default)]
    pub player_abilities: Vec<Ability>,
}

impl Catalog {
    /// Returns the built-in content set.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            bosses: builtin::bosses(),
            player_abilities: builtin::player_abilities(),
        }
    }

    /// Parses and validates a catalog from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError::Parse`] for malformed JSON or out-of-range
    /// ability probabilities, and the validation errors of
    /// [`Catalog::validate`].
    pub fn from_json(json: &str) -> ContentResult<Self> {
        let mut catalog: Self = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Validates every record and normalizes phase order.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn validate(&mut self) -> ContentResult<()> {
        let mut boss_ids = HashSet::new();
        for boss in &mut self.bosses {
            boss.validate()?;
            if !boss_ids.insert(boss.id.clone()) {
                return Err(ContentError::DuplicateId {
                    kind: "boss",
                    id: boss.id.clone(),
                });
            }
        }

        let mut ability_ids = HashSet::new();
        for ability in &self.player_abilities {
            ability.validate()?;
            if !ability_ids.insert(ability.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    kind: "ability",
                    id: ability.id.clone(),
                });
            }
        }
        Ok(())
    }

    /// Looks up a boss by id.
    #[must_use]
    pub fn boss(&self, id: &str) -> Option<&Boss> {
        self.bosses.iter().find(|boss| boss.id == id)
    }

    /// Looks up a player ability by id.
    #[must_use]
    pub fn player_ability(&self, id: &str) -> Option<&Ability> {
        self.player_abilities.iter().find(|ability| ability.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_validates() {
        let mut catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.bosses.len(), 3);
        assert!(catalog.player_ability("power_strike").is_some());
    }

    #[test]
    fn builtin_catalog_survives_json() {
        let catalog = Catalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        let loaded = Catalog::from_json(&json).unwrap();
        assert_eq!(loaded, catalog);
    }

    #[test]
    fn duplicate_boss_ids_rejected() {
        let mut catalog = Catalog::builtin();
        let copy = catalog.bosses[0].clone();
        catalog.bosses.push(copy);
        assert!(matches!(
            catalog.validate(),
            Err(ContentError::DuplicateId { kind: "boss", .. })
        ));
    }

    #[test]
    fn minimal_json_catalog() {
        let json = r#"{
            "bosses": [{
                "id": "slime",
                "name": "Slime",
                "max_health": 50,
                "max_energy": 20,
                "attack": 3,
                "defense": 1,
                "abilities": [
                    {"id": "ooze", "name": "Ooze", "damage": 6, "cost": 2, "category": "physical"}
                ],
                "phases": [
                    {"id": "angry", "name": "Angry", "threshold": 0.3, "archetype": "BERSERKER"},
                    {"id": "calm", "name": "Calm", "threshold": 1.0, "archetype": "SUPPORT"}
                ]
            }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let slime = catalog.boss("slime").unwrap();
        assert_eq!(slime.archetype, AiArchetype::Aggressive);
        assert_eq!(slime.phases[0].id, "calm");
        assert!(catalog.player_abilities.is_empty());
    }

    #[test]
    fn unknown_lookup_is_none() {
        let catalog = Catalog::builtin();
        assert!(catalog.boss("nobody").is_none());
        assert!(catalog.player_ability("nothing").is_none());
    }
}
