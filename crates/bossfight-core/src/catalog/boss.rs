//! Boss, phase and player records.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::ability::BossAbility;
use crate::error::{ContentError, ContentResult};

/// Named boss decision strategy.
///
/// The decision table for each archetype lives in [`crate::ai`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AiArchetype {
    /// Always hits as hard as it can.
    #[default]
    Aggressive,
    /// Heals when low, otherwise shields up.
    Defensive,
    /// Applies effects while the player is healthy, finishes when they are not.
    Tactical,
    /// Escalates as its own health drops.
    Berserker,
    /// Heals eagerly, buffs otherwise.
    Support,
    /// Mixes healing, burst damage and effects.
    Hybrid,
}

impl AiArchetype {
    /// All archetypes in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Aggressive,
        Self::Defensive,
        Self::Tactical,
        Self::Berserker,
        Self::Support,
        Self::Hybrid,
    ];
}

impl fmt::Display for AiArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggressive => write!(f, "Aggressive"),
            Self::Defensive => write!(f, "Defensive"),
            Self::Tactical => write!(f, "Tactical"),
            Self::Berserker => write!(f, "Berserker"),
            Self::Support => write!(f, "Support"),
            Self::Hybrid => write!(f, "Hybrid"),
        }
    }
}

/// A boss behavior mode tied to a health bracket.
///
/// A phase is eligible once the boss's health fraction is at or below
/// `threshold`. Among eligible phases the tightest one (smallest threshold)
/// is active; see [`crate::phase::select_phase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossPhase {
    /// Unique id within the boss.
    pub id: String,
    /// Display name used in phase-change announcements.
    pub name: String,
    /// Upper health fraction bound, in `(0, 1]`.
    pub threshold: f64,
    /// Archetype used while the phase is active.
    pub archetype: AiArchetype,
    /// Scales damage dealt by the boss.
    #[serde(default = "unit_multiplier")]
    pub damage_multiplier: f64,
    /// Scales the boss's defense against player attacks.
    #[serde(default = "unit_multiplier")]
    pub defense_multiplier: f64,
}

fn unit_multiplier() -> f64 {
    1.0
}

impl BossPhase {
    /// Creates a phase with neutral multipliers.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        threshold: f64,
        archetype: AiArchetype,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            threshold,
            archetype,
            damage_multiplier: 1.0,
            defense_multiplier: 1.0,
        }
    }

    /// Sets the damage and defense multipliers.
    #[must_use]
    pub fn with_multipliers(mut self, damage: f64, defense: f64) -> Self {
        self.damage_multiplier = damage;
        self.defense_multiplier = defense;
        self
    }
}

/// Rewards granted by the caller after a victory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rewards {
    /// Experience points.
    pub xp: u32,
    /// Currency.
    pub coins: u32,
}

/// A boss definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    /// Unique id within the catalog.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Starting and maximum health.
    pub max_health: u32,
    /// Starting and maximum energy.
    pub max_energy: u32,
    /// Attack stat added to ability damage.
    pub attack: u32,
    /// Defense stat subtracted from player damage.
    pub defense: u32,
    /// Archetype used when no phase is active.
    #[serde(default)]
    pub archetype: AiArchetype,
    /// Ability kit, in selection priority order.
    pub abilities: Vec<BossAbility>,
    /// Health-gated behavior modes.
    #[serde(default)]
    pub phases: Vec<BossPhase>,
    /// Victory rewards.
    #[serde(default)]
    pub rewards: Rewards,
    /// Player level required to challenge the boss.
    #[serde(default)]
    pub unlock_level: u32,
}

impl Boss {
    /// Looks up a phase by id.
    #[must_use]
    pub fn phase(&self, id: &str) -> Option<&BossPhase> {
        self.phases.iter().find(|phase| phase.id == id)
    }

    /// Validates the boss and sorts its phases by descending threshold.
    ///
    /// Phase selection does not depend on authoring order, but keeping the
    /// list sorted makes catalogs read the way fights unfold.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found.
    pub fn validate(&mut self) -> ContentResult<()> {
        if self.max_health == 0 {
            return Err(ContentError::ZeroMaxHealth(self.id.clone()));
        }

        let mut ability_ids = HashSet::new();
        for ability in &self.abilities {
            ability.validate()?;
            if !ability_ids.insert(ability.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    kind: "ability",
                    id: format!("{}/{}", self.id, ability.id),
                });
            }
        }

        let mut phase_ids = HashSet::new();
        for phase in &self.phases {
            if !(phase.threshold > 0.0 && phase.threshold <= 1.0) {
                return Err(ContentError::InvalidThreshold {
                    boss: self.id.clone(),
                    phase: phase.id.clone(),
                    threshold: phase.threshold,
                });
            }
            for (field, value) in [
                ("damage_multiplier", phase.damage_multiplier),
                ("defense_multiplier", phase.defense_multiplier),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ContentError::InvalidMultiplier {
                        boss: self.id.clone(),
                        phase: phase.id.clone(),
                        field,
                        value,
                    });
                }
            }
            if !phase_ids.insert(phase.id.as_str()) {
                return Err(ContentError::DuplicateId {
                    kind: "phase",
                    id: format!("{}/{}", self.id, phase.id),
                });
            }
        }

        self.phases
            .sort_by(|a, b| b.threshold.total_cmp(&a.threshold));
        Ok(())
    }
}

/// Player snapshot read by the engine.
///
/// The player record is owned elsewhere; the engine copies health and energy
/// at battle start and reads strength whenever the player acts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Display name used in log messages.
    pub name: String,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Current energy.
    pub energy: u32,
    /// Maximum energy.
    pub max_energy: u32,
    /// Attack stat added to ability damage.
    pub strength: u32,
}

impl Player {
    /// Creates a fully rested player.
    #[must_use]
    pub fn new(name: impl Into<String>, max_health: u32, max_energy: u32, strength: u32) -> Self {
        Self {
            name: name.into(),
            health: max_health,
            max_health,
            energy: max_energy,
            max_energy,
            strength,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Ability, ActionMagnitude, DamageCategory};

    fn boss_with_phases(phases: Vec<BossPhase>) -> Boss {
        Boss {
            id: "dummy".to_string(),
            name: "Dummy".to_string(),
            max_health: 100,
            max_energy: 50,
            attack: 5,
            defense: 5,
            archetype: AiArchetype::Aggressive,
            abilities: vec![Ability::new(
                "hit",
                "Hit",
                ActionMagnitude::Damage(10),
                DamageCategory::Physical,
            )],
            phases,
            rewards: Rewards::default(),
            unlock_level: 1,
        }
    }

    #[test]
    fn archetype_uses_screaming_case() {
        let json = serde_json::to_string(&AiArchetype::Berserker).unwrap();
        assert_eq!(json, "\"BERSERKER\"");
        let back: AiArchetype = serde_json::from_str("\"HYBRID\"").unwrap();
        assert_eq!(back, AiArchetype::Hybrid);
    }

    #[test]
    fn validate_sorts_phases_descending() {
        let mut boss = boss_with_phases(vec![
            BossPhase::new("desperate", "Desperate", 0.2, AiArchetype::Berserker),
            BossPhase::new("normal", "Normal", 1.0, AiArchetype::Aggressive),
            BossPhase::new("enraged", "Enraged", 0.5, AiArchetype::Tactical),
        ]);
        boss.validate().unwrap();
        let ids: Vec<_> = boss.phases.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["normal", "enraged", "desperate"]);
    }

    #[test]
    fn validate_rejects_zero_threshold() {
        let mut boss = boss_with_phases(vec![BossPhase::new(
            "never",
            "Never",
            0.0,
            AiArchetype::Support,
        )]);
        assert!(matches!(
            boss.validate(),
            Err(ContentError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_phase_ids() {
        let mut boss = boss_with_phases(vec![
            BossPhase::new("p", "One", 1.0, AiArchetype::Aggressive),
            BossPhase::new("p", "Two", 0.5, AiArchetype::Aggressive),
        ]);
        assert!(matches!(
            boss.validate(),
            Err(ContentError::DuplicateId { kind: "phase", .. })
        ));
    }

    #[test]
    fn validate_rejects_negative_multiplier() {
        let mut boss = boss_with_phases(vec![BossPhase::new(
            "p",
            "P",
            1.0,
            AiArchetype::Aggressive,
        )
        .with_multipliers(-1.0, 1.0)]);
        assert!(matches!(
            boss.validate(),
            Err(ContentError::InvalidMultiplier { .. })
        ));
    }

    #[test]
    fn validate_rejects_zero_health() {
        let mut boss = boss_with_phases(Vec::new());
        boss.max_health = 0;
        assert!(matches!(boss.validate(), Err(ContentError::ZeroMaxHealth(_))));
    }

    #[test]
    fn phase_multipliers_default_to_one() {
        let json = r#"{"id": "n", "name": "Normal", "threshold": 1.0, "archetype": "DEFENSIVE"}"#;
        let phase: BossPhase = serde_json::from_str(json).unwrap();
        assert!((phase.damage_multiplier - 1.0).abs() < f64::EPSILON);
        assert!((phase.defense_multiplier - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rested_player_is_full() {
        let player = Player::new("Hero", 100, 50, 15);
        assert_eq!(player.health, 100);
        assert_eq!(player.energy, 50);
    }
}
