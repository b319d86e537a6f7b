//! Phase manager: which behavior mode a boss is in at its current health.
//!
//! A phase is eligible while the boss's health fraction is at or below its
//! threshold. Among eligible phases the one with the *smallest* threshold
//! wins, so the tightest bracket covering the current health is selected no
//! matter how the phase list was authored. Equal thresholds resolve to the
//! earlier phase.
//!
//! # Example
//!
//! ```
//! use bossfight_core::catalog::{AiArchetype, BossPhase};
//! use bossfight_core::phase::select_phase;
//!
//! // Authored out of order on purpose.
//! let phases = vec![
//!     BossPhase::new("desperate", "Desperate", 0.2, AiArchetype::Berserker),
//!     BossPhase::new("normal", "Normal", 1.0, AiArchetype::Aggressive),
//!     BossPhase::new("enraged", "Enraged", 0.5, AiArchetype::Hybrid),
//! ];
//!
//! assert_eq!(select_phase(&phases, 1.0).unwrap().id, "normal");
//! assert_eq!(select_phase(&phases, 0.5).unwrap().id, "enraged");
//! assert_eq!(select_phase(&phases, 0.15).unwrap().id, "desperate");
//! ```

use crate::catalog::{AiArchetype, Boss, BossPhase};

/// Returns the phase with the smallest threshold still `>= health_fraction`.
#[must_use]
pub fn select_phase(phases: &[BossPhase], health_fraction: f64) -> Option<&BossPhase> {
    phases
        .iter()
        .filter(|phase| phase.threshold >= health_fraction)
        .fold(None, |best: Option<&BossPhase>, phase| match best {
            Some(current) if current.threshold <= phase.threshold => Some(current),
            _ => Some(phase),
        })
}

/// Outcome of re-evaluating a boss's phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhaseTransition<'a> {
    /// The recorded phase is still correct.
    Unchanged,
    /// The boss moved into a different phase.
    Entered(&'a BossPhase),
    /// No phase covers the current health (possible after healing when no
    /// phase reaches threshold 1.0).
    Cleared,
}

/// Compares the phase recorded in battle state with the one the boss's
/// health now calls for.
#[must_use]
pub fn transition<'a>(
    boss: &'a Boss,
    current: Option<&str>,
    health_fraction: f64,
) -> PhaseTransition<'a> {
    match (select_phase(&boss.phases, health_fraction), current) {
        (Some(phase), Some(id)) if phase.id == id => PhaseTransition::Unchanged,
        (Some(phase), _) => PhaseTransition::Entered(phase),
        (None, Some(_)) => PhaseTransition::Cleared,
        (None, None) => PhaseTransition::Unchanged,
    }
}

/// Archetype and multipliers in force for the boss's current phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseModifiers {
    /// AI decision table.
    pub archetype: AiArchetype,
    /// Multiplier on damage the boss deals.
    pub damage_multiplier: f64,
    /// Multiplier on the boss's defense.
    pub defense_multiplier: f64,
}

impl PhaseModifiers {
    /// Resolves the modifiers for `boss` in phase `phase_id`.
    ///
    /// Without a recorded phase (or with an unknown id) the boss uses its own
    /// archetype and neutral multipliers.
    #[must_use]
    pub fn for_boss(boss: &Boss, phase_id: Option<&str>) -> Self {
        match phase_id.and_then(|id| boss.phase(id)) {
            Some(phase) => Self {
                archetype: phase.archetype,
                damage_multiplier: phase.damage_multiplier,
                defense_multiplier: phase.defense_multiplier,
            },
            None => Self {
                archetype: boss.archetype,
                damage_multiplier: 1.0,
                defense_multiplier: 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;

    fn standard() -> Vec<BossPhase> {
        vec![
            BossPhase::new("normal", "Normal", 1.0, AiArchetype::Aggressive),
            BossPhase::new("enraged", "Enraged", 0.5, AiArchetype::Tactical)
                .with_multipliers(1.25, 0.9),
            BossPhase::new("desperate", "Desperate", 0.2, AiArchetype::Berserker)
                .with_multipliers(1.5, 0.8),
        ]
    }

    mod select_tests {
        use super::*;

        #[test]
        fn brackets_follow_health() {
            let phases = standard();
            let id = |fraction| select_phase(&phases, fraction).map(|p| p.id.as_str());
            assert_eq!(id(1.0), Some("normal"));
            assert_eq!(id(0.51), Some("normal"));
            assert_eq!(id(0.5), Some("enraged"));
            assert_eq!(id(0.21), Some("enraged"));
            assert_eq!(id(0.2), Some("desperate"));
            assert_eq!(id(0.0), Some("desperate"));
        }

        #[test]
        fn authoring_order_does_not_matter() {
            let mut reversed = standard();
            reversed.reverse();
            for fraction in [1.0, 0.75, 0.5, 0.3, 0.2, 0.05] {
                assert_eq!(
                    select_phase(&standard(), fraction).map(|p| p.id.clone()),
                    select_phase(&reversed, fraction).map(|p| p.id.clone()),
                    "fraction {fraction}"
                );
            }
        }

        #[test]
        fn equal_thresholds_pick_earlier_phase() {
            let phases = vec![
                BossPhase::new("first", "First", 0.5, AiArchetype::Aggressive),
                BossPhase::new("second", "Second", 0.5, AiArchetype::Defensive),
            ];
            assert_eq!(select_phase(&phases, 0.4).unwrap().id, "first");
        }

        #[test]
        fn no_covering_phase() {
            let phases = vec![BossPhase::new("low", "Low", 0.3, AiArchetype::Berserker)];
            assert!(select_phase(&phases, 0.9).is_none());
            assert!(select_phase(&[], 0.1).is_none());
        }
    }

    mod transition_tests {
        use super::*;

        fn boss() -> Boss {
            let mut boss = builtin::bosses().remove(0);
            boss.phases = standard();
            boss
        }

        #[test]
        fn unchanged_within_bracket() {
            let boss = boss();
            assert_eq!(transition(&boss, Some("normal"), 0.8), PhaseTransition::Unchanged);
        }

        #[test]
        fn entering_lower_bracket() {
            let boss = boss();
            match transition(&boss, Some("normal"), 0.45) {
                PhaseTransition::Entered(phase) => assert_eq!(phase.id, "enraged"),
                other => panic!("expected a transition, got {other:?}"),
            }
        }

        #[test]
        fn cleared_when_nothing_covers() {
            let mut boss = boss();
            boss.phases = vec![BossPhase::new("low", "Low", 0.3, AiArchetype::Berserker)];
            assert_eq!(transition(&boss, Some("low"), 0.6), PhaseTransition::Cleared);
            assert_eq!(transition(&boss, None, 0.6), PhaseTransition::Unchanged);
        }
    }

    #[test]
    fn modifiers_fall_back_to_boss_archetype() {
        let mut boss = builtin::bosses().remove(0);
        boss.phases = standard();
        boss.archetype = AiArchetype::Support;

        let neutral = PhaseModifiers::for_boss(&boss, None);
        assert_eq!(neutral.archetype, AiArchetype::Support);
        assert!((neutral.damage_multiplier - 1.0).abs() < f64::EPSILON);

        let desperate = PhaseModifiers::for_boss(&boss, Some("desperate"));
        assert_eq!(desperate.archetype, AiArchetype::Berserker);
        assert!((desperate.damage_multiplier - 1.5).abs() < f64::EPSILON);
        assert!((desperate.defense_multiplier - 0.8).abs() < f64::EPSILON);
    }
}
