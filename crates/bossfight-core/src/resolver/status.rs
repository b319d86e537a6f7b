//! Status effect resolver: application and per-turn ticking.
//!
//! # Lifecycle
//!
//! 1. **Apply**: each effect is cloned onto the owner's active list. An effect
//!    whose id is already active refreshes that entry's duration instead of
//!    stacking a second copy.
//! 2. **Tick**: once per tick every active effect loses exactly one turn of
//!    duration and, when it carries per-turn damage, hurts (or heals) its owner.
//! 3. **Expire**: effects whose duration reached 0 are removed after the tick.

use serde::Serialize;

use crate::catalog::StatusEffect;
use crate::state::CombatantState;

/// What one effect did to its owner during a tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusTick {
    /// Effect id.
    pub effect_id: String,
    /// Effect display name.
    pub effect_name: String,
    /// Health lost this tick.
    pub damage: u32,
    /// Health restored this tick.
    pub healing: u32,
    /// True when the effect ran out and was removed.
    pub expired: bool,
}

/// Applies effects onto an active-effect list with refresh-on-reapply.
///
/// Effects with zero duration would expire before ever ticking and are
/// ignored.
///
/// # Example
///
/// ```
/// use bossfight_core::catalog::builtin;
/// use bossfight_core::resolver::apply_effects;
///
/// let mut active = Vec::new();
/// apply_effects(&mut active, &[builtin::poison()]);
/// active[0].duration = 1;
/// apply_effects(&mut active, &[builtin::poison()]);
///
/// assert_eq!(active.len(), 1);
/// assert_eq!(active[0].duration, 3);
/// ```
pub fn apply_effects(active: &mut Vec<StatusEffect>, effects: &[StatusEffect]) {
    for effect in effects.iter().filter(|effect| effect.duration > 0) {
        if let Some(existing) = active.iter_mut().find(|e| e.id == effect.id) {
            existing.duration = effect.duration;
        } else {
            active.push(effect.clone());
        }
    }
}

/// Ticks every active effect on a combatant once.
///
/// Returns one [`StatusTick`] per effect that was active before the tick, in
/// application order.
pub fn tick_effects(owner: &mut CombatantState) -> Vec<StatusTick> {
    let mut ticks = Vec::with_capacity(owner.effects.len());
    let mut effects = std::mem::take(&mut owner.effects);

    for effect in &mut effects {
        effect.duration = effect.duration.saturating_sub(1);

        let (damage, healing) = match effect.damage_per_turn {
            Some(amount) if amount > 0 => (owner.take_damage(amount.unsigned_abs()), 0),
            Some(amount) if amount < 0 => (0, owner.heal(amount.unsigned_abs())),
            _ => (0, 0),
        };

        ticks.push(StatusTick {
            effect_id: effect.id.clone(),
            effect_name: effect.name.clone(),
            damage,
            healing,
            expired: effect.duration == 0,
        });
    }

    effects.retain(|effect| effect.duration > 0);
    owner.effects = effects;
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::builtin;

    fn combatant(health: u32) -> CombatantState {
        CombatantState {
            name: "Target".to_string(),
            health,
            max_health: 150,
            ..CombatantState::default()
        }
    }

    mod apply_tests {
        use super::*;

        #[test]
        fn new_effect_is_cloned_in() {
            let mut active = Vec::new();
            apply_effects(&mut active, &[builtin::poison(), builtin::weaken()]);
            assert_eq!(active.len(), 2);
            assert_eq!(active[0].id, "poison");
            assert_eq!(active[1].id, "weaken");
        }

        #[test]
        fn reapply_refreshes_instead_of_stacking() {
            let mut active = vec![builtin::burn()];
            active[0].duration = 1;
            apply_effects(&mut active, &[builtin::burn()]);
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].duration, 2);
        }

        #[test]
        fn zero_duration_effect_ignored() {
            let mut active = Vec::new();
            apply_effects(&mut active, &[StatusEffect::new("blink", "Blink", 0)]);
            assert!(active.is_empty());
        }
    }

    mod tick_tests {
        use super::*;

        #[test]
        fn poison_deals_damage_for_its_full_duration() {
            let mut boss = combatant(150);
            apply_effects(&mut boss.effects, &[builtin::poison()]);

            for expected in [140, 130, 120] {
                let ticks = tick_effects(&mut boss);
                assert_eq!(ticks.len(), 1);
                assert_eq!(ticks[0].damage, 10);
                assert_eq!(boss.health, expected);
            }

            assert!(boss.effects.is_empty());
            assert!(tick_effects(&mut boss).is_empty());
            assert_eq!(boss.health, 120);
        }

        #[test]
        fn duration_decrements_by_exactly_one() {
            let mut side = combatant(100);
            apply_effects(&mut side.effects, &[builtin::weaken(), builtin::shield()]);
            tick_effects(&mut side);
            assert_eq!(side.effects[0].duration, 2);
            assert_eq!(side.effects[1].duration, 1);
        }

        #[test]
        fn expiry_is_reported_and_removed() {
            let mut side = combatant(100);
            apply_effects(&mut side.effects, &[builtin::shield()]);
            assert!(!tick_effects(&mut side)[0].expired);
            let ticks = tick_effects(&mut side);
            assert!(ticks[0].expired);
            assert!(!side.has_effect("shield"));
        }

        #[test]
        fn periodic_damage_floors_at_zero() {
            let mut side = combatant(4);
            apply_effects(&mut side.effects, &[builtin::burn()]);
            let ticks = tick_effects(&mut side);
            assert_eq!(ticks[0].damage, 4);
            assert_eq!(side.health, 0);
        }

        #[test]
        fn regeneration_heals_up_to_max() {
            let mut side = combatant(145);
            apply_effects(&mut side.effects, &[builtin::regeneration()]);
            let ticks = tick_effects(&mut side);
            assert_eq!(ticks[0].healing, 5);
            assert_eq!(side.health, 150);
        }
    }
}
