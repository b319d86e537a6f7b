//! Boss AI: one decision table per archetype.
//!
//! Every archetype is a pure function of the boss's live stats and the
//! player's observed health and energy. Only *available* abilities are
//! considered: off cooldown and affordable with the boss's current energy.
//! "First available" always means kit order, so the same kit and cooldown
//! state produce the same choice.
//!
//! When nothing in the kit is available the boss falls back to a built-in
//! attack ([`builtin::basic_attack`], or [`builtin::guarded_strike`] for
//! defensive bosses). Fallbacks cost energy too, which is how a drained boss
//! ends up skipping its turn.

use std::collections::BTreeMap;

use crate::catalog::{builtin, AiArchetype, BossAbility, DamageCategory};

/// Boss stats the AI reads.
#[derive(Debug, Clone, Copy)]
pub struct BossView<'a> {
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Current energy.
    pub energy: u32,
    /// Ability kit in priority order.
    pub abilities: &'a [BossAbility],
    /// Remaining cooldown per ability id; absent means ready.
    pub cooldowns: &'a BTreeMap<String, u32>,
}

impl<'a> BossView<'a> {
    fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            0.0
        } else {
            f64::from(self.health) / f64::from(self.max_health)
        }
    }

    fn available(&self) -> impl Iterator<Item = &'a BossAbility> + '_ {
        self.abilities.iter().filter(move |ability| {
            ability.cost <= self.energy
                && self.cooldowns.get(&ability.id).copied().unwrap_or(0) == 0
        })
    }

    fn first_available(&self) -> Option<&'a BossAbility> {
        self.available().next()
    }

    fn first_of(&self, category: DamageCategory) -> Option<&'a BossAbility> {
        self.available().find(|ability| ability.category == category)
    }

    fn first_with_effects(&self) -> Option<&'a BossAbility> {
        self.available().find(|ability| ability.has_effects())
    }

    fn first_ultimate(&self) -> Option<&'a BossAbility> {
        self.available().find(|ability| ability.ultimate)
    }

    /// Highest base damage; earlier abilities win ties.
    fn strongest(&self) -> Option<&'a BossAbility> {
        self.available()
            .filter(|ability| ability.magnitude.damage() > 0)
            .fold(None, |best: Option<&'a BossAbility>, ability| match best {
                Some(current) if current.magnitude.damage() >= ability.magnitude.damage() => {
                    Some(current)
                }
                _ => Some(ability),
            })
    }
}

/// Chooses the boss's next ability.
///
/// # Arguments
///
/// * `archetype` - Decision table to use (the active phase's, if any)
/// * `boss` - The boss's live stats and kit
/// * `player_health` - The player's current health
/// * `_player_energy` - The player's current energy; no table reads it yet
///
/// # Example
///
/// ```
/// use std::collections::BTreeMap;
/// use bossfight_core::ai::{select_boss_action, BossView};
/// use bossfight_core::catalog::{builtin, AiArchetype};
///
/// let golem = builtin::bosses().remove(0);
/// let cooldowns = BTreeMap::new();
/// let view = BossView {
///     health: 20,
///     max_health: golem.max_health,
///     energy: golem.max_energy,
///     abilities: &golem.abilities,
///     cooldowns: &cooldowns,
/// };
///
/// let choice = select_boss_action(AiArchetype::Berserker, &view, 80, 30);
/// assert!(choice.ultimate);
/// ```
#[must_use]
pub fn select_boss_action<'a>(
    archetype: AiArchetype,
    boss: &BossView<'a>,
    player_health: u32,
    _player_energy: u32,
) -> &'a BossAbility {
    let fraction = boss.health_fraction();

    let choice = match archetype {
        AiArchetype::Aggressive => boss.strongest().or_else(|| boss.first_available()),
        AiArchetype::Defensive => {
            let heal = if fraction < 0.3 {
                boss.first_of(DamageCategory::Support)
            } else {
                None
            };
            let choice = heal
                .or_else(|| boss.first_of(DamageCategory::Buff))
                .or_else(|| boss.first_available());
            return choice.unwrap_or_else(builtin::guarded_strike);
        }
        AiArchetype::Tactical => {
            let preferred = if player_health > 50 {
                boss.first_with_effects()
            } else if player_health < 30 {
                boss.first_ultimate()
            } else {
                None
            };
            preferred.or_else(|| boss.first_available())
        }
        AiArchetype::Berserker => {
            let preferred = if fraction < 0.2 {
                boss.first_ultimate()
                    .or_else(|| boss.first_of(DamageCategory::Buff))
            } else if fraction < 0.5 {
                boss.first_of(DamageCategory::Buff)
            } else {
                None
            };
            preferred.or_else(|| boss.strongest())
        }
        AiArchetype::Support => {
            let heal = if fraction < 0.7 {
                boss.first_of(DamageCategory::Support)
            } else {
                None
            };
            heal.or_else(|| boss.first_of(DamageCategory::Buff))
                .or_else(|| boss.first_available())
        }
        AiArchetype::Hybrid => {
            let heal = if fraction < 0.4 {
                boss.first_of(DamageCategory::Support)
            } else {
                None
            };
            let burst = if heal.is_none() && player_health < 30 {
                boss.strongest()
            } else {
                None
            };
            heal.or(burst)
                .or_else(|| boss.first_with_effects())
                .or_else(|| boss.first_available())
        }
    };

    choice.unwrap_or_else(builtin::basic_attack)
}
