//! Built-in content: named status effects, the starter player kit, three
//! bosses, and the fallback attacks the AI uses when a kit is exhausted.

use std::sync::OnceLock;

use super::ability::{Ability, ActionMagnitude, DamageCategory};
use super::boss::{AiArchetype, Boss, BossPhase, Rewards};
use super::effect::StatusEffect;

// =============================================================================
// Status Effects
// =============================================================================

/// Deals 10 damage per turn for 3 turns.
#[must_use]
pub fn poison() -> StatusEffect {
    StatusEffect::new("poison", "Poison", 3).with_damage_per_turn(10)
}

/// Deals 15 damage per turn for 2 turns.
#[must_use]
pub fn burn() -> StatusEffect {
    StatusEffect::new("burn", "Burn", 2).with_damage_per_turn(15)
}

/// Lowers attack by 5 for 3 turns.
#[must_use]
pub fn weaken() -> StatusEffect {
    StatusEffect::new("weaken", "Weaken", 3).with_attack_reduction(5)
}

/// Halves incoming damage for 2 turns.
#[must_use]
pub fn shield() -> StatusEffect {
    StatusEffect::new("shield", "Shield", 2).with_damage_reduction(0.5)
}

/// Raises attack by 10 for 3 turns.
#[must_use]
pub fn berserk() -> StatusEffect {
    StatusEffect::new("berserk", "Berserk", 3).with_attack_boost(10)
}

/// Restores 8 health per turn for 3 turns.
#[must_use]
pub fn regeneration() -> StatusEffect {
    StatusEffect::new("regeneration", "Regeneration", 3).with_damage_per_turn(-8)
}

// =============================================================================
// Fallback Attacks
// =============================================================================

/// Basic melee used when no kit ability is available.
///
/// The ability lives for the whole program, so the returned borrow may be
/// given any lifetime the caller needs.
#[must_use]
pub fn basic_attack<'a>() -> &'a Ability {
    static BASIC: OnceLock<Ability> = OnceLock::new();
    BASIC.get_or_init(|| {
        Ability::new(
            "basic_attack",
            "Basic Attack",
            ActionMagnitude::Damage(10),
            DamageCategory::Physical,
        )
        .with_cost(5)
        .with_accuracy(0.95)
        .with_critical_chance(0.05)
    })
}

/// Defensive fallback: weaker, but never misses.
#[must_use]
pub fn guarded_strike<'a>() -> &'a Ability {
    static GUARDED: OnceLock<Ability> = OnceLock::new();
    GUARDED.get_or_init(|| {
        Ability::new(
            "guarded_strike",
            "Guarded Strike",
            ActionMagnitude::Damage(8),
            DamageCategory::Physical,
        )
        .with_cost(5)
    })
}

// =============================================================================
// Player Kit
// =============================================================================

/// Starter player abilities.
#[must_use]
pub fn player_abilities() -> Vec<Ability> {
    vec![
        Ability::new("quick_jab", "Quick Jab", ActionMagnitude::Damage(15), DamageCategory::Physical)
            .with_accuracy(0.95)
            .with_critical_chance(0.1),
        Ability::new("power_strike", "Power Strike", ActionMagnitude::Damage(25), DamageCategory::Physical)
            .with_cost(10)
            .with_accuracy(0.9)
            .with_critical_chance(0.15),
        Ability::new("toxic_blade", "Toxic Blade", ActionMagnitude::Damage(18), DamageCategory::Physical)
            .with_cost(15)
            .with_accuracy(0.9)
            .with_critical_chance(0.1)
            .with_effect(poison()),
        Ability::new("fireball", "Fireball", ActionMagnitude::Damage(35), DamageCategory::Magical)
            .with_cost(25)
            .with_accuracy(0.85)
            .with_critical_chance(0.2)
            .with_effect(burn()),
        Ability::new("second_wind", "Second Wind", ActionMagnitude::Heal(30), DamageCategory::Support)
            .with_cost(20),
        Ability::new("iron_guard", "Iron Guard", ActionMagnitude::Damage(0), DamageCategory::Buff)
            .with_cost(10)
            .with_effect(shield()),
    ]
}

// =============================================================================
// Bosses
// =============================================================================

fn standard_phases(
    normal: AiArchetype,
    enraged: AiArchetype,
    desperate: AiArchetype,
) -> Vec<BossPhase> {
    vec![
        BossPhase::new("normal", "Normal", 1.0, normal),
        BossPhase::new("enraged", "Enraged", 0.5, enraged).with_multipliers(1.25, 0.9),
        BossPhase::new("desperate", "Desperate", 0.2, desperate).with_multipliers(1.5, 0.8),
    ]
}

/// The three built-in bosses, in unlock order.
#[must_use]
pub fn bosses() -> Vec<Boss> {
    vec![
        Boss {
            id: "couch_golem".to_string(),
            name: "Couch Golem".to_string(),
            max_health: 150,
            max_energy: 100,
            attack: 10,
            defense: 15,
            archetype: AiArchetype::Aggressive,
            abilities: vec![
                Ability::new("slam", "Cushion Slam", ActionMagnitude::Damage(20), DamageCategory::Physical)
                    .with_cost(10)
                    .with_accuracy(0.9)
                    .with_critical_chance(0.1),
                Ability::new("crushing_weight", "Crushing Weight", ActionMagnitude::Damage(30), DamageCategory::Physical)
                    .with_cost(25)
                    .with_cooldown(2)
                    .with_accuracy(0.8)
                    .with_critical_chance(0.15),
                Ability::new("lazy_aura", "Lazy Aura", ActionMagnitude::Damage(12), DamageCategory::Magical)
                    .with_cost(15)
                    .with_accuracy(0.95)
                    .with_effect(weaken()),
                Ability::new("cushion_fort", "Cushion Fort", ActionMagnitude::Damage(0), DamageCategory::Buff)
                    .with_cost(20)
                    .with_cooldown(3)
                    .with_effect(shield()),
                Ability::new("rage", "Couch Rage", ActionMagnitude::Damage(0), DamageCategory::Buff)
                    .with_cost(15)
                    .with_cooldown(3)
                    .with_effect(berserk()),
                Ability::new("snack_avalanche", "Snack Avalanche", ActionMagnitude::Damage(45), DamageCategory::Physical)
                    .with_cost(40)
                    .with_cooldown(4)
                    .with_accuracy(0.85)
                    .with_critical_chance(0.2)
                    .as_ultimate(),
            ],
            phases: standard_phases(
                AiArchetype::Aggressive,
                AiArchetype::Berserker,
                AiArchetype::Berserker,
            ),
            rewards: Rewards { xp: 100, coins: 50 },
            unlock_level: 1,
        },
        Boss {
            id: "sugar_wraith".to_string(),
            name: "Sugar Wraith".to_string(),
            max_health: 220,
            max_energy: 120,
            attack: 14,
            defense: 10,
            archetype: AiArchetype::Tactical,
            abilities: vec![
                Ability::new("sugar_rush", "Sugar Rush", ActionMagnitude::Damage(18), DamageCategory::Magical)
                    .with_cost(10)
                    .with_accuracy(0.9)
                    .with_critical_chance(0.1),
                Ability::new("cavity_curse", "Cavity Curse", ActionMagnitude::Damage(14), DamageCategory::Magical)
                    .with_cost(15)
                    .with_accuracy(0.9)
                    .with_effect(poison()),
                Ability::new("sugar_crash", "Sugar Crash", ActionMagnitude::Damage(28), DamageCategory::Magical)
                    .with_cost(25)
                    .with_cooldown(2)
                    .with_accuracy(0.85)
                    .with_critical_chance(0.15),
                Ability::new("sweet_recovery", "Sweet Recovery", ActionMagnitude::Heal(25), DamageCategory::Support)
                    .with_cost(20)
                    .with_cooldown(3),
                Ability::new("glucose_doom", "Glucose Doom", ActionMagnitude::Damage(50), DamageCategory::Magical)
                    .with_cost(45)
                    .with_cooldown(5)
                    .with_accuracy(0.8)
                    .with_critical_chance(0.25)
                    .as_ultimate(),
            ],
            phases: standard_phases(
                AiArchetype::Tactical,
                AiArchetype::Hybrid,
                AiArchetype::Aggressive,
            ),
            rewards: Rewards { xp: 250, coins: 120 },
            unlock_level: 5,
        },
        Boss {
            id: "procrastination_titan".to_string(),
            name: "Procrastination Titan".to_string(),
            max_health: 320,
            max_energy: 150,
            attack: 18,
            defense: 20,
            archetype: AiArchetype::Defensive,
            abilities: vec![
                Ability::new("snooze", "Snooze Button", ActionMagnitude::Damage(15), DamageCategory::Physical)
                    .with_cost(5)
                    .with_accuracy(0.95),
                Ability::new("tomorrow_shield", "Tomorrow Shield", ActionMagnitude::Damage(0), DamageCategory::Buff)
                    .with_cost(20)
                    .with_cooldown(3)
                    .with_effect(shield()),
                Ability::new("excuse_barrage", "Excuse Barrage", ActionMagnitude::Damage(25), DamageCategory::Physical)
                    .with_cost(20)
                    .with_accuracy(0.85)
                    .with_critical_chance(0.1)
                    .with_effect(weaken()),
                Ability::new("nap_time", "Nap Time", ActionMagnitude::Heal(40), DamageCategory::Support)
                    .with_cost(30)
                    .with_cooldown(4)
                    .with_effect(regeneration()),
                Ability::new("deadline_panic", "Deadline Panic", ActionMagnitude::Damage(60), DamageCategory::Physical)
                    .with_cost(50)
                    .with_cooldown(5)
                    .with_accuracy(0.8)
                    .with_critical_chance(0.2)
                    .as_ultimate(),
            ],
            phases: standard_phases(
                AiArchetype::Defensive,
                AiArchetype::Support,
                AiArchetype::Berserker,
            ),
            rewards: Rewards { xp: 500, coins: 300 },
            unlock_level: 10,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallbacks_are_cheap_offensive_attacks() {
        for fallback in [basic_attack(), guarded_strike()] {
            assert!(fallback.category.is_offensive());
            assert!(fallback.cost > 0);
            assert_eq!(fallback.cooldown, 0);
        }
    }

    #[test]
    fn every_builtin_boss_validates() {
        for mut boss in bosses() {
            boss.validate().unwrap();
            assert_eq!(boss.phases[0].threshold, 1.0);
        }
    }

    #[test]
    fn every_builtin_boss_has_an_ultimate() {
        for boss in bosses() {
            assert!(boss.abilities.iter().any(|a| a.ultimate), "{}", boss.id);
        }
    }

    #[test]
    fn player_kit_has_a_free_ability() {
        assert!(player_abilities().iter().any(|a| a.cost == 0));
    }
}
