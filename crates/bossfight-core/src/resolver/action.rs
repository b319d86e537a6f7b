//! Action resolver: turns one ability use into health changes and a result.
//!
//! # Resolution Order
//!
//! 1. Accuracy roll (`roll < accuracy` hits)
//! 2. Base value from the ability's [`ActionMagnitude`]
//! 3. Damage: `max(1, base + attack - defense)`, plus combo bonus, scaled by
//!    the damage multiplier and the target's damage reduction
//! 4. Critical roll (`roll < critical_chance` multiplies the final value)
//! 5. Health mutation: damage floors the target at 0, healing caps the actor
//!    at max health
//! 6. Status effects onto the target (offensive categories) or the actor
//! 7. Result and log message composition

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::status::apply_effects;
use crate::catalog::{Ability, ActionMagnitude, StatusEffect};
use crate::state::CombatantState;

/// Situational adjustments supplied by the engine for one action.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionModifiers {
    /// Flat damage added after the defense floor (player combos).
    pub combo_bonus: u32,
    /// Scales damage dealt (boss phase).
    pub damage_multiplier: f64,
    /// Scales the target's defense (boss phase, when the boss is hit).
    pub defense_multiplier: f64,
    /// Scales the final value on a critical roll.
    pub critical_multiplier: f64,
}

impl Default for ActionModifiers {
    fn default() -> Self {
        Self {
            combo_bonus: 0,
            damage_multiplier: 1.0,
            defense_multiplier: 1.0,
            critical_multiplier: 1.5,
        }
    }
}

/// Outcome of an action, consumed by the UI and feedback layers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionResult {
    /// False when the action was rejected before resolving.
    pub success: bool,
    /// Damage dealt to the target.
    pub damage: u32,
    /// Healing applied to the actor.
    pub healing: u32,
    /// True on a critical roll.
    pub critical: bool,
    /// True when the accuracy roll failed.
    pub missed: bool,
    /// Effects applied by the action.
    pub status_effects: Vec<StatusEffect>,
    /// Human-readable description.
    pub message: String,
}

impl ActionResult {
    /// A rejected action that changed nothing.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            damage: 0,
            healing: 0,
            critical: false,
            missed: false,
            status_effects: Vec::new(),
            message: message.into(),
        }
    }

    fn missed(actor: &str) -> Self {
        Self {
            success: true,
            missed: true,
            message: format!("{actor} missed!"),
            ..Self::failure(String::new())
        }
    }
}

/// Resolves `ability` used by `actor` against `target`.
///
/// Draws one value from `rng` for accuracy and, on a hit, one for the
/// critical roll.
///
/// # Example
///
/// ```
/// use bossfight_core::catalog::{Ability, ActionMagnitude, DamageCategory};
/// use bossfight_core::resolver::{resolve_action, ActionModifiers};
/// use bossfight_core::state::CombatantState;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let strike = Ability::new("strike", "Strike", ActionMagnitude::Damage(25), DamageCategory::Physical);
/// let mut hero = CombatantState { name: "Hero".into(), health: 100, max_health: 100, attack: 15, ..Default::default() };
/// let mut golem = CombatantState { name: "Golem".into(), health: 150, max_health: 150, defense: 15, ..Default::default() };
///
/// let mut rng = ChaCha8Rng::seed_from_u64(7);
/// let result = resolve_action(&mut rng, &strike, &mut hero, &mut golem, &ActionModifiers::default());
///
/// assert_eq!(result.damage, 25);
/// assert_eq!(golem.health, 125);
/// ```
pub fn resolve_action<R: Rng + ?Sized>(
    rng: &mut R,
    ability: &Ability,
    actor: &mut CombatantState,
    target: &mut CombatantState,
    modifiers: &ActionModifiers,
) -> ActionResult {
    let accuracy_roll: f64 = rng.gen();
    if accuracy_roll >= ability.accuracy {
        debug!(
            actor = %actor.name,
            ability = %ability.id,
            category = %ability.category,
            roll = accuracy_roll,
            accuracy = ability.accuracy,
            "action missed"
        );
        return ActionResult::missed(&actor.name);
    }

    let critical_roll: f64 = rng.gen();
    let critical_hit = critical_roll < ability.critical_chance;

    let (damage, healing) = match ability.magnitude {
        ActionMagnitude::Damage(0) => (0, 0),
        ActionMagnitude::Damage(base) => {
            let mut value = mitigated_damage(base, actor, target, modifiers);
            if critical_hit {
                value = scale(value, modifiers.critical_multiplier);
            }
            target.take_damage(value);
            (value, 0)
        }
        ActionMagnitude::Heal(base) => {
            let amount = if critical_hit {
                scale(base, modifiers.critical_multiplier)
            } else {
                base
            };
            actor.heal(amount);
            (0, amount)
        }
    };

    if ability.has_effects() {
        let recipient = if ability.category.is_offensive() {
            &mut *target
        } else {
            &mut *actor
        };
        apply_effects(&mut recipient.effects, &ability.effects);
    }

    let critical = critical_hit && (damage > 0 || healing > 0);
    let message = if damage > 0 {
        let suffix = if critical { " (Critical!)" } else { "" };
        format!(
            "{} used {} and dealt {damage} damage{suffix}",
            actor.name, ability.name
        )
    } else if healing > 0 {
        format!(
            "{} used {} and healed {healing} health",
            actor.name, ability.name
        )
    } else {
        format!("{} used {}", actor.name, ability.name)
    };

    debug!(
        actor = %actor.name,
        ability = %ability.id,
        damage,
        healing,
        critical,
        target_health = target.health,
        "action resolved"
    );

    ActionResult {
        success: true,
        damage,
        healing,
        critical,
        missed: false,
        status_effects: ability.effects.clone(),
        message,
    }
}

/// Damage before the critical roll; never below 1 for a positive base.
fn mitigated_damage(
    base: u32,
    actor: &CombatantState,
    target: &CombatantState,
    modifiers: &ActionModifiers,
) -> u32 {
    let defense = scale(target.defense, modifiers.defense_multiplier);
    let raw = (i64::from(base) + i64::from(actor.effective_attack()) - i64::from(defense)).max(1);
    let floored = u32::try_from(raw).unwrap_or(u32::MAX);

    let mut value = scale(
        floored.saturating_add(modifiers.combo_bonus),
        modifiers.damage_multiplier,
    )
    .max(1);

    let reduction = target.damage_reduction();
    if reduction > 0.0 {
        value = scale(value, 1.0 - reduction).max(1);
    }
    value
}

/// Multiplies and rounds half away from zero, saturating at the `u32` range.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn scale(value: u32, factor: f64) -> u32 {
    let scaled = (f64::from(value) * factor).round();
    if scaled <= 0.0 {
        0
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}
