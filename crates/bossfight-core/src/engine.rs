//! Combat engine: the turn-order state machine.
//!
//! [`CombatEngine`] owns the one authoritative [`CombatState`] for a battle
//! and the random generator that drives accuracy and critical rolls. Every
//! operation is synchronous and completes before returning; pacing the boss's
//! reply is the caller's business.
//!
//! # State Machine
//!
//! ```text
//! Inactive --start_combat--> PlayerTurn --player_action--> BossTurn
//!    ^                           ^                            |
//!    |                           +--------boss_action---------+
//!    |
//!    +--reset_combat-- Ended <--check_battle_end (health 0)-- any turn
//! ```
//!
//! Fleeing is a caller decision: stop calling `boss_action` and call
//! [`CombatEngine::reset_combat`].
//!
//! # Determinism
//!
//! The generator is injected. Two engines built from the same seed and fed
//! the same calls produce identical states and logs.
//!
//! # Example
//!
//! ```
//! use bossfight_core::catalog::{builtin, Player};
//! use bossfight_core::engine::CombatEngine;
//! use bossfight_core::state::Turn;
//!
//! let boss = builtin::bosses().remove(0);
//! let player = Player::new("Hero", 100, 50, 15);
//! let jab = builtin::player_abilities().remove(0);
//!
//! let mut engine = CombatEngine::new(42);
//! engine.start_combat(&boss, &player);
//!
//! let result = engine.player_action(&jab, &player);
//! assert!(result.success);
//! assert_eq!(engine.state().turn, Turn::Boss);
//!
//! engine.process_status_effects();
//! engine.boss_action();
//! assert_eq!(engine.state().turn, Turn::Player);
//! ```

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ai::{select_boss_action, BossView};
use crate::catalog::{Ability, Boss, Player};
use crate::config::EngineConfig;
use crate::phase::{self, PhaseModifiers, PhaseTransition};
use crate::resolver::{resolve_action, tick_effects, ActionModifiers, ActionResult, StatusTick};
use crate::state::{
    BattleEnd, BattleLog, BattleStatus, CombatState, CombatantState, LogCategory, Turn, Winner,
};

/// Status ticks from one `process_status_effects` call, per side.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    /// Ticks on the player's effects.
    pub player: Vec<StatusTick>,
    /// Ticks on the boss's effects.
    pub boss: Vec<StatusTick>,
}

impl StatusReport {
    /// Total damage dealt by all ticks.
    #[must_use]
    pub fn total_damage(&self) -> u32 {
        self.player
            .iter()
            .chain(&self.boss)
            .map(|tick| tick.damage)
            .sum()
    }
}

// =============================================================================
// Combat Engine
// =============================================================================

/// Orchestrates one battle at a time.
///
/// `R` is the source of randomness; the default is a seeded `ChaCha8Rng`.
/// Any `Rng` can be injected with [`CombatEngine::with_rng`], which is how
/// tests force hits, misses and criticals.
#[derive(Debug, Clone)]
pub struct CombatEngine<R = ChaCha8Rng> {
    state: CombatState,
    config: EngineConfig,
    rng: R,
}

impl CombatEngine<ChaCha8Rng> {
    /// Creates an engine with default configuration.
    ///
    /// # Arguments
    ///
    /// * `seed` - Seed for the accuracy and critical roll stream
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, EngineConfig::default())
    }

    /// Creates an engine with explicit configuration.
    #[must_use]
    pub fn with_config(seed: u64, config: EngineConfig) -> Self {
        Self::with_rng(ChaCha8Rng::seed_from_u64(seed), config)
    }
}

impl<R: Rng> CombatEngine<R> {
    /// Creates an engine around an existing generator.
    #[must_use]
    pub fn with_rng(rng: R, config: EngineConfig) -> Self {
        Self {
            state: CombatState::new(config.log_capacity),
            config,
            rng,
        }
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Borrows the live battle state.
    #[must_use]
    pub fn state(&self) -> &CombatState {
        &self.state
    }

    /// Returns an owned snapshot of the battle state.
    ///
    /// Mutating the snapshot has no effect on the engine.
    #[must_use]
    pub fn combat_state(&self) -> CombatState {
        self.state.clone()
    }

    /// Where the battle is in its lifecycle.
    #[must_use]
    pub fn status(&self) -> BattleStatus {
        match (self.state.is_active, self.state.turn) {
            (true, Turn::Player) => BattleStatus::PlayerTurn,
            (true, Turn::Boss) => BattleStatus::BossTurn,
            (false, _) if self.state.current_boss.is_some() => BattleStatus::Ended,
            (false, _) => BattleStatus::Inactive,
        }
    }

    /// Starts a battle, replacing any previous state.
    ///
    /// The boss starts at full health and energy in the phase covering full
    /// health; the player's health and energy are copied from the snapshot.
    pub fn start_combat(&mut self, boss: &Boss, player: &Player) -> CombatState {
        let mut state = CombatState::new(self.config.log_capacity);
        state.is_active = true;
        state.player = CombatantState::from_player(player);
        state.boss = CombatantState::from_boss(boss);
        state.phase_id = phase::select_phase(&boss.phases, state.boss.health_fraction())
            .map(|phase| phase.id.clone());
        state.log.push(
            LogCategory::System,
            format!("{} challenges {}!", player.name, boss.name),
            0,
        );
        state.current_boss = Some(boss.clone());

        info!(boss = %boss.id, player = %player.name, "battle started");
        self.state = state;
        self.state.clone()
    }

    /// Resolves the player's ability against the boss.
    ///
    /// Rejected (with no state change) when no battle is active, it is the
    /// boss's turn, or the player cannot afford the ability. A miss is still
    /// a successful action: energy is spent and the turn passes.
    ///
    /// The player's strength is read from `player` at resolution time.
    pub fn player_action(&mut self, ability: &Ability, player: &Player) -> ActionResult {
        if !self.state.is_active {
            return ActionResult::failure("No active battle");
        }
        if self.state.turn != Turn::Player {
            return ActionResult::failure("It's not your turn");
        }
        if self.state.player.energy < ability.cost {
            return ActionResult::failure(format!("Not enough energy to use {}", ability.name));
        }

        let state = &mut self.state;
        let Some(boss) = state.current_boss.as_ref() else {
            warn!("active battle without a boss");
            return ActionResult::failure("No active battle");
        };
        let phase = PhaseModifiers::for_boss(boss, state.phase_id.as_deref());

        if state.last_player_ability.as_deref() == Some(ability.id.as_str()) {
            state.combo_count = state.combo_count.saturating_add(1);
        } else {
            state.combo_count = 0;
        }

        let modifiers = ActionModifiers {
            combo_bonus: state
                .combo_count
                .saturating_mul(self.config.combo_bonus_per_stack),
            damage_multiplier: 1.0,
            defense_multiplier: phase.defense_multiplier,
            critical_multiplier: self.config.critical_multiplier,
        };

        state.player.attack = player.strength;
        let result = resolve_action(
            &mut self.rng,
            ability,
            &mut state.player,
            &mut state.boss,
            &modifiers,
        );

        state.player.energy -= ability.cost;
        state.last_player_ability = Some(ability.id.clone());
        state.turn = Turn::Boss;
        record(&mut state.log, &result, LogCategory::Player, state.turn_count);

        debug!(
            ability = %ability.id,
            combo = state.combo_count,
            damage = result.damage,
            boss_health = state.boss.health,
            "player acted"
        );
        result
    }

    /// Lets the boss take its turn.
    ///
    /// Returns `None` when no battle is active, when it is the player's turn,
    /// or when the boss cannot afford its chosen ability and skips the turn to
    /// gather energy. Otherwise returns the resolved action.
    pub fn boss_action(&mut self) -> Option<ActionResult> {
        if !self.state.is_active || self.state.turn != Turn::Boss {
            return None;
        }

        let state = &mut self.state;
        let Some(boss) = state.current_boss.as_ref() else {
            warn!("active battle without a boss");
            return None;
        };

        match phase::transition(boss, state.phase_id.as_deref(), state.boss.health_fraction()) {
            PhaseTransition::Entered(next) => {
                info!(boss = %boss.id, phase = %next.id, "phase changed");
                state.log.push(
                    LogCategory::System,
                    format!("{} enters the {} phase!", boss.name, next.name),
                    state.turn_count,
                );
                state.phase_id = Some(next.id.clone());
            }
            PhaseTransition::Cleared => {
                info!(boss = %boss.id, "phase cleared");
                state.phase_id = None;
            }
            PhaseTransition::Unchanged => {}
        }
        let phase = PhaseModifiers::for_boss(boss, state.phase_id.as_deref());

        let view = BossView {
            health: state.boss.health,
            max_health: state.boss.max_health,
            energy: state.boss.energy,
            abilities: &boss.abilities,
            cooldowns: &state.boss_cooldowns,
        };
        let ability = select_boss_action(
            phase.archetype,
            &view,
            state.player.health,
            state.player.energy,
        );

        if state.boss.energy < ability.cost {
            let regen = self.config.boss_skip_regen;
            state.boss.energy = state
                .boss
                .energy
                .saturating_add(regen)
                .min(state.boss.max_energy);
            state.log.push(
                LogCategory::System,
                format!("{} is gathering energy...", boss.name),
                state.turn_count,
            );
            debug!(boss = %boss.id, energy = state.boss.energy, "boss skipped turn");

            tick_cooldowns(&mut state.boss_cooldowns);
            state.turn = Turn::Player;
            state.turn_count += 1;
            return None;
        }

        let modifiers = ActionModifiers {
            combo_bonus: 0,
            damage_multiplier: phase.damage_multiplier,
            defense_multiplier: 1.0,
            critical_multiplier: self.config.critical_multiplier,
        };
        let result = resolve_action(
            &mut self.rng,
            ability,
            &mut state.boss,
            &mut state.player,
            &modifiers,
        );

        state.boss.energy -= ability.cost;
        let used = ability.id.clone();
        let cooldown = ability.cooldown;

        tick_cooldowns(&mut state.boss_cooldowns);
        if cooldown > 0 {
            state.boss_cooldowns.insert(used.clone(), cooldown);
        }

        record(&mut state.log, &result, LogCategory::Boss, state.turn_count);
        state.turn = Turn::Player;
        state.turn_count += 1;

        debug!(
            ability = %used,
            archetype = %phase.archetype,
            damage = result.damage,
            player_health = state.player.health,
            "boss acted"
        );
        Some(result)
    }

    /// Ticks every active effect on both sides once, player first.
    ///
    /// Periodic damage, periodic healing and expiry each append a status
    /// log entry. Does nothing outside an active battle.
    pub fn process_status_effects(&mut self) -> StatusReport {
        if !self.state.is_active {
            return StatusReport::default();
        }

        let state = &mut self.state;
        let player = tick_effects(&mut state.player);
        log_ticks(&mut state.log, &state.player.name, &player, state.turn_count);
        let boss = tick_effects(&mut state.boss);
        log_ticks(&mut state.log, &state.boss.name, &boss, state.turn_count);

        StatusReport { player, boss }
    }

    /// Detects a finished battle.
    ///
    /// Boss health is checked first. On the first detection the engine
    /// becomes inactive and appends a victory or defeat entry; later calls
    /// keep reporting the same outcome until [`CombatEngine::reset_combat`].
    pub fn check_battle_end(&mut self) -> BattleEnd {
        if self.state.current_boss.is_none() {
            return BattleEnd::ongoing();
        }

        let winner = if self.state.boss.is_defeated() {
            Winner::Player
        } else if self.state.player.is_defeated() {
            Winner::Boss
        } else {
            return BattleEnd::ongoing();
        };

        if self.state.is_active {
            self.state.is_active = false;
            let message = match winner {
                Winner::Player => format!("Victory! {} has been defeated!", self.state.boss.name),
                Winner::Boss => format!("Defeat! {} has fallen...", self.state.player.name),
            };
            self.state
                .log
                .push(LogCategory::System, message, self.state.turn_count);
            info!(%winner, turns = self.state.turn_count, "battle ended");
        }

        BattleEnd::won_by(winner)
    }

    /// Discards the battle and returns to the inactive state.
    pub fn reset_combat(&mut self) {
        self.state = CombatState::new(self.config.log_capacity);
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn record(log: &mut BattleLog, result: &ActionResult, side: LogCategory, timestamp: u32) {
    let category = if result.missed {
        LogCategory::Miss
    } else if result.critical {
        LogCategory::Critical
    } else if result.healing > 0 {
        LogCategory::Heal
    } else {
        side
    };

    let entry = log.push(category, result.message.clone(), timestamp);
    entry.damage = (result.damage > 0).then_some(result.damage);
    entry.healing = (result.healing > 0).then_some(result.healing);
}

fn log_ticks(log: &mut BattleLog, owner: &str, ticks: &[StatusTick], timestamp: u32) {
    for tick in ticks {
        if tick.damage > 0 {
            let entry = log.push(
                LogCategory::Status,
                format!("{owner} takes {} damage from {}", tick.damage, tick.effect_name),
                timestamp,
            );
            entry.damage = Some(tick.damage);
        }
        if tick.healing > 0 {
            let entry = log.push(
                LogCategory::Status,
                format!("{owner} recovers {} health from {}", tick.healing, tick.effect_name),
                timestamp,
            );
            entry.healing = Some(tick.healing);
        }
        if tick.expired {
            log.push(
                LogCategory::Status,
                format!("{} wore off {owner}", tick.effect_name),
                timestamp,
            );
        }
    }
}

fn tick_cooldowns(cooldowns: &mut BTreeMap<String, u32>) {
    cooldowns.retain(|_, remaining| {
        *remaining = remaining.saturating_sub(1);
        *remaining > 0
    });
}
