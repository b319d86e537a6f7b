//! Battle state: combatants, turn order and the battle log.
//!
//! [`CombatState`] is the single authoritative record of one battle. It is
//! owned by a [`CombatEngine`](crate::engine::CombatEngine) and mutated only
//! through the engine's operations; callers receive owned snapshots.

use std::collections::{BTreeMap, VecDeque};
use std::fmt;

use serde::Serialize;

use crate::catalog::{Boss, Player, StatusEffect};
use crate::config::DEFAULT_LOG_CAPACITY;

/// Defense applied to damage the player receives.
///
/// Player defense is part of the wider stat model but is not wired into
/// combat yet, so boss damage is computed against zero defense.
pub const PLAYER_DEFENSE: u32 = 0;

// =============================================================================
// Turn Order
// =============================================================================

/// Which side acts next.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    /// The player acts.
    #[default]
    Player,
    /// The boss acts.
    Boss,
}

/// Side that won a battle.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// The boss was defeated.
    Player,
    /// The player was defeated.
    Boss,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Boss => write!(f, "boss"),
        }
    }
}

/// Outcome of [`CombatEngine::check_battle_end`](crate::engine::CombatEngine::check_battle_end).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct BattleEnd {
    /// True once either side has no health left.
    pub ended: bool,
    /// The winner, when ended.
    pub winner: Option<Winner>,
}

impl BattleEnd {
    /// A battle still in progress.
    #[must_use]
    pub const fn ongoing() -> Self {
        Self {
            ended: false,
            winner: None,
        }
    }

    /// A finished battle.
    #[must_use]
    pub const fn won_by(winner: Winner) -> Self {
        Self {
            ended: true,
            winner: Some(winner),
        }
    }
}

/// Coarse lifecycle state of an engine.
///
/// ```text
/// Inactive --start_combat--> PlayerTurn --player_action--> BossTurn
///                               ^                             |
///                               +---------boss_action---------+
/// PlayerTurn | BossTurn --check_battle_end--> Ended --reset_combat--> Inactive
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum BattleStatus {
    /// No battle has been started (or it was reset).
    Inactive,
    /// Waiting for the player's action.
    PlayerTurn,
    /// Waiting for the boss's action.
    BossTurn,
    /// A side was defeated; awaiting reset.
    Ended,
}

// =============================================================================
// Battle Log
// =============================================================================

/// Category of a log entry, used by the UI for styling.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    /// Player action.
    Player,
    /// Boss action.
    Boss,
    /// Battle lifecycle and phase announcements.
    System,
    /// Status effect ticks and expiry.
    Status,
    /// Critical hit.
    Critical,
    /// Missed action.
    Miss,
    /// Healing action.
    Heal,
}

/// One line of the battle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombatLogEntry {
    /// Sequence number, unique within a battle.
    pub id: u64,
    /// Human-readable text.
    pub message: String,
    /// Display category.
    pub category: LogCategory,
    /// Turn counter at the time of the entry.
    pub timestamp: u32,
    /// Damage reported by the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<u32>,
    /// Healing reported by the entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healing: Option<u32>,
}

/// Bounded, ordered battle log keeping the most recent entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleLog {
    entries: VecDeque<CombatLogEntry>,
    #[serde(skip)]
    capacity: usize,
    #[serde(skip)]
    next_id: u64,
}

impl BattleLog {
    /// Creates an empty log retaining at most `capacity` entries.
    ///
    /// Storage grows with use; `capacity` only bounds it.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity: capacity.max(1),
            next_id: 0,
        }
    }

    /// Appends an entry, evicting the oldest when full.
    pub fn push(
        &mut self,
        category: LogCategory,
        message: impl Into<String>,
        timestamp: u32,
    ) -> &mut CombatLogEntry {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(CombatLogEntry {
            id,
            message: message.into(),
            category,
            timestamp,
            damage: None,
            healing: None,
        });
        // Just pushed, so the back slot exists.
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    /// Iterates entries from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &CombatLogEntry> {
        self.entries.iter()
    }

    /// Returns the newest entry.
    #[must_use]
    pub fn last(&self) -> Option<&CombatLogEntry> {
        self.entries.back()
    }

    /// Number of retained entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the log holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of retained entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for BattleLog {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

// =============================================================================
// Combatants
// =============================================================================

/// Live stats of one side of a battle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombatantState {
    /// Name used in log messages.
    pub name: String,
    /// Current health.
    pub health: u32,
    /// Maximum health.
    pub max_health: u32,
    /// Current energy.
    pub energy: u32,
    /// Maximum energy.
    pub max_energy: u32,
    /// Base attack (player strength or boss attack).
    pub attack: u32,
    /// Base defense.
    pub defense: u32,
    /// Active status effects.
    pub effects: Vec<StatusEffect>,
}

impl CombatantState {
    /// Builds the player's side from a snapshot.
    #[must_use]
    pub fn from_player(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            health: player.health.min(player.max_health),
            max_health: player.max_health,
            energy: player.energy.min(player.max_energy),
            max_energy: player.max_energy,
            attack: player.strength,
            defense: PLAYER_DEFENSE,
            effects: Vec::new(),
        }
    }

    /// Builds the boss's side at full health and energy.
    #[must_use]
    pub fn from_boss(boss: &Boss) -> Self {
        Self {
            name: boss.name.clone(),
            health: boss.max_health,
            max_health: boss.max_health,
            energy: boss.max_energy,
            max_energy: boss.max_energy,
            attack: boss.attack,
            defense: boss.defense,
            effects: Vec::new(),
        }
    }

    /// Returns true once health reaches 0.
    #[must_use]
    pub fn is_defeated(&self) -> bool {
        self.health == 0
    }

    /// Current health as a fraction of max health (0 when max is 0).
    #[must_use]
    pub fn health_fraction(&self) -> f64 {
        if self.max_health == 0 {
            0.0
        } else {
            f64::from(self.health) / f64::from(self.max_health)
        }
    }

    /// Attack after active effect boosts and reductions, floored at 0.
    #[must_use]
    pub fn effective_attack(&self) -> u32 {
        let delta: i64 = self.effects.iter().map(StatusEffect::attack_delta).sum();
        let attack = (i64::from(self.attack) + delta).max(0);
        u32::try_from(attack).unwrap_or(u32::MAX)
    }

    /// Fraction of incoming damage ignored, clamped to `[0, 1]`.
    #[must_use]
    pub fn damage_reduction(&self) -> f64 {
        self.effects
            .iter()
            .filter_map(|effect| effect.damage_reduction)
            .sum::<f64>()
            .clamp(0.0, 1.0)
    }

    /// Subtracts damage, floored at 0. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let lost = amount.min(self.health);
        self.health -= lost;
        lost
    }

    /// Restores health, capped at max. Returns the health actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let gained = amount.min(self.max_health.saturating_sub(self.health));
        self.health += gained;
        gained
    }

    /// Returns true when an effect with `id` is active.
    #[must_use]
    pub fn has_effect(&self, id: &str) -> bool {
        self.effects.iter().any(|effect| effect.id == id)
    }
}

// =============================================================================
// Combat State
// =============================================================================

/// The complete state of one battle.
#[derive(Debug, Clone, PartialEq)]
pub struct CombatState {
    /// True between `start_combat` and the end of the battle.
    pub is_active: bool,
    /// The boss being fought.
    pub current_boss: Option<Boss>,
    /// Player side.
    pub player: CombatantState,
    /// Boss side.
    pub boss: CombatantState,
    /// Side to act next.
    pub turn: Turn,
    /// Completed boss turns.
    pub turn_count: u32,
    /// Most recent log entries.
    pub log: BattleLog,
    /// Id of the boss's active phase.
    pub phase_id: Option<String>,
    /// Consecutive repeats of the last player ability.
    pub combo_count: u32,
    /// Id of the last ability the player used.
    pub last_player_ability: Option<String>,
    /// Remaining cooldown turns per boss ability id.
    pub boss_cooldowns: BTreeMap<String, u32>,
}

impl CombatState {
    /// Creates an empty, inactive state.
    #[must_use]
    pub fn new(log_capacity: usize) -> Self {
        Self {
            is_active: false,
            current_boss: None,
            player: CombatantState::default(),
            boss: CombatantState::default(),
            turn: Turn::Player,
            turn_count: 0,
            log: BattleLog::with_capacity(log_capacity),
            phase_id: None,
            combo_count: 0,
            last_player_ability: None,
            boss_cooldowns: BTreeMap::new(),
        }
    }

    /// Remaining cooldown of a boss ability (0 when ready).
    #[must_use]
    pub fn boss_cooldown(&self, ability_id: &str) -> u32 {
        self.boss_cooldowns.get(ability_id).copied().unwrap_or(0)
    }
}

impl Default for CombatState {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_CAPACITY)
    }
}
