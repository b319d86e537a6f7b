//! Batch battle execution.
//!
//! Each run is an independent [`CombatEngine`] seeded with `seed + run`, so
//! runs are spread across threads with rayon and still reproduce exactly.

use std::fmt;

use bossfight_core::{Ability, Boss, CombatEngine, EngineConfig, Player, Winner};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

/// Everything needed to run a batch of identical battles.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Boss to fight.
    pub boss: Boss,
    /// Player snapshot at the start of every battle.
    pub player: Player,
    /// Player abilities the automatic player may use.
    pub abilities: Vec<Ability>,
    /// Engine configuration.
    pub config: EngineConfig,
    /// Boss turns after which a battle is called a timeout.
    pub max_turns: u32,
}

/// How a single battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The boss was defeated.
    Victory,
    /// The player was defeated.
    Defeat,
    /// Neither side fell within the turn limit, or the player had no usable
    /// ability.
    Timeout,
}

/// Result of one battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BattleReport {
    /// Seed the battle ran with.
    pub seed: u64,
    /// How the battle ended.
    pub outcome: Outcome,
    /// Boss turns taken.
    pub turns: u32,
    /// Player health at the end.
    pub player_health: u32,
    /// Boss health at the end.
    pub boss_health: u32,
    /// Damage the player dealt, including status ticks on the boss.
    pub damage_dealt: u64,
    /// Damage the player took, including status ticks on the player.
    pub damage_taken: u64,
    /// Critical hits landed by either side.
    pub criticals: u32,
    /// Missed actions by either side.
    pub misses: u32,
}

/// Aggregate over a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    /// Boss id.
    pub boss: String,
    /// Battles run.
    pub runs: usize,
    /// Battles won by the player.
    pub victories: usize,
    /// Battles won by the boss.
    pub defeats: usize,
    /// Battles that hit the turn limit.
    pub timeouts: usize,
    /// `victories / runs`.
    pub win_rate: f64,
    /// Mean boss turns per battle.
    pub mean_turns: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Boss:       {}", self.boss)?;
        writeln!(f, "Runs:       {}", self.runs)?;
        writeln!(f, "Victories:  {}", self.victories)?;
        writeln!(f, "Defeats:    {}", self.defeats)?;
        writeln!(f, "Timeouts:   {}", self.timeouts)?;
        writeln!(f, "Win rate:   {:.1}%", self.win_rate * 100.0)?;
        write!(f, "Mean turns: {:.2}", self.mean_turns)
    }
}

/// Full batch output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Aggregate numbers.
    pub summary: Summary,
    /// One entry per run, in seed order.
    pub battles: Vec<BattleReport>,
}

// =============================================================================
// Automatic Player
// =============================================================================

/// Picks the affordable ability with the highest base damage (earlier
/// abilities win ties), falling back to the first free ability.
pub fn choose_ability(abilities: &[Ability], energy: u32) -> Option<&Ability> {
    abilities
        .iter()
        .filter(|ability| ability.cost <= energy && ability.magnitude.damage() > 0)
        .fold(None, |best: Option<&Ability>, ability| match best {
            Some(current) if current.magnitude.damage() >= ability.magnitude.damage() => {
                Some(current)
            }
            _ => Some(ability),
        })
        .or_else(|| abilities.iter().find(|ability| ability.cost == 0))
}

// =============================================================================
// Execution
// =============================================================================

/// Runs one battle to completion or timeout.
pub fn run_battle(scenario: &Scenario, seed: u64) -> BattleReport {
    let mut engine = CombatEngine::with_config(seed, scenario.config.clone());
    engine.start_combat(&scenario.boss, &scenario.player);

    let mut report = BattleReport {
        seed,
        outcome: Outcome::Timeout,
        turns: 0,
        player_health: 0,
        boss_health: 0,
        damage_dealt: 0,
        damage_taken: 0,
        criticals: 0,
        misses: 0,
    };

    while engine.state().turn_count < scenario.max_turns {
        let Some(ability) = choose_ability(&scenario.abilities, engine.state().player.energy) else {
            warn!(seed, "player has no usable ability");
            break;
        };

        let action = engine.player_action(ability, &scenario.player);
        report.damage_dealt += u64::from(action.damage);
        report.criticals += u32::from(action.critical);
        report.misses += u32::from(action.missed);

        let ticks = engine.process_status_effects();
        report.damage_dealt += ticks.boss.iter().map(|t| u64::from(t.damage)).sum::<u64>();
        report.damage_taken += ticks.player.iter().map(|t| u64::from(t.damage)).sum::<u64>();
        if engine.check_battle_end().ended {
            break;
        }

        if let Some(reply) = engine.boss_action() {
            report.damage_taken += u64::from(reply.damage);
            report.criticals += u32::from(reply.critical);
            report.misses += u32::from(reply.missed);
        }

        let ticks = engine.process_status_effects();
        report.damage_dealt += ticks.boss.iter().map(|t| u64::from(t.damage)).sum::<u64>();
        report.damage_taken += ticks.player.iter().map(|t| u64::from(t.damage)).sum::<u64>();
        if engine.check_battle_end().ended {
            break;
        }
    }

    let end = engine.check_battle_end();
    report.outcome = match end.winner {
        Some(Winner::Player) => Outcome::Victory,
        Some(Winner::Boss) => Outcome::Defeat,
        None => Outcome::Timeout,
    };

    let state = engine.state();
    report.turns = state.turn_count;
    report.player_health = state.player.health;
    report.boss_health = state.boss.health;

    debug!(seed, outcome = ?report.outcome, turns = report.turns, "battle finished");
    report
}

/// Runs `runs` battles with seeds `seed..seed + runs` in parallel.
pub fn run_batch(scenario: &Scenario, seed: u64, runs: u64) -> Report {
    let battles: Vec<BattleReport> = (0..runs)
        .into_par_iter()
        .map(|offset| run_battle(scenario, seed.wrapping_add(offset)))
        .collect();

    Report {
        summary: summarize(&scenario.boss.id, &battles),
        battles,
    }
}

/// Aggregates battle reports.
#[allow(clippy::cast_precision_loss)]
pub fn summarize(boss: &str, battles: &[BattleReport]) -> Summary {
    let count = |outcome| battles.iter().filter(|b| b.outcome == outcome).count();
    let victories = count(Outcome::Victory);
    let runs = battles.len();

    let (win_rate, mean_turns) = if runs == 0 {
        (0.0, 0.0)
    } else {
        let turns: u64 = battles.iter().map(|b| u64::from(b.turns)).sum();
        (victories as f64 / runs as f64, turns as f64 / runs as f64)
    };

    Summary {
        boss: boss.to_string(),
        runs,
        victories,
        defeats: count(Outcome::Defeat),
        timeouts: count(Outcome::Timeout),
        win_rate,
        mean_turns,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bossfight_core::{ActionMagnitude, Catalog, DamageCategory};

    fn scenario(boss_id: &str) -> Scenario {
        let catalog = Catalog::builtin();
        Scenario {
            boss: catalog.boss(boss_id).cloned().unwrap(),
            player: Player::new("Hero", 120, 60, 15),
            abilities: catalog.player_abilities,
            config: EngineConfig::default(),
            max_turns: 200,
        }
    }

    mod choose_tests {
        use super::*;

        #[test]
        fn prefers_highest_affordable_damage() {
            let abilities = Catalog::builtin().player_abilities;
            assert_eq!(choose_ability(&abilities, 60).unwrap().id, "fireball");
            assert_eq!(choose_ability(&abilities, 12).unwrap().id, "power_strike");
            assert_eq!(choose_ability(&abilities, 0).unwrap().id, "quick_jab");
        }

        #[test]
        fn falls_back_to_free_utility() {
            let abilities = vec![
                Ability::new("rest", "Rest", ActionMagnitude::Heal(5), DamageCategory::Support),
                Ability::new("blast", "Blast", ActionMagnitude::Damage(30), DamageCategory::Magical)
                    .with_cost(40),
            ];
            assert_eq!(choose_ability(&abilities, 10).unwrap().id, "rest");
        }

        #[test]
        fn nothing_usable() {
            let abilities = vec![
                Ability::new("blast", "Blast", ActionMagnitude::Damage(30), DamageCategory::Magical)
                    .with_cost(40),
            ];
            assert!(choose_ability(&abilities, 10).is_none());
        }
    }

    mod run_tests {
        use super::*;

        #[test]
        fn battle_reports_are_reproducible() {
            let scenario = scenario("couch_golem");
            assert_eq!(run_battle(&scenario, 11), run_battle(&scenario, 11));
        }

        #[test]
        fn finished_battle_has_a_fallen_side() {
            let scenario = scenario("sugar_wraith");
            let report = run_battle(&scenario, 3);
            match report.outcome {
                Outcome::Victory => assert_eq!(report.boss_health, 0),
                Outcome::Defeat => assert_eq!(report.player_health, 0),
                Outcome::Timeout => assert_eq!(report.turns, scenario.max_turns),
            }
        }

        #[test]
        fn turn_limit_produces_timeout() {
            let mut scenario = scenario("procrastination_titan");
            scenario.max_turns = 1;
            scenario.player.max_health = 10_000;
            scenario.player.health = 10_000;
            let report = run_battle(&scenario, 5);
            assert_eq!(report.outcome, Outcome::Timeout);
            assert_eq!(report.turns, 1);
        }

        #[test]
        fn batch_matches_sequential_runs() {
            let scenario = scenario("couch_golem");
            let report = run_batch(&scenario, 100, 8);

            assert_eq!(report.battles.len(), 8);
            for (offset, battle) in (0u64..).zip(&report.battles) {
                assert_eq!(battle, &run_battle(&scenario, 100 + offset));
            }
            let summary = &report.summary;
            assert_eq!(summary.victories + summary.defeats + summary.timeouts, 8);
        }
    }

    #[test]
    fn summary_of_nothing() {
        let summary = summarize("none", &[]);
        assert_eq!(summary.runs, 0);
        assert!(summary.win_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn summary_counts_outcomes() {
        let battle = |outcome, turns| BattleReport {
            seed: 0,
            outcome,
            turns,
            player_health: 0,
            boss_health: 0,
            damage_dealt: 0,
            damage_taken: 0,
            criticals: 0,
            misses: 0,
        };
        let battles = [
            battle(Outcome::Victory, 10),
            battle(Outcome::Victory, 20),
            battle(Outcome::Defeat, 30),
            battle(Outcome::Timeout, 40),
        ];

        let summary = summarize("golem", &battles);
        assert_eq!((summary.victories, summary.defeats, summary.timeouts), (2, 1, 1));
        assert!((summary.win_rate - 0.5).abs() < f64::EPSILON);
        assert!((summary.mean_turns - 25.0).abs() < f64::EPSILON);
    }
}
