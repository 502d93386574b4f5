//! Battle turn outcomes and their RNG replay
//!
//! Each declared turn consumes rolls in a fixed order:
//!
//! 1. priority effect roll
//! 2. player action (accuracy and status duration, or one plain roll)
//! 3. status bookkeeping (duration check on recovery, otherwise self-hit roll)
//! 4. enemy action (accuracy, critical hit and damage rolls)
//!
//! Replaying a turn against a seed either rejects it at the first roll that
//! disagrees with the declaration or returns the advanced state.

use crate::constants::{
    CRIT_DENOMINATOR, ENEMY_ACCURACY, PLAYER_ACCURACY, PRIORITY_THRESHOLD, SELF_HIT_THRESHOLD,
    STATUS_DURATION_MIN, STATUS_DURATION_RANGE,
};
use crate::domain::battle_rng::BattleRng;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Impossible or unreadable turn declaration
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("Self-hit declared but the enemy has no active status")]
    SelfHitWithoutStatus,
    #[error("Self-hit declared on the turn the enemy recovered")]
    SelfHitOnRecovery,
    #[error("Unknown player action: '{0}' (expected inflict-hit, inflict-miss or other)")]
    UnknownPlayerAction(String),
    #[error(
        "Unknown enemy action: '{0}' (expected hurt-itself, miss, hit, hit-crit, sure-hit or sure-hit-crit)"
    )]
    UnknownEnemyAction(String),
}

/// What the player's move did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    /// Status move hit; the status duration is rolled right after
    InflictHit,
    /// Status move missed
    InflictMiss,
    /// Any move consuming a single roll
    Other,
}

impl PlayerAction {
    /// Rolls consumed by this action
    pub fn rng_advances(self) -> u64 {
        match self {
            PlayerAction::InflictHit => 2,
            PlayerAction::InflictMiss | PlayerAction::Other => 1,
        }
    }
}

impl FromStr for PlayerAction {
    type Err = TurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inflict-hit" | "hit" => Ok(PlayerAction::InflictHit),
            "inflict-miss" | "miss" => Ok(PlayerAction::InflictMiss),
            "other" => Ok(PlayerAction::Other),
            _ => Err(TurnError::UnknownPlayerAction(s.to_string())),
        }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerAction::InflictHit => "inflict-hit",
            PlayerAction::InflictMiss => "inflict-miss",
            PlayerAction::Other => "other",
        };
        f.write_str(name)
    }
}

/// What the enemy did
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EnemyAction {
    /// Hit itself in confusion (no further rolls)
    HurtItself,
    /// Attack missed
    Miss,
    /// Attack hit without a critical hit
    Hit,
    /// Attack hit critically
    HitCrit,
    /// Never-miss attack without a critical hit
    SureHit,
    /// Never-miss attack with a critical hit
    SureHitCrit,
}

impl EnemyAction {
    /// Rolls consumed by this action
    pub fn rng_advances(self) -> u64 {
        match self {
            EnemyAction::HurtItself => 0,
            EnemyAction::Miss => 1,
            EnemyAction::SureHit | EnemyAction::SureHitCrit => 2,
            EnemyAction::Hit | EnemyAction::HitCrit => 3,
        }
    }

    fn is_crit(self) -> bool {
        matches!(self, EnemyAction::HitCrit | EnemyAction::SureHitCrit)
    }
}

impl FromStr for EnemyAction {
    type Err = TurnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hurt-itself" | "self-hit" => Ok(EnemyAction::HurtItself),
            "miss" => Ok(EnemyAction::Miss),
            "hit" => Ok(EnemyAction::Hit),
            "hit-crit" | "crit" => Ok(EnemyAction::HitCrit),
            "sure-hit" => Ok(EnemyAction::SureHit),
            "sure-hit-crit" => Ok(EnemyAction::SureHitCrit),
            _ => Err(TurnError::UnknownEnemyAction(s.to_string())),
        }
    }
}

impl fmt::Display for EnemyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EnemyAction::HurtItself => "hurt-itself",
            EnemyAction::Miss => "miss",
            EnemyAction::Hit => "hit",
            EnemyAction::HitCrit => "hit-crit",
            EnemyAction::SureHit => "sure-hit",
            EnemyAction::SureHitCrit => "sure-hit-crit",
        };
        f.write_str(name)
    }
}

/// Progress of the enemy's status condition at this turn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StatusProgress {
    /// No status, or inflicted during this turn
    #[default]
    None,
    /// Status has lasted `turns` turns and is still active
    Active { turns: u32 },
    /// Status ended this turn after `turns` turns
    ///
    /// `rolls` counts the RNG advances from just before the duration roll up
    /// to the status check of this turn.
    Recovered { turns: u32, rolls: u64 },
}

/// One observed battle turn
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BattleTurnOutcome {
    player: PlayerAction,
    priority_activated: bool,
    status: StatusProgress,
    enemy: EnemyAction,
}

impl BattleTurnOutcome {
    /// Create a turn, rejecting declarations no battle can produce
    pub fn new(
        player: PlayerAction,
        priority_activated: bool,
        status: StatusProgress,
        enemy: EnemyAction,
    ) -> Result<Self, TurnError> {
        if enemy == EnemyAction::HurtItself {
            match status {
                StatusProgress::None | StatusProgress::Active { turns: 0 } => {
                    return Err(TurnError::SelfHitWithoutStatus);
                }
                StatusProgress::Recovered { .. } => return Err(TurnError::SelfHitOnRecovery),
                StatusProgress::Active { .. } => {}
            }
        }
        Ok(Self {
            player,
            priority_activated,
            status,
            enemy,
        })
    }

    pub fn player_action(&self) -> PlayerAction {
        self.player
    }

    pub fn priority_activated(&self) -> bool {
        self.priority_activated
    }

    pub fn enemy_action(&self) -> EnemyAction {
        self.enemy
    }

    fn rolls_self_hit(&self) -> bool {
        matches!(self.status, StatusProgress::Active { turns } if turns >= 1)
    }

    /// Rolls consumed when this turn is accepted
    pub fn rng_advances(&self) -> u64 {
        1 + self.player.rng_advances() + self.rolls_self_hit() as u64 + self.enemy.rng_advances()
    }

    /// Replay this turn from `seed`
    ///
    /// Returns the advanced state, or `None` at the first mismatching roll.
    pub fn replay(&self, seed: u64) -> Option<u64> {
        let mut rng = BattleRng::new(seed);

        // 1. priority effect
        if rng.next_percent_below(PRIORITY_THRESHOLD) != self.priority_activated {
            return None;
        }

        // 2. player action
        match self.player {
            PlayerAction::InflictHit => {
                if !rng.next_percent_below(PLAYER_ACCURACY) {
                    return None;
                }
                rng.skip(1); // duration, checked on recovery
            }
            PlayerAction::InflictMiss => {
                if rng.next_percent_below(PLAYER_ACCURACY) {
                    return None;
                }
            }
            PlayerAction::Other => rng.skip(1),
        }

        // 3. status
        match self.status {
            StatusProgress::Recovered { turns, rolls } => {
                let mut origin = rng;
                origin.rewind(rolls);
                let duration = origin.next_below(STATUS_DURATION_RANGE) + STATUS_DURATION_MIN;
                if duration != turns {
                    return None;
                }
            }
            StatusProgress::Active { turns } if turns >= 1 => {
                let self_hit = rng.next_percent_below(SELF_HIT_THRESHOLD);
                if self_hit != (self.enemy == EnemyAction::HurtItself) {
                    return None;
                }
            }
            _ => {}
        }

        // 4. enemy action
        match self.enemy {
            EnemyAction::HurtItself => {}
            EnemyAction::Miss => {
                if rng.next_percent_below(ENEMY_ACCURACY) {
                    return None;
                }
            }
            EnemyAction::Hit | EnemyAction::HitCrit => {
                if !rng.next_percent_below(ENEMY_ACCURACY) {
                    return None;
                }
                if (rng.next_below(CRIT_DENOMINATOR) == 0) != self.enemy.is_crit() {
                    return None;
                }
                rng.skip(1); // damage
            }
            EnemyAction::SureHit | EnemyAction::SureHitCrit => {
                if (rng.next_below(CRIT_DENOMINATOR) == 0) != self.enemy.is_crit() {
                    return None;
                }
                rng.skip(1); // damage
            }
        }

        Some(rng.state())
    }
}

impl fmt::Display for BattleTurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "player {}{}, enemy {}",
            self.player,
            if self.priority_activated { " (priority)" } else { "" },
            self.enemy
        )?;
        match self.status {
            StatusProgress::None => Ok(()),
            StatusProgress::Active { turns } => write!(f, ", status turn {}", turns),
            StatusProgress::Recovered { turns, rolls } => {
                write!(f, ", recovered after {} turns ({} rolls)", turns, rolls)
            }
        }
    }
}

/// Replay a whole turn history from `seed`
pub fn replay_turns(seed: u64, turns: &[BattleTurnOutcome]) -> Option<u64> {
    turns
        .iter()
        .try_fold(seed, |state, outcome| outcome.replay(state))
}
