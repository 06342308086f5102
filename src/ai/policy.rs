use super::features::Observations;
use crate::utils::pythagorean_distance;

use log::debug;
use serde::Serialize;

// Columns ahead of Mario within which each hazard gets a reaction
const OBSTACLE_REACH: i32 = 3;
const PLATFORM_REACH: i32 = 6;
const GROUND_ENEMY_REACH: i32 = 2;
const FLYING_ENEMY_REACH: i32 = 4;
const PIT_REACH: i32 = 2;

// How long to hold jump per tile of height or distance
const OBSTACLE_HOLD_PER_TILE: i32 = 2;
const PLATFORM_HOLD_PER_ROW: i32 = 3;
// Extra hold when a pit opens up before the platform
const PIT_BEFORE_PLATFORM_BONUS: i32 = 10;
const FLYING_ENEMY_HOLD: i32 = 10;
// Far edges lower than this are treated as this high, otherwise short pits
// get short jumps that fall in
const MIN_PIT_EDGE_HEIGHT: i32 = 4;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Left,
    Right,
    Up,
    Jump,
}

/// An action and how many act periods to hold it for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Command {
    pub action: Action,
    pub duration: u32,
}

impl Command {
    pub const WALK: Command = Command::new(Action::Right, 1);

    pub const fn new(action: Action, duration: u32) -> Self {
        Self { action, duration }
    }

    fn jump(duration: i32) -> Self {
        Self::new(Action::Jump, duration.max(0) as u32)
    }
}

/// The rules of the decision cascade, in priority order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Rule {
    OffScreen,
    Obstacle,
    Platform,
    GroundEnemy,
    FlyingEnemy,
    Pit,
    Walk,
}

impl Rule {
    /// First rule whose condition holds. Later rules are not looked at.
    pub fn select(observations: &Observations) -> Rule {
        let Observations {
            off_screen,
            airborne,
            enemy,
            obstacle,
            platform,
            pit,
            ..
        } = *observations;

        if off_screen {
            Rule::OffScreen
        } else if obstacle.col_offset < OBSTACLE_REACH && !airborne {
            Rule::Obstacle
        } else if platform.col_offset < PLATFORM_REACH
            && platform.vertical_distance < PLATFORM_REACH
            && platform.vertical_distance != obstacle.col_offset
        {
            Rule::Platform
        } else if enemy.tile.is_ground_enemy() && enemy.col_offset < GROUND_ENEMY_REACH {
            Rule::GroundEnemy
        } else if enemy.tile.is_flying_enemy() && enemy.col_offset < FLYING_ENEMY_REACH {
            Rule::FlyingEnemy
        } else if pit.col_offset < PIT_REACH && !airborne {
            Rule::Pit
        } else {
            Rule::Walk
        }
    }

    pub fn command(self, observations: &Observations, previous: Option<Action>) -> Command {
        let Observations {
            enemy,
            obstacle,
            platform,
            pit,
            ..
        } = *observations;

        match self {
            Rule::OffScreen => {
                debug!("Mario is off screen");
                Command::WALK
            }
            Rule::Walk => Command::WALK,
            Rule::Obstacle => {
                debug!("Jump over obstacle of height {}", obstacle.height);
                Command::jump(obstacle.height * OBSTACLE_HOLD_PER_TILE)
            }
            Rule::Platform => {
                debug!(
                    "Jump onto platform {} up and {} ahead",
                    platform.vertical_distance, platform.col_offset
                );
                let mut hold = platform.vertical_distance * PLATFORM_HOLD_PER_ROW;
                if pit.col_offset < platform.col_offset {
                    hold += PIT_BEFORE_PLATFORM_BONUS;
                }
                Command::jump(hold)
            }
            Rule::GroundEnemy => {
                debug!("{:?} ahead", enemy.tile);
                // Jumping again straight after a jump lands on top of it
                if previous == Some(Action::Jump) {
                    Command::new(Action::Left, 1)
                } else {
                    Command::jump(1)
                }
            }
            Rule::FlyingEnemy => {
                debug!("{:?} ahead", enemy.tile);
                Command::jump(enemy.row_offset + FLYING_ENEMY_HOLD)
            }
            Rule::Pit => {
                debug!(
                    "Pit is {} away and other side at {} {}",
                    pit.col_offset, pit.edge_height, pit.edge_span
                );
                Command::jump(pythagorean_distance(
                    pit.edge_height.max(MIN_PIT_EDGE_HEIGHT),
                    pit.edge_span,
                ))
            }
        }
    }
}

/// Runs the cascade without the jump loop guard.
pub fn decide(observations: &Observations, previous: Option<Action>) -> Command {
    Rule::select(observations).command(observations, previous)
}

/// Two jumps in a row usually mean the same trap keeps firing, so the second
/// one becomes a step to the right.
pub fn guard(selected: Command, previous: Option<Action>) -> Command {
    if selected.action == Action::Jump && previous == Some(Action::Jump) {
        debug!("Prevented jump loop");
        Command::WALK
    } else {
        selected
    }
}

/// One full decision: the cascade followed by the guard. The returned action is
/// the `previous` to pass in on the next cycle.
pub fn choose(observations: &Observations, previous: Option<Action>) -> Command {
    guard(decide(observations, previous), previous)
}
