pub mod features;
pub mod policy;

use self::features::Observations;
use self::policy::{Action, Command};
use crate::utils::TileGrid;

use log::trace;

/// Plays the game one grid at a time. The only thing remembered between grids
/// is the last action taken.
#[derive(Debug, Default)]
pub struct Expert {
    previous_action: Option<Action>,
}

impl Expert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn previous_action(&self) -> Option<Action> {
        self.previous_action
    }

    // Forget the last action when a new episode starts
    pub fn reset(&mut self) {
        self.previous_action = None;
    }

    pub fn choose_action(&mut self, grid: &TileGrid) -> Command {
        trace!("Game area:\n{}", grid);
        let observations = Observations::extract(grid);
        let command = policy::choose(&observations, self.previous_action);
        self.previous_action = Some(command.action);
        command
    }
}
