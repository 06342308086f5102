pub mod ai;
pub mod dashboard;
pub mod emulator;
pub mod error;
pub mod results;
pub mod utils;

use ai::Expert;
use dashboard::Dashboard;
use emulator::controller::Controller;
use emulator::game_state::GameState;
use emulator::Environment;
use error::Result;
use results::{write_results, VideoWriter, VIDEO_FILE};

use log::{debug, info};

use std::path::PathBuf;

pub struct PlayOptions {
    pub results_path: PathBuf,
    pub act_freq: u32,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            results_path: PathBuf::from("results"),
            act_freq: 1,
        }
    }
}

#[derive(Debug)]
pub struct Episode {
    pub cycles: u64,
    pub frames: u64,
    pub game_state: GameState,
}

/// Plays one episode from a fresh reset until the environment reports game
/// over, recording every frame and writing the final state to the results
/// directory.
pub fn play<E: Environment>(
    environment: &mut E,
    options: &PlayOptions,
    dashboard: Option<&Dashboard>,
) -> Result<Episode> {
    let mut controller = Controller::new(options.act_freq)?;
    let mut expert = Expert::new();

    environment.reset();
    info!("Episode started");

    let frame = environment.grab_frame();
    let mut video = VideoWriter::create(
        &options.results_path.join(VIDEO_FILE),
        frame.width,
        frame.height,
    )?;

    let mut cycles = 0;
    while !environment.is_game_over() {
        let frame = environment.grab_frame();
        video.write(&frame)?;

        let grid = environment.game_area();
        let command = expert.choose_action(&grid);
        debug!("Cycle {}: {:?}", cycles, command);
        if let Some(dashboard) = dashboard {
            dashboard.update_grid(&grid);
            dashboard.decision(command);
        }

        controller.run_action(&mut *environment, command);
        cycles += 1;
    }

    let game_state = environment.game_state();
    info!("Final Stats: {:?}", game_state);
    write_results(&options.results_path, &game_state)?;
    let frames = video.finish()?;

    Ok(Episode {
        cycles,
        frames,
        game_state,
    })
}
