use super::game_state::GameState;
use super::input::{GamepadState, InputEvent};
use super::{Emulator, Environment, Frame};
use crate::error::{Error, Result};
use crate::utils::{Tile, TileGrid};

use log::info;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

// Each tile is drawn as a square of this many pixels
const TILE_PIXELS: u32 = 8;

/// Plays back a recorded sequence of game areas. Inputs are counted but do not
/// change what is shown; time advances one snapshot every `ticks_per_snapshot`
/// ticks.
pub struct ReplayEnvironment {
    grids: Vec<TileGrid>,
    ticks_per_snapshot: u64,
    ticks: u64,
    inputs: u64,
    gamepad: GamepadState,
}

impl ReplayEnvironment {
    pub fn new(grids: Vec<TileGrid>, ticks_per_snapshot: u64) -> Self {
        Self {
            grids,
            ticks_per_snapshot: ticks_per_snapshot.max(1),
            ticks: 0,
            inputs: 0,
            gamepad: GamepadState::default(),
        }
    }

    /// Reads a recording with one JSON grid (an array of rows of sprite codes)
    /// per line. Blank lines are skipped.
    pub fn load(path: &Path, ticks_per_snapshot: u64) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut grids = vec![];
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            grids.push(serde_json::from_str::<TileGrid>(&line)?);
        }
        if grids.is_empty() {
            return Err(Error::EmptyRecording(path.to_path_buf()));
        }
        info!("Loaded {} grids from {}", grids.len(), path.display());
        Ok(Self::new(grids, ticks_per_snapshot))
    }

    pub fn snapshot(&self) -> usize {
        (self.ticks / self.ticks_per_snapshot) as usize
    }

    pub fn gamepad(&self) -> GamepadState {
        self.gamepad
    }

    fn current_grid(&self) -> &TileGrid {
        let last = self.grids.len().saturating_sub(1);
        &self.grids[self.snapshot().min(last)]
    }
}

fn tile_colour(tile: Tile) -> [u8; 3] {
    match tile {
        Tile::Air => [92, 148, 252],
        Tile::Mario => [216, 40, 0],
        Tile::Pipe => [0, 168, 0],
        Tile::MovingPlatform => [252, 188, 176],
        Tile::PowerupBlock => [252, 152, 56],
        tile if tile.is_obstacle_class() => [136, 20, 0],
        tile if tile.is_enemy_class() => [0, 0, 0],
        _ => [188, 188, 188],
    }
}

pub fn render(grid: &TileGrid) -> Frame {
    let mut frame = Frame::new(
        grid.cols() as u32 * TILE_PIXELS,
        grid.rows() as u32 * TILE_PIXELS,
    );
    for (row, tiles) in grid.iter_rows().enumerate() {
        for (col, &tile) in tiles.iter().enumerate() {
            let colour = tile_colour(tile);
            for dy in 0..TILE_PIXELS {
                for dx in 0..TILE_PIXELS {
                    let x = col as u32 * TILE_PIXELS + dx;
                    let y = row as u32 * TILE_PIXELS + dy;
                    frame.put_pixel(x, y, colour);
                }
            }
        }
    }
    frame
}

impl Emulator for ReplayEnvironment {
    fn send_input(&mut self, event: InputEvent) {
        self.inputs += 1;
        self.gamepad.apply(event);
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}

impl Environment for ReplayEnvironment {
    fn game_area(&self) -> TileGrid {
        self.current_grid().clone()
    }

    fn grab_frame(&self) -> Frame {
        render(self.current_grid())
    }

    fn is_game_over(&self) -> bool {
        self.snapshot() >= self.grids.len()
    }

    fn reset(&mut self) {
        self.ticks = 0;
        self.inputs = 0;
        self.gamepad = GamepadState::default();
    }

    fn game_state(&self) -> GameState {
        GameState::new()
            .with("snapshots", self.grids.len() as u64)
            .with("snapshot", self.snapshot().min(self.grids.len()) as u64)
            .with("ticks", self.ticks)
            .with("inputs", self.inputs)
            .with("completed", self.is_game_over())
    }
}
