pub mod controller;
pub mod game_state;
pub mod input;
pub mod replay;

use self::game_state::GameState;
use self::input::InputEvent;
use crate::utils::TileGrid;

/// The stepping primitive: inputs go in, time moves on one tick per call.
pub trait Emulator {
    fn send_input(&mut self, event: InputEvent);
    fn tick(&mut self);
}

/// A running game the expert can observe and drive.
pub trait Environment: Emulator {
    fn game_area(&self) -> TileGrid;
    fn grab_frame(&self) -> Frame;
    fn is_game_over(&self) -> bool;
    fn reset(&mut self);
    fn game_state(&self) -> GameState;
}

/// An rgb24 screen capture, row-major.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 3],
        }
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let offset = (y as usize * self.width as usize + x as usize) * 3;
        self.data[offset..offset + 3].copy_from_slice(&rgb);
    }
}
