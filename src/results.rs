use crate::emulator::game_state::GameState;
use crate::emulator::Frame;
use crate::error::{Error, Result};

use log::info;

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const RESULTS_FILE: &str = "results.json";
pub const VIDEO_FILE: &str = "mario_expert.rgb";

/// Raw rgb24 video: frames are written back to back with no header, so every
/// frame has to match the size the video was opened with.
pub struct VideoWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    width: u32,
    height: u32,
    frames: u64,
}

impl VideoWriter {
    pub fn create(path: &Path, width: u32, height: u32) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(File::create(path)?),
            width,
            height,
            frames: 0,
        })
    }

    pub fn write(&mut self, frame: &Frame) -> Result<()> {
        if frame.width != self.width || frame.height != self.height {
            return Err(Error::FrameSize {
                width: self.width,
                height: self.height,
                found_width: frame.width,
                found_height: frame.height,
            });
        }
        self.writer.write_all(&frame.data)?;
        self.frames += 1;
        Ok(())
    }

    /// Flushes the video and returns how many frames it holds.
    pub fn finish(mut self) -> Result<u64> {
        self.writer.flush()?;
        info!(
            "Wrote {} frames of {}x{} rgb24 to {}",
            self.frames,
            self.width,
            self.height,
            self.path.display()
        );
        Ok(self.frames)
    }
}

pub fn write_results(results_path: &Path, state: &GameState) -> Result<PathBuf> {
    fs::create_dir_all(results_path)?;
    let path = results_path.join(RESULTS_FILE);
    let mut file = BufWriter::new(File::create(&path)?);
    serde_json::to_writer(&mut file, state)?;
    file.flush()?;
    info!("Wrote results to {}", path.display());
    Ok(path)
}
