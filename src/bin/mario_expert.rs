use mario_expert::dashboard::{Dashboard, DashboardOptions};
use mario_expert::emulator::replay::ReplayEnvironment;
use mario_expert::{play, PlayOptions};

use anyhow::Context;
use clap::Parser;
use log::info;

use std::path::PathBuf;

/// Plays a recorded run of Super Mario Land with the rule-based expert.
#[derive(Parser, Debug)]
#[command(name = "mario_expert")]
struct Args {
    /// JSON-lines file with one game area grid per line
    #[arg(long)]
    recording: PathBuf,

    /// Where results.json and the recorded video are written
    #[arg(long, default_value = "results")]
    results_path: PathBuf,

    /// Emulator ticks per unit of action duration
    #[arg(long, default_value_t = 1)]
    act_freq: u32,

    /// Emulator ticks before the recording moves to its next grid
    #[arg(long, default_value_t = 1)]
    ticks_per_snapshot: u64,

    /// Serve a live view of the game area and decisions
    #[arg(long, default_value_t = false)]
    dashboard: bool,

    #[arg(long, default_value = "localhost")]
    host: String,

    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut environment = ReplayEnvironment::load(&args.recording, args.ticks_per_snapshot)
        .with_context(|| format!("loading recording {}", args.recording.display()))?;

    let dashboard = if args.dashboard {
        Some(Dashboard::new(DashboardOptions {
            host: args.host.clone(),
            port: args.port,
            ..DashboardOptions::default()
        }))
    } else {
        None
    };

    let options = PlayOptions {
        results_path: args.results_path.clone(),
        act_freq: args.act_freq,
    };
    let episode = play(&mut environment, &options, dashboard.as_ref())
        .with_context(|| format!("playing into {}", args.results_path.display()))?;

    info!(
        "Played {} cycles over {} frames",
        episode.cycles, episode.frames
    );
    Ok(())
}
