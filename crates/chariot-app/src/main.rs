use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use chariot_app::config::{LeaderboardSection, RunnerConfig};
use chariot_app::game_loop::{spawn_game_loop, LoopConfig, RunReport};
use chariot_leaderboard::store;

#[derive(Parser, Debug)]
#[command(name = "chariot")]
#[command(about = "Headless Chariot Arena runner with an autopilot player")]
struct Cli {
    /// TOML config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    starting_round: Option<u32>,
    #[arg(long)]
    time_scale: Option<f64>,
    /// Stop after this many ticks even if the game is still running
    #[arg(long)]
    max_ticks: Option<u64>,
    /// Pace ticks at wall-clock speed
    #[arg(long)]
    realtime: bool,
    /// Start the game and leave the chariot idle
    #[arg(long)]
    no_autopilot: bool,
    /// Submit the final score to the leaderboard
    #[arg(long)]
    submit: bool,
    /// Player name for the leaderboard
    #[arg(long)]
    name: Option<String>,
    /// Leaderboard JSON file
    #[arg(long)]
    leaderboard: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut RunnerConfig) {
        if let Some(seed) = self.seed {
            config.sim.seed = seed;
        }
        if let Some(round) = self.starting_round {
            config.sim.starting_round = round;
        }
        if let Some(scale) = self.time_scale {
            config.sim.time_scale = scale;
        }
        if let Some(max_ticks) = self.max_ticks {
            config.run.max_ticks = max_ticks;
        }
        config.run.realtime |= self.realtime;
        config.leaderboard.submit |= self.submit;
        if let Some(name) = &self.name {
            config.leaderboard.player_name = Some(name.clone());
        }
        if let Some(path) = &self.leaderboard {
            config.leaderboard.path = path.clone();
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    };
    cli.apply(&mut config);

    let loop_config = LoopConfig {
        sim: config.sim_config(),
        max_ticks: config.run.max_ticks,
        realtime: config.run.realtime,
        snapshot_every: config.run.snapshot_every,
        autopilot: !cli.no_autopilot,
    };

    let latest_snapshot = Arc::new(Mutex::new(None));
    // The loop stops when every sender is gone, so hold this one until it ends.
    let (commands, handle) = spawn_game_loop(loop_config, Arc::clone(&latest_snapshot))
        .context("failed to spawn game loop thread")?;
    let report = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))?;
    drop(commands);

    print_report(&report);
    let last = latest_snapshot.lock().ok().and_then(|s| s.clone());
    if let Some(snapshot) = last {
        info!(
            health = snapshot.player.health,
            tier = snapshot.player.chariot_tier,
            upgrades = snapshot.player.upgrades.len(),
            "final player state"
        );
    }

    if config.leaderboard.submit {
        // The game result stands whatever happens here.
        if let Err(err) = submit_score(&config.leaderboard, &report) {
            warn!("leaderboard submission failed: {err:#}");
        }
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    let summary = &report.summary;
    let outcome = if report.game_over {
        "Game over"
    } else {
        "Run stopped"
    };
    println!("{outcome} after {} loop ticks ({:?}).", report.loop_ticks, report.phase);
    println!("  Round reached: {}", summary.round);
    println!("  Level:         {}", summary.level);
    println!("  Enemies slain: {}", summary.total_killed);
    println!("  Survived:      {:.1}s", summary.game_time_ms / 1000.0);
    println!(
        "  Score:         {} (kills {} + level {} + time {})",
        summary.score, summary.breakdown.kills, summary.breakdown.level, summary.breakdown.time
    );
}

fn submit_score(section: &LeaderboardSection, report: &RunReport) -> Result<()> {
    let name = section
        .player_name
        .as_deref()
        .ok_or_else(|| anyhow!("no player name configured"))?;
    let path = &section.path;
    let mut board = store::load_from_file(path)
        .with_context(|| format!("failed to load leaderboard: {}", path.display()))?;

    let now_ms = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default();
    let submission = board.submit(name, report.summary.score, now_ms)?;
    if submission.created {
        store::save_to_file(path, &board)
            .with_context(|| format!("failed to save leaderboard: {}", path.display()))?;
    }

    println!(
        "Leaderboard: #{} for {} with {}{}",
        submission.ranking,
        submission.entry.name,
        submission.entry.score,
        if submission.is_top_ten { " (top ten)" } else { "" }
    );
    for (place, entry) in board.top(10).iter().enumerate() {
        println!("  {:>2}. {:<20} {}", place + 1, entry.name, entry.score);
    }
    Ok(())
}
