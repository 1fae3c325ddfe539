//! Lane Dodge entry point
//!
//! Runs a headless session driven by the autopilot and prints the run
//! summary as JSON. Usage:
//!
//! ```text
//! lane-dodge [config.json] [--realtime] [--endless] [--ticks N] [--seed S]
//! ```

use std::process::ExitCode;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use lane_dodge::feedback::{FeedbackSink, LogFeedback};
use lane_dodge::sim::TickInput;
use lane_dodge::{GameConfig, GamePhase, GameSession, LivesMode};

/// Tick cap when none is given (keeps endless runs finite)
const DEFAULT_MAX_TICKS: u64 = 1_000;

#[derive(Debug, Default)]
struct Args {
    config_path: Option<String>,
    realtime: bool,
    endless: bool,
    max_ticks: Option<u64>,
    seed: Option<u64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--realtime" => args.realtime = true,
            "--endless" => args.endless = true,
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a value")?;
                args.max_ticks = Some(value.parse().map_err(|_| format!("bad tick count: {value}"))?);
            }
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                args.seed = Some(value.parse().map_err(|_| format!("bad seed: {value}"))?);
            }
            other if other.starts_with("--") => return Err(format!("unknown flag: {other}")),
            path => args.config_path = Some(path.to_string()),
        }
    }
    Ok(args)
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lane Dodge (native) starting...");

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut config = match &args.config_path {
        Some(path) => match GameConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    if args.endless {
        config.lives_mode = LivesMode::Endless;
    }

    let seed = args.seed.unwrap_or_else(time_seed);
    let max_ticks = args.max_ticks.unwrap_or(DEFAULT_MAX_TICKS);
    log::info!(
        "Game initialized with seed: {} ({} lives, {})",
        seed,
        config.life_count,
        config.lives_mode.as_str()
    );

    let mut session = match GameSession::try_new(config, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut feedback = LogFeedback::new();
    let input = TickInput {
        autopilot: true,
        ..Default::default()
    };

    if args.realtime {
        session.start(Instant::now());
    }

    while session.phase() != GamePhase::GameOver && session.time_ticks() < max_ticks {
        let result = if args.realtime {
            let now = Instant::now();
            match session.update_with(now, &input) {
                Some(result) => result,
                None => {
                    if let Some(wait) = session.timer().time_until_due(now) {
                        std::thread::sleep(wait);
                    }
                    continue;
                }
            }
        } else {
            session.tick(&input)
        };
        feedback.emit_step(&result, session.state());
    }

    let summary = session.summary();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Could not encode summary: {}", e);
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
