//! AI2100 Runner headless entry point
//!
//! Runs one seeded game under the demo autopilot and prints the final run
//! state as JSON.
//!
//! Usage: `ai2100-runner [seed] [lives|honor-risk] [ticks] [tuning.json]`

use std::fs;

use anyhow::{Context, bail};

use ai2100_runner::consts::FRAME_MS;
use ai2100_runner::sim::{Engine, EventCategory, RunVariant, autopilot};
use ai2100_runner::tuning::Tuning;

const DEFAULT_TICKS: u64 = 3600;

struct Args {
    seed: u64,
    variant: RunVariant,
    ticks: u64,
    tuning_path: Option<String>,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args().skip(1);

    let seed: u64 = match args.next() {
        Some(s) => s.parse().with_context(|| format!("invalid seed `{s}`"))?,
        None => 0xA12100,
    };
    let variant = match args.next().as_deref() {
        None | Some("honor-risk") => RunVariant::HonorRisk,
        Some("lives") => RunVariant::LethalLives,
        Some(other) => bail!("unknown variant `{other}` (expected `lives` or `honor-risk`)"),
    };
    let ticks: u64 = match args.next() {
        Some(t) => t.parse().with_context(|| format!("invalid tick count `{t}`"))?,
        None => DEFAULT_TICKS,
    };

    Ok(Args {
        seed,
        variant,
        ticks,
        tuning_path: args.next(),
    })
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = parse_args()?;
    let tuning = match &args.tuning_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read tuning file {path}"))?;
            Tuning::from_json_for(args.variant, &json)
                .with_context(|| format!("invalid tuning in {path}"))?
        }
        None => Tuning::for_variant(args.variant),
    };

    log::info!(
        "AI2100 Runner starting: {:?}, seed {}, up to {} ticks",
        args.variant,
        args.seed,
        args.ticks
    );
    let mut engine = Engine::with_tuning(args.variant, tuning, args.seed)?;

    for _ in 0..args.ticks {
        let input = autopilot::drive(&engine.view());
        let running = engine.tick(FRAME_MS, &input).is_running();

        for event in engine.drain_events() {
            match event.category {
                EventCategory::DashStarted | EventCategory::JumpPerformed => {
                    log::trace!("[{}] {}", event.tick, event.text)
                }
                _ => log::info!("[{}] {}", event.tick, event.text),
            }
        }

        if !running {
            break;
        }
    }

    let view = engine.view();
    log::info!(
        "Finished after {} ticks: {:?}, score {}",
        view.time_ticks,
        view.phase,
        view.score
    );
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
