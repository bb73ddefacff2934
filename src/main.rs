//! Arrow Rush headless runner
//!
//! Drives the simulation with synthetic frame timestamps and prints the HUD
//! line (or a JSON snapshot) as it goes. When an upgrade is offered and
//! auto-upgrade is off, the runner plays the first option itself.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use arrow_rush::Settings;
use arrow_rush::hud::{Snapshot, auto_toggle_label, format_clock, info_line};
use arrow_rush::sim::{GameEvent, Session, TickInput, UpgradeChoice};

#[derive(Debug, Parser)]
#[command(name = "arrow-rush", about = "Run an Arrow Rush session without a screen")]
struct Args {
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Session length in seconds
    #[arg(long)]
    seconds: Option<f64>,
    /// Milliseconds per frame
    #[arg(long)]
    frame_ms: Option<f64>,
    /// Let the game pick upgrades
    #[arg(long)]
    auto_upgrade: bool,
    /// Print JSON snapshots instead of HUD text
    #[arg(long)]
    json: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = Settings::load_or_default(self.config.as_deref());
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(seconds) = self.seconds {
            settings.duration_secs = seconds;
        }
        if let Some(frame_ms) = self.frame_ms {
            settings.frame_ms = frame_ms;
        }
        settings.auto_upgrade |= self.auto_upgrade;
        settings
    }
}

/// Runner instance holding the session and pending input
struct Game {
    session: Session,
    input: TickInput,
    json: bool,
}

impl Game {
    fn new(settings: &Settings, json: bool) -> Self {
        let mut session = Session::new(settings.seed, 0.0);
        session.state.auto_upgrade = settings.auto_upgrade;
        Self {
            session,
            input: TickInput::default(),
            json,
        }
    }

    /// One frame callback at timestamp `now_ms`
    fn update(&mut self, now_ms: f64) {
        let input = std::mem::take(&mut self.input);
        self.session.frame(now_ms, &input);

        for event in &self.session.state.events {
            if let GameEvent::UpgradeApplied { kind, via } = event {
                log::info!("{} ({via:?})", kind.name());
            }
        }

        // Stand-in for a player clicking the first upgrade button
        let state = &self.session.state;
        if !state.auto_upgrade
            && let Some(offer) = state.upgrades.pending()
        {
            self.input.select_upgrade = Some(UpgradeChoice {
                event_id: offer.event_id,
                index: 0,
            });
        }
    }

    fn update_hud(&self) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(&Snapshot::capture(&self.session.state))?);
        } else {
            println!("{}", info_line(&self.session.state));
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let settings = args.settings();
    if settings.frame_ms <= 0.0 {
        bail!("frame_ms must be > 0 (got {})", settings.frame_ms);
    }

    log::info!(
        "Arrow Rush starting: seed {}, {}s at {:.2}ms/frame, {}",
        settings.seed,
        settings.duration_secs,
        settings.frame_ms,
        auto_toggle_label(settings.auto_upgrade)
    );

    let mut game = Game::new(&settings, args.json);
    let frames = settings.frame_count();
    for frame in 1..=frames {
        game.update(frame as f64 * settings.frame_ms);
        if settings.hud_every_frames > 0 && frame % settings.hud_every_frames == 0 {
            game.update_hud()?;
        }
    }

    let state = &game.session.state;
    let upgrades: Vec<&str> = state.upgrades.applied.iter().map(|u| u.name()).collect();
    println!(
        "Finished {} frames in {}: {} kills, {} targets spawned, upgrades: [{}]",
        state.counters.frames,
        format_clock(game.session.clock().elapsed_ms()),
        state.counters.kills,
        state.total_targets(),
        upgrades.join(", ")
    );
    Ok(())
}
