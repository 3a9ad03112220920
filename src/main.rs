//! Space Shooter entry point
//!
//! Parses the command line, sets up logging and runs either the terminal
//! game loop or a headless autopilot session.

use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    ExecutableCommand, cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal,
};
use serde::Serialize;

use space_shooter::clock::FixedTimestep;
use space_shooter::platform::{InputAdapter, TerminalKeys};
use space_shooter::render::{Hud, TerminalRenderer};
use space_shooter::sim::{Autopilot, Snapshot};
use space_shooter::{Session, Settings, Variant};

#[derive(Debug, Parser)]
#[command(name = "space-shooter", version, about = "Arcade space shooter for the terminal")]
struct Args {
    /// Cabinet to emulate: arcade or classic
    #[arg(long, value_parser = parse_variant)]
    variant: Option<Variant>,

    /// RNG seed (defaults to the settings file, then the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Run without a terminal, letting the autopilot play
    #[arg(long)]
    headless: bool,

    /// Ticks to simulate in headless mode
    #[arg(
        long,
        default_value_t = 3600,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    ticks: u64,

    /// Let the autopilot play in the terminal
    #[arg(long)]
    demo: bool,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_str(s)
        .ok_or_else(|| format!("unknown variant '{s}' (expected arcade or classic)"))
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    if let Some(variant) = args.variant {
        settings.variant = variant;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    let seed = settings.seed.unwrap_or_else(clock_seed);

    let session = Session::new(settings.world_config(), seed)
        .context("invalid world configuration")?;
    log::info!("Space Shooter ({}) starting with seed {}", settings.variant.as_str(), seed);

    if args.headless {
        run_headless(session, args.ticks, seed)
    } else {
        run_terminal(session, &settings, args.demo)
    }
}

/// Summary printed at the end of a headless run
#[derive(Debug, Serialize)]
struct HeadlessReport {
    seed: u64,
    ticks: u64,
    runs: u32,
    best_score: u64,
    last: Snapshot,
}

fn run_headless(mut session: Session, ticks: u64, seed: u64) -> Result<()> {
    let mut pilot = Autopilot::new();
    let mut last = session.world().snapshot();

    for _ in 0..ticks {
        let intents = pilot.intents(session.world());
        last = session.step(&intents).snapshot;
    }

    let report = HeadlessReport {
        seed,
        ticks,
        runs: session.runs(),
        best_score: session.best_score(),
        last,
    };
    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{json}");
    Ok(())
}

fn run_terminal(session: Session, settings: &Settings, demo: bool) -> Result<()> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key releases are only reported by terminals with keyboard enhancement
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads live on their own thread so the loop never stalls
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut renderer = TerminalRenderer::new(out);
    let result = game_loop(&mut renderer, session, settings, demo, keyboard_enhanced, &rx);

    // Always restore the terminal
    let mut out = renderer.into_inner();
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let session = result?;
    println!(
        "Thanks for playing! Best score: {} over {} run(s)",
        session.best_score(),
        session.runs()
    );
    Ok(())
}

fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    mut session: Session,
    settings: &Settings,
    demo: bool,
    keyboard_enhanced: bool,
    rx: &mpsc::Receiver<Event>,
) -> Result<Session> {
    let fire_restarts = settings.effective_fire_restarts();
    let mut input = InputAdapter::new(fire_restarts);
    let mut keys = TerminalKeys::new(keyboard_enhanced);
    let mut pilot = Autopilot::new();
    let mut clock = FixedTimestep::from_hz(session.world().config().tick_hz);

    let mut hud = Hud {
        variant: settings.variant.as_str(),
        best_score: 0,
        fps: None,
        restart_hint: if fire_restarts {
            "Press SPACE or R to restart, Q to quit"
        } else {
            "Press R to restart, Q to quit"
        },
    };

    let mut frame: u64 = 0;
    let mut last = Instant::now();
    let mut rate_window = Instant::now();
    let mut rate_ticks = 0u32;
    let mut snapshot = session.world().snapshot();

    loop {
        while let Ok(ev) = rx.try_recv() {
            if matches!(ev, Event::FocusLost) {
                input.release_all();
            }
            if let Some(key_event) = keys.translate(&ev, frame) {
                input.handle(key_event);
            }
        }
        if input.quit_requested() {
            return Ok(session);
        }

        let now = Instant::now();
        let steps = clock.advance(now - last);
        last = now;

        for _ in 0..steps {
            frame += 1;
            input.handle_all(keys.expire(frame));
            let intents = if demo {
                // Keep quit responsive while the pilot flies
                input.take_intents();
                pilot.intents(session.world())
            } else {
                input.take_intents()
            };
            snapshot = session.step(&intents).snapshot;
        }

        rate_ticks += steps;
        if rate_window.elapsed() >= Duration::from_secs(1) {
            if settings.show_fps {
                hud.fps = Some(rate_ticks);
            }
            rate_ticks = 0;
            rate_window = Instant::now();
        }

        if steps > 0 {
            hud.best_score = session.best_score();
            let (cols, rows) = terminal::size().context("querying terminal size")?;
            renderer
                .draw(&snapshot, &hud, cols, rows)
                .context("drawing frame")?;
        }

        thread::sleep(clock.until_next());
    }
}
