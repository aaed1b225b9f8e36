//! Terminal falling-block runner (default binary).
//!
//! Interactive mode draws with the framebuffer renderer and feeds a keyboard
//! pad to the session once per tick. `--headless` runs a fixed number of idle
//! ticks and prints the final snapshot as JSON.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, Event, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::{execute, terminal};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tetris96::core::{Clock, GameSession, GameSnapshot, MemoryStore, ScoreStore};
use tetris96::headless::{self, SnapshotMessage};
use tetris96::input::{should_quit, KeyboardPad};
use tetris96::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris96::types::{Rules, TICK_MS};
use tetris96::{DirStore, SystemClock};

type Session = GameSession<Box<dyn ScoreStore>>;

#[derive(Parser, Debug)]
#[command(name = "tetris96")]
#[command(about = "Deterministic falling-block puzzle for the terminal")]
struct Args {
    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Directory holding the high score record
    #[arg(long, default_value = ".tetris96")]
    data_dir: PathBuf,

    /// Keep the high score in memory only
    #[arg(long)]
    no_save: bool,

    /// Milliseconds per simulation tick
    #[arg(long, default_value_t = TICK_MS as u64)]
    tick_ms: u64,

    /// Grounded frames tolerated before a forced lock
    #[arg(long)]
    lock_delay: Option<u32>,

    /// Write logs to this file (interactive mode never logs to the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run without a terminal and print the final snapshot as JSON
    #[arg(long)]
    headless: bool,

    /// Tick budget for headless runs
    #[arg(long, default_value_t = 3600)]
    ticks: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let clock = SystemClock::new();
    let seed = args.seed.unwrap_or(clock.millis() as u32);
    let rules = Rules {
        lock_delay_frames: args.lock_delay.unwrap_or(Rules::default().lock_delay_frames),
        ..Rules::default()
    };
    let store: Box<dyn ScoreStore> = if args.no_save {
        Box::new(MemoryStore::new())
    } else {
        Box::new(
            DirStore::open(&args.data_dir)
                .with_context(|| format!("opening data dir {}", args.data_dir.display()))?,
        )
    };
    let mut session: Session = GameSession::new(seed, rules, store, clock);

    if args.headless {
        return run_headless(&mut session, args.ticks);
    }

    let mut term = TerminalRenderer::new();
    term.enter()?;
    let enhanced = enable_key_release_events();

    let tick = Duration::from_millis(args.tick_ms.max(1));
    let result = run(&mut term, &mut session, tick);

    // Always try to restore terminal state.
    if enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    let _ = term.exit();
    info!(
        score = session.score(),
        high_score = session.high_score(),
        "exiting"
    );
    result
}

fn init_tracing(args: &Args) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    if args.headless {
        builder.with_writer(io::stderr).init();
    } else if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        builder.with_ansi(false).with_writer(Mutex::new(file)).init();
    }
    Ok(())
}

/// Ask the terminal for press/release events. Terminals without the
/// extension fall back to the pad's auto-release timeout.
fn enable_key_release_events() -> bool {
    if !matches!(terminal::supports_keyboard_enhancement(), Ok(true)) {
        return false;
    }
    execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
    )
    .is_ok()
}

fn run_headless(session: &mut Session, ticks: u64) -> Result<()> {
    let ran = headless::run_idle(session, ticks);
    let message = SnapshotMessage::new(&session.snapshot(), session.seed());
    info!(ran, game_over = message.game_over, "headless run finished");

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &message)?;
    writeln!(stdout)?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, session: &mut Session, tick: Duration) -> Result<()> {
    let view = GameView::default();
    let mut pad = KeyboardPad::new();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut last_tick = Instant::now();

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        return Ok(());
                    }
                    pad.handle_key_event(key, Instant::now());
                }
                Event::Resize(..) => term.invalidate(),
                Event::FocusLost => pad.clear(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            pad.expire(last_tick);
            session.tick(&pad);
            pad.end_tick();
        }
    }
}
