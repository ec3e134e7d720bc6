mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use tracing_subscriber::EnvFilter;

use alien_invasion::assets::{load_bitmap, Bitmap};
use alien_invasion::compute::{Flow, Game};
use alien_invasion::error::GameError;
use alien_invasion::hud::{CellRasterizer, PlayButton, Scoreboard};
use alien_invasion::input::{Controls, InputEvent};
use alien_invasion::settings::Settings;
use alien_invasion::surface::draw_frame;

use display::{KeyTracker, TerminalSurface};

#[derive(Parser)]
#[command(name = "alien_invasion")]
#[command(about = "Shoot down the alien fleet before it reaches the ground")]
struct Args {
    /// TOML settings file; keys it leaves out keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sprite for the player's craft
    #[arg(long, default_value = "assets/ship.txt")]
    ship: PathBuf,

    /// Write logs to this file (the terminal is busy drawing the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Frame loop ────────────────────────────────────────────────────────────────

/// Runs until a quit command arrives.
///
/// Each frame drains every pending terminal event (non-blocking), turns them
/// into one input snapshot, advances the game by one tick and redraws.
/// Draining keeps going during the post-hit pause, so quit and new-game are
/// always honoured on the next frame.
fn game_loop<W: Write>(
    out: W,
    mut game: Game,
    ship: &Bitmap,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), GameError> {
    let rasterizer = CellRasterizer;
    let viewport = game.settings.viewport();
    let mut surface = TerminalSurface::new(
        out,
        viewport.width.min(u32::from(u16::MAX)) as u16,
        viewport.height.min(u32::from(u16::MAX)) as u16,
    );
    let mut scoreboard = Scoreboard::new(&game.session, &game.settings, ship, &rasterizer);
    let button = PlayButton::new(game.play_button(), &game.settings, &rasterizer);

    let frame = Duration::from_millis(game.settings.frame_millis);
    let mut tracker = KeyTracker::new();
    let mut controls = Controls::new();
    let mut events: Vec<InputEvent> = Vec::new();

    loop {
        let frame_start = Instant::now();
        tracker.begin_frame();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(event) => tracker.translate(event, &mut events),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Input thread is gone; nothing could ever quit the game
                    events.push(InputEvent::Quit);
                    break;
                }
            }
        }
        tracker.expire(&mut events);
        let intent = controls.drain(events.drain(..));

        if game.tick(&intent) == Flow::Quit {
            tracing::info!(high_score = game.session.high_score, "quit");
            return Ok(());
        }

        scoreboard.refresh(&game.session, &rasterizer);
        draw_frame(&mut surface, &game, ship, &scoreboard, &button)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(path) = &args.log_file {
        if let Err(err) = init_logging(path) {
            eprintln!("alien_invasion: cannot open log file {}: {err}", path.display());
            return ExitCode::FAILURE;
        }
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "startup failed");
            eprintln!("alien_invasion: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    // Everything that can fail at startup happens before the terminal is
    // switched into raw mode, so errors print normally.
    let mut settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let ship = load_bitmap(&args.ship)?;

    if settings.fullscreen {
        let (width, height) = terminal::size()?;
        settings.screen_width = u32::from(width);
        settings.screen_height = u32::from(height);
    }
    let game = Game::new(settings, ship.width(), ship.height())?;
    tracing::info!(
        width = game.settings.screen_width,
        height = game.settings.screen_height,
        enemies = game.enemies.len(),
        "game ready"
    );

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, game, &ship, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
