mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};
use tracing::{debug, info};

use space_invaders::config::{self, GameConfig};
use space_invaders::{Intent, Result, World};

#[derive(Parser, Debug)]
#[command(name = "space_invaders", version, about = "Space Invaders in the terminal")]
struct Args {
    /// Target frames per second (overrides config)
    #[arg(long)]
    fps: Option<u32>,

    /// RNG seed, for replaying the same game (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (default: <config dir>/space_invaders/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file; nothing is logged otherwise
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,

    /// Most verbose level written to the log
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Print the default config file and exit
    #[arg(long)]
    print_config: bool,
}

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this long.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so the window is refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Returns true if `key` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, key: &KeyCode, now: Instant) -> bool {
    key_seen
        .get(key)
        .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn held_intent(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> Intent {
    let any = |keys: &[KeyCode]| keys.iter().any(|k| is_held(key_seen, k, now));
    let left = any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]);
    let right = any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]);

    Intent {
        direction: right as i32 - left as i32,
        fire: any(&[KeyCode::Char(' ')]),
        restart: false,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_seen` map records when every key last produced a
/// press/repeat event.  Each frame the keys still "fresh" are reduced to one
/// `Intent`, so Space and a direction can be held together.
fn game_loop<W: Write>(
    out: &mut W,
    world: &mut World,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
    fps: u32,
) -> Result<()> {
    let frame = Duration::from_secs_f64(1.0 / fps as f64);
    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        let mut restart = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_seen.insert(code, frame_start);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => restart = true,
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_seen.insert(code, frame_start);
                }
                KeyEventKind::Release => {
                    key_seen.remove(&code);
                }
            }
        }

        let mut intent = held_intent(&key_seen, frame_start);
        intent.restart = restart;

        let seconds_elapsed = frame_start.duration_since(last).as_secs_f64();
        last = frame_start;
        world.advance(seconds_elapsed, &intent, rng);

        if world.is_dirty() || intent.restart {
            display::render(out, world, terminal::size()?)?;
            world.mark_clean();
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(args: &Args) -> Result<()> {
    if let Some(path) = &args.log {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .with_max_level(args.log_level)
            .init();
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print!("{}", config::default_config_string());
        return Ok(());
    }

    init_logging(&args)?;

    let mut config: GameConfig = config::load_config(args.config.as_deref())?;
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| thread_rng().gen());
    info!(seed, fps = config.fps, "starting");
    let mut rng = StdRng::seed_from_u64(seed);
    let mut world = World::new(&config.horde, &mut rng);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    debug!(keyboard_enhanced, "terminal ready");

    // Blocking event reads live on their own thread so the game loop never
    // waits on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut world, &mut rng, &rx, config.fps);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    info!(frames = world.frame(), status = ?world.status(), "exiting");
    result
}
