mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use arcade_shooter::clock::{Clock, ManualClock, MonotonicClock};
use arcade_shooter::config::GameConfig;
use arcade_shooter::input::Action;
use arcade_shooter::presenter::NullPresenter;
use arcade_shooter::session::Session;

use display::TerminalScene;

/// One frame per display refresh at ~60 Hz; all per-tick speeds assume it.
const FRAME: Duration = Duration::from_millis(16);

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames (≈130 ms).  Only terminals without key-release events
/// rely on it.  There, auto-repeat keeps a held key fresh once it starts,
/// but the initial repeat delay (typically 250-600 ms) is longer than the
/// window, so a held key drops out between the first press and the first
/// repeat.
const HOLD_WINDOW: u64 = 8;

#[derive(Parser, Debug)]
#[command(name = "arcade_shooter")]
#[command(about = "Vertical arcade shooter in the terminal")]
struct Args {
    /// JSON file overriding any subset of the game constants
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Field width in pixels
    #[arg(long)]
    width: Option<f32>,

    /// Field height in pixels
    #[arg(long)]
    height: Option<f32>,

    /// Seed for the random generator (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run this many frames without a terminal using a scripted pilot,
    /// then print a summary
    #[arg(long, value_name = "FRAMES")]
    headless: Option<u64>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the keys that are still
/// "fresh" become the session's held actions, so Space and A/D work
/// together.  Terminals with keyboard enhancement report releases and the
/// key is dropped immediately; on classic terminals it expires after
/// `HOLD_WINDOW` frames of silence.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    scene: &mut TerminalScene,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let clock = MonotonicClock::new();
    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    session.present(clock.now(), scene);

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if session.is_game_over() => {
                            key_frame.clear();
                            session.reset(clock.now(), scene);
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        // ── Held keys → session actions ───────────────────────────────────────
        let bindings: [(Action, &[KeyCode]); 4] = [
            (
                Action::MoveLeft,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            ),
            (
                Action::MoveRight,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            ),
            (Action::Shoot, &[KeyCode::Char(' ')]),
            (
                Action::SpecialAttack,
                &[
                    KeyCode::Char('x'),
                    KeyCode::Char('X'),
                    KeyCode::Char('z'),
                    KeyCode::Char('Z'),
                ],
            ),
        ];
        for (action, keys) in bindings {
            session.set_input(action, any_held(&key_frame, keys, frame));
        }

        session.tick(clock.now(), rng, scene);

        let (width, height) = terminal::size()?;
        display::render(out, scene, width, height)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

fn run_terminal(mut session: Session, mut rng: StdRng) -> anyhow::Result<()> {
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

    // Dedicate a thread to blocking event reads so the game loop never
    // blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(err) => {
                log::warn!("terminal event reader stopped: {}", err);
                break;
            }
        }
    });

    let config = session.config();
    let mut scene = TerminalScene::new(config.field_width, config.field_height);
    let result = game_loop(&mut out, &mut session, &mut scene, &mut rng, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    log::info!("final score {}", session.score());
    result.context("terminal I/O failed")
}

// ── Headless autopilot ────────────────────────────────────────────────────────

/// Drive the session without a terminal: sweep across the field holding
/// Shoot, and trigger the special attack whenever the gauge is full.
/// Stops early on game over.
fn run_headless(mut session: Session, mut rng: StdRng, frames: u64) {
    let mut clock = ManualClock::new();
    let mut presenter = NullPresenter;
    let mut heading_right = true;

    session.present(clock.now(), &mut presenter);
    for _ in 0..frames {
        clock.advance(FRAME);

        let config = session.config();
        let player = &session.world().player;
        if player.x <= 0.0 {
            heading_right = true;
        } else if player.x >= config.field_width - player.width {
            heading_right = false;
        }
        let gauge_ready = session.power().gauge.is_ready();

        session.set_input(Action::MoveRight, heading_right);
        session.set_input(Action::MoveLeft, !heading_right);
        session.set_input(Action::Shoot, true);
        session.set_input(Action::SpecialAttack, gauge_ready);

        session.tick(clock.now(), &mut rng, &mut presenter);
        if session.is_game_over() {
            break;
        }
    }

    log::info!(
        "headless run finished after {} frames: score {} ({:?})",
        session.frame(),
        session.score(),
        session.status()
    );
    println!(
        "frames={} score={} status={:?}",
        session.frame(),
        session.score(),
        session.status()
    );
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(width) = args.width {
        config.field_width = width;
    }
    if let Some(height) = args.height {
        config.field_height = height;
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let session = Session::new(config, Duration::ZERO).context("invalid game configuration")?;

    match args.headless {
        Some(frames) => {
            run_headless(session, rng, frames);
            Ok(())
        }
        None => run_terminal(session, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_stays_held_for_the_hold_window() {
        let mut key_frame = HashMap::new();
        key_frame.insert(KeyCode::Char(' '), 10);
        assert!(is_held(&key_frame, &KeyCode::Char(' '), 10));
        assert!(is_held(&key_frame, &KeyCode::Char(' '), 10 + HOLD_WINDOW));
        assert!(!is_held(&key_frame, &KeyCode::Char(' '), 11 + HOLD_WINDOW));
    }

    #[test]
    fn window_is_shorter_than_the_initial_repeat_delay() {
        // A classic terminal sends its first repeat no sooner than ~250 ms
        // after the press, by which point the key has already expired.
        let mut key_frame = HashMap::new();
        key_frame.insert(KeyCode::Left, 0);
        let first_repeat = (250 / FRAME.as_millis()) as u64;
        assert!(!is_held(&key_frame, &KeyCode::Left, first_repeat));
    }

    #[test]
    fn any_binding_counts() {
        let mut key_frame = HashMap::new();
        key_frame.insert(KeyCode::Char('d'), 5);
        let keys = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
        assert!(any_held(&key_frame, &keys, 6));
        assert!(!any_held(&key_frame, &[KeyCode::Left], 6));
    }
}
