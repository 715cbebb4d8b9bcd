/// Entry point and game loop.

mod config;
mod domain;
mod sim;
mod ui;

use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use config::GameConfig;
use domain::cell::Direction;
use domain::difficulty;
use sim::event::SessionEvent;
use sim::session::{Phase, Session};
use ui::input::InputState;
use ui::renderer::{format_time, Renderer};

// ── Key Constants ──

const KEYS_LEFT: &[KeyCode] = &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const KEYS_RIGHT: &[KeyCode] = &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const KEYS_UP: &[KeyCode] = &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')];
const KEYS_DOWN: &[KeyCode] = &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')];
const KEYS_RESTART: &[KeyCode] = &[KeyCode::Char('r'), KeyCode::Char('R')];
const KEYS_NEXT: &[KeyCode] = &[KeyCode::Char('n'), KeyCode::Char('N'), KeyCode::Enter];
const KEYS_QUIT: &[KeyCode] = &[KeyCode::Char('q'), KeyCode::Char('Q'), KeyCode::Esc];

/// How long a HUD flash message stays up.
const FLASH_DURATION: Duration = Duration::from_millis(600);

fn main() {
    let config = GameConfig::load();
    let level = parse_level_arg();

    let mut renderer = Renderer::new();
    if let Err(e) = renderer.init() {
        eprintln!("Terminal init failed: {e}");
        return;
    }

    let result = game_loop(level, &mut renderer, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }

    match result {
        Ok(best) => {
            println!();
            println!("Thanks for playing Mazebound!");
            if let Some((level, time)) = best {
                println!("Last escape: level {} in {}", level, format_time(time));
            }
        }
        Err(e) => eprintln!("Game error: {e}"),
    }
}

/// First CLI argument is the difficulty level (1-20). Anything else is
/// reported and replaced by level 1 before the terminal goes raw.
fn parse_level_arg() -> u8 {
    let Some(arg) = std::env::args().nth(1) else {
        return difficulty::MIN_LEVEL;
    };
    match arg.parse::<u8>() {
        Ok(level) if (difficulty::MIN_LEVEL..=difficulty::MAX_LEVEL).contains(&level) => level,
        Ok(level) => {
            let clamped = difficulty::clamp_level(level);
            eprintln!(
                "Difficulty level must be {}-{}; using {clamped}.",
                difficulty::MIN_LEVEL,
                difficulty::MAX_LEVEL
            );
            clamped
        }
        Err(_) => {
            eprintln!("Could not parse difficulty level {arg:?}; starting at level 1.");
            difficulty::MIN_LEVEL
        }
    }
}

/// Returns the (level, time) of the last completed maze, if any.
fn game_loop(
    start_level: u8,
    renderer: &mut Renderer,
    config: &GameConfig,
) -> Result<Option<(u8, Duration)>, Box<dyn std::error::Error>> {
    let mut input = InputState::new();
    let mut session = Session::new(start_level, &config.maze);

    let tick = Duration::from_millis(config.speed.tick_rate_ms);
    let repeat = Duration::from_millis(config.speed.move_repeat_ms);
    let mut last_step = Instant::now();
    let mut flash: Option<(String, Instant)> = None;
    let mut last_win: Option<(u8, Duration)> = None;

    loop {
        input.drain_events();

        if input.ctrl_c_pressed() || input.any_pressed(KEYS_QUIT) {
            break;
        }
        if input.any_pressed(KEYS_RESTART) {
            session = Session::new(session.level, &config.maze);
            flash = Some(("Restarted".to_string(), Instant::now()));
        }

        match session.phase {
            Phase::Playing => {
                if let Some((dir, fresh)) = detect_movement(&input) {
                    if fresh || last_step.elapsed() >= repeat {
                        for event in session.try_move(dir) {
                            match event {
                                SessionEvent::MoveBlocked => {
                                    flash = Some(("Bump!".to_string(), Instant::now()));
                                }
                                SessionEvent::ReachedExit { elapsed } => {
                                    last_win = Some((session.level, elapsed));
                                }
                                SessionEvent::MoveAccepted { .. } => {}
                            }
                        }
                        last_step = Instant::now();
                    }
                }
            }
            Phase::Won => {
                if input.any_pressed(KEYS_NEXT) {
                    let next = difficulty::clamp_level(session.level.saturating_add(1));
                    session = Session::new(next, &config.maze);
                    flash = None;
                }
            }
        }

        // Expire the flash message.
        if let Some((_, since)) = &flash {
            if since.elapsed() >= FLASH_DURATION {
                flash = None;
            }
        }

        let message = flash.as_ref().map(|(text, _)| text.as_str());
        renderer.render(&session, message)?;
        std::thread::sleep(tick);
    }

    Ok(last_win)
}

/// Freshly pressed direction wins over a held one, so a tap always moves
/// immediately; held keys repeat at the configured cadence.
fn detect_movement(input: &InputState) -> Option<(Direction, bool)> {
    let bindings: [(&[KeyCode], Direction); 4] = [
        (KEYS_UP, Direction::North),
        (KEYS_RIGHT, Direction::East),
        (KEYS_DOWN, Direction::South),
        (KEYS_LEFT, Direction::West),
    ];
    for (keys, dir) in bindings {
        if input.any_pressed(keys) {
            return Some((dir, true));
        }
    }
    for (keys, dir) in bindings {
        if input.any_held(keys) {
            return Some((dir, false));
        }
    }
    None
}
