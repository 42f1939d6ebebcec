use std::fs::{self, File};
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind},
    execute, terminal,
};
use flappy_sim::{
    Difficulty, FixedStep, Game, JsonFileStore, MemoryStore, NullPresenter, Phase, ScoreStore,
    TerminalPresenter, data_dir,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flappy-sim", version)]
#[command(about = "Flappy Bird in your terminal, with pixel graphics")]
struct Args {
    /// Difficulty for the first run (easy, medium, hard)
    #[arg(long, default_value = "hard")]
    difficulty: String,

    /// Seed for pipe and cloud placement
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second; physics runs one tick per frame
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u32).range(1..=240))]
    fps: u32,

    /// Where the best score is kept
    #[arg(long)]
    high_score_file: Option<PathBuf>,

    /// Where logs go (RUST_LOG sets the level)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Simulate this many ticks with no input and no terminal, then print the result
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

// ── Input ───────────────────────────────────────────────────────────────────

enum Command {
    Quit,
    Jump,
    Start,
    ToggleSettings,
    Select(Difficulty),
}

fn command_for(code: KeyCode) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Up => Some(Command::Jump),
        KeyCode::Enter => Some(Command::Start),
        KeyCode::Char('s') => Some(Command::ToggleSettings),
        KeyCode::Char('1') | KeyCode::Char('e') => Some(Command::Select(Difficulty::Easy)),
        KeyCode::Char('2') | KeyCode::Char('m') => Some(Command::Select(Difficulty::Medium)),
        KeyCode::Char('3') | KeyCode::Char('h') => Some(Command::Select(Difficulty::Hard)),
        _ => None,
    }
}

// ── Hosts ───────────────────────────────────────────────────────────────────

fn frame_loop<S: ScoreStore>(game: &mut Game<S, StdRng>, fps: u32) -> Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut presenter = TerminalPresenter::new(stdout(), cols, rows);
    let frame_dur = Duration::from_secs_f64(1.0 / fps as f64);

    loop {
        let frame_start = Instant::now();

        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match command_for(key.code) {
                        Some(Command::Quit) => return Ok(()),
                        Some(Command::Jump) => game.jump(),
                        Some(Command::Start) if game.phase() != Phase::Running => game.restart(),
                        Some(Command::ToggleSettings) if game.phase() != Phase::Running => {
                            presenter.toggle_settings()
                        }
                        Some(Command::Select(d)) => game.set_difficulty(d),
                        _ => {}
                    }
                }
                Event::Mouse(m) if m.kind == MouseEventKind::Down(MouseButton::Left) => game.jump(),
                Event::Resize(c, r) => presenter.resize(c, r),
                _ => {}
            }
        }

        // A suspended game still gets drawn: menus and the game-over panel.
        game.frame(&mut presenter)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}

fn run_terminal<S: ScoreStore>(mut game: Game<S, StdRng>, fps: u32) -> Result<()> {
    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableMouseCapture,
    )?;

    let result = frame_loop(&mut game, fps);

    execute!(
        out,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    info!(high_score = game.high_score(), "quit");
    result
}

fn run_headless(difficulty: Difficulty, rng: StdRng, ticks: u64) -> Result<()> {
    let mut game = Game::new(difficulty, MemoryStore::default(), rng);
    game.restart();
    let frames = FixedStep::new(ticks).run(&mut game, &mut NullPresenter)?;
    println!(
        "difficulty={} frames={} score={} over={}",
        game.active_difficulty(),
        frames,
        game.score(),
        game.phase() == Phase::Over
    );
    Ok(())
}

// ── Main ────────────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!(e))
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = match args.log_file {
        Some(path) => path,
        None => data_dir()?.join("flappy-sim.log"),
    };
    init_logging(&log_path)?;

    let difficulty = Difficulty::from_tag(&args.difficulty);
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if let Some(ticks) = args.headless {
        return run_headless(difficulty, rng, ticks);
    }

    let score_path = match args.high_score_file {
        Some(path) => path,
        None => JsonFileStore::default_path().context("Failed to locate the high score file")?,
    };
    info!(path = %score_path.display(), %difficulty, "starting");
    let game = Game::new(difficulty, JsonFileStore::new(score_path), rng);
    run_terminal(game, args.fps)
}
