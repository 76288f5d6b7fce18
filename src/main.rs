//! Terminal Flip Tetris runner (default binary).
//!
//! Crossterm for input and a framebuffer-based renderer. The engine is
//! advanced on a fixed tick; snapshots are drawn every loop iteration.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event};

use flip_tetris::core::{EngineConfig, GameState};
use flip_tetris::input::{map_key, KeyCommand};
use flip_tetris::records::{HighScoreStore, JsonFileStore, MemoryStore};
use flip_tetris::term::{GameView, TerminalRenderer, Theme, ThemeKind, Viewport};
use flip_tetris::types::{Phase, TICK_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Levels speed the game up every 10 lines
    Classic,
    /// Constant speed; the board flips every 100 line-clear points
    Flip,
}

#[derive(Parser, Debug)]
#[command(name = "flip-tetris", version, about = "Terminal Tetris with a board flip")]
struct Args {
    /// Game variant (ignored when --config is given)
    #[arg(long, value_enum, default_value_t = Variant::Classic)]
    variant: Variant,

    /// RNG seed (defaults to the clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Engine config as JSON; missing fields use the classic preset
    #[arg(long)]
    config: Option<PathBuf>,

    /// High score file; without it the high score lasts one run
    #[arg(long)]
    records: Option<PathBuf>,

    /// Colour theme: light or dark (toggle in game with `t`)
    #[arg(long, default_value = "light")]
    theme: ThemeKind,

    /// Write logs here (RUST_LOG filters, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => match args.variant {
            Variant::Classic => EngineConfig::classic(),
            Variant::Flip => EngineConfig::flip(),
        },
    };

    let mut store: Box<dyn HighScoreStore> = match &args.records {
        Some(path) => Box::new(JsonFileStore::new(path)),
        None => Box::new(MemoryStore::default()),
    };
    let high_score = store.load().context("load high score")?;

    let seed = args.seed.unwrap_or_else(clock_seed);
    let game = GameState::with_config(config, seed)
        .context("invalid engine config")?
        .with_high_score(high_score);
    let view = GameView::new(Theme::of(args.theme));

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, game, view, args.theme, store.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    EngineConfig::from_json_str(&text).with_context(|| format!("load config {}", path.display()))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(
    term: &mut TerminalRenderer,
    mut game: GameState,
    mut view: GameView,
    mut theme: ThemeKind,
    store: &mut dyn HighScoreStore,
) -> Result<()> {
    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut snapshot = game.snapshot();
    let mut fb = view.render(&snapshot, Viewport::new(80, 24));
    let mut recorded = false;

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snapshot);
        view.render_into(&snapshot, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match map_key(key, game.gravity()) {
                    Some(KeyCommand::Quit) => return Ok(()),
                    Some(KeyCommand::Start) => {
                        game.start();
                    }
                    Some(KeyCommand::ToggleTheme) => {
                        theme = theme.toggled();
                        view.set_theme(Theme::of(theme));
                    }
                    Some(KeyCommand::Action(action)) => {
                        game.apply_action(action);
                    }
                    None => {}
                },
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            game.tick(elapsed.as_millis().min(u32::MAX as u128) as u32);
        }

        // Persist once per finished session.
        if game.phase() == Phase::GameOver {
            if !recorded && game.is_new_high_score() {
                if let Err(e) = store.submit(game.score()) {
                    log::warn!("could not save high score: {e}");
                }
            }
            recorded = true;
        } else {
            recorded = false;
        }
    }
}
