mod config;
mod render;
mod terminal_game;

use std::io;
use std::path::PathBuf;

use clap::Parser;
use common::config::Validate;
use common::games::SessionRng;
use common::games::tictactoe::Difficulty;
use common::log;
use common::logger::{self, LogLevel};

use config::{GameMode, get_config_manager};
use terminal_game::{GameSettings, TerminalGame};

#[derive(Parser)]
#[command(name = "tictactoe_client", version, about = "Tic-Tac-Toe against a minimax bot or a friend")]
struct Args {
    /// Path to the YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum)]
    mode: Option<GameMode>,

    /// easy, medium or hard
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Seed for the bot's random choices
    #[arg(long)]
    seed: Option<u64>,

    /// Write the default config file if none exists
    #[arg(long)]
    init_config: bool,

    #[arg(long)]
    use_log_prefix: bool,

    #[arg(long)]
    debug: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    let level = if args.debug { LogLevel::Debug } else { LogLevel::Info };
    logger::init_logger(prefix, level);

    let config_manager = get_config_manager(args.config);
    if args.init_config && config_manager.ensure_stored()? {
        log!("Wrote default config");
    }

    let mut config = config_manager.get_config()?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Starting {:?} game, difficulty {}, search depth {:?}, seed {}",
        config.mode,
        config.difficulty,
        config.search.max_depth,
        rng.seed()
    );

    let stdin = io::stdin();
    let mut game = TerminalGame::new(stdin.lock(), io::stdout(), GameSettings::from(&config), rng);
    game.run()?;

    let scores = game.scoreboard().scores();
    log!(
        "Session over: {} rounds, {}-{} with {} draws",
        game.scoreboard().history().len(),
        scores.player1,
        scores.player2,
        scores.draws
    );

    Ok(())
}
