mod broadcaster;
mod runner;
mod script;

use clap::Parser;
use snake_common::config::ConfigManager;
use snake_common::engine::{DEFAULT_CONFIG_FILE, EngineSettings, SessionRng, SnakeGame};
use snake_common::high_score::{DEFAULT_HIGH_SCORE_FILE, HighScoreStore};
use snake_common::{log, logger};

use broadcaster::ConsoleBroadcaster;
use runner::{persist_high_score, run_game};

#[derive(Parser)]
#[command(name = "snake_headless_client")]
#[command(version, about = "Runs the snake engine from a scripted move list")]
struct Args {
    /// Engine settings (YAML); defaults are used when the file does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// Where the high score is kept between runs
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: String,

    /// One step per advance: U/L/D/R (or W/A/S/D), `.` for no input
    #[arg(long, default_value = "")]
    moves: String,

    /// Seed for snake and food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many advances
    #[arg(long, default_value_t = 200)]
    max_ticks: u64,

    /// Log every advance, not only the result
    #[arg(long)]
    verbose: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Headless".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let script = script::parse_moves(&args.moves)?;

    let config_manager: ConfigManager<_, EngineSettings> =
        ConfigManager::from_yaml_file(&args.config);
    let settings = config_manager.get_config()?;

    let mut high_score_store = HighScoreStore::from_yaml_file(&args.high_score_file);
    let high_score = high_score_store.load();

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let required_components = settings.required_component_ids();
    let mut game = SnakeGame::new(settings, high_score, rng)?;
    log!(
        "Board {}x{}, seed {}, high score {}",
        game.board().width,
        game.board().height,
        game.seed(),
        high_score
    );

    for id in required_components {
        game.init(id);
    }
    game.start()?;

    let broadcaster = ConsoleBroadcaster::new(args.verbose);
    let summary = run_game(
        &mut game,
        &script,
        args.max_ticks,
        &mut high_score_store,
        &broadcaster,
    )
    .await;

    log!(
        "Stopped after {} advances with status {:?}",
        summary.advances,
        summary.final_snapshot.status
    );
    println!("{}", serde_yaml_ng::to_string(&summary.final_snapshot)?);

    // An unfinished run still counts towards the high score.
    game.reset()?;
    persist_high_score(&mut high_score_store, game.high_score());

    Ok(())
}
