use std::time::Instant;

use clap::Parser;
use snake_pro::config::{ConfigManager, DEFAULT_CONFIG_FILE};
use snake_pro::food::FoodSpawner;
use snake_pro::persistence::FileHighScoreStore;
use snake_pro::render::{render_frame, RenderOptions};
use snake_pro::terminal::{self, RawModeGuard};
use snake_pro::{log, logger, GameSession};

#[derive(Parser)]
#[command(name = "snake_pro", about = "Grid snake in the terminal")]
struct Args {
    /// YAML config file, defaults are used when it does not exist
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,

    /// File holding the high score, overrides the config
    #[arg(long)]
    data: Option<String>,

    /// Log file, overrides the config
    #[arg(long)]
    log_file: Option<String>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write the effective config to the config file and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config_manager = ConfigManager::from_yaml_file(&args.config);
    let config = config_manager.get_config()?;

    if args.init_config {
        config_manager.set_config(&config)?;
        println!("Config written to {}", args.config);
        return Ok(());
    }

    let log_file = args.log_file.or_else(|| config.log_file.clone());
    if let Err(e) = logger::init_logger(Some("Snake".to_string()), log_file.as_deref()) {
        eprintln!("{}, logging disabled", e);
    }
    log!("Starting with config {}", args.config);

    let data_file = args.data.unwrap_or_else(|| config.data_file.clone());
    let store = FileHighScoreStore::new(&data_file);
    let spawner = match args.seed {
        Some(seed) => FoodSpawner::new(seed),
        None => FoodSpawner::from_random(),
    };
    let mut session = GameSession::new(store, spawner, config.speed_policy(), Instant::now());

    let options = RenderOptions {
        show_legend: config.show_legend,
    };
    let keys = terminal::spawn_stdin_channel();
    let guard = RawModeGuard::enable()?;
    let result = session.run(&keys, |state| {
        terminal::draw(&render_frame(state, &options))
            .map_err(|e| format!("Failed to draw frame: {}", e))
    });
    drop(guard);

    let state = session.state();
    println!("Final Score: {}", state.score);
    println!("Best: {}", state.high_score);

    result?;
    Ok(())
}
