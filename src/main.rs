use coffee_roulette::config::Settings;
use coffee_roulette::core::Pairer;
use coffee_roulette::runner::RoundRunner;
use coffee_roulette::services::{ConsoleAnnouncer, FileRoster, JsonHistoryStore};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    // Load .env file if present
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    // Initialize logging (LOG_LEVEL / LOG_FORMAT override the config file)
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| settings.logging.level.clone());
    let log_format =
        std::env::var("LOG_FORMAT").unwrap_or_else(|_| settings.logging.format.clone());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_level(true);

    if log_format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.init();
    }

    info!("Starting coffee roulette round...");
    info!(
        "Configuration loaded (roster: {}, history: {}, lookback: {} days)",
        settings.roster.path, settings.history.path, settings.history.lookback_days
    );

    let roster = FileRoster::new(&settings.roster.path);
    let store = JsonHistoryStore::new(&settings.history.path, settings.history.lookback_days);
    let announcer = ConsoleAnnouncer::new(settings.history.lookback_days);
    let pairer = Pairer::new(settings.pairing.singleton_policy);

    let mut runner = RoundRunner::new(roster, store, announcer, pairer);

    match runner.run_round(&mut rand::thread_rng()) {
        Ok(round) => {
            info!("Round complete with {} pairs", round.len());
        }
        Err(e) => {
            error!("Round failed: {}", e);
            std::process::exit(1);
        }
    }
}
