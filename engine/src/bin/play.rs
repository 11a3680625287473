use std::{error::Error, path::PathBuf};

use clap::{Parser, ValueEnum};
use database::{DatabaseConfig, GameStore, SqliteStore};
use engine::{run_game, sample_events, ConfigOverrides, GameConfig, GameState, RoundQuery};
use guessers::{InputGuesser, OracleGuesser, RandomGuesser};
use rand::seq::SliceRandom;
use types::{DistanceUnit, Guesser, HistoricalEvent};
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum GuesserKind {
    Input,
    Random,
    Oracle,
}

#[derive(Parser, Debug)]
struct Params {
    #[arg(short, long)]
    rounds: Option<u32>,
    /// Enables the round timer with this many minutes per round
    #[arg(short, long)]
    timer_minutes: Option<u32>,
    #[arg(long)]
    no_hints: bool,
    #[arg(long)]
    miles: bool,
    /// SQLite database to draw events from (falls back to DATABASE_URL)
    #[arg(long)]
    database: Option<String>,
    #[arg(long)]
    events_yaml: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = GuesserKind::Input)]
    guesser: GuesserKind,
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Profile whose preferred distance unit to use
    #[arg(long)]
    profile: Option<Uuid>,
    /// Saved page query, e.g. "?round=3", to pick a game back up
    #[arg(long)]
    resume: Option<String>,
    /// Pause before every move, handy for watching bot games
    #[arg(long)]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Params::parse();
    log::info!("args: {args:?}");

    let store = open_store(&args).await?;
    let profile_unit = match (&store, args.profile) {
        (Some(store), Some(id)) => store.get_profile(id).await?.map(|p| p.distance_unit),
        _ => None,
    };

    let overrides = ConfigOverrides {
        total_rounds: args.rounds,
        timer_minutes: args.timer_minutes,
        hints_enabled: args.no_hints.then_some(false),
        distance_unit: if args.miles {
            Some(DistanceUnit::Miles)
        } else {
            profile_unit
        },
    };
    let config = GameConfig::from_cli_or_yaml(&overrides, args.config.as_deref())?;
    log::info!("config: {config:?}");

    let events = load_events(&args, store.as_ref(), config.total_rounds).await?;
    let guesser: Box<dyn Guesser> = match args.guesser {
        GuesserKind::Input => Box::new(InputGuesser::default()),
        GuesserKind::Random => Box::new(RandomGuesser::default()),
        GuesserKind::Oracle => Box::new(OracleGuesser::new(&events)),
    };

    let mut game_state = GameState::new(&config, events)?;
    if let Some(round) = args.resume.as_deref().and_then(RoundQuery::parse) {
        let round = game_state.resume_at(round)?;
        println!("Resuming at round {round} ({})", RoundQuery::to_query(round));
    }

    run_game(&mut game_state, guesser, args.delay_ms).await?;
    Ok(())
}

async fn open_store(args: &Params) -> Result<Option<SqliteStore>, Box<dyn Error>> {
    if args.database.is_none() && std::env::var("DATABASE_URL").is_err() {
        return Ok(None);
    }
    let db_config = DatabaseConfig::from_cli_or_env_or_yaml(args.database.clone(), None);
    log::info!("Using database at {}", db_config.url);
    let pool = db_config.create_pool().await?;
    Ok(Some(SqliteStore::connect(pool).await?))
}

async fn load_events(
    args: &Params,
    store: Option<&SqliteStore>,
    rounds: u32,
) -> Result<Vec<HistoricalEvent>, Box<dyn Error>> {
    if let Some(path) = &args.events_yaml {
        log::info!("Loading events from {}", path.display());
        let mut events: Vec<HistoricalEvent> =
            serde_yaml::from_str(&std::fs::read_to_string(path)?)?;
        events.shuffle(&mut rand::thread_rng());
        return Ok(events);
    }

    let mut samples = sample_events()?;
    let Some(store) = store else {
        samples.shuffle(&mut rand::thread_rng());
        return Ok(samples);
    };

    let events = store.random_events(rounds).await?;
    if !events.is_empty() {
        return Ok(events);
    }
    log::warn!("No events in the database yet, seeding it with the sample set");
    for event in &samples {
        store.insert_event(event).await?;
    }
    Ok(store.random_events(rounds).await?)
}
