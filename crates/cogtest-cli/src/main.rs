mod config;
mod play;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use cogtest_core::history::{mean, stdev};
use cogtest_core::{
    recommended_config, BundledAssets, Catalog, CatalogItem, Category, Difficulty, ImageResolver,
    ImageSource, LoadState, NamingSession, ProgressTracker, ResolverSettings, ResultsHistory,
    SelectionPolicy, TestConfiguration, TestKind, TestMode, Tier,
};
use cogtest_http::UreqClient;
use cogtest_store::SqliteKvStore;

use crate::config::Config;

#[derive(Parser)]
#[command(
    name = "cogtest",
    version,
    about = "Animal naming self-test with adaptive difficulty"
)]
struct Cli {
    /// Path to the SQLite database
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog items
    Catalog {
        /// Only this difficulty tier
        #[arg(short, long)]
        tier: Option<CliTier>,

        /// Only this category (mammal, bird, reptile, ...)
        #[arg(short, long)]
        category: Option<Category>,

        /// Only one half of the catalog
        #[arg(short, long)]
        list: Option<CatalogList>,
    },

    /// Print the items a test would use
    Select {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Resolve the image for one item
    Resolve {
        /// Item id
        id: String,

        /// Skip the bundle and the cache and pick a new photo
        #[arg(long)]
        fresh: bool,

        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve images for several items concurrently, warming the cache
    Preload {
        /// Item ids (default: the whole catalog)
        ids: Vec<String>,
    },

    /// Take the naming test on this terminal
    Play {
        #[command(flatten)]
        session: SessionArgs,
    },

    /// Show progress statistics
    Stats,

    /// Show the test configuration suggested by current progress
    Recommend,

    /// Forget all progress
    Reset {
        /// Also clear the results history
        #[arg(long)]
        history: bool,
    },

    /// Remove every cached image URL
    ClearCache,

    /// Show past results
    History {
        /// Only this test (rt, nback, digit, stroop, animal)
        #[arg(short, long)]
        test: Option<TestKind>,

        /// Delete the shown results instead of printing them
        #[arg(long)]
        clear: bool,
    },

    /// Show the active configuration
    Config,
}

#[derive(clap::Args)]
struct SessionArgs {
    /// Selection strategy
    #[arg(short, long)]
    mode: Option<CliMode>,

    /// Number of items
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Difficulty tier, or mixed
    #[arg(short, long)]
    difficulty: Option<CliDifficulty>,

    /// Seed for a reproducible selection
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliMode {
    /// Lion, camel, rhinoceros
    Fixed,
    /// Core and extended lists
    Extended,
    /// Follows the skill estimate
    Adaptive,
    Random,
}

impl From<CliMode> for TestMode {
    fn from(val: CliMode) -> Self {
        match val {
            CliMode::Fixed => TestMode::Fixed,
            CliMode::Extended => TestMode::Extended,
            CliMode::Adaptive => TestMode::Adaptive,
            CliMode::Random => TestMode::Random,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliTier {
    Easy,
    Medium,
    Hard,
}

impl From<CliTier> for Tier {
    fn from(val: CliTier) -> Self {
        match val {
            CliTier::Easy => Tier::Easy,
            CliTier::Medium => Tier::Medium,
            CliTier::Hard => Tier::Hard,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CliDifficulty {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl From<CliDifficulty> for Difficulty {
    fn from(val: CliDifficulty) -> Self {
        match val {
            CliDifficulty::Easy => Tier::Easy.into(),
            CliDifficulty::Medium => Tier::Medium.into(),
            CliDifficulty::Hard => Tier::Hard.into(),
            CliDifficulty::Mixed => Difficulty::Mixed,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogList {
    Core,
    Extended,
}

fn default_db_path() -> PathBuf {
    directories::ProjectDirs::from("dev", "cogtest", "cogtest")
        .map(|dirs| dirs.data_dir().join("cogtest.db"))
        .unwrap_or_else(|| PathBuf::from("cogtest.db"))
}

/// Everything the stateful commands need, opened on demand.
struct Services {
    store: SqliteKvStore,
    http: UreqClient,
    settings: ResolverSettings,
}

impl Services {
    fn open(db: Option<PathBuf>, cfg: &Config) -> Result<Self> {
        let path = db
            .or_else(|| cfg.store.path.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_db_path);
        debug!("database: {}", path.display());
        let store = SqliteKvStore::new(&path).context("failed to open database")?;
        Ok(Self {
            store,
            http: UreqClient::new(cfg.images.timeout()),
            settings: cfg
                .images
                .resolver_settings(std::env::var("PEXELS_API_KEY").ok())?,
        })
    }

    fn resolver(&self) -> ImageResolver<'_> {
        ImageResolver::new(&self.store, &self.http, &BundledAssets, self.settings.clone())
    }

    fn progress(&self) -> ProgressTracker<'_> {
        ProgressTracker::new(&self.store)
    }

    fn history(&self) -> ResultsHistory<'_> {
        ResultsHistory::new(&self.store)
    }
}

fn new_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into()),
        )
        .init();

    let cli = Cli::parse();
    let cfg = config::load_config()?;
    let open = || Services::open(cli.db.clone(), &cfg);

    match cli.command {
        Commands::Catalog {
            tier,
            category,
            list,
        } => cmd_catalog(tier.map(Into::into), category, list),
        Commands::Select { session } => {
            let services = open()?;
            let progress = services.progress();
            cmd_select(&cfg, &progress, &session)
        }
        Commands::Resolve { id, fresh, json } => {
            let services = open()?;
            let resolver = services.resolver();
            cmd_resolve(&resolver, &id, fresh, json)
        }
        Commands::Preload { ids } => {
            let services = open()?;
            let resolver = services.resolver();
            cmd_preload(&resolver, &ids)
        }
        Commands::Play { session } => {
            let services = open()?;
            let resolver = match session.seed {
                Some(seed) => services.resolver().with_seed(seed),
                None => services.resolver(),
            };
            let progress = services.progress();
            let history = services.history();
            cmd_play(&cfg, &resolver, &progress, &history, &session)
        }
        Commands::Stats => {
            let services = open()?;
            let progress = services.progress();
            cmd_stats(&progress)
        }
        Commands::Recommend => {
            let services = open()?;
            let progress = services.progress();
            cmd_recommend(&progress)
        }
        Commands::Reset { history: also_history } => {
            let services = open()?;
            let progress = services.progress();
            let history = services.history();
            cmd_reset(&progress, &history, also_history)
        }
        Commands::ClearCache => {
            let services = open()?;
            let resolver = services.resolver();
            cmd_clear_cache(&resolver)
        }
        Commands::History { test, clear } => {
            let services = open()?;
            let history = services.history();
            cmd_history(&history, test, clear)
        }
        Commands::Config => cmd_config(&cfg),
    }
}

// ---------------------------------------------------------------------------
// Catalog and selection
// ---------------------------------------------------------------------------

fn cmd_catalog(tier: Option<Tier>, category: Option<Category>, list: Option<CatalogList>) -> Result<()> {
    let catalog = Catalog::builtin();
    let items: Vec<&CatalogItem> = match list {
        Some(CatalogList::Core) => catalog.core().iter().collect(),
        Some(CatalogList::Extended) => catalog.extended().iter().collect(),
        None => catalog.all(),
    };
    let items: Vec<&CatalogItem> = items
        .into_iter()
        .filter(|item| tier.map_or(true, |t| item.tier == t))
        .filter(|item| category.map_or(true, |c| item.category == c))
        .collect();

    if items.is_empty() {
        println!("No items match.");
        return Ok(());
    }

    println!("{:<18} {:<20} {:<7} {:<10} Asset", "Id", "Name", "Tier", "Category");
    println!("{}", "-".repeat(70));
    for item in &items {
        println!(
            "{:<18} {:<20} {:<7} {:<10} {}",
            item.id,
            item.name,
            item.tier,
            item.category,
            item.asset.unwrap_or("-")
        );
    }
    println!("\n{} items", items.len());
    Ok(())
}

fn session_config(
    cfg: &Config,
    progress: &ProgressTracker<'_>,
    args: &SessionArgs,
) -> Result<TestConfiguration> {
    play::build_config(
        &progress.snapshot(),
        &cfg.session,
        args.mode.map(Into::into),
        args.count,
        args.difficulty.map(Into::into),
    )
}

fn cmd_select(cfg: &Config, progress: &ProgressTracker<'_>, args: &SessionArgs) -> Result<()> {
    let config = session_config(cfg, progress, args)?;
    let items = SelectionPolicy::new(Catalog::builtin()).select_items(
        &config,
        &progress.snapshot(),
        &mut new_rng(args.seed),
    );
    println!(
        "{} mode, {} items, difficulty {}",
        config.mode, config.count, config.difficulty
    );
    for (i, item) in items.iter().enumerate() {
        println!("  {:>2}. {:<20} {}", i + 1, item.name, item.tier);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Images
// ---------------------------------------------------------------------------

fn find_item(id: &str) -> Result<&'static CatalogItem> {
    Catalog::builtin()
        .get(id)
        .context("see `cogtest catalog` for valid ids")
}

fn cmd_resolve(resolver: &ImageResolver<'_>, id: &str, fresh: bool, json: bool) -> Result<()> {
    let item = find_item(id)?;
    let resolution = resolver.resolve_traced(item, fresh);
    if json {
        println!("{}", serde_json::to_string_pretty(&resolution)?);
    } else {
        println!("{}", resolution.reference);
        println!("  source: {}", resolution.source);
    }
    Ok(())
}

fn cmd_preload(resolver: &ImageResolver<'_>, ids: &[String]) -> Result<()> {
    let items: Vec<&CatalogItem> = if ids.is_empty() {
        Catalog::builtin().all()
    } else {
        ids.iter().map(|id| find_item(id)).collect::<Result<_>>()?
    };

    let results = resolver.preload(&items);
    let mut placeholders = 0;
    for (item, resolution) in items.iter().zip(&results) {
        if resolution.source == ImageSource::Placeholder {
            placeholders += 1;
        }
        println!("{:<18} {:<14} {}", item.id, resolution.source, resolution.reference);
    }
    println!("\nResolved {} items ({placeholders} placeholders).", results.len());
    Ok(())
}

fn cmd_clear_cache(resolver: &ImageResolver<'_>) -> Result<()> {
    let removed = resolver.clear_cache()?;
    println!("Removed {removed} cached images.");
    Ok(())
}

// ---------------------------------------------------------------------------
// Test session
// ---------------------------------------------------------------------------

fn cmd_play(
    cfg: &Config,
    resolver: &ImageResolver<'_>,
    progress: &ProgressTracker<'_>,
    history: &ResultsHistory<'_>,
    args: &SessionArgs,
) -> Result<()> {
    let config = session_config(cfg, progress, args)?;
    let items = SelectionPolicy::new(Catalog::builtin()).select_items(
        &config,
        &progress.snapshot(),
        &mut new_rng(args.seed),
    );
    if items.is_empty() {
        bail!("no items match {} / {}", config.mode, config.difficulty);
    }

    println!("Loading {} images...", items.len());
    let mut session = NamingSession::prepare(config, &items, resolver, |event| {
        if let LoadState::Error = event.state {
            eprintln!("  no image found for {}, using a placeholder", event.item_id);
        }
    });
    println!("Type the animal's name. Enter {} for a different image.\n", play::RELOAD_COMMAND);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let completed = play::run_session(
        &mut session,
        |s| s.reload_current_image(resolver).map(|r| r.to_string()),
        &mut stdin.lock(),
        &mut stdout,
    )?;
    if !completed {
        println!("Session ended early; nothing recorded.");
        return Ok(());
    }

    let result = session.finish();
    play::print_result(&result, &mut stdout)?;
    result.record_into(progress);
    history
        .add(TestKind::AnimalNaming, result.history_fields(), Utc::now())
        .context("saving result")?;
    stdout.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Progress and history
// ---------------------------------------------------------------------------

fn cmd_stats(progress: &ProgressTracker<'_>) -> Result<()> {
    let stats = progress.stats();
    println!("Tests completed: {}", stats.tests_completed);
    println!("Animals seen:    {}", stats.seen_count);
    println!("Named correctly: {}", stats.correct_count);
    println!("Accuracy:        {:.1}%", stats.accuracy * 100.0);
    println!(
        "Skill estimate:  {:.1} ({})",
        stats.skill_estimate,
        Tier::from_skill(stats.skill_estimate)
    );
    Ok(())
}

fn cmd_recommend(progress: &ProgressTracker<'_>) -> Result<()> {
    let config = recommended_config(&progress.snapshot());
    println!("mode       = {}", config.mode);
    println!("count      = {}", config.count);
    println!("difficulty = {}", config.difficulty);
    Ok(())
}

fn cmd_reset(progress: &ProgressTracker<'_>, history: &ResultsHistory<'_>, also_history: bool) -> Result<()> {
    progress.reset();
    println!("Progress reset.");
    if also_history {
        history.clear_all()?;
        println!("Results history cleared.");
    }
    Ok(())
}

fn cmd_history(history: &ResultsHistory<'_>, test: Option<TestKind>, clear: bool) -> Result<()> {
    if clear {
        match test {
            Some(kind) => {
                let removed = history.clear_test(kind)?;
                println!("Removed {removed} {} results.", kind.title());
            }
            None => {
                history.clear_all()?;
                println!("All results removed.");
            }
        }
        return Ok(());
    }

    let kinds: Vec<TestKind> = match test {
        Some(kind) => vec![kind],
        None => TestKind::ALL.to_vec(),
    };
    let log = history.load();
    let mut shown = 0;
    for kind in kinds {
        let Some(runs) = log.get(kind.id()).filter(|runs| !runs.is_empty()) else {
            continue;
        };
        shown += runs.len();
        let scores: Vec<f64> = runs.iter().map(|r| r.summary_score(kind)).collect();
        println!(
            "{} ({} runs, mean {:.1}, sd {:.1})",
            kind.title(),
            runs.len(),
            mean(&scores),
            stdev(&scores)
        );
        for (run, score) in runs.iter().zip(&scores) {
            println!("  {}  {score:>6.1}", run.when.format("%Y-%m-%d %H:%M"));
        }
    }
    if shown == 0 {
        println!("No results yet.");
    }
    Ok(())
}

fn cmd_config(cfg: &Config) -> Result<()> {
    println!("Config: {}", config::show_config_path());
    println!();
    println!("[store]");
    println!(
        "  path = {}",
        cfg.store
            .path
            .as_deref()
            .unwrap_or("(default platform path)")
    );
    println!();
    println!("[images]");
    println!(
        "  pexels_api_key = {}",
        if cfg.images.pexels_api_key.is_some() {
            "(set)"
        } else if std::env::var("PEXELS_API_KEY").is_ok() {
            "(from $PEXELS_API_KEY)"
        } else {
            "(none, stock photos disabled)"
        }
    );
    println!("  timeout_secs = {}", cfg.images.timeout_secs);
    println!("  stock_ttl_hours = {}", cfg.images.stock_ttl_hours);
    println!("  encyclopedia_ttl_hours = {}", cfg.images.encyclopedia_ttl_hours);
    println!("  encyclopedia_endpoint = {}", cfg.images.encyclopedia_endpoint);
    println!("  stock_endpoint = {}", cfg.images.stock_endpoint);
    println!("  placeholder_endpoint = {}", cfg.images.placeholder_endpoint);
    println!("  reload_batch = {}", cfg.images.reload_batch);
    println!();
    println!("[session]");
    println!(
        "  mode = {}",
        cfg.session.mode.as_deref().unwrap_or("(recommended)")
    );
    match cfg.session.count {
        Some(count) => println!("  count = {count}"),
        None => println!("  count = (recommended)"),
    }
    println!(
        "  difficulty = {}",
        cfg.session.difficulty.as_deref().unwrap_or("(recommended)")
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::StoreConfig;

    #[test]
    fn test_services_persist_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nested").join("cogtest.db");
        {
            let services = Services::open(Some(db.clone()), &Config::default()).unwrap();
            services
                .progress()
                .record_session(["lion", "camel"], ["lion"]);
            services
                .history()
                .add(TestKind::AnimalNaming, json!({"score": 50}), Utc::now())
                .unwrap();
        }
        assert!(db.exists());

        let services = Services::open(Some(db), &Config::default()).unwrap();
        let stats = services.progress().stats();
        assert_eq!(stats.seen_count, 2);
        assert_eq!(stats.correct_count, 1);
        assert_eq!(services.history().for_test(TestKind::AnimalNaming).len(), 1);

        cmd_reset(&services.progress(), &services.history(), true).unwrap();
        assert_eq!(services.progress().stats().tests_completed, 0);
        assert!(services.history().load().is_empty());
    }

    #[test]
    fn test_services_fall_back_to_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("from-config.db");
        let cfg = Config {
            store: StoreConfig {
                path: Some(path.to_string_lossy().into_owned()),
            },
            ..Config::default()
        };
        Services::open(None, &cfg).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_services_reject_negative_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.images.stock_ttl_hours = -5;
        assert!(Services::open(Some(dir.path().join("cogtest.db")), &cfg).is_err());
    }
}
