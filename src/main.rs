mod api;
mod server;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use trending_rank::synthetic::generate_synthetic_candidates;
use trending_rank::{
    content_label, format_age, format_score, CandidateStore, Clock, FixedClock, SystemClock,
    TrendingConfig, TrendingService, EMPTY_STATE_MESSAGE,
};

#[derive(Parser)]
#[command(name = "trending-rank", about = "Trending answered-question ranker")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print one page of trending questions
    Rank(RankArgs),
    /// Serve the trending api over http
    Serve(ServeArgs),
    /// Merge a JSON array of items into the candidate file
    Import(ImportArgs),
}

#[derive(Args, Debug, Clone)]
struct SourceArgs {
    /// TOML file with a [trending] table
    #[arg(long)]
    config: Option<PathBuf>,
    /// JSON array of candidate items
    #[arg(long, default_value = "data/items.json")]
    items: PathBuf,
    /// Rank a seeded synthetic batch of this many questions instead of --items
    #[arg(long)]
    synthetic: Option<usize>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Freeze the clock at this RFC 3339 instant
    #[arg(long)]
    now: Option<String>,
}

#[derive(Args, Debug, Clone)]
struct RankArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    page: i64,
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    per_page: i64,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct ServeArgs {
    #[command(flatten)]
    source: SourceArgs,
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
    #[arg(long, default_value_t = 8787)]
    port: u16,
    #[arg(long, default_value_t = 10)]
    default_per_page: i64,
}

#[derive(Args, Debug, Clone)]
struct ImportArgs {
    /// JSON array of items to add or replace by id
    file: PathBuf,
    #[arg(long, default_value = "data/items.json")]
    items: PathBuf,
}

#[tokio::main]
async fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let cli = Cli::parse();

    match cli.command {
        Command::Rank(args) => run_rank(args).await,
        Command::Serve(args) => {
            let service = build_service(&args.source).await?;
            server::serve(&args.host, args.port, args.default_per_page, service).await
        }
        Command::Import(args) => run_import(args).await,
    }
}

async fn run_import(args: ImportArgs) -> Result<(), String> {
    let store = CandidateStore::load(args.items.clone())
        .await
        .map_err(|err| err.to_string())?;
    let imported = store
        .import_file(&args.file)
        .await
        .map_err(|err| err.to_string())?;
    let total = store.len().await;
    info!(imported, total, "candidates imported");
    println!("Imported {} items into {}", imported, args.items.display());
    Ok(())
}

async fn run_rank(args: RankArgs) -> Result<(), String> {
    let service = build_service(&args.source).await?;
    let page = service
        .trending(args.page, args.per_page)
        .await
        .map_err(|err| err.to_string())?;

    if args.json {
        let response = api::ApiTrendingResponse::from_page(page);
        let payload = serde_json::to_string_pretty(&response)
            .map_err(|err| format!("failed to serialize page: {}", err))?;
        println!("{}", payload);
        return Ok(());
    }

    if page.is_empty() {
        println!("{}", EMPTY_STATE_MESSAGE);
        return Ok(());
    }

    let offset = page.page.saturating_mul(page.per_page);
    for (idx, scored) in page.items.iter().enumerate() {
        println!(
            "{:>3}. {}  score {} | likes {} | comments {} | answered {} ago",
            offset + idx + 1,
            content_label(&scored.item.content),
            format_score(scored.score),
            scored.item.likes_count,
            scored.comments_count,
            format_age(scored.seconds_since_answered)
        );
    }
    if page.has_more {
        println!("\n{} of {} trending, more on page {}", page.items.len(), page.total, page.page + 1);
    }

    Ok(())
}

async fn build_service(args: &SourceArgs) -> Result<TrendingService, String> {
    let (config, config_path) =
        TrendingConfig::load(args.config.clone()).map_err(|err| err.to_string())?;
    if let Some(path) = config_path.as_ref() {
        info!(path = %path.display(), "trending config resolved");
    }

    let clock: Arc<dyn Clock> = match args.now.as_deref() {
        Some(value) => Arc::new(FixedClock::new(parse_instant(value)?)),
        None => Arc::new(SystemClock),
    };

    let store = match args.synthetic {
        Some(count) => {
            CandidateStore::in_memory(generate_synthetic_candidates(count, clock.now(), args.seed))
        }
        None => CandidateStore::load(args.items.clone())
            .await
            .map_err(|err| err.to_string())?,
    };
    let candidates = store.len().await;
    info!(candidates, "candidate store ready");

    Ok(TrendingService::new(config, clock, Arc::new(store)))
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("invalid --now (expected RFC 3339): {}", err))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    let manifest_path = Path::new(manifest_dir).join(".env");
    let _ = dotenvy::from_path(manifest_path);
}
