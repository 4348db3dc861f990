use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tierlist::api::state::AppState;
use tierlist::api::{build_router, cors_layer};
use tierlist::config::AppConfig;
use tierlist::models::{mock_players, ModeFilter, Player, TierCode, GAMEMODES};
use tierlist::ranking::{
    best_assignment_for, rank_overall, BucketOrder, LeaderboardQuery, LeaderboardView,
};
use tierlist::source::{select_source, sync_players, RemoteSource, RemoteSourceConfig};
use tierlist::storage::{write_players, StorageConfig};

#[derive(Parser)]
#[command(name = "tierlist")]
#[command(about = "Minecraft PvP tier list leaderboard")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides the config file)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the leaderboard
    Rank {
        /// "overall" or a gamemode code
        #[arg(long, default_value = "overall")]
        mode: String,

        /// Only players whose name contains this
        #[arg(long)]
        search: Option<String>,

        /// Only players from this region
        #[arg(long)]
        region: Option<String>,

        /// Order inside tier buckets: "input" or "points"
        #[arg(long, default_value = "input")]
        sort: String,

        /// Max rows for the overall table
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Print one player's profile
    Profile {
        /// Minecraft username
        username: String,
    },

    /// Pull players from the data API into the local snapshot
    Sync,

    /// Write the demo roster to the local snapshot
    Seed {
        /// Overwrite an existing snapshot
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting tierlist v{}", env!("CARGO_PKG_VERSION"));

    let storage = StorageConfig::new(config.data_dir.clone());

    match cli.command {
        Commands::Serve { host, port } => {
            let source = select_source(&config, &storage)?;
            let state = AppState {
                storage: Arc::new(storage),
                source,
            };
            let app = build_router(state).layer(cors_layer(&config.server.cors_origin));

            let addr = format!(
                "{}:{}",
                host.unwrap_or(config.server.host),
                port.unwrap_or(config.server.port)
            );
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Rank {
            mode,
            search,
            region,
            sort,
            limit,
        } => {
            let bucket_order: BucketOrder = sort.parse().map_err(anyhow::Error::msg)?;
            let query = LeaderboardQuery {
                mode: ModeFilter::parse(&mode),
                search,
                region,
                bucket_order,
            };

            let source = select_source(&config, &storage)?;
            let players = source.fetch_players().await?;
            print_leaderboard(&query, &players, limit);
        }
        Commands::Profile { username } => {
            let source = select_source(&config, &storage)?;
            let players = source.fetch_players().await?;
            print_profile(&players, &username)?;
        }
        Commands::Sync => {
            let Some(base_url) = config.data_api.base_url() else {
                bail!("Sync needs data_api.base_url in the config file");
            };
            tracing::info!("Syncing from {}", base_url);
            let remote = RemoteSource::new(RemoteSourceConfig::from_app_config(&config)?)?;
            match sync_players(&remote, &storage).await {
                Ok(count) => println!("Synced {} players to {:?}", count, storage.players_path()),
                Err(e) => {
                    tracing::error!("Sync failed: {}", e);
                    return Err(e.into());
                }
            }
        }
        Commands::Seed { force } => {
            if storage.players_path().exists() && !force {
                bail!(
                    "{:?} already exists, pass --force to overwrite",
                    storage.players_path()
                );
            }
            let count = write_players(&storage, &mock_players())?;
            println!("Seeded {} players to {:?}", count, storage.players_path());
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn tier_summary(player: &Player) -> String {
    GAMEMODES
        .iter()
        .filter_map(|g| best_assignment_for(player, g.code).map(|a| format!("{}:{}", g.code, a.tier)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn print_leaderboard(query: &LeaderboardQuery, players: &[Player], limit: usize) {
    match query.apply(players) {
        LeaderboardView::Overall(ranked) => {
            println!("\n=== Overall ===");
            println!("{:>4}  {:<16} {:>6}  {:<4} Tiers", "#", "Player", "Points", "Reg");
            for row in ranked.iter().take(limit) {
                println!(
                    "{:>4}  {:<16} {:>6}  {:<4} {}",
                    row.rank,
                    row.player.username,
                    row.player.points,
                    row.player.region,
                    tier_summary(row.player)
                );
            }
            if ranked.len() > limit {
                println!("... {} more", ranked.len() - limit);
            }
        }
        LeaderboardView::Tiers { gamemode, buckets } => {
            let title = GAMEMODES
                .iter()
                .find(|g| g.code == gamemode)
                .map(|g| g.name)
                .unwrap_or(gamemode.as_str());
            println!("\n=== {} ===", title);
            for (level, bucket) in buckets.iter() {
                let label = TierCode::from_ordinal(level)
                    .map(|t| t.to_string())
                    .unwrap_or_default();
                let names: Vec<&str> = bucket.iter().map(|p| p.username.as_str()).collect();
                println!("{:<4} {}", label, names.join(", "));
            }
            if buckets.is_empty() {
                println!("\n(no ranked players)");
            }
        }
    }
}

fn print_profile(players: &[Player], username: &str) -> Result<()> {
    let ranked = rank_overall(players);
    let Some(entry) = ranked
        .iter()
        .find(|r| r.player.username.eq_ignore_ascii_case(username.trim()))
    else {
        bail!("No player named {}", username);
    };

    let player = entry.player;
    println!("\n=== {} ===", player.username);
    println!("Rank:    #{} of {}", entry.rank, ranked.len());
    println!("Points:  {}", player.points);
    println!("Region:  {}", player.region);
    println!("ID:      {}", player.player_id());

    for g in GAMEMODES {
        if let Some(a) = best_assignment_for(player, g.code) {
            let achieved = a
                .achieved_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            println!("  {:<8} {:<4} {}", g.name, a.tier, achieved);
        }
    }

    Ok(())
}
