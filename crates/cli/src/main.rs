//! Shadow Ranch CLI - drive learning track progress from a terminal.

use std::path::PathBuf;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use shadow_ranch_core::{BadgeId, ModuleId, Track, TrackConfig, WalletSession};
use shadow_ranch_progress::{BadgeAwarder, Completion, ProfileService, ProgressStore};
use shadow_ranch_storage::{JsonProfileStorage, JsonSnapshotStore};

#[derive(Parser)]
#[command(name = "shadow-ranch")]
#[command(about = "Track progress through the Shadow Ranch learning modules", long_about = None)]
struct Cli {
    /// Directory holding progress snapshots and profiles
    #[arg(long, global = true, default_value = ".shadow-ranch")]
    data_dir: PathBuf,

    /// Learning track
    #[arg(long, global = true, value_enum, default_value_t = TrackArg::Cypherpunk)]
    track: TrackArg,

    /// Storage key override (defaults to the track's key)
    #[arg(long, global = true)]
    key: Option<String>,

    /// Completed modules needed to reach the cap
    #[arg(long, global = true)]
    denominator: Option<u32>,

    /// Share of overall progress this track contributes
    #[arg(long, global = true)]
    cap: Option<u8>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum TrackArg {
    /// Cypherpunk legacy history track
    Cypherpunk,
    /// Solana coding challenges
    Solana,
}

impl From<TrackArg> for Track {
    fn from(arg: TrackArg) -> Self {
        match arg {
            TrackArg::Cypherpunk => Track::CypherpunkLegacy,
            TrackArg::Solana => Track::SolanaChallenges,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Show current module and track progress
    Status,
    /// List the modules of the track
    Modules,
    /// Complete a module
    Complete {
        /// Module ID
        id: ModuleId,
        /// Connected wallet address; awards earned badges to its profile
        #[arg(long)]
        wallet: Option<String>,
    },
    /// Reset the track to its initial state
    Reset,
    /// Learner profile commands
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show a profile, creating it on first use
    Show {
        /// Wallet address
        address: String,
    },
    /// Unlock a badge on a profile
    Badge {
        /// Wallet address
        address: String,
        /// Badge ID (e.g. first-lesson)
        badge: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let track = Track::from(cli.track);
    let defaults = track.default_config();
    let config = TrackConfig::new(
        cli.denominator.unwrap_or(defaults.denominator()),
        cli.cap.unwrap_or(defaults.cap_percentage()),
    )?;
    let key = cli.key.clone().unwrap_or_else(|| track.storage_key().to_string());
    let snapshots = JsonSnapshotStore::new(&cli.data_dir)
        .with_context(|| format!("opening {}", cli.data_dir.display()))?;
    let mut store = ProgressStore::open(track.catalog(), config, snapshots, key);
    debug!(origin = ?store.origin(), key = %store.storage_key(), "progress store opened");

    match cli.command {
        Commands::Status => {
            println!("Track: {} ({})", track.as_str(), store.storage_key());
            println!("  Current module: {}", store.current_module());
            println!("  Progress: {}%", store.track_progress());
            println!("  Completed: {}/{}", store.completed_count(), store.modules().len());
        }
        Commands::Modules => {
            for module in store.modules() {
                println!("  {} | {:<9} | {}", module.id, module.status().as_str(), module.title);
            }
        }
        Commands::Complete { id, wallet } => {
            match store.complete_module(id)? {
                Completion::Completed { unlocked } => {
                    println!("Completed module {}", id);
                    if let Some(next) = unlocked {
                        println!("Unlocked module {}", next);
                    }
                }
                Completion::AlreadyCompleted => println!("Module {} was already completed", id),
            }
            println!("Progress: {}%", store.track_progress());
            if !store.is_persistent() {
                println!("Warning: progress could not be saved");
            }

            if let Some(address) = wallet {
                let session = WalletSession::connected(address);
                let earned = BadgeAwarder::new(track, *store.config()).earned(&store.snapshot(), &session);
                let mut profiles = ProfileService::new(JsonProfileStorage::new(&cli.data_dir).await?);
                if let Some(key) = session.profile_key() {
                    profiles.get_or_create(key).await?;
                    for badge in profiles.award(key, &earned).await? {
                        println!("Badge unlocked: {}", badge);
                    }
                }
            }
        }
        Commands::Reset => {
            store.reset_progress();
            info!("track reset");
            println!("Progress reset");
        }
        Commands::Profile { command } => {
            let mut profiles = ProfileService::new(JsonProfileStorage::new(&cli.data_dir).await?);
            match command {
                ProfileCommands::Show { address } => {
                    let profile = profiles.get_or_create(&address).await?;
                    println!("Profile: {}", profile.public_key);
                    println!("  Username: {}", profile.username);
                    if !profile.bio.is_empty() {
                        println!("  Bio: {}", profile.bio);
                    }
                    println!("  Created: {}", profile.created_at);
                    println!("  Badges:");
                    for badge in &profile.nft_badges {
                        let mark = if badge.unlocked { "x" } else { " " };
                        println!("    [{}] {} ({:?}) - {}", mark, badge.name, badge.rarity, badge.description);
                    }
                }
                ProfileCommands::Badge { address, badge } => {
                    let badge = BadgeId::new(badge);
                    if profiles.unlock_badge(&address, &badge).await? {
                        println!("Badge unlocked: {}", badge);
                    } else if profiles.has_profile(&address).await? {
                        println!("Badge {} already unlocked or unknown", badge);
                    } else {
                        println!("Profile not found");
                    }
                }
            }
        }
    }

    Ok(())
}
