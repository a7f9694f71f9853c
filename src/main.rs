//! Command line front end for the engine
//!
//! Reads settings from the environment (and `.env`), runs one operation and
//! prints the result as JSON.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use fable_lib::modules::catalog::domain::value_objects::MediaType;
use fable_lib::modules::gacha::PullRequest;
use fable_lib::shared::utils::init_logger;
use fable_lib::shared::EngineConfig;
use fable_lib::Engine;

#[derive(Parser, Debug)]
#[command(name = "fable-gacha")]
#[command(about = "Search the catalog and pull characters")]
#[command(version)]
struct Cli {
    /// Guild whose packs are visible
    #[arg(short, long, global = true)]
    guild: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fuzzy search over media or characters
    Search {
        text: String,
        #[arg(short, long, value_enum, default_value_t = SearchKind::Media)]
        kind: SearchKind,
    },
    /// Look up records by composite id (`source:id`)
    Get {
        #[arg(required = true)]
        ids: Vec<String>,
        #[arg(short, long, value_enum, default_value_t = SearchKind::Media)]
        kind: SearchKind,
    },
    /// List the registered packs
    Packs,
    /// Draw one character
    Pull {
        /// Commit the pull to this user's inventory
        #[arg(short, long)]
        user: Option<String>,
        /// Spend a guarantee of this many stars
        #[arg(long)]
        guarantee: Option<u8>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SearchKind {
    Media,
    Anime,
    Manga,
    Characters,
}

impl SearchKind {
    fn media_type(self) -> Option<MediaType> {
        match self {
            SearchKind::Anime => Some(MediaType::Anime),
            SearchKind::Manga => Some(MediaType::Manga),
            SearchKind::Media | SearchKind::Characters => None,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logger();

    let config = EngineConfig::from_env().context("Failed to read configuration")?;
    let engine = Engine::from_config(&config).context("Failed to start engine")?;
    let guild = cli.guild.as_deref();

    let output = match cli.command {
        Command::Search { text, kind } => match kind {
            SearchKind::Characters => {
                serde_json::to_value(engine.search().search_characters(&text, guild).await?)?
            }
            _ => serde_json::to_value(
                engine
                    .search()
                    .search_media(&text, kind.media_type(), guild)
                    .await?,
            )?,
        },
        Command::Get { ids, kind } => match kind {
            SearchKind::Characters => {
                serde_json::to_value(engine.search().characters_by_ids(&ids, guild).await?)?
            }
            _ => serde_json::to_value(engine.search().media_by_ids(&ids, guild).await?)?,
        },
        Command::Packs => {
            let manifests = engine.registry().list_for(guild, None);
            serde_json::to_value(manifests.iter().map(|m| m.as_ref()).collect::<Vec<_>>())?
        }
        Command::Pull { user, guarantee } => {
            let guild = guild.context("Pulling requires --guild")?;

            let mut request = PullRequest::new(guild);
            if let Some(user) = user {
                request = request.for_user(user);
            }
            if let Some(stars) = guarantee {
                request = request.guaranteed(stars);
            }

            match engine.gacha().rng_pull(request).await {
                Ok(pull) => serde_json::to_value(pull)?,
                Err(error) if error.is_user_reportable() => {
                    serde_json::json!({ "error": error.to_string() })
                }
                Err(error) => return Err(error).context("Pull failed"),
            }
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}
