//! mechgg CLI — score gameplay clips and work through drill plans.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use uuid::Uuid;

mod commands;

#[derive(Parser)]
#[command(name = "mechgg", version, about = "Mechanical skill scoring and drill plans for gamers")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a clip and store the result
    Analyze {
        /// Game id (see `mechgg games`)
        #[arg(long)]
        game: String,

        /// Clip file; only its size is used
        #[arg(long, conflicts_with = "seed")]
        clip: Option<PathBuf>,

        /// Explicit analysis seed
        #[arg(long)]
        seed: Option<u32>,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show the drill plan for an analysis, building it on first use
    Plan {
        /// Analysis id
        #[arg(long)]
        analysis: Uuid,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Toggle a drill's completion state
    Complete {
        /// Plan id
        #[arg(long)]
        plan: Uuid,

        /// Drill id
        #[arg(long)]
        drill: String,
    },

    /// List past analyses, newest first
    History {
        /// Only this game
        #[arg(long)]
        game: Option<String>,

        /// Page size (default from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Analyses to skip
        #[arg(long, default_value = "0")]
        offset: usize,
    },

    /// Show dashboard statistics
    Stats,

    /// List supported games
    Games {
        /// Filter by category: fps, racing, sports, strategy, fighting
        #[arg(long)]
        category: Option<String>,
    },

    /// Delete an analysis and its plan
    Delete {
        /// Analysis id
        #[arg(long)]
        analysis: Uuid,
    },

    /// Export an analysis report
    Export {
        /// Analysis id
        #[arg(long)]
        analysis: Uuid,

        /// Output file
        #[arg(long)]
        output: PathBuf,

        /// Output format: json, md
        #[arg(long, default_value = "json")]
        format: String,
    },

    /// Create a starter config
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("mechgg=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Analyze {
            game,
            clip,
            seed,
            format,
        } => commands::analyze::execute(config, game, clip, seed, format).await,
        Commands::Plan { analysis, format } => {
            commands::plan::execute(config, analysis, format).await
        }
        Commands::Complete { plan, drill } => commands::complete::execute(config, plan, drill).await,
        Commands::History {
            game,
            limit,
            offset,
        } => commands::history::execute(config, game, limit, offset).await,
        Commands::Stats => commands::stats::execute(config).await,
        Commands::Games { category } => commands::games::execute(category),
        Commands::Delete { analysis } => commands::delete::execute(config, analysis).await,
        Commands::Export {
            analysis,
            output,
            format,
        } => commands::export::execute(config, analysis, output, format).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
