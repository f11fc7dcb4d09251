pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "booking")]
#[command(about = "Booking CLI - workspace URL and response fingerprint tools")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Resolve the workspace panel a URL points at")]
    Content {
        #[arg(help = "Workspace URL, path or query string")]
        url: String,
    },

    #[command(about = "Print the URL that navigating to a panel would push")]
    Link {
        #[arg(help = "Current workspace URL")]
        url: String,
        #[arg(help = "Target panel (monthlyCalendar, calendar, monthlyList, list, flow)")]
        content: String,
    },

    #[command(about = "Compute the ETag of a response body")]
    Fingerprint {
        #[arg(help = "File to hash (reads stdin when omitted)")]
        path: Option<std::path::PathBuf>,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Content { url } => commands::content::resolve(&url, output_format),
        Commands::Link { url, content } => commands::content::link(&url, &content, output_format),
        Commands::Fingerprint { path } => commands::fingerprint::handle(path, output_format).await,
    }
}
