//! CLI entry point for kultur-rs

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "kultur-rs")]
#[command(version)]
#[command(about = "Web front end for the Kultur Photo Club magazine", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration and static directory
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Start the web server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured address)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List records from the content store
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Print the rendered body of an article
    Show {
        /// Article slug
        slug: String,
    },

    /// Report articles that break authoring rules
    Check,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "kultur_rs=debug,info"
    } else {
        "kultur_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            kultur_rs::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::Serve { port, ip } => {
            let kultur = kultur_rs::Kultur::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| kultur.config.server.ip.clone());
            let port = port.unwrap_or(kultur.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            kultur_rs::server::start(&kultur, &ip, port).await?;
        }

        Commands::List { r#type } => {
            let kultur = kultur_rs::Kultur::new(&base_dir)?;
            kultur_rs::commands::list::run(&kultur, &r#type).await?;
        }

        Commands::Show { slug } => {
            let kultur = kultur_rs::Kultur::new(&base_dir)?;
            kultur_rs::commands::show::run(&kultur, &slug).await?;
        }

        Commands::Check => {
            let kultur = kultur_rs::Kultur::new(&base_dir)?;
            kultur_rs::commands::check::run(&kultur).await?;
        }

        Commands::Version => {
            println!("kultur-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
