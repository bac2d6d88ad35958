//! CLI entry point for quillpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "quillpress")]
#[command(version)]
#[command(about = "A minimal markdown blog engine", long_about = None)]
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
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// One-line summary shown on the home page
        #[arg(short, long)]
        excerpt: Option<String>,
    },

    /// Start the blog server
    #[command(alias = "s")]
    Server {
        /// Port to listen on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (defaults to the configured host)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// List posts as the home page would show them
    List,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "quillpress=debug,info"
    } else {
        "quillpress=info"
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
            tracing::info!("Initializing blog in {:?}", target_dir);
            quillpress::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New {
            title,
            slug,
            excerpt,
        } => {
            let blog = quillpress::Blog::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = quillpress::commands::new::create_post(
                &blog,
                &title,
                slug.as_deref(),
                excerpt.as_deref(),
            )?;
            println!("Created: {:?}", path);
        }

        Commands::Server { port, ip } => {
            let blog = quillpress::Blog::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| blog.config.host.clone());
            let port = port.unwrap_or(blog.config.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            quillpress::server::start(&blog, &ip, port).await?;
        }

        Commands::List => {
            let blog = quillpress::Blog::new(&base_dir)?;
            quillpress::commands::list::run(&blog)?;
        }

        Commands::Version => {
            println!("quillpress version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
