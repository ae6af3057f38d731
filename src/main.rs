mod commands;

use clap::{Parser, Subcommand};
use rapt::paths::{APT_GET, DPKG, SUDO};
use rapt::{Apt, InstallOptions, ToolPaths, UpgradeOptions};

#[derive(Parser)]
#[command(name = "rapt")]
#[command(author, version, about = "Asynchronous apt-get/dpkg front end", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Override the dpkg executable
    #[arg(long, global = true, value_name = "PATH")]
    dpkg_path: Option<String>,

    /// Override the apt-get executable
    #[arg(long, global = true, value_name = "PATH")]
    apt_get_path: Option<String>,

    /// Override the privilege-escalation command
    #[arg(long, global = true, value_name = "PATH")]
    sudo_path: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show metadata for an installed package
    Show {
        /// Package name
        package: String,

        /// Emit the stanza fields as JSON
        #[arg(long)]
        json: bool,
    },

    /// Refresh the package index
    Update,

    /// Install a package
    Install {
        /// Package name
        package: String,

        /// Exact version to install
        #[arg(long, value_name = "VERSION")]
        pkg_version: Option<String>,

        /// Overwrite modified configuration files with packaged ones
        #[arg(long)]
        confnew: bool,
    },

    /// Remove a package
    Remove {
        /// Package name
        package: String,
    },

    /// Remove packages that are no longer required
    Autoremove,

    /// Upgrade installed packages
    Upgrade {
        /// Overwrite modified configuration files with packaged ones
        #[arg(long)]
        confnew: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    let paths = ToolPaths::new();
    if let Some(path) = cli.dpkg_path {
        paths.set(DPKG, path);
    }
    if let Some(path) = cli.apt_get_path {
        paths.set(APT_GET, path);
    }
    if let Some(path) = cli.sudo_path {
        paths.set(SUDO, path);
    }
    let apt = Apt::with_paths(paths);

    match cli.command {
        Commands::Show { package, json } => {
            commands::show(&apt, &package, json).await?;
        }
        Commands::Update => {
            commands::update(&apt).await?;
        }
        Commands::Install {
            package,
            pkg_version,
            confnew,
        } => {
            let options = InstallOptions {
                version: pkg_version,
                confnew,
            };
            commands::install(&apt, &package, options).await?;
        }
        Commands::Remove { package } => {
            commands::remove(&apt, &package).await?;
        }
        Commands::Autoremove => {
            commands::autoremove(&apt).await?;
        }
        Commands::Upgrade { confnew } => {
            commands::upgrade(&apt, UpgradeOptions { confnew }).await?;
        }
    }

    Ok(())
}
