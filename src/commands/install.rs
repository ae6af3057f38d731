use anyhow::Result;
use colored::Colorize;
use rapt::{Apt, InstallOptions};

use super::stream;

pub async fn install(apt: &Apt, package: &str, options: InstallOptions) -> Result<()> {
    match &options.version {
        Some(version) => println!("Installing {} {}...", package.bold(), version.dimmed()),
        None => println!("Installing {}...", package.bold()),
    }

    let info = stream::pump(apt.install(package, options)).await?;

    match info.version() {
        Some(version) => println!(
            "{} Installed {} {}",
            "✓".green(),
            package.bold(),
            version.dimmed()
        ),
        None => println!("{} Installed {}", "✓".green(), package.bold()),
    }

    Ok(())
}
