use anyhow::Result;
use colored::Colorize;
use rapt::Apt;

use super::stream;

pub async fn remove(apt: &Apt, package: &str) -> Result<()> {
    println!("Removing {}...", package.bold());

    stream::pump(apt.uninstall(package)).await?;

    println!("{} Removed {}", "✓".green(), package.bold());
    Ok(())
}
