use anyhow::Result;
use colored::Colorize;
use rapt::{Apt, UpgradeOptions};

use super::stream;

pub async fn upgrade(apt: &Apt, options: UpgradeOptions) -> Result<()> {
    println!("Upgrading installed packages...");

    stream::pump(apt.upgrade(options)).await?;

    println!("{} Upgrade complete", "✓".green());
    Ok(())
}
