use anyhow::Result;
use colored::Colorize;
use rapt::Apt;

use super::stream;

pub async fn autoremove(apt: &Apt) -> Result<()> {
    println!("Removing unused dependencies...");

    stream::pump(apt.autoremove()).await?;

    println!("{} Autoremove complete", "✓".green());
    Ok(())
}
