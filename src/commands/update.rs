use anyhow::Result;
use colored::Colorize;
use rapt::Apt;

use super::stream;

pub async fn update(apt: &Apt) -> Result<()> {
    println!("Refreshing package index...");

    stream::pump(apt.update()).await?;

    println!("{} Package index refreshed", "✓".green());
    Ok(())
}
