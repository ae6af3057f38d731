use anyhow::Result;
use colored::Colorize;
use rapt::Apt;

pub async fn show(apt: &Apt, package: &str, json: bool) -> Result<()> {
    let info = apt.show(package).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    if let (Some(name), Some(version)) = (info.name(), info.version()) {
        println!("{} {}", name.bold(), version.green());
        println!();
    }

    let mut fields: Vec<_> = info.fields().collect();
    fields.sort();
    for (key, value) in fields {
        println!("{}: {}", key.cyan(), value);
    }

    Ok(())
}
