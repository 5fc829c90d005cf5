use super::bootstrap;
use crate::frontend::ConsoleDialogs;
use anyhow::{Context, Result};
use noty_core::settings::Settings;
use noty_infrastructure::NotyPaths;

pub async fn show(paths: &NotyPaths) -> Result<()> {
    let settings = bootstrap(paths, ConsoleDialogs::new())
        .load_settings()
        .await?;
    println!("{}", settings.encode()?);
    Ok(())
}

pub async fn reset(paths: &NotyPaths) -> Result<()> {
    bootstrap(paths, ConsoleDialogs::new())
        .settings
        .save(&Settings::default())
        .await
        .context("Failed to reset settings")?;
    println!("Settings reset to defaults");
    Ok(())
}

pub async fn set_autosave_delay(paths: &NotyPaths, millis: u64) -> Result<()> {
    let settings = bootstrap(paths, ConsoleDialogs::new())
        .settings
        .update(Box::new(move |settings: &mut Settings| {
            settings.auto_save_delay = millis;
        }))
        .await
        .context("Failed to update settings")?;
    println!("Autosave delay set to {} ms", settings.auto_save_delay);
    Ok(())
}
