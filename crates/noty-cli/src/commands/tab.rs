use super::{finish, require_tab, start};
use crate::frontend::ConsoleDialogs;
use anyhow::{Context, Result};
use noty_application::CloseOutcome;
use noty_core::ui::CloseChoice;
use noty_infrastructure::NotyPaths;
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Creates an untitled tab holding whatever is piped on stdin.
pub async fn new(paths: &NotyPaths, language: Option<String>) -> Result<()> {
    let mut content = String::new();
    let stdin = std::io::stdin();
    if !stdin.is_terminal() {
        stdin
            .lock()
            .read_to_string(&mut content)
            .context("Failed to read content from stdin")?;
    }

    let mut workspace = start(paths, ConsoleDialogs::new()).await?;
    let id = workspace.create_tab(language.as_deref(), &content).await?;
    let label = workspace
        .tab(id)
        .map(|tab| tab.label().text.clone())
        .unwrap_or_default();
    finish(workspace).await?;

    println!("Created tab {} ({})", id, label);
    Ok(())
}

pub async fn open(paths: &NotyPaths, path: &str) -> Result<()> {
    let path = absolute(path)?;
    let mut workspace = start(paths, ConsoleDialogs::new()).await?;
    let id = workspace.open_document(&path).await?;
    finish(workspace).await?;

    println!("Opened {} in tab {}", path, id);
    Ok(())
}

/// Saves a tab to its path, or to `save_as` when given.
pub async fn save(paths: &NotyPaths, id: u64, save_as: Option<String>) -> Result<()> {
    let save_as = save_as.as_deref().map(absolute).transpose()?;
    let dialogs = ConsoleDialogs::new().with_save_path(save_as.clone());
    let mut workspace = start(paths, dialogs).await?;
    let id = require_tab(&workspace, id)?;

    let saved = if save_as.is_some() {
        workspace.save_tab_as(id).await?
    } else {
        workspace.save_tab(id).await?
    };
    let path = workspace
        .tab(id)
        .and_then(|tab| tab.path().map(str::to_string));
    finish(workspace).await?;

    match (saved, path) {
        (true, Some(path)) => println!("Saved tab {} to {}", id, path),
        _ => println!("Tab {} has no path, pass --as <path>", id),
    }
    Ok(())
}

pub async fn close(paths: &NotyPaths, id: u64, choice: CloseChoice) -> Result<()> {
    let dialogs = ConsoleDialogs::new().with_close_choice(choice);
    let mut workspace = start(paths, dialogs).await?;
    let id = require_tab(&workspace, id)?;

    let outcome = workspace.close_tab(id).await?;
    finish(workspace).await?;

    match outcome {
        CloseOutcome::Destroyed(_) => println!("Closed tab {}", id),
        CloseOutcome::Cancelled => println!("Tab {} kept open", id),
    }
    Ok(())
}

fn absolute(path: &str) -> Result<String> {
    let path = std::path::absolute(Path::new(path))
        .with_context(|| format!("Invalid path: {}", path))?;
    Ok(path.to_string_lossy().into_owned())
}
