use super::start;
use crate::frontend::ConsoleDialogs;
use anyhow::Result;
use noty_application::Workspace;
use noty_core::tab::Tab;
use noty_infrastructure::NotyPaths;

pub async fn run(paths: &NotyPaths) -> Result<()> {
    let workspace = start(paths, ConsoleDialogs::new()).await?;
    print!("{}", render(&workspace));
    Ok(())
}

/// One line per tab in strip order; `*` marks the current tab.
pub fn render(workspace: &Workspace) -> String {
    if workspace.is_empty() {
        return "No open tabs\n".to_string();
    }

    let current = workspace.current_id();
    workspace
        .tabs()
        .iter()
        .map(|tab| {
            let marker = if Some(tab.id()) == current { '*' } else { ' ' };
            format!("{} {}\n", marker, describe(tab))
        })
        .collect()
}

fn describe(tab: &Tab) -> String {
    let language = tab.language().map(|l| l.as_str()).unwrap_or("plain_text");
    let mut line = format!("{:>4}  {}  [{}]", tab.id(), tab.label().text, language);
    if tab.is_changed() {
        line.push_str("  (modified)");
    }
    if let Some(path) = tab.path() {
        line.push_str(&format!("  {}", path));
    }
    line
}
