//! Keymap actions.

use crate::workspace::{CloseOutcome, Workspace};
use noty_core::error::Result;
use noty_core::settings::{Action, KeyStroke};

/// What the front end must do after an action ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Nothing further.
    Handled,
    /// The state was persisted; the application should exit.
    Exit,
    /// A window-shell action for the front end to perform.
    Shell(Action),
}

impl Workspace {
    /// Runs the action bound to `stroke`, if any.
    pub async fn handle_key(&mut self, stroke: &KeyStroke) -> Result<Option<ActionOutcome>> {
        let Some(action) = self.settings().resolve_action(stroke) else {
            return Ok(None);
        };
        tracing::debug!("Detected keyboard shortcut: {}", action);
        self.dispatch(action).await.map(Some)
    }

    pub async fn dispatch(&mut self, action: Action) -> Result<ActionOutcome> {
        match action {
            Action::PreviousTab => self.previous_tab().await?,
            Action::NextTab => self.next_tab().await?,
            Action::SaveTab => {
                if let Some(id) = self.current_id() {
                    self.save_tab(id).await?;
                }
            }
            Action::SaveTabAs => {
                if let Some(id) = self.current_id() {
                    self.save_tab_as(id).await?;
                }
            }
            Action::CloseTab => match self.current_id() {
                Some(id) => {
                    if let CloseOutcome::Cancelled = self.close_tab(id).await? {
                        tracing::debug!("Close of tab {} cancelled", id);
                    }
                }
                None => {
                    self.prepare_exit().await?;
                    return Ok(ActionOutcome::Exit);
                }
            },
            Action::CloseAllTabs => {
                self.close_all_tabs().await?;
            }
            Action::CreateTab => {
                self.create_tab(None, "").await?;
            }
            Action::Exit => {
                self.prepare_exit().await?;
                return Ok(ActionOutcome::Exit);
            }
            Action::ExitCompletely | Action::Reload => {
                self.prepare_exit().await?;
                return Ok(ActionOutcome::Shell(action));
            }
            Action::ToggleDevTools | Action::ToggleLanguagesSelector => {
                return Ok(ActionOutcome::Shell(action));
            }
        }
        Ok(ActionOutcome::Handled)
    }
}
