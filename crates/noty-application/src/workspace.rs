//! The workspace: the open tabs of a window and the bookkeeping that keeps
//! them consistent with disk.
//!
//! The workspace owns the tab collection, the identity and title registries,
//! the autosave handle and the deferred dirty-check queue. Tabs never perform
//! I/O themselves; they emit [`TabEvent`]s which [`Workspace::pump_events`]
//! turns into renderer updates, scheduled checks and persistence.

use crate::autosave::AutosaveTimer;
use crate::deferred::DeferredChecks;
use noty_core::document::DocumentRepository;
use noty_core::error::{NotyError, Result};
use noty_core::identity::TabId;
use noty_core::session::{RestoredSession, Session, SessionRepository};
use noty_core::settings::Settings;
use noty_core::tab::{ClosedTab, CursorPosition, Registries, Tab, TabEvent, TabParams};
use noty_core::ui::{CloseChoice, DialogService, TabRenderer};
use std::sync::Arc;
use std::time::Instant;

/// How a close request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The tab is gone; its last content and cursor are returned.
    Destroyed(ClosedTab),
    /// The tab stays open.
    Cancelled,
}

/// Coordinator of one window's tabs.
///
/// All mutation happens through `&mut self`, so the registries need no locking.
pub struct Workspace {
    tabs: Vec<Tab>,
    current: Option<TabId>,
    registries: Registries,
    settings: Settings,
    autosave: AutosaveTimer,
    deferred: DeferredChecks,
    sessions: Arc<dyn SessionRepository>,
    documents: Arc<dyn DocumentRepository>,
    dialogs: Arc<dyn DialogService>,
    renderer: Box<dyn TabRenderer>,
}

fn find_mut(tabs: &mut [Tab], id: TabId) -> Result<&mut Tab> {
    tabs.iter_mut()
        .find(|tab| tab.id() == id)
        .ok_or_else(|| NotyError::not_found("Tab", id))
}

impl Workspace {
    pub fn new(
        settings: Settings,
        sessions: Arc<dyn SessionRepository>,
        documents: Arc<dyn DocumentRepository>,
        dialogs: Arc<dyn DialogService>,
        renderer: Box<dyn TabRenderer>,
    ) -> Self {
        Self {
            tabs: Vec::new(),
            current: None,
            registries: Registries::new(),
            autosave: AutosaveTimer::new(settings.autosave_delay()),
            deferred: DeferredChecks::new(),
            settings,
            sessions,
            documents,
            dialogs,
            renderer,
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    /// Open tabs in display order.
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab(&self, id: TabId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.id() == id)
    }

    pub fn position(&self, id: TabId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id() == id)
    }

    pub fn current_id(&self) -> Option<TabId> {
        self.current
    }

    pub fn current_tab(&self) -> Option<&Tab> {
        self.current.and_then(|id| self.tab(id))
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registries(&self) -> &Registries {
        &self.registries
    }

    pub fn autosave(&self) -> &AutosaveTimer {
        &self.autosave
    }

    /// When [`Workspace::tick`] next has autosave work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.autosave.deadline()
    }

    pub fn has_deferred_checks(&self) -> bool {
        !self.deferred.is_empty()
    }

    /// The session document describing the current tab set.
    pub fn snapshot(&self) -> Session {
        let active_tab = self.current.and_then(|id| self.position(id));
        Session::new(active_tab, self.tabs.iter().map(Tab::snapshot).collect())
    }

    fn tab_mut(&mut self, id: TabId) -> Result<&mut Tab> {
        find_mut(&mut self.tabs, id)
    }

    fn require(&self, id: TabId) -> Result<&Tab> {
        self.tab(id).ok_or_else(|| NotyError::not_found("Tab", id))
    }

    /// Position right after the current tab, or the front when there is none.
    fn insertion_point(&self) -> usize {
        self.current
            .and_then(|id| self.position(id))
            .map_or(0, |position| position + 1)
    }

    /// Reports a fatal error to the user before handing it back.
    fn fail(&self, error: NotyError) -> NotyError {
        if error.is_fatal() {
            tracing::error!("Internal error: {}", error);
            self.dialogs.show_internal_error(&error.to_string());
        }
        error
    }

    // ============================================================================
    // Tab set
    // ============================================================================

    /// Rebuilds the tabs of a restored session.
    ///
    /// The stored active index selects the current tab. An out-of-range index
    /// falls back to the first tab. Records that cannot be opened are skipped
    /// and reported, except for fatal errors.
    pub async fn restore(&mut self, restored: RestoredSession) -> Result<()> {
        let RestoredSession {
            session,
            mut contents,
            dropped,
        } = restored;
        let Session { active_tab, tabs } = session;
        let active_id = active_tab.and_then(|index| tabs.get(index)).map(|record| record.id);

        let mut skipped = 0;
        for record in tabs {
            let id = record.id;
            let content = contents.remove(&id).unwrap_or_default();
            let position = self.tabs.len();
            match self.insert_tab(position, TabParams::restored(record, content)) {
                Ok(_) => {}
                Err(e) if !e.is_fatal() => {
                    tracing::warn!("Skipping restored tab {}: {}", id, e);
                    self.dialogs
                        .show_error(&format!("Failed to restore tab {}:\n> {}", id, e));
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        let target = match active_id.filter(|id| self.tab(*id).is_some()) {
            Some(id) => Some(id),
            None => {
                if !self.tabs.is_empty() {
                    tracing::warn!(
                        "Loaded session contains {} tabs but active tab index is {:?}",
                        self.tabs.len(),
                        active_tab
                    );
                }
                self.tabs.first().map(Tab::id)
            }
        };

        if let Some(id) = target {
            self.activate(id)?;
        }
        if target.is_some() || skipped > 0 || !dropped.is_empty() {
            self.persist_session().await;
        }

        tracing::info!(
            "Restored {} tab(s), dropped {}",
            self.tabs.len(),
            dropped.len() + skipped
        );
        Ok(())
    }

    fn insert_tab(&mut self, position: usize, params: TabParams) -> Result<TabId> {
        let buffer = self.renderer.create_buffer();
        let mut tab = match Tab::open(params, buffer, &mut self.registries) {
            Ok(tab) => tab,
            Err(e) => return Err(self.fail(e)),
        };
        tab.apply_settings(&self.settings.editor);

        let id = tab.id();
        self.renderer.insert_strip(id, position, tab.label());
        self.renderer.set_changed(id, tab.is_changed());
        self.tabs.insert(position, tab);

        self.pump_events(Instant::now())?;
        Ok(id)
    }

    /// Creates an untitled tab right after the current one and makes it current.
    pub async fn create_tab(&mut self, language: Option<&str>, content: &str) -> Result<TabId> {
        let params = TabParams {
            language: language.map(str::to_string),
            ..TabParams::untitled(content)
        };
        let id = self.insert_tab(self.insertion_point(), params)?;
        tracing::info!("Created tab {}", id);

        self.persist_tab_content(id).await;
        self.activate(id)?;
        self.persist_session().await;
        Ok(id)
    }

    /// Opens the document at `path` in a new tab, or switches to the tab
    /// already showing it.
    pub async fn open_document(&mut self, path: &str) -> Result<TabId> {
        if let Some(id) = self
            .tabs
            .iter()
            .find(|tab| tab.path() == Some(path))
            .map(Tab::id)
        {
            self.set_current(id).await?;
            return Ok(id);
        }

        let content = match self.documents.read(path).await {
            Ok(content) => content,
            Err(e) => {
                self.dialogs
                    .show_error(&format!("Failed to open file:\n> {}", e));
                return Err(e);
            }
        };

        let id = self.insert_tab(self.insertion_point(), TabParams::linked(path, content))?;
        tracing::info!("Opened {} in tab {}", path, id);

        self.persist_tab_content(id).await;
        self.activate(id)?;
        self.persist_session().await;
        Ok(id)
    }

    /// Makes `id` the current tab and persists the session.
    ///
    /// The switch happens even when the session cannot be written; the write
    /// error is shown to the user and returned.
    pub async fn set_current(&mut self, id: TabId) -> Result<()> {
        self.activate(id)?;
        self.save_updated_session().await
    }

    /// Makes `id` the current tab, deactivating every other tab first.
    fn activate(&mut self, id: TabId) -> Result<()> {
        self.require(id)?;

        for tab in self.tabs.iter_mut().filter(|tab| tab.id() != id) {
            tab.set_active(false);
            self.renderer.set_active(tab.id(), false);
        }

        self.tab_mut(id)?.set_active(true);
        self.renderer.set_active(id, true);
        self.current = Some(id);
        Ok(())
    }

    pub async fn previous_tab(&mut self) -> Result<()> {
        let Some(position) = self.current.and_then(|id| self.position(id)) else {
            return Ok(());
        };
        let previous = if position == 0 {
            self.tabs.len() - 1
        } else {
            position - 1
        };
        let id = self.tabs[previous].id();
        self.set_current(id).await
    }

    pub async fn next_tab(&mut self) -> Result<()> {
        let Some(position) = self.current.and_then(|id| self.position(id)) else {
            return Ok(());
        };
        let next = if position + 1 == self.tabs.len() {
            0
        } else {
            position + 1
        };
        let id = self.tabs[next].id();
        self.set_current(id).await
    }

    // ============================================================================
    // Editing
    // ============================================================================

    /// Records that the buffer of `id` was edited in place.
    pub fn on_buffer_changed(&mut self, id: TabId, now: Instant) -> Result<()> {
        self.tab_mut(id)?.notify_updated();
        self.pump_events(now)
    }

    /// Replaces the content of `id` as an edit.
    pub fn set_content(&mut self, id: TabId, content: &str, now: Instant) -> Result<()> {
        self.tab_mut(id)?.set_content(content, false, true);
        self.pump_events(now)
    }

    pub fn set_cursor(&mut self, id: TabId, position: CursorPosition) -> Result<()> {
        self.tab_mut(id)?.set_cursor_position(position);
        Ok(())
    }

    /// Sets the language of `id` and persists the session.
    ///
    /// # Errors
    ///
    /// A validation error for an unsupported language; the tab keeps its
    /// previous language.
    pub async fn set_language(&mut self, id: TabId, language: Option<&str>) -> Result<()> {
        self.tab_mut(id)?.set_language(language)?;
        self.persist_session().await;
        Ok(())
    }

    /// Runs the queued dirty checks against each tab's current content.
    pub fn run_deferred(&mut self) -> Result<()> {
        for id in self.deferred.drain() {
            // The tab may have been closed since the check was queued
            if let Ok(tab) = find_mut(&mut self.tabs, id) {
                tab.refresh_changed();
            }
        }
        self.pump_events(Instant::now())
    }

    /// Advances time: runs deferred checks and saves the content of updated
    /// tabs once the autosave deadline has passed.
    pub async fn tick(&mut self, now: Instant) -> Result<()> {
        self.run_deferred()?;

        let due = self.autosave.take_due(now);
        if !due.is_empty() {
            tracing::debug!("Autosaving {} tab(s)", due.len());
            self.save_tabs(&due).await?;
        }
        Ok(())
    }

    /// Saves every tab waiting on the autosave deadline right away.
    pub async fn flush_autosave(&mut self) -> Result<()> {
        let pending = self.autosave.take_all();
        if pending.is_empty() {
            return Ok(());
        }
        tracing::debug!("Flushing autosave of {} tab(s)", pending.len());
        self.save_tabs(&pending).await
    }

    async fn save_tabs(&self, ids: &[TabId]) -> Result<()> {
        let mut result = Ok(());
        for id in ids {
            if self.tab(*id).is_none() {
                continue;
            }
            if let Err(e) = self.save_tab_content(*id).await {
                result = result.and(Err(e));
            }
        }
        self.save_updated_session().await?;
        result
    }

    /// Applies new settings to every tab and to the autosave delay.
    pub fn apply_settings(&mut self, settings: Settings) {
        for tab in &mut self.tabs {
            tab.apply_settings(&settings.editor);
        }
        self.autosave.set_delay(settings.autosave_delay());
        self.settings = settings;
    }

    // ============================================================================
    // Persistence
    // ============================================================================

    /// Writes the session document.
    pub async fn save_updated_session(&self) -> Result<()> {
        let session = self.snapshot();
        self.sessions.save(&session).await.map_err(|e| {
            self.dialogs
                .show_error(&format!("Failed to save session to disk:\n> {}", e));
            e
        })
    }

    /// Writes the side file of `id`, then the session document.
    pub async fn save_tab_data(&self, id: TabId) -> Result<()> {
        self.save_tab_content(id).await?;
        self.save_updated_session().await
    }

    async fn save_tab_content(&self, id: TabId) -> Result<()> {
        let content = self.require(id)?.content();
        self.sessions
            .save_unsaved_content(id, &content)
            .await
            .map_err(|e| {
                self.dialogs
                    .show_error(&format!("Failed to save tab to disk:\n> {}", e));
                e
            })
    }

    /// Writes the session document and the side file of every tab.
    pub async fn save_complete_state(&self) -> Result<()> {
        self.save_updated_session().await?;
        for tab in &self.tabs {
            self.save_tab_content(tab.id()).await?;
        }
        Ok(())
    }

    /// Flushes pending autosaves and writes the complete state.
    pub async fn prepare_exit(&mut self) -> Result<()> {
        self.flush_autosave().await?;
        self.save_complete_state().await?;
        tracing::info!("Saved complete state of {} tab(s)", self.tabs.len());
        Ok(())
    }

    // Failures below are already reported through the dialogs.

    async fn persist_session(&self) {
        if let Err(e) = self.save_updated_session().await {
            tracing::debug!("Session not persisted: {}", e);
        }
    }

    async fn persist_tab_content(&self, id: TabId) {
        if let Err(e) = self.save_tab_content(id).await {
            tracing::debug!("Content of tab {} not persisted: {}", id, e);
        }
    }

    // ============================================================================
    // Saving documents
    // ============================================================================

    /// Saves `id` to its file, asking for a path if it has none.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The content was written
    /// - `Ok(false)`: The user cancelled the path picker
    /// - `Err(_)`: The write failed; the user was told and the tab is unchanged
    pub async fn save_tab(&mut self, id: TabId) -> Result<bool> {
        match self.require(id)?.path().map(str::to_string) {
            Some(path) => {
                self.write_document(id, &path).await?;
                Ok(true)
            }
            None => self.save_tab_as(id).await,
        }
    }

    /// Asks for a path, writes `id` there and links the tab to it.
    pub async fn save_tab_as(&mut self, id: TabId) -> Result<bool> {
        let suggested = self.require(id)?.path().map(str::to_string);

        let Some(path) = self.dialogs.pick_save_path(suggested.as_deref()).await else {
            tracing::debug!("Save as cancelled for tab {}", id);
            return Ok(false);
        };

        self.write_document(id, &path).await?;

        if suggested.as_deref() != Some(path.as_str()) {
            let tab = find_mut(&mut self.tabs, id)?;
            tab.set_path(path, &mut self.registries.titles);
            self.pump_events(Instant::now())?;
            self.persist_session().await;
        }
        Ok(true)
    }

    async fn write_document(&mut self, id: TabId, path: &str) -> Result<()> {
        let content = self.require(id)?.content();

        if let Err(e) = self.documents.write(path, &content).await {
            tracing::error!("Failed to save tab {} to {}: {}", id, path, e);
            self.dialogs.show_error(&format!("Failed to save: {}", e));
            return Err(e);
        }

        self.tab_mut(id)?.mark_saved(&content);
        self.pump_events(Instant::now())?;
        tracing::info!("Saved tab {} to {}", id, path);

        if let Err(e) = self.save_tab_data(id).await {
            tracing::debug!("Tab {} saved but not persisted: {}", id, e);
        }
        Ok(())
    }

    // ============================================================================
    // Closing
    // ============================================================================

    /// Closes `id`, asking what to do with unsaved changes.
    ///
    /// A cancelled confirmation, a cancelled save path or a failed save leave
    /// the tab open in its previous state.
    pub async fn close_tab(&mut self, id: TabId) -> Result<CloseOutcome> {
        let tab = self.require(id)?;

        if tab.has_changes() {
            let label = tab.label().text.clone();
            if let Err(e) = self.tab_mut(id)?.begin_close() {
                return Err(self.fail(e));
            }

            match self.dialogs.confirm_unsaved_changes(&label).await {
                CloseChoice::Cancel => {
                    self.cancel_close(id);
                    return Ok(CloseOutcome::Cancelled);
                }
                CloseChoice::Discard => {
                    tracing::info!("Discarding changes of tab {}", id);
                }
                CloseChoice::Save => match self.save_tab(id).await {
                    Ok(true) => {}
                    Ok(false) => {
                        self.cancel_close(id);
                        return Ok(CloseOutcome::Cancelled);
                    }
                    Err(e) => {
                        self.cancel_close(id);
                        return Err(e);
                    }
                },
            }
        }

        let closed = self.destroy_tab(id).await?;
        Ok(CloseOutcome::Destroyed(closed))
    }

    fn cancel_close(&mut self, id: TabId) {
        if let Ok(tab) = self.tab_mut(id) {
            tab.cancel_close();
        }
    }

    async fn destroy_tab(&mut self, id: TabId) -> Result<ClosedTab> {
        // The closing tab's own pending save is dropped; other tabs are flushed
        self.autosave.forget(id);
        self.deferred.remove(id);
        if let Err(e) = self.flush_autosave().await {
            tracing::debug!("Autosave flush before closing tab {} failed: {}", id, e);
        }

        let position = self
            .position(id)
            .ok_or_else(|| NotyError::not_found("Tab", id))?;
        let tab = self.tabs.remove(position);
        let closed = tab.destroy(&mut self.registries);
        self.renderer.remove_strip(id);
        tracing::info!("Closed tab {}", id);

        if self.current == Some(id) {
            self.current = None;
            let next = self
                .tabs
                .get(position)
                .or_else(|| position.checked_sub(1).and_then(|p| self.tabs.get(p)))
                .map(Tab::id);
            if let Some(next) = next {
                self.activate(next)?;
            }
        }
        self.persist_session().await;

        if let Err(e) = self.sessions.remove_unsaved_content(id).await {
            tracing::error!("Failed to remove saved file for tab with ID {}: {}", id, e);
        }

        Ok(closed)
    }

    /// Closes every tab in order, stopping at the first one kept open.
    ///
    /// # Returns
    ///
    /// `Ok(true)` if all tabs were closed.
    pub async fn close_all_tabs(&mut self) -> Result<bool> {
        let ids: Vec<TabId> = self.tabs.iter().map(Tab::id).collect();
        for id in ids {
            if self.close_tab(id).await? == CloseOutcome::Cancelled {
                return Ok(false);
            }
        }
        Ok(true)
    }

    // ============================================================================
    // Events
    // ============================================================================

    /// Drains and handles the events of every tab until none are left.
    ///
    /// `now` is the time of the edit that triggered the events, used to
    /// schedule autosave.
    pub fn pump_events(&mut self, now: Instant) -> Result<()> {
        loop {
            let events: Vec<TabEvent> = self.tabs.iter_mut().flat_map(Tab::take_events).collect();
            if events.is_empty() {
                return Ok(());
            }
            for event in events {
                self.handle_event(event, now)?;
            }
        }
    }

    fn handle_event(&mut self, event: TabEvent, now: Instant) -> Result<()> {
        match event {
            TabEvent::Updated { id } => {
                self.deferred.push(id);
                self.autosave.schedule(id, now);
            }
            TabEvent::LabelChanged { id, label } => self.renderer.set_label(id, &label),
            TabEvent::ChangedStatus { id, changed } => self.renderer.set_changed(id, changed),
            TabEvent::Collision { id, sibling } => {
                tracing::debug!("Tab {} shares its file name with tab {}", id, sibling);
                if let Err(e) = find_mut(&mut self.tabs, sibling).and_then(Tab::use_full_path_label)
                {
                    return Err(self.fail(e));
                }
            }
        }
        Ok(())
    }
}
