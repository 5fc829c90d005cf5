//! Test doubles for the workspace collaborators.
//!
//! Import from integration test files with:
//! ```ignore
//! mod common;
//! use common::Harness;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use noty_core::document::DocumentRepository;
use noty_core::error::{NotyError, Result};
use noty_core::identity::TabId;
use noty_core::session::{RestoredSession, Session, SessionLoad, SessionRepository};
use noty_core::settings::Settings;
use noty_core::tab::{EditorBuffer, TextBuffer};
use noty_core::title::TitleLabel;
use noty_core::ui::{CloseChoice, DialogService, TabRenderer};
use noty_application::Workspace;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// A write observed by [`MemorySessions`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Session,
    Content(TabId, String),
    Remove(TabId),
}

/// Session repository keeping everything in memory and logging each write.
///
/// While `failing` is set, session and content writes are rejected.
#[derive(Default)]
pub struct MemorySessions {
    pub session: Mutex<Option<Session>>,
    pub contents: Mutex<HashMap<TabId, String>>,
    pub writes: Mutex<Vec<StoreWrite>>,
    pub failing: AtomicBool,
}

impl MemorySessions {
    pub fn fail_writes(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NotyError::io("disk full"));
        }
        Ok(())
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear_writes(&self) {
        self.writes.lock().unwrap().clear();
    }

    pub fn content_writes(&self, id: TabId) -> usize {
        self.writes()
            .iter()
            .filter(|write| matches!(write, StoreWrite::Content(written, _) if *written == id))
            .count()
    }

    pub fn stored_session(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }

    pub fn stored_content(&self, id: TabId) -> Option<String> {
        self.contents.lock().unwrap().get(&id).cloned()
    }
}

#[async_trait]
impl SessionRepository for MemorySessions {
    async fn save(&self, session: &Session) -> Result<()> {
        self.check_writable()?;
        *self.session.lock().unwrap() = Some(session.clone());
        self.writes.lock().unwrap().push(StoreWrite::Session);
        Ok(())
    }

    async fn save_unsaved_content(&self, id: TabId, content: &str) -> Result<()> {
        self.check_writable()?;
        self.contents
            .lock()
            .unwrap()
            .insert(id, content.to_string());
        self.writes
            .lock()
            .unwrap()
            .push(StoreWrite::Content(id, content.to_string()));
        Ok(())
    }

    async fn remove_unsaved_content(&self, id: TabId) -> Result<()> {
        self.contents.lock().unwrap().remove(&id);
        self.writes.lock().unwrap().push(StoreWrite::Remove(id));
        Ok(())
    }

    async fn load(&self) -> Result<SessionLoad> {
        let Some(session) = self.stored_session() else {
            return Ok(SessionLoad::Fresh);
        };
        let contents = self.contents.lock().unwrap().clone();
        Ok(SessionLoad::Restored(RestoredSession {
            session,
            contents,
            dropped: Vec::new(),
        }))
    }
}

/// Documents held in memory; paths listed in `failing` reject writes.
#[derive(Default)]
pub struct MemoryDocuments {
    pub files: Mutex<HashMap<String, String>>,
    pub failing: Mutex<HashSet<String>>,
}

impl MemoryDocuments {
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        self
    }

    pub fn fail_writes_to(&self, path: &str) {
        self.failing.lock().unwrap().insert(path.to_string());
    }

    pub fn file(&self, path: &str) -> Option<String> {
        self.files.lock().unwrap().get(path).cloned()
    }
}

#[async_trait]
impl DocumentRepository for MemoryDocuments {
    async fn read(&self, path: &str) -> Result<String> {
        self.file(path)
            .ok_or_else(|| NotyError::io(format!("No such file: {}", path)))
    }

    async fn write(&self, path: &str, content: &str) -> Result<()> {
        if self.failing.lock().unwrap().contains(path) {
            return Err(NotyError::io("disk full"));
        }
        self.files
            .lock()
            .unwrap()
            .insert(path.to_string(), content.to_string());
        Ok(())
    }
}

/// Dialogs answering from scripted queues.
///
/// An empty choice queue answers `Cancel`; an empty path queue cancels the picker.
#[derive(Default)]
pub struct ScriptedDialogs {
    pub choices: Mutex<VecDeque<CloseChoice>>,
    pub paths: Mutex<VecDeque<String>>,
    pub errors: Mutex<Vec<String>>,
    pub internal_errors: Mutex<Vec<String>>,
    pub confirmations: Mutex<Vec<String>>,
}

impl ScriptedDialogs {
    pub fn answer(&self, choice: CloseChoice) {
        self.choices.lock().unwrap().push_back(choice);
    }

    pub fn pick(&self, path: &str) {
        self.paths.lock().unwrap().push_back(path.to_string());
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn internal_errors(&self) -> Vec<String> {
        self.internal_errors.lock().unwrap().clone()
    }

    pub fn confirmations(&self) -> Vec<String> {
        self.confirmations.lock().unwrap().clone()
    }
}

#[async_trait]
impl DialogService for ScriptedDialogs {
    fn show_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn show_internal_error(&self, message: &str) {
        self.internal_errors
            .lock()
            .unwrap()
            .push(message.to_string());
    }

    async fn confirm_unsaved_changes(&self, label: &str) -> CloseChoice {
        self.confirmations.lock().unwrap().push(label.to_string());
        self.choices
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(CloseChoice::Cancel)
    }

    async fn pick_save_path(&self, _suggested: Option<&str>) -> Option<String> {
        self.paths.lock().unwrap().pop_front()
    }
}

/// What the renderer shows.
#[derive(Debug, Default)]
pub struct Screen {
    pub strips: Vec<(TabId, TitleLabel)>,
    pub active: HashSet<TabId>,
    pub changed: HashSet<TabId>,
}

impl Screen {
    pub fn label(&self, id: TabId) -> Option<&str> {
        self.strips
            .iter()
            .find(|(strip, _)| *strip == id)
            .map(|(_, label)| label.text.as_str())
    }

    pub fn order(&self) -> Vec<TabId> {
        self.strips.iter().map(|(id, _)| *id).collect()
    }
}

/// Renderer recording into a shared [`Screen`].
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub screen: Arc<Mutex<Screen>>,
}

impl TabRenderer for RecordingRenderer {
    fn create_buffer(&mut self) -> Box<dyn EditorBuffer> {
        Box::new(TextBuffer::new())
    }

    fn insert_strip(&mut self, id: TabId, position: usize, label: &TitleLabel) {
        self.screen
            .lock()
            .unwrap()
            .strips
            .insert(position, (id, label.clone()));
    }

    fn remove_strip(&mut self, id: TabId) {
        let mut screen = self.screen.lock().unwrap();
        screen.strips.retain(|(strip, _)| *strip != id);
        screen.active.remove(&id);
        screen.changed.remove(&id);
    }

    fn set_label(&mut self, id: TabId, label: &TitleLabel) {
        let mut screen = self.screen.lock().unwrap();
        if let Some(strip) = screen.strips.iter_mut().find(|(strip, _)| *strip == id) {
            strip.1 = label.clone();
        }
    }

    fn set_active(&mut self, id: TabId, active: bool) {
        let mut screen = self.screen.lock().unwrap();
        if active {
            screen.active.insert(id);
        } else {
            screen.active.remove(&id);
        }
    }

    fn set_changed(&mut self, id: TabId, changed: bool) {
        let mut screen = self.screen.lock().unwrap();
        if changed {
            screen.changed.insert(id);
        } else {
            screen.changed.remove(&id);
        }
    }
}

/// A workspace wired to in-memory doubles.
pub struct Harness {
    pub workspace: Workspace,
    pub sessions: Arc<MemorySessions>,
    pub documents: Arc<MemoryDocuments>,
    pub dialogs: Arc<ScriptedDialogs>,
    pub screen: Arc<Mutex<Screen>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_documents(MemoryDocuments::default())
    }

    pub fn with_documents(documents: MemoryDocuments) -> Self {
        let sessions = Arc::new(MemorySessions::default());
        let documents = Arc::new(documents);
        let dialogs = Arc::new(ScriptedDialogs::default());
        let renderer = RecordingRenderer::default();
        let screen = renderer.screen.clone();

        let workspace = Workspace::new(
            Settings::default(),
            sessions.clone(),
            documents.clone(),
            dialogs.clone(),
            Box::new(renderer),
        );

        Self {
            workspace,
            sessions,
            documents,
            dialogs,
            screen,
        }
    }

    pub fn label(&self, id: TabId) -> String {
        self.workspace
            .tab(id)
            .map(|tab| tab.label().text.clone())
            .unwrap_or_default()
    }

    pub fn screen(&self) -> std::sync::MutexGuard<'_, Screen> {
        self.screen.lock().unwrap()
    }
}
