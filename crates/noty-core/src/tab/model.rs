use super::buffer::{CursorPosition, EditorBuffer};
use super::event::TabEvent;
use crate::error::{NotyError, Result};
use crate::fingerprint::Fingerprint;
use crate::identity::{IdRegistry, TabId};
use crate::language::{DEFAULT_LANGUAGE, Language};
use crate::session::SessionTab;
use crate::settings::EditorSettings;
use crate::title::{PathBinding, TitleLabel, TitleResolver};

/// Registries shared by all tabs of a workspace.
///
/// Owned by whichever component owns the tab collection and lent to tabs
/// when they bind or release identity and labels.
#[derive(Debug, Default)]
pub struct Registries {
    pub ids: IdRegistry,
    pub titles: TitleResolver,
}

impl Registries {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Lifecycle state of a live tab.
///
/// Destruction consumes the tab (see [`Tab::destroy`]), so a destroyed tab
/// cannot be referenced afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    /// Visible and receiving input.
    Active,
    /// Open but not focused.
    Inactive,
    /// A close was requested and is waiting on the user's confirmation.
    Closing { previous: ClosingFrom },
}

/// State a closing tab returns to if the close is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosingFrom {
    Active,
    Inactive,
}

/// Parameters to open a tab.
#[derive(Debug, Clone, Default)]
pub struct TabParams {
    /// Identifier to restore; a fresh one is allocated when `None`.
    pub id: Option<TabId>,
    pub path: Option<String>,
    pub language: Option<String>,
    /// Fingerprint of the saved content; defaults to that of `content`.
    pub original_content: Option<Fingerprint>,
    pub cursor_position: Option<CursorPosition>,
    pub content: String,
}

impl TabParams {
    pub fn untitled(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn linked(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: Some(path.into()),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Parameters restoring a session record with its saved content.
    pub fn restored(record: SessionTab, content: String) -> Self {
        Self {
            id: Some(record.id),
            path: record.path,
            language: record.language,
            original_content: Some(record.original_content),
            cursor_position: Some(record.cursor_position),
            content,
        }
    }
}

/// What remains of a tab once destroyed: enough for a last persistence write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedTab {
    pub id: TabId,
    pub content: String,
    pub cursor: CursorPosition,
}

/// One open document.
pub struct Tab {
    id: TabId,
    binding: PathBinding,
    label: TitleLabel,
    language: Option<Language>,
    original: Fingerprint,
    buffer: Box<dyn EditorBuffer>,
    state: TabState,
    changed: bool,
    events: Vec<TabEvent>,
}

impl std::fmt::Debug for Tab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("binding", &self.binding)
            .field("label", &self.label.text)
            .field("language", &self.language)
            .field("state", &self.state)
            .field("changed", &self.changed)
            .finish_non_exhaustive()
    }
}

impl Tab {
    /// Opens a tab over `buffer`, registering its identity and binding its path.
    ///
    /// An unsupported language is not an error here: the tab is opened with
    /// no language and renders as plain text.
    ///
    /// # Errors
    ///
    /// Returns `NotyError::DuplicateTabId` if `params.id` is already taken.
    pub fn open(
        params: TabParams,
        buffer: Box<dyn EditorBuffer>,
        registries: &mut Registries,
    ) -> Result<Self> {
        let id = match params.id {
            Some(id) => {
                registries.ids.register(id)?;
                id
            }
            None => registries.ids.allocate()?,
        };

        let original = params
            .original_content
            .unwrap_or_else(|| Fingerprint::of(&params.content));

        let mut events = Vec::new();
        let (binding, label) = match params.path {
            Some(path) => {
                let resolution = registries.titles.bind_path(id, &path, None);
                events.extend(
                    resolution
                        .colliding
                        .into_iter()
                        .map(|sibling| TabEvent::Collision { id, sibling }),
                );
                (PathBinding::Linked(path), resolution.label)
            }
            None => {
                let ordinal = registries.titles.bind_untitled();
                (PathBinding::Untitled(ordinal), TitleLabel::untitled(ordinal))
            }
        };

        let mut tab = Self {
            id,
            binding,
            label,
            language: None,
            original,
            buffer,
            state: TabState::Inactive,
            changed: false,
            events,
        };

        if let Err(e) = tab.set_language(params.language.as_deref()) {
            tracing::debug!("Tab {} opened without language: {}", id, e);
        }

        tab.buffer.set_text(&params.content);
        if let Some(cursor) = params.cursor_position {
            tab.buffer.set_cursor(cursor);
        }
        tab.changed = tab.has_changes();

        Ok(tab)
    }

    pub fn id(&self) -> TabId {
        self.id
    }

    pub fn binding(&self) -> &PathBinding {
        &self.binding
    }

    pub fn path(&self) -> Option<&str> {
        self.binding.path()
    }

    pub fn label(&self) -> &TitleLabel {
        &self.label
    }

    pub fn language(&self) -> Option<Language> {
        self.language
    }

    pub fn original_content(&self) -> &Fingerprint {
        &self.original
    }

    pub fn content(&self) -> String {
        self.buffer.text()
    }

    pub fn cursor_position(&self) -> CursorPosition {
        self.buffer.cursor()
    }

    pub fn state(&self) -> TabState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TabState::Active
    }

    /// Changed status as last computed; see [`Tab::refresh_changed`].
    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Whether the buffer differs from the last saved content.
    pub fn has_changes(&self) -> bool {
        self.original.is_modified(&self.buffer.text())
    }

    /// Recomputes the changed status from the buffer's current content.
    ///
    /// Emits `ChangedStatus` when the status flips.
    pub fn refresh_changed(&mut self) -> bool {
        let changed = self.has_changes();
        if changed != self.changed {
            self.changed = changed;
            self.events.push(TabEvent::ChangedStatus {
                id: self.id,
                changed,
            });
        }
        changed
    }

    /// Binds this tab to `path`, replacing an untitled ordinal or a previous path.
    pub fn set_path(&mut self, path: String, titles: &mut TitleResolver) {
        let resolution = titles.bind_path(self.id, &path, Some(&self.binding));
        self.binding = PathBinding::Linked(path);

        for sibling in resolution.colliding {
            self.events.push(TabEvent::Collision {
                id: self.id,
                sibling,
            });
        }
        self.set_label(resolution.label);
    }

    /// Switches the label to the full path after a file-name collision.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the tab is not linked to a file; only
    /// linked tabs take part in collisions.
    pub fn use_full_path_label(&mut self) -> Result<()> {
        let path = self.binding.path().ok_or_else(|| {
            NotyError::internal(format!(
                "tab {} was asked to use its full path as a title, but it is not linked to a file",
                self.id
            ))
        })?;
        let label = TitleLabel::full_path(path);
        self.set_label(label);
        Ok(())
    }

    fn set_label(&mut self, label: TitleLabel) {
        if label != self.label {
            self.label = label.clone();
            self.events.push(TabEvent::LabelChanged { id: self.id, label });
        }
    }

    /// Sets the syntax language; `None` clears it.
    ///
    /// # Errors
    ///
    /// An unsupported name is rejected: the stored language is left untouched
    /// and the buffer is switched to the default mode for display only.
    pub fn set_language(&mut self, language: Option<&str>) -> Result<()> {
        let parsed = match language {
            None => None,
            Some(name) => match Language::parse(name) {
                Ok(language) => Some(language),
                Err(e) => {
                    tracing::warn!(
                        "Cannot use unsupported language \"{}\", falling back to \"{}\".",
                        name,
                        DEFAULT_LANGUAGE
                    );
                    self.buffer.set_syntax_mode(DEFAULT_LANGUAGE);
                    return Err(e);
                }
            },
        };

        self.language = parsed;
        self.buffer
            .set_syntax_mode(parsed.map_or(DEFAULT_LANGUAGE, |language| language.as_str()));
        Ok(())
    }

    /// Replaces the buffer content.
    ///
    /// With `mark_as_original`, the content also becomes the saved reference.
    /// With `notify`, an `Updated` event is emitted for the change.
    pub fn set_content(&mut self, content: &str, mark_as_original: bool, notify: bool) {
        if mark_as_original {
            self.original = Fingerprint::of(content);
        }

        self.buffer.set_text(content);

        if notify {
            self.notify_updated();
        }
    }

    /// Records that the buffer was edited in place by the UI.
    pub fn notify_updated(&mut self) {
        self.events.push(TabEvent::Updated { id: self.id });
    }

    /// Records `content` as written to disk.
    pub fn mark_saved(&mut self, content: &str) {
        self.original = Fingerprint::of(content);
        self.refresh_changed();
    }

    pub fn set_cursor_position(&mut self, position: CursorPosition) {
        self.buffer.set_cursor(position);
    }

    pub fn apply_settings(&mut self, settings: &EditorSettings) {
        self.buffer.apply_settings(settings);
    }

    /// Marks the tab active (focusing its buffer) or inactive.
    ///
    /// A closing tab keeps its state.
    pub fn set_active(&mut self, active: bool) {
        if matches!(self.state, TabState::Closing { .. }) {
            return;
        }

        if active {
            self.state = TabState::Active;
            self.buffer.focus();
        } else {
            self.state = TabState::Inactive;
        }
    }

    /// Enters `Closing`.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a close is already pending.
    pub fn begin_close(&mut self) -> Result<()> {
        let previous = match self.state {
            TabState::Active => ClosingFrom::Active,
            TabState::Inactive => ClosingFrom::Inactive,
            TabState::Closing { .. } => {
                return Err(NotyError::internal(format!(
                    "tab {} is already closing",
                    self.id
                )));
            }
        };
        self.state = TabState::Closing { previous };
        Ok(())
    }

    /// Leaves `Closing` for the state the close was requested from.
    pub fn cancel_close(&mut self) {
        if let TabState::Closing { previous } = self.state {
            self.state = match previous {
                ClosingFrom::Active => TabState::Active,
                ClosingFrom::Inactive => TabState::Inactive,
            };
        }
    }

    /// Destroys the tab, releasing its identity, untitled ordinal and file-name claim.
    pub fn destroy(self, registries: &mut Registries) -> ClosedTab {
        registries.titles.release(self.id, &self.binding);
        registries.ids.release(self.id);

        ClosedTab {
            id: self.id,
            content: self.buffer.text(),
            cursor: self.buffer.cursor(),
        }
    }

    /// Drains the events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<TabEvent> {
        std::mem::take(&mut self.events)
    }

    /// The session record describing this tab.
    pub fn snapshot(&self) -> SessionTab {
        SessionTab {
            id: self.id,
            path: self.binding.path().map(str::to_string),
            language: self.language.map(|language| language.as_str().to_string()),
            original_content: self.original.clone(),
            cursor_position: self.buffer.cursor(),
        }
    }
}
