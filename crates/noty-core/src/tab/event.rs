use crate::identity::TabId;
use crate::title::TitleLabel;

/// Notifications a tab emits for the coordinator owning it.
///
/// Tabs perform no I/O; persistence timing and rendering updates happen
/// where these events are consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabEvent {
    /// The buffer content changed: recompute the changed status and
    /// schedule an autosave.
    Updated { id: TabId },
    /// The displayed label changed.
    LabelChanged { id: TabId, label: TitleLabel },
    /// The changed-since-saved status flipped.
    ChangedStatus { id: TabId, changed: bool },
    /// `id` now shows the same file name as `sibling`; the sibling must
    /// switch to its full path.
    Collision { id: TabId, sibling: TabId },
}
