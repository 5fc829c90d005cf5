//! Display labels for tabs.
//!
//! Untitled tabs get sequential ordinals (`Untitled-1`, `Untitled-2`, ...).
//! Linked tabs are labelled with their file name, unless another open tab
//! shows the same file name, in which case both show their full path.

use crate::identity::TabId;
use std::collections::{BTreeMap, BTreeSet};

pub const UNTITLED_PREFIX: &str = "Untitled-";

/// Tooltip of a tab not linked to any file.
pub const UNLINKED_TOOLTIP: &str = "<not linked to any file>";

/// How a tab relates to the file system.
///
/// A tab is either linked to a path or holds a reserved untitled ordinal,
/// never both and never neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathBinding {
    Linked(String),
    Untitled(u32),
}

impl PathBinding {
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Linked(path) => Some(path),
            Self::Untitled(_) => None,
        }
    }

    pub fn untitled_ordinal(&self) -> Option<u32> {
        match self {
            Self::Linked(_) => None,
            Self::Untitled(ordinal) => Some(*ordinal),
        }
    }
}

/// Text shown on a tab strip, plus its hover tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleLabel {
    pub text: String,
    pub tooltip: String,
}

impl TitleLabel {
    pub fn untitled(ordinal: u32) -> Self {
        Self {
            text: format!("{}{}", UNTITLED_PREFIX, ordinal),
            tooltip: UNLINKED_TOOLTIP.to_string(),
        }
    }

    pub fn full_path(path: &str) -> Self {
        Self {
            text: path.to_string(),
            tooltip: path.to_string(),
        }
    }
}

/// Result of binding a tab to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolution {
    pub label: TitleLabel,
    /// Other tabs showing the same file name; each must switch to its full path.
    pub colliding: Vec<TabId>,
}

/// Final segment of `path`, splitting on both `/` and `\`.
pub fn last_segment(path: &str) -> &str {
    path.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Tracks untitled ordinals and file-name claims across all open tabs.
#[derive(Debug, Default)]
pub struct TitleResolver {
    untitled: BTreeSet<u32>,
    segments: BTreeMap<String, Vec<TabId>>,
}

impl TitleResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserves the next untitled ordinal: one past the highest held.
    ///
    /// Gaps left by closed tabs below the maximum are not back-filled.
    pub fn bind_untitled(&mut self) -> u32 {
        let ordinal = self.untitled.last().copied().unwrap_or(0) + 1;
        self.untitled.insert(ordinal);
        ordinal
    }

    pub fn release_untitled(&mut self, ordinal: u32) {
        self.untitled.remove(&ordinal);
    }

    /// Binds `tab` to `path` and computes its label.
    ///
    /// `previous` is the tab's binding before this call: an untitled ordinal is
    /// released and an earlier file-name claim is dropped. A collision is not
    /// undone for the sibling when this tab moves away; it keeps its full path.
    pub fn bind_path(
        &mut self,
        tab: TabId,
        path: &str,
        previous: Option<&PathBinding>,
    ) -> PathResolution {
        match previous {
            Some(PathBinding::Untitled(ordinal)) => self.release_untitled(*ordinal),
            Some(PathBinding::Linked(_)) => self.unregister(tab),
            None => {}
        }

        let segment = last_segment(path);
        let claims = self.segments.entry(segment.to_string()).or_default();
        let colliding: Vec<TabId> = claims.iter().copied().filter(|other| *other != tab).collect();
        if !claims.contains(&tab) {
            claims.push(tab);
        }

        let label = if colliding.is_empty() {
            TitleLabel {
                text: segment.to_string(),
                tooltip: path.to_string(),
            }
        } else {
            tracing::debug!(
                "File name \"{}\" is shown by {} other tab(s), using full path",
                segment,
                colliding.len()
            );
            TitleLabel::full_path(path)
        };

        PathResolution { label, colliding }
    }

    /// Removes every file-name claim held by `tab`.
    pub fn unregister(&mut self, tab: TabId) {
        self.segments.retain(|_, claims| {
            claims.retain(|claimant| *claimant != tab);
            !claims.is_empty()
        });
    }

    /// Releases everything held through `binding` by `tab`.
    pub fn release(&mut self, tab: TabId, binding: &PathBinding) {
        match binding {
            PathBinding::Untitled(ordinal) => self.release_untitled(*ordinal),
            PathBinding::Linked(_) => self.unregister(tab),
        }
    }

    pub fn untitled_ordinals(&self) -> impl Iterator<Item = u32> + '_ {
        self.untitled.iter().copied()
    }

    /// Tabs currently claiming `segment` as their file name.
    pub fn claimants(&self, segment: &str) -> &[TabId] {
        self.segments.get(segment).map(Vec::as_slice).unwrap_or(&[])
    }
}
