mod editor;
pub(crate) mod reorder;

pub(crate) use editor::LinksEditor;

use crate::host::{BridgeError, FieldBridge};
use crate::models::{LinkId, LinkRecord, LinkTarget};
use reorder::{DropLocation, DropResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum LinksError {
    #[error("stored value is not a link list: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not encode link list: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Two-step delete: at most one record waits for confirmation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum PendingDelete {
    #[default]
    None,
    ArmedFor(LinkId),
}

impl PendingDelete {
    pub fn is_armed_for(&self, id: LinkId) -> bool {
        *self == PendingDelete::ArmedFor(id)
    }
}

/// A single-field change coming from a row input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum LinkEdit {
    Label(String),
    Url(String),
    Target(LinkTarget),
    ToggleVisible,
}

impl LinkEdit {
    /// Maps an input's `name` and current value to an edit.
    ///
    /// Unknown names and unknown target values yield `None`.
    pub fn from_input(name: &str, value: &str) -> Option<Self> {
        match name {
            "label" => Some(Self::Label(value.to_string())),
            "url" => Some(Self::Url(value.to_string())),
            "target" => value.parse().ok().map(Self::Target),
            "visible" => Some(Self::ToggleVisible),
            _ => None,
        }
    }

    fn apply(self, record: &mut LinkRecord) {
        match self {
            Self::Label(v) => record.label = v,
            Self::Url(v) => record.url = v,
            Self::Target(t) => record.target = t,
            Self::ToggleVisible => record.visible = !record.visible,
        }
    }
}

/// Last confirmed link list plus the delete marker.
///
/// The `with_*` methods only build candidate arrays; the list itself changes
/// when the store confirms a write (see [`save_records`]).
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct LinkList {
    records: Vec<LinkRecord>,
    pending_delete: PendingDelete,
}

impl LinkList {
    /// Parses a stored field value. An absent or blank value is an empty list.
    pub fn from_stored(value: Option<&str>) -> Result<Self, LinksError> {
        let records = match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(text) => serde_json::from_str(text).map_err(LinksError::Decode)?,
            None => Vec::new(),
        };
        Ok(Self {
            records,
            pending_delete: PendingDelete::None,
        })
    }

    pub fn records(&self) -> &[LinkRecord] {
        &self.records
    }

    pub fn get(&self, id: LinkId) -> Option<&LinkRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn position(&self, id: LinkId) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    pub fn pending_delete(&self) -> PendingDelete {
        self.pending_delete
    }

    /// Arms `id` for deletion, replacing any previously armed record.
    pub fn arm_delete(&mut self, id: LinkId) {
        self.pending_delete = PendingDelete::ArmedFor(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = PendingDelete::None;
    }

    /// Timestamp-based id that never collides with an existing one.
    pub fn next_id(&self, now_ms: u64) -> LinkId {
        let floor = self
            .records
            .iter()
            .map(|r| r.id)
            .max()
            .map_or(0, |max| max.saturating_add(1));
        now_ms.max(floor)
    }

    pub fn with_added(&self, id: LinkId) -> Vec<LinkRecord> {
        let mut out = self.records.clone();
        out.push(LinkRecord::blank(id, self.records.len()));
        out
    }

    pub fn with_edit(&self, id: LinkId, edit: LinkEdit) -> Option<Vec<LinkRecord>> {
        let idx = self.position(id)?;
        let mut out = self.records.clone();
        edit.apply(&mut out[idx]);
        Some(out)
    }

    pub fn without(&self, id: LinkId) -> Option<Vec<LinkRecord>> {
        self.position(id)?;
        Some(
            self.records
                .iter()
                .filter(|r| r.id != id)
                .cloned()
                .collect(),
        )
    }

    /// Drop of `dragged` onto the row holding `over`, or outside every row
    /// when `over` is `None`. Positions come from the current order, so a
    /// list that changed mid-drag still moves the record that was picked up.
    pub fn drop_of(&self, dragged: LinkId, over: Option<LinkId>) -> Option<DropResult> {
        let source = self.position(dragged)?;
        Some(DropResult {
            source: DropLocation::in_list(source),
            destination: over
                .and_then(|id| self.position(id))
                .map(DropLocation::in_list),
        })
    }

    /// Candidate order after a drag, or `None` when the drop changes nothing.
    pub fn with_drop(&self, drop: &DropResult) -> Option<Vec<LinkRecord>> {
        let out = reorder::apply_drop(&self.records, drop);
        (out != self.records).then_some(out)
    }
}

pub(crate) fn encode(records: &[LinkRecord]) -> Result<String, LinksError> {
    serde_json::to_string(records).map_err(LinksError::Encode)
}

/// Writes the whole list and rebuilds state from what the store returned.
///
/// The store's answer is authoritative: the local candidate is discarded.
pub(crate) async fn save_records<B: FieldBridge>(
    bridge: &B,
    records: &[LinkRecord],
) -> Result<LinkList, LinksError> {
    let stored = bridge.save(encode(records)?).await?;
    LinkList::from_stored(stored.as_deref())
}

/// State after a save settles: the store's list on success, `current`
/// untouched (delete marker included) on failure.
pub(crate) fn adopt(current: &LinkList, outcome: Result<LinkList, LinksError>) -> LinkList {
    match outcome {
        Ok(next) => {
            log::info!("Successfully updated value");
            next
        }
        Err(e) => {
            log::error!("failed to store links: {e}");
            current.clone()
        }
    }
}
