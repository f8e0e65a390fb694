use crate::models::LinkRecord;

/// Container id for the one list the editor renders.
pub(crate) const LINK_LIST_CONTAINER: &str = "link-list";

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DropLocation {
    pub container: String,
    pub index: usize,
}

impl DropLocation {
    pub fn in_list(index: usize) -> Self {
        Self {
            container: LINK_LIST_CONTAINER.to_string(),
            index,
        }
    }
}

/// Outcome of a finished drag gesture.
///
/// `destination` is `None` when the item was dropped outside any row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct DropResult {
    pub source: DropLocation,
    pub destination: Option<DropLocation>,
}

/// Applies a finished drag to `records`.
///
/// Drops without a destination, or across containers, leave the list as is.
pub(crate) fn apply_drop(records: &[LinkRecord], drop: &DropResult) -> Vec<LinkRecord> {
    match &drop.destination {
        Some(dest) if dest.container == drop.source.container => {
            reorder(records, drop.source.index, Some(dest.index))
        }
        _ => records.to_vec(),
    }
}

/// Moves the record at `source` to `destination` and renumbers `sequence`
/// to match the new positions.
///
/// A destination past the end lands on the last slot. An out-of-range source,
/// a missing destination or `source == destination` return the input unchanged.
pub(crate) fn reorder(
    records: &[LinkRecord],
    source: usize,
    destination: Option<usize>,
) -> Vec<LinkRecord> {
    let Some(destination) = destination else {
        return records.to_vec();
    };
    if source >= records.len() || source == destination {
        return records.to_vec();
    }

    let mut out = records.to_vec();
    let moved = out.remove(source);
    let at = destination.min(out.len());
    out.insert(at, moved);
    renumber(&mut out);
    out
}

/// Rewrites every `sequence` to its positional index.
pub(crate) fn renumber(records: &mut [LinkRecord]) {
    for (i, r) in records.iter_mut().enumerate() {
        r.sequence = i;
    }
}
