use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub(crate) type LinkId = u64;

/// Where a link opens.
#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
pub(crate) enum LinkTarget {
    #[default]
    #[serde(rename = "_self")]
    #[strum(serialize = "_self")]
    SameWindow,

    #[serde(rename = "_blank")]
    #[strum(serialize = "_blank")]
    NewWindow,
}

/// One entry of the link list, persisted as-is inside the field's JSON array.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct LinkRecord {
    pub id: LinkId,

    /// Dense position key; equals the record's index after every mutation.
    pub sequence: usize,

    pub url: String,
    pub label: String,
    pub target: LinkTarget,
    pub visible: bool,
}

impl LinkRecord {
    pub fn blank(id: LinkId, sequence: usize) -> Self {
        Self {
            id,
            sequence,
            url: String::new(),
            label: String::new(),
            target: LinkTarget::SameWindow,
            visible: true,
        }
    }
}

/// Fetched details for one video. Never persisted by the widget itself.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct VideoMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Sibling fields on the host entry that the metadata extractor can fill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
pub(crate) enum EntryField {
    #[strum(serialize = "friendlyName")]
    FriendlyName,
    #[strum(serialize = "name")]
    Name,
    #[strum(serialize = "description")]
    Description,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_record_contract_deserialize() {
        let json = r#"{"id":1700000000000,"sequence":0,"url":"https://x","label":"Home","target":"_blank","visible":false}"#;
        let parsed: LinkRecord = serde_json::from_str(json).expect("record should parse");
        assert_eq!(parsed.id, 1_700_000_000_000);
        assert_eq!(parsed.target, LinkTarget::NewWindow);
        assert!(!parsed.visible);
    }

    #[test]
    fn test_link_target_serializes_to_html_values() {
        let v = serde_json::to_value(LinkRecord::blank(7, 3)).expect("should serialize");
        assert_eq!(v["target"], "_self");
        assert_eq!(v["sequence"], 3);
        assert_eq!(v["visible"], true);
        assert_eq!(v["url"], "");
    }

    #[test]
    fn test_link_target_parses_from_select_value() {
        assert_eq!("_blank".parse::<LinkTarget>().ok(), Some(LinkTarget::NewWindow));
        assert_eq!(LinkTarget::SameWindow.as_ref(), "_self");
        assert!("_parent".parse::<LinkTarget>().is_err());
    }

    #[test]
    fn test_entry_field_names_match_host_entry() {
        assert_eq!(EntryField::FriendlyName.as_ref(), "friendlyName");
        assert_eq!(EntryField::Description.to_string(), "description");
    }
}
