//! Extracted page context.

use serde::{Deserialize, Serialize};

use super::Locator;

/// One addressable item produced by a single extraction pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageContextItem {
    /// A visible text fragment outside any form control or label.
    Text {
        order: u64,
        locator: Locator,
        content: String,
    },
    /// A visible form control.
    FormField {
        order: u64,
        locator: Locator,
        field: FormField,
    },
}

impl PageContextItem {
    /// Position in the traversal that produced this item.
    pub fn order(&self) -> u64 {
        match self {
            Self::Text { order, .. } | Self::FormField { order, .. } => *order,
        }
    }

    pub fn locator(&self) -> &Locator {
        match self {
            Self::Text { locator, .. } | Self::FormField { locator, .. } => locator,
        }
    }

    pub fn as_form_field(&self) -> Option<&FormField> {
        match self {
            Self::FormField { field, .. } => Some(field),
            Self::Text { .. } => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            Self::FormField { .. } => None,
        }
    }
}

/// Sort items by traversal order. Stable, so equal orders keep their position.
pub fn sort_by_order(items: &mut [PageContextItem]) {
    items.sort_by_key(PageContextItem::order);
}

/// Description of one form control as seen at extraction time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Lower-case tag name (`input`, `textarea`, `select`).
    pub tag: String,

    /// Control kind: the input `type` (defaulting to `text`) or the tag name.
    pub control_kind: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// First match of: `label[for]`, preceding sibling label, enclosing label,
    /// `aria-label`, `aria-labelledby`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    #[serde(default)]
    pub current_value: String,

    /// Only present for radio and checkbox controls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checked: Option<bool>,

    /// Only non-empty for select controls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectChoice>,

    /// Same as the owning item's locator; repeated so the structured field
    /// list handed to the model is self-contained.
    pub selector: Locator,
}

impl FormField {
    /// The id if present, else the name.
    pub fn identifier(&self) -> Option<&str> {
        self.id
            .as_deref()
            .filter(|id| !id.is_empty())
            .or_else(|| self.name.as_deref().filter(|name| !name.is_empty()))
    }

    pub fn is_checkable(&self) -> bool {
        matches!(self.control_kind.as_str(), "checkbox" | "radio")
    }
}

/// One `<option>` of a select control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectChoice {
    pub text: String,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: Option<&str>, name: Option<&str>) -> FormField {
        FormField {
            tag: "input".into(),
            control_kind: "text".into(),
            id: id.map(String::from),
            name: name.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_identifier_prefers_id() {
        assert_eq!(field(Some("email"), Some("mail")).identifier(), Some("email"));
        assert_eq!(field(None, Some("mail")).identifier(), Some("mail"));
        assert_eq!(field(Some(""), Some("mail")).identifier(), Some("mail"));
        assert_eq!(field(None, None).identifier(), None);
    }

    #[test]
    fn test_sort_by_order() {
        let mut items = vec![
            PageContextItem::Text {
                order: 9,
                locator: Locator::body(),
                content: "second paragraph".into(),
            },
            PageContextItem::FormField {
                order: 3,
                locator: Locator::by_id("a").unwrap(),
                field: field(Some("a"), None),
            },
        ];
        sort_by_order(&mut items);
        assert_eq!(items[0].order(), 3);
        assert_eq!(items[1].order(), 9);
    }

    #[test]
    fn test_item_serialization_is_tagged() {
        let item = PageContextItem::Text {
            order: 1,
            locator: Locator::body(),
            content: "Welcome to the form".into(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["locator"], "/html/body");

        let back: PageContextItem = serde_json::from_value(json).unwrap();
        assert_eq!(back.as_text(), Some("Welcome to the form"));
    }

    #[test]
    fn test_checked_omitted_for_text_fields() {
        let json = serde_json::to_value(field(Some("a"), None)).unwrap();
        assert!(json.get("checked").is_none());
        assert!(json.get("options").is_none());
    }
}
