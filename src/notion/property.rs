// src/notion/property.rs

use serde::Deserialize;

/// A page property, discriminated by the `type` the store declares for it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Select {
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Status {
        status: Option<SelectOption>,
    },
    Relation {
        #[serde(default)]
        relation: Vec<PageReference>,
    },
    Url {
        url: Option<String>,
    },
    Number {
        number: Option<f64>,
    },
    /// Property types the quiz database does not use (dates, files, people...).
    #[serde(other)]
    Unsupported,
}

/// One run of rich text. Only the rendered text is kept.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageReference {
    pub id: String,
}

impl PropertyValue {
    /// Flattens the property to a display string.
    ///
    /// Numbers use Rust's `f64` formatting: whole numbers drop the fraction
    /// and large values are written out in full (`1e21` becomes
    /// `1000000000000000000000`), never in exponent notation.
    pub fn as_text(&self) -> String {
        match self {
            PropertyValue::Title { title: runs } | PropertyValue::RichText { rich_text: runs } => {
                runs.iter().map(|r| r.plain_text.as_str()).collect()
            }
            PropertyValue::Select { select: option } | PropertyValue::Status { status: option } => {
                option.as_ref().map(|o| o.name.clone()).unwrap_or_default()
            }
            PropertyValue::MultiSelect { multi_select } => multi_select
                .iter()
                .map(|o| o.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            PropertyValue::Relation { relation } => relation
                .iter()
                .map(|r| r.id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            PropertyValue::Url { url } => url.clone().unwrap_or_default(),
            PropertyValue::Number { number } => number.map(|n| n.to_string()).unwrap_or_default(),
            PropertyValue::Unsupported => String::new(),
        }
    }

    /// Ids of the referenced pages; empty unless this is a relation.
    pub fn relation_ids(&self) -> Vec<String> {
        match self {
            PropertyValue::Relation { relation } => relation.iter().map(|r| r.id.clone()).collect(),
            _ => Vec::new(),
        }
    }
}
