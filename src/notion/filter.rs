// src/notion/filter.rs

use serde::Serialize;

/// Database query filter, serialized in the store's filter syntax.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryFilter {
    Relation {
        property: String,
        relation: RelationCondition,
    },
    Or {
        or: Vec<QueryFilter>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationCondition {
    pub contains: String,
}

impl QueryFilter {
    /// Matches records whose relation `property` references `page_id`.
    pub fn relation_contains(property: &str, page_id: &str) -> Self {
        QueryFilter::Relation {
            property: property.to_string(),
            relation: RelationCondition {
                contains: page_id.to_string(),
            },
        }
    }

    pub fn or(filters: Vec<QueryFilter>) -> Self {
        QueryFilter::Or { or: filters }
    }

    /// Builds the lecture filter: nothing for no ids, a bare condition for one,
    /// an OR of conditions for several.
    pub fn any_relation(property: &str, page_ids: &[String]) -> Option<Self> {
        let mut filters: Vec<QueryFilter> = page_ids
            .iter()
            .map(|id| QueryFilter::relation_contains(property, id))
            .collect();

        match filters.len() {
            0 => None,
            1 => filters.pop(),
            _ => Some(QueryFilter::or(filters)),
        }
    }
}
