use serde::Serialize;

/// Comparison operator carried by a filter leaf.
///
/// The filter bar only ever issues substring matches; evaluation is owned by
/// the target widget, including its case-sensitivity rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterOperator {
    Contains,
}

/// A filter expression tree: either a single field match or an OR over
/// child expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterExpr {
    Match {
        field: String,
        operator: FilterOperator,
        value: String,
    },
    Any(Vec<FilterExpr>),
}

impl FilterExpr {
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        FilterExpr::Match {
            field: field.into(),
            operator: FilterOperator::Contains,
            value: value.into(),
        }
    }
}

/// Capability exposed by anything that can have row filters applied to it:
/// a work-list handle or a table row binding.
///
/// An empty slice means "no filter" and must reset the target so that every
/// row passes.
pub trait Filterable: Send + Sync {
    fn filter(&self, filters: &[FilterExpr]);
}

/// Fields searched when the work-list handle itself is filterable.
pub const PRIMARY_ORDER_FIELDS: &[&str] = &["order", "shopOrder"];

/// Fields searched when falling back to raw table bindings, where backends
/// disagree on casing.
pub const FALLBACK_ORDER_FIELDS: &[&str] = &["order", "shopOrder", "ORDER", "SHOP_ORDER"];

/// Build the filter set for a search string: one OR combinator with a
/// `Contains` leaf per field.
///
/// A blank (empty after trim) search string yields the empty set, which
/// clears any previously applied filter.
pub fn build_contains_any(search_text: &str, fields: &[&str]) -> Vec<FilterExpr> {
    let needle = search_text.trim();
    if needle.is_empty() {
        return Vec::new();
    }
    let leaves = fields
        .iter()
        .map(|field| FilterExpr::contains(*field, needle))
        .collect();
    vec![FilterExpr::Any(leaves)]
}
