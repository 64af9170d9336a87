//! Rendering of equality filters into PocketBase filter syntax.

use crate::domain::ports::{FieldFilter, SortOrder};

/// Render `field='value'`, escaping the value as a single-quoted literal.
pub(super) fn render_filter(filter: &FieldFilter) -> String {
    format!("{}='{}'", filter.field(), escape_literal(filter.value()))
}

pub(super) fn render_sort(sort: SortOrder) -> &'static str {
    match sort {
        SortOrder::NewestFirst => "-created",
        SortOrder::OldestFirst => "created",
    }
}

fn escape_literal(raw: &str) -> String {
    raw.replace('\\', r"\\").replace('\'', r"\'")
}
