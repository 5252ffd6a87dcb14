//! Layout detection: classify a table's column set against the known
//! lab report layouts.

use am_model::{LayoutSpec, RawTable};
use tracing::debug;

/// Match a table against the layout registry.
///
/// Column names are compared with trailing whitespace trimmed. A layout
/// matches when every one of its required columns is present; extra
/// incoming columns do not disqualify a match (they are accounted for
/// later by the mapper). Layouts are tried in registry order and the
/// first match wins, which makes the priority on any overlap explicit
/// and deterministic.
pub fn detect_layout<'a>(layouts: &'a [LayoutSpec], table: &RawTable) -> Option<&'a LayoutSpec> {
    let incoming: Vec<&str> = table
        .columns
        .iter()
        .map(|column| column.name.trim_end())
        .collect();
    let detected = layouts.iter().find(|layout| layout.matches(&incoming));
    match detected {
        Some(layout) => debug!(layout = %layout.name, "layout detected"),
        None => debug!(column_count = incoming.len(), "no layout matched"),
    }
    detected
}
