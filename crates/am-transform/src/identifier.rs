//! Sample identifier normalization.
//!
//! Sample identifiers must carry the institutional prefix
//! `102.100.100/`. Lab sheets arrive with a handful of known mangled
//! prefix variants, or with the bare short-form number and no prefix at
//! all. Identifiers are corrected best-effort; nothing here raises an
//! error, unparseable values are left for manual review downstream.

use am_model::{CellValue, Column};

/// The institutional prefix every canonical sample identifier starts with.
pub const CANONICAL_PREFIX: &str = "102.100.100/";

/// Mangled prefix variants seen on real lab sheets, in match order.
const MALFORMED_PREFIXES: [&str; 4] = ["100/", "102-100-100/", "102.100.100.", "102.100..100"];

/// A normalized identifier plus whether it needs manual review.
///
/// `needs_review` is set when the raw value matched no known malformed
/// prefix and the canonical prefix had to be bolted on unchanged — the
/// resulting identifier is plausible but unverified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedId {
    pub value: String,
    pub needs_review: bool,
}

/// Rewrite a raw identifier into canonical form.
///
/// A known malformed prefix at the start of the string is replaced with
/// the canonical prefix. After that, the canonical prefix is prepended
/// unless it already appears *anywhere* in the string — a substring
/// check, not an anchored one, kept bug-compatible with the established
/// process: an identifier carrying the prefix mid-string is passed
/// through untouched rather than re-prefixed.
///
/// Normalization is idempotent: the output always either starts with the
/// canonical prefix or contains it, and no malformed variant matches a
/// string starting with the canonical prefix.
pub fn normalize_sample_id(raw: &str) -> NormalizedId {
    for prefix in MALFORMED_PREFIXES {
        if let Some(rest) = raw.strip_prefix(prefix) {
            return NormalizedId {
                value: format!("{CANONICAL_PREFIX}{rest}"),
                needs_review: false,
            };
        }
    }
    if raw.contains(CANONICAL_PREFIX) {
        NormalizedId {
            value: raw.to_string(),
            needs_review: false,
        }
    } else {
        NormalizedId {
            value: format!("{CANONICAL_PREFIX}{raw}"),
            needs_review: true,
        }
    }
}

/// Normalize every populated cell of an identifier column in place.
///
/// Returns the corrected values that were auto-prefixed without matching
/// a known malformed variant, for review reporting.
pub fn normalize_column(column: &mut Column) -> Vec<String> {
    let mut review = Vec::new();
    for cell in &mut column.cells {
        let CellValue::Text(raw) = cell else {
            continue;
        };
        let normalized = normalize_sample_id(raw);
        if normalized.needs_review {
            review.push(normalized.value.clone());
        }
        *cell = CellValue::Text(normalized.value);
    }
    review
}
