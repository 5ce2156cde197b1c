//! Compound name normalization.
//!
//! PubChem's name endpoint does not resolve Greek letters, so the four
//! letters that show up in common compound names are spelled out before
//! lookup. The same normalized name is then percent-encoded for use in a URL
//! path segment or in the web query link written to the report.

use serde::{Deserialize, Serialize};

/// Literal replacements applied by [`normalize`]. The keys are disjoint, so
/// application order does not matter.
const GREEK_SUBSTITUTIONS: [(char, &str); 4] = [
    ('α', "alpha"),
    ('β', "beta"),
    ('γ', "gamma"),
    ('δ', "delta"),
];

/// How a normalized name is percent-encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PercentEncoding {
    /// Only comma (`%2c`) and space (`%20`) are escaped. Every other
    /// reserved character passes through untouched.
    Legacy,
    /// Everything outside the RFC 3986 unreserved set is escaped.
    #[default]
    Full,
}

/// Spell out the Greek letters in a compound name.
///
/// Empty input yields an empty string. Names without any of the target
/// letters are returned unchanged.
pub fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    for ch in name.chars() {
        match GREEK_SUBSTITUTIONS.iter().find(|(greek, _)| *greek == ch) {
            Some((_, latin)) => out.push_str(latin),
            None => out.push(ch),
        }
    }
    out
}

/// Normalize `name`, then percent-encode it according to `mode`.
///
/// Both modes escape every space and comma.
pub fn url_encode(name: &str, mode: PercentEncoding) -> String {
    let normalized = normalize(name);
    match mode {
        PercentEncoding::Legacy => normalized.replace(',', "%2c").replace(' ', "%20"),
        PercentEncoding::Full => urlencoding::encode(&normalized).into_owned(),
    }
}
