// src/translate/sanitize.rs

//! Name sanitization for Argo / Kubernetes (DNS-1123 label) names.

use std::sync::LazyLock;

use regex::Regex;

/// Returned for empty input, or when nothing usable survives normalization.
pub const FALLBACK_NAME: &str = "unnamed";

/// Kubernetes label length limit.
pub const MAX_NAME_LEN: usize = 63;

static NON_DNS_SAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9-]+").expect("static regex is valid"));

/// Normalize arbitrary text into a DNS-label-safe identifier.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9-]` into a
/// single `-`, trims `-` from both ends and truncates to 63 characters. The
/// result always matches `^[a-z0-9-]{1,63}$` and `sanitize(sanitize(x)) ==
/// sanitize(x)`.
pub fn sanitize(name: &str) -> String {
    if name.is_empty() {
        return FALLBACK_NAME.to_string();
    }

    let lowered = name.to_lowercase();
    let replaced = NON_DNS_SAFE.replace_all(&lowered, "-");
    let trimmed = replaced.trim_matches('-');

    // Only ASCII is left at this point, so byte slicing is safe.
    let truncated = if trimmed.len() > MAX_NAME_LEN {
        trimmed[..MAX_NAME_LEN].trim_end_matches('-')
    } else {
        trimmed
    };

    if truncated.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        truncated.to_string()
    }
}
