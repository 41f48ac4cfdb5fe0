//! RFC 1123 hostname-syntax validation.
//!
//! Used by the CLI to reject namespace and service arguments that could
//! never name a real service before they are baked into a patch value.

/// Check `hostname` against RFC 1123 syntax rules.
///
/// Labels are 1–63 characters of ASCII letters, digits, and hyphens, with
/// no leading or trailing hyphen; the whole name is at most 255 characters;
/// a single trailing dot (FQDN form) is tolerated. Case is irrelevant.
pub fn is_valid_hostname(hostname: &str) -> bool {
    if hostname.len() > 255 {
        return false;
    }
    let hostname = hostname.strip_suffix('.').unwrap_or(hostname);
    if hostname.is_empty() || hostname.starts_with('.') || hostname.contains("..") {
        return false;
    }
    hostname.split('.').all(is_valid_label)
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > 63 {
        return false;
    }
    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }
    label
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
}

// ── Tests ─────────────────────────────────────────────────────────────────
