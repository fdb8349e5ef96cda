//! Built-in list of well-known disposable mail providers.
//!
//! This list ships with the binary and is always available. The much larger
//! externally sourced list lives in [`super::blocklist`].

use std::collections::HashSet;
use std::sync::LazyLock;

static LOCAL_DISPOSABLE_DOMAINS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "10minutemail.com",
        "20minutemail.com",
        "discard.email",
        "dispostable.com",
        "fakeinbox.com",
        "getairmail.com",
        "getnada.com",
        "guerrillamail.com",
        "guerrillamail.net",
        "guerrillamailblock.com",
        "mailcatch.com",
        "maildrop.cc",
        "mailinator.com",
        "mailnesia.com",
        "mintemail.com",
        "mohmal.com",
        "sharklasers.com",
        "spamgourmet.com",
        "temp-mail.org",
        "tempmail.com",
        "tempmailo.com",
        "throwawaymail.com",
        "trashmail.com",
        "yopmail.com",
    ]
    .into_iter()
    .collect()
});

/// Returns `true` when `domain` (or a parent of it) is on the built-in list.
pub fn is_locally_disposable(domain: &str) -> bool {
    let domain = domain.to_lowercase();
    parent_domains(&domain).any(|candidate| LOCAL_DISPOSABLE_DOMAINS.contains(candidate))
}

/// Yields `domain` followed by each of its parent domains that still has at
/// least two labels: `a.b.example.com`, `b.example.com`, `example.com`.
pub fn parent_domains(domain: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(domain);
    std::iter::from_fn(move || {
        let current = next?;
        next = current
            .split_once('.')
            .map(|(_, parent)| parent)
            .filter(|parent| parent.contains('.'));
        Some(current)
    })
}
