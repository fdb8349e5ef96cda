use std::collections::HashSet;
use std::sync::LazyLock;

/// Local parts that address a function or department rather than a person.
static ROLE_PREFIXES: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "abuse",
        "accounting",
        "admin",
        "administrator",
        "billing",
        "contact",
        "help",
        "helpdesk",
        "hostmaster",
        "info",
        "jobs",
        "legal",
        "mail",
        "marketing",
        "noc",
        "no-reply",
        "noreply",
        "office",
        "postmaster",
        "privacy",
        "root",
        "sales",
        "security",
        "support",
        "team",
        "webmaster",
    ]
    .into_iter()
    .collect()
});

/// Checks whether a local part is a role account (`admin`, `support`, ...).
///
/// Comparison is case-insensitive and ignores a `+tag` suffix, so
/// `Support+billing` is a role account.
///
/// # Examples
/// ```
/// use email_validator::validation::role::is_role;
///
/// assert!(is_role("admin"));
/// assert!(is_role("PostMaster"));
/// assert!(!is_role("jane.doe"));
/// ```
pub fn is_role(local_part: &str) -> bool {
    let base = local_part
        .split_once('+')
        .map_or(local_part, |(base, _)| base)
        .to_lowercase();
    ROLE_PREFIXES.contains(base.as_str())
}
