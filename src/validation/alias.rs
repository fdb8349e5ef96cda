use super::syntax::split_address;

/// Providers that deliver `j.doe` and `jdoe` to the same mailbox, with the
/// domain they canonicalize to.
const DOT_INSENSITIVE_DOMAINS: &[(&str, &str)] =
    &[("gmail.com", "gmail.com"), ("googlemail.com", "gmail.com")];

/// Returns the canonical form of an address.
///
/// - the address is lower-cased
/// - a `+tag` sub-address is removed from the local part
/// - for dot-insensitive providers, dots are removed from the local part and
///   the domain is mapped to the provider's primary domain
///
/// Input without an `@` is returned lower-cased and otherwise untouched.
///
/// # Examples
/// ```
/// use email_validator::validation::alias::canonicalize;
///
/// assert_eq!(canonicalize("user+promo@gmail.com"), "user@gmail.com");
/// assert_eq!(canonicalize("j.doe@googlemail.com"), "jdoe@gmail.com");
/// assert_eq!(canonicalize("j.doe+x@example.com"), "j.doe@example.com");
/// ```
pub fn canonicalize(address: &str) -> String {
    let address = address.trim().to_lowercase();
    let Some((local_part, domain)) = split_address(&address) else {
        return address;
    };

    let local_part = local_part
        .split_once('+')
        .map_or(local_part, |(base, _)| base);

    match DOT_INSENSITIVE_DOMAINS
        .iter()
        .find(|(provider, _)| *provider == domain)
    {
        Some((_, primary)) => format!("{}@{}", local_part.replace('.', ""), primary),
        None => format!("{}@{}", local_part, domain),
    }
}

/// Whether canonicalization changes the address, ignoring letter case.
pub fn is_alias(address: &str) -> bool {
    canonicalize(address) != address.trim().to_lowercase()
}
