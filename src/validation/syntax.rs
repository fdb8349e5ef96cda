/// Maximum length of a full address (RFC 5321).
const MAX_ADDRESS_LEN: usize = 254;
/// Maximum length of the local part (RFC 5321).
const MAX_LOCAL_LEN: usize = 64;
/// Maximum length of a domain name (RFC 1035).
const MAX_DOMAIN_LEN: usize = 253;
/// Maximum length of a single domain label (RFC 1035).
const MAX_LABEL_LEN: usize = 63;

/// Validates an email address against a conservative dot-atom grammar.
///
/// Accepted addresses have:
/// - exactly one `@`
/// - a dot-atom local part (RFC 5322 atext characters, no leading, trailing
///   or doubled dots)
/// - a domain of at least two labels, each made of alphanumerics and inner
///   hyphens, with a non-numeric top-level label
///
/// Quoted local parts and domain literals (`user@[192.0.2.1]`) are rejected:
/// neither can be checked for deliverability through DNS.
///
/// # Examples
/// ```
/// use email_validator::validation::syntax::is_valid_email;
///
/// assert!(is_valid_email("user.name+tag@example.com"));
/// assert!(is_valid_email("Pelé@exämple.中国"));
/// assert!(!is_valid_email("invalid@ex_mple.com"));
/// assert!(!is_valid_email("bad-address"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > MAX_ADDRESS_LEN {
        return false;
    }

    let Some((local_part, domain)) = split_address(email) else {
        return false;
    };

    if local_part.contains('@') {
        return false;
    }

    is_valid_local_part(local_part) && is_valid_domain(domain)
}

/// Splits an address on its last `@` into `(local_part, domain)`.
///
/// Returns `None` when there is no `@`. Does not validate either half.
pub fn split_address(email: &str) -> Option<(&str, &str)> {
    email.rsplit_once('@')
}

/// Validates the local-part component of an email address (dot-atom form).
fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty() && local.len() <= MAX_LOCAL_LEN && is_valid_dot_atom(local, false)
}

/// Validates the domain component of an email address.
pub fn is_valid_domain(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > MAX_DOMAIN_LEN {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let tld = labels[labels.len() - 1];
    if tld.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    labels.iter().all(|label| {
        label.len() <= MAX_LABEL_LEN
            && !label.starts_with('-')
            && !label.ends_with('-')
            && is_valid_dot_atom(label, true)
    })
}

/// Validates dot-atom format from RFC 5322 section 3.4.1
///
/// * `is_domain` - Enforces stricter rules for domain validation
fn is_valid_dot_atom(s: &str, is_domain: bool) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return false;
    }

    parts.iter().all(|part| {
        part.chars().all(|c| match c {
            c if is_domain => c.is_alphanumeric() || c == '-',
            _ => c.is_alphanumeric() || "!#$%&'*+-/=?^_`{|}~".contains(c),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_standard_emails() {
        assert!(is_valid_email("simple@example.com"));
        assert!(is_valid_email("very.common@example.com"));
        assert!(is_valid_email("x@example.com"));
        assert!(is_valid_email("user+promo@gmail.com"));
        assert!(is_valid_email("test@sub.domain.co.uk"));
    }

    #[test]
    fn valid_special_chars() {
        assert!(is_valid_email("!#$%&'*+-/=?^_`{}|~@example.com"));
    }

    #[test]
    fn valid_international() {
        assert!(is_valid_email("Pelé@exämple.中国"));
        assert!(is_valid_email("用户@例子.中国"));
    }

    #[test]
    fn valid_edge_cases() {
        let max_local = "a".repeat(64);
        assert!(is_valid_email(&format!("{}@example.com", max_local)));

        let local = "a".repeat(64);
        let label = "b".repeat(63);
        let domain = format!("{}.{}.{}", label, label, "c".repeat(61));
        assert_eq!(local.len() + 1 + domain.len(), 254);
        assert!(is_valid_email(&format!("{}@{}", local, domain)));
    }

    #[test]
    fn invalid_missing_or_extra_at() {
        assert!(!is_valid_email("bad-address"));
        assert!(!is_valid_email("missing@"));
        assert!(!is_valid_email("@missing.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("a@b@example.com"));
    }

    #[test]
    fn invalid_lengths() {
        let long_local = "a".repeat(65);
        assert!(!is_valid_email(&format!("{}@example.com", long_local)));

        let local = "a".repeat(64);
        let domain = format!("{}.com", "b".repeat(186));
        assert!(!is_valid_email(&format!("{}@{}", local, domain)));
    }

    #[test]
    fn invalid_local_parts() {
        assert!(!is_valid_email("no..dots@example.com"));
        assert!(!is_valid_email(".leading@example.com"));
        assert!(!is_valid_email("trailing.@example.com"));
        assert!(!is_valid_email("spaces unquoted@example.com"));
        assert!(!is_valid_email("\"quoted\"@example.com"));
    }

    #[test]
    fn invalid_domains() {
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@-hyphenstart.com"));
        assert!(!is_valid_email("user@hyphenend-.com"));
        assert!(!is_valid_email("user@.leadingdot.com"));
        assert!(!is_valid_email("user@double..dot.com"));
        assert!(!is_valid_email("user@_invalidchar.com"));
        assert!(!is_valid_email("user@example.com."));
        assert!(!is_valid_email("user@127.0.0.1"));
        assert!(!is_valid_email("user@[192.168.0.1]"));
    }

    #[test]
    fn invalid_special_cases() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("   "));
        assert!(!is_valid_email("@"));
    }

    #[test]
    fn case_handling() {
        assert!(is_valid_email("USER@EXAMPLE.COM"));
        assert!(is_valid_email("User@Example.com"));
    }

    #[test]
    fn split_uses_last_at() {
        assert_eq!(split_address("user@example.com"), Some(("user", "example.com")));
        assert_eq!(split_address("a@b@c.com"), Some(("a@b", "c.com")));
        assert_eq!(split_address("no-at"), None);
    }
}
