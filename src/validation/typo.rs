use textdistance::str::levenshtein;
use tracing::debug;

/// Largest edit distance still considered a typo.
pub const DEFAULT_MAX_DISTANCE: usize = 2;

const COMMON_PROVIDERS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "aol.com",
    "icloud.com",
    "live.com",
    "msn.com",
    "protonmail.com",
    "gmx.com",
    "yandex.com",
    "mail.com",
    "zoho.com",
    "comcast.net",
    "yahoo.co.uk",
    "hotmail.co.uk",
];

/// Suggests the common provider a misspelled domain most likely meant.
#[derive(Debug, Clone)]
pub struct TypoSuggester {
    providers: Vec<String>,
    max_distance: usize,
}

impl Default for TypoSuggester {
    fn default() -> Self {
        Self::new(
            COMMON_PROVIDERS.iter().map(|p| p.to_string()).collect(),
            DEFAULT_MAX_DISTANCE,
        )
    }
}

impl TypoSuggester {
    pub fn new(providers: Vec<String>, max_distance: usize) -> Self {
        Self {
            providers,
            max_distance,
        }
    }

    /// Returns the closest provider when it is within the distance threshold
    /// and strictly closer than every other provider. Exact matches and ties
    /// yield no suggestion.
    pub fn suggest(&self, domain: &str) -> Option<String> {
        let domain = domain.trim().to_lowercase();

        let mut best: Option<(&str, usize)> = None;
        let mut runner_up = usize::MAX;

        for provider in &self.providers {
            let distance = levenshtein(&domain, provider);
            match best {
                Some((_, best_distance)) if distance >= best_distance => {
                    runner_up = runner_up.min(distance);
                }
                _ => {
                    if let Some((_, previous)) = best {
                        runner_up = runner_up.min(previous);
                    }
                    best = Some((provider.as_str(), distance));
                }
            }
        }

        let (provider, distance) = best?;
        if distance == 0 || distance > self.max_distance || distance >= runner_up {
            return None;
        }

        debug!(
            "Suggesting {} for {} (distance: {})",
            provider, domain, distance
        );
        Some(provider.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obvious_typos() {
        let suggester = TypoSuggester::default();

        assert_eq!(suggester.suggest("gmial.com").as_deref(), Some("gmail.com"));
        assert_eq!(suggester.suggest("gmail.con").as_deref(), Some("gmail.com"));
        assert_eq!(suggester.suggest("hotmial.com").as_deref(), Some("hotmail.com"));
        assert_eq!(suggester.suggest("yahooo.com").as_deref(), Some("yahoo.com"));
    }

    #[test]
    fn test_exact_provider_has_no_suggestion() {
        let suggester = TypoSuggester::default();
        assert_eq!(suggester.suggest("gmail.com"), None);
        assert_eq!(suggester.suggest("GMAIL.COM"), None);
    }

    #[test]
    fn test_distant_domain_has_no_suggestion() {
        let suggester = TypoSuggester::default();
        assert_eq!(suggester.suggest("doesnotexist-xyz123.invalid"), None);
        assert_eq!(suggester.suggest("example.org"), None);
    }

    #[test]
    fn test_tie_yields_no_suggestion() {
        let suggester = TypoSuggester::new(
            vec!["abcd.com".to_string(), "abce.com".to_string()],
            DEFAULT_MAX_DISTANCE,
        );
        assert_eq!(suggester.suggest("abcf.com"), None);
        assert_eq!(suggester.suggest("abcdd.com").as_deref(), Some("abcd.com"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let suggester = TypoSuggester::new(vec!["gmail.com".to_string()], 2);
        assert_eq!(suggester.suggest("gmaill.cm").as_deref(), Some("gmail.com"));
        assert_eq!(suggester.suggest("gmaiill.cm"), None);
    }

    #[test]
    fn test_empty_provider_list() {
        let suggester = TypoSuggester::new(Vec::new(), DEFAULT_MAX_DISTANCE);
        assert_eq!(suggester.suggest("gmial.com"), None);
    }
}
