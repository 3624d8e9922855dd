use regex::{Regex, RegexBuilder};
use url::Url;

/// Extensions that are never queued unless the configuration says otherwise
pub const DEFAULT_EXCLUDED_EXTENSIONS: [&str; 4] = ["pdf", "jpg", "png", "gif"];

/// Decides whether a discovered URL may ever enter the frontier.
///
/// A candidate is admitted when its network authority matches the seed's
/// exactly and its path does not end in one of the excluded extensions.
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    seed: Url,
    exclude_regex: Option<Regex>,
}

impl AdmissionFilter {
    /// Create a filter for `seed` rejecting the default file extensions
    pub fn new(seed: Url) -> Self {
        let defaults: Vec<String> = DEFAULT_EXCLUDED_EXTENSIONS
            .iter()
            .map(|ext| ext.to_string())
            .collect();
        Self::with_extensions(seed, &defaults)
    }

    /// Create a filter for `seed` rejecting the given file extensions
    ///
    /// Extensions may be written with or without the leading dot.
    pub fn with_extensions(seed: Url, extensions: &[String]) -> Self {
        Self {
            seed,
            exclude_regex: build_extension_regex(extensions),
        }
    }

    /// The seed URL this filter compares authorities against
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// Determine if an already parsed URL is admissible
    pub fn is_admissible(&self, candidate: &Url) -> bool {
        if !self.is_same_authority(candidate) {
            return false;
        }

        if let Some(regex) = &self.exclude_regex {
            if regex.is_match(candidate.path()) {
                ::log::trace!("Excluded by extension: {}", candidate);
                return false;
            }
        }

        true
    }

    /// Determine if a raw URL string is admissible; unparseable input never is
    pub fn is_admissible_str(&self, candidate: &str) -> bool {
        match Url::parse(candidate) {
            Ok(url) => self.is_admissible(&url),
            Err(e) => {
                ::log::debug!("Dropping malformed URL {}: {}", candidate, e);
                false
            }
        }
    }

    /// Authority comparison: userinfo, host and explicit port must match the seed
    fn is_same_authority(&self, candidate: &Url) -> bool {
        match (candidate.host_str(), self.seed.host_str()) {
            (Some(host), Some(seed_host)) => {
                host == seed_host
                    && candidate.port() == self.seed.port()
                    && candidate.username() == self.seed.username()
                    && candidate.password() == self.seed.password()
            }
            _ => false,
        }
    }
}

/// Compiles a single case-insensitive `\.(a|b|c)$` pattern from the extension list
fn build_extension_regex(extensions: &[String]) -> Option<Regex> {
    let alternatives: Vec<String> = extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.'))
        .filter(|ext| !ext.is_empty())
        .map(regex::escape)
        .collect();

    if alternatives.is_empty() {
        return None;
    }

    let pattern = format!(r"\.({})$", alternatives.join("|"));
    match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => Some(regex),
        Err(e) => {
            // Escaped literals always compile; keep admitting rather than panic
            ::log::error!("Invalid extension pattern {}: {}", pattern, e);
            None
        }
    }
}
