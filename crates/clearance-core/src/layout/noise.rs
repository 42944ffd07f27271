//! Page furniture filter.

/// Classifies tokens as header/footer/label noise.
///
/// Keywords and tokens are compared with all whitespace removed, so spaced
/// out captions such as `項 次` still match.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    keywords: Vec<String>,
}

fn squash(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

impl NoiseFilter {
    /// Build a filter from a keyword list.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Self {
        let keywords = keywords
            .iter()
            .map(|k| squash(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        Self { keywords }
    }

    /// Check if a token contains any noise keyword.
    pub fn is_noise(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let squashed = squash(text);
        self.keywords.iter().any(|k| squashed.contains(k.as_str()))
    }
}
