pub const RUSSIAN: &str = "ru";
pub const ENGLISH: &str = "en";

/// Source and target of one translation call. The target is always derived from the source:
/// Russian goes to English, everything else goes to Russian.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePair {
    pub source: String,
    pub target: String,
}

impl LanguagePair {
    /// `source` is expected to be normalized already (see [`normalize_language_code`]).
    pub fn for_source(source: &str) -> Self {
        let target = if source == RUSSIAN { ENGLISH } else { RUSSIAN };
        Self {
            source: source.to_string(),
            target: target.to_string(),
        }
    }
}

/// Lowercased primary subtag: `ru-RU` → `ru`, `EN_us` → `en`. Returns `None` for codes that do
/// not name a language (`""`, `auto`, `und`).
pub fn normalize_language_code(code: &str) -> Option<String> {
    let primary = code
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    match primary.as_str() {
        "" | "auto" | "und" => None,
        _ => Some(primary),
    }
}
