use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Clinical trigger vocabulary, in canonical spelling. Matching is case-
/// and accent-insensitive; the list is data, not logic, so extending it is
/// a one-line change.
pub const TRIGGER_TERMS: [&str; 11] = [
    "Hemoglobine A1C",
    "Microalbumine",
    "Taille",
    "Poids",
    "Fume",
    "Anormal",
    "Cholesterol",
    "Vertige",
    "Rechute",
    "Reaction",
    "Anticorps",
];

/// Scanner counting how many distinct trigger terms appear across a set of
/// notes. Patterns are anchored on the left word boundary only, so French
/// inflections keep matching ("fumeur" and "fumeuse" both hit "Fume").
pub struct TriggerScanner {
    patterns: Vec<Regex>,
}

impl Default for TriggerScanner {
    fn default() -> Self {
        let patterns = TRIGGER_TERMS
            .iter()
            .map(|term| {
                let normalized = fold_accents(term);
                Regex::new(&format!(r"\b{}", regex::escape(&normalized)))
                    .expect("trigger pattern compiles")
            })
            .collect();
        Self { patterns }
    }
}

impl TriggerScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the distinct trigger terms present anywhere across `notes`.
    ///
    /// Repeated mentions of the same term count once, so the result is
    /// bounded by the vocabulary size. Note boundaries are irrelevant: the
    /// contents are joined with spaces before matching.
    pub fn count_distinct<S: AsRef<str>>(&self, notes: &[S]) -> usize {
        if notes.is_empty() {
            return 0;
        }

        let blob = notes
            .iter()
            .map(|note| note.as_ref())
            .collect::<Vec<_>>()
            .join(" ");
        let normalized = fold_accents(&blob);

        self.patterns
            .iter()
            .filter(|pattern| pattern.is_match(&normalized))
            .count()
    }
}

/// Lowercase, then strip diacritics: decompose to NFD, drop combining
/// marks, recompose to NFC. "RÉACTION", "Réaction", and "reaction" all
/// fold to the same string.
fn fold_accents(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|character| !is_combining_mark(*character))
        .nfc()
        .collect()
}
