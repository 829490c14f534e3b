use regex::Regex;
use std::sync::LazyLock;

/// `N+` / `+N` expressions: the integer the entry starts with
static AT_LEAST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*\+?\s*(\d+)").expect("Invalid at-least regex"));

/// `min-max` expressions anywhere in the entry, e.g. "3-5 years"
static RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("Invalid range regex"));

/// Phrases that turn a whole preference list into "no constraint"
pub const DEFAULT_WILDCARD_PHRASES: &[&str] = &[
    "any",
    "all",
    "flexible",
    "doesn't matter",
    "i don't mind",
    "n/a",
    "not applicable",
    "all ages",
    "any gap",
    "any range",
];

/// Head-covering value a candidate can hold to satisfy any head-covering constraint
pub const DEFAULT_UNIVERSAL_HEAD_COVERING: &str = "Flexible";

/// A single preference-list entry after classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferenceToken {
    Wildcard,
    AgeGapAtLeast { min: u32 },
    AgeGapRange { min: u32, max: u32 },
    Value(String),
    Unrecognized(String),
}

impl PreferenceToken {
    /// Parse an age-gap expression, ignoring wildcards
    ///
    /// Entries containing `+` are read as "at least" the integer they start
    /// with, so both "10+" and "+10" mean ten or more. Otherwise the first
    /// `min-max` pair found is used. Anything else is `Unrecognized`.
    pub fn parse_age_gap(entry: &str) -> PreferenceToken {
        if entry.contains('+') {
            return AT_LEAST_PATTERN
                .captures(entry)
                .and_then(|cap| cap[1].parse().ok())
                .map(|min| PreferenceToken::AgeGapAtLeast { min })
                .unwrap_or_else(|| PreferenceToken::Unrecognized(entry.to_string()));
        }

        RANGE_PATTERN
            .captures(entry)
            .and_then(|cap| Some((cap[1].parse().ok()?, cap[2].parse().ok()?)))
            .map(|(min, max)| PreferenceToken::AgeGapRange { min, max })
            .unwrap_or_else(|| PreferenceToken::Unrecognized(entry.to_string()))
    }
}

/// An acceptable age difference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeGap {
    AtLeast(u32),
    Between(u32, u32),
}

impl AgeGap {
    #[inline]
    pub fn admits(&self, diff: u32) -> bool {
        match *self {
            AgeGap::AtLeast(min) => diff >= min,
            AgeGap::Between(min, max) => min <= diff && diff <= max,
        }
    }
}

/// A preference list compiled for evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint<T> {
    /// Empty or wildcard list: every candidate passes
    Bypassed,
    /// At least one entry must accept the candidate
    AnyOf(Vec<T>),
}

impl<T> Constraint<T> {
    pub fn is_bypassed(&self) -> bool {
        matches!(self, Constraint::Bypassed)
    }

    /// True when bypassed, or when `accept` holds for some entry
    #[inline]
    pub fn admits(&self, accept: impl FnMut(&T) -> bool) -> bool {
        match self {
            Constraint::Bypassed => true,
            Constraint::AnyOf(entries) => entries.iter().any(accept),
        }
    }
}

/// Vocabulary the engine recognizes in free-text preferences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingRules {
    wildcard_phrases: Vec<String>,
    universal_head_covering: String,
}

impl MatchingRules {
    pub fn new<I, S>(wildcard_phrases: I, universal_head_covering: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            wildcard_phrases: wildcard_phrases
                .into_iter()
                .map(|phrase| phrase.as_ref().trim().to_lowercase())
                .filter(|phrase| !phrase.is_empty())
                .collect(),
            universal_head_covering: universal_head_covering.into(),
        }
    }

    pub fn wildcard_phrases(&self) -> &[String] {
        &self.wildcard_phrases
    }

    pub fn universal_head_covering(&self) -> &str {
        &self.universal_head_covering
    }

    /// Whether an entry neutralizes the list it belongs to
    ///
    /// Substring match on the trimmed, lowercased entry, so "Any gap is fine"
    /// and "Doesn't matter to me" both count.
    pub fn is_wildcard(&self, entry: &str) -> bool {
        let normalized = entry.trim().to_lowercase();
        self.wildcard_phrases
            .iter()
            .any(|phrase| normalized.contains(phrase.as_str()))
    }

    /// Classify a membership-list entry
    pub fn classify(&self, entry: &str) -> PreferenceToken {
        if self.is_wildcard(entry) {
            PreferenceToken::Wildcard
        } else {
            PreferenceToken::Value(entry.to_string())
        }
    }

    /// Classify an age-gap entry
    pub fn classify_age_gap(&self, entry: &str) -> PreferenceToken {
        if self.is_wildcard(entry) {
            PreferenceToken::Wildcard
        } else {
            PreferenceToken::parse_age_gap(entry)
        }
    }

    /// Compile a membership preference list (ethnicity, hashkafa, ...)
    pub fn compile_values(&self, entries: &[String]) -> Constraint<String> {
        let mut values = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.classify(entry) {
                PreferenceToken::Wildcard => return Constraint::Bypassed,
                PreferenceToken::Value(value) => values.push(value),
                _ => {}
            }
        }

        if values.is_empty() {
            Constraint::Bypassed
        } else {
            Constraint::AnyOf(values)
        }
    }

    /// Compile an age-gap preference list
    ///
    /// Unrecognized entries are dropped. A list holding only unrecognized
    /// entries compiles to `AnyOf([])`, which no candidate satisfies.
    pub fn compile_age_gaps(&self, entries: &[String]) -> Constraint<AgeGap> {
        if entries.is_empty() {
            return Constraint::Bypassed;
        }

        let mut gaps = Vec::with_capacity(entries.len());
        for entry in entries {
            match self.classify_age_gap(entry) {
                PreferenceToken::Wildcard => return Constraint::Bypassed,
                PreferenceToken::AgeGapAtLeast { min } => gaps.push(AgeGap::AtLeast(min)),
                PreferenceToken::AgeGapRange { min, max } => gaps.push(AgeGap::Between(min, max)),
                _ => {}
            }
        }

        Constraint::AnyOf(gaps)
    }

    /// Compile a single expected value (blank or wildcard means no constraint)
    pub fn compile_expected(&self, expected: Option<&str>) -> Constraint<String> {
        match expected {
            Some(value) if !value.trim().is_empty() && !self.is_wildcard(value) => {
                Constraint::AnyOf(vec![value.to_string()])
            }
            _ => Constraint::Bypassed,
        }
    }
}

impl Default for MatchingRules {
    fn default() -> Self {
        Self::new(DEFAULT_WILDCARD_PHRASES, DEFAULT_UNIVERSAL_HEAD_COVERING)
    }
}
