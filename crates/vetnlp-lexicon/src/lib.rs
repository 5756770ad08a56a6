//! vetnlp Lexicon - read-only clinical vocabulary store
//!
//! Maps canonical symptom keys to their surface patterns and holds the
//! severity/frequency keyword tables and demographic field patterns used by
//! the extractors. Built once from plain tables (defaults or injected) and
//! immutable afterwards; a malformed pattern fails construction instead of
//! silently matching nothing.

use regex::Regex;

use vetnlp_core::{ConfigError, Duration, Frequency, Severity, TimeUnit};

pub mod defaults;

pub use defaults::default_tables;

// ============================================================================
// Source tables
// ============================================================================

/// Plain, uncompiled lexicon data. Construct one of these (or start from
/// [`default_tables`]) and hand it to [`Lexicon::from_tables`]. Keeping the
/// tables as data lets tests inject a custom vocabulary per instance.
#[derive(Debug, Clone)]
pub struct LexiconTables {
    /// Canonical symptom key -> surface phrases, in match priority order
    pub symptoms: Vec<(String, Vec<String>)>,
    /// Severity level -> keywords looked up in the context window
    pub severity_keywords: Vec<(Severity, Vec<String>)>,
    /// Frequency level -> keywords looked up in the context window
    pub frequency_keywords: Vec<(Frequency, Vec<String>)>,
    /// Species -> cue phrases, in field priority order
    pub species_cues: Vec<(String, Vec<String>)>,
    /// Breed name -> implied species
    pub breeds: Vec<(String, String)>,
    /// Gender label -> regex, in field priority order
    pub gender_patterns: Vec<(String, String)>,
    /// Age regexes, in field priority order; groups: (value, unit)
    pub age_patterns: Vec<String>,
    /// Weight regexes, in field priority order; groups: (value, unit)
    pub weight_patterns: Vec<String>,
    /// Duration regex; groups: (prefix?, value, unit)
    pub duration_pattern: String,
    /// Words that negate an immediately following symptom mention
    pub negation_cues: Vec<String>,
}

impl Default for LexiconTables {
    fn default() -> Self {
        default_tables()
    }
}

// ============================================================================
// Compiled lexicon
// ============================================================================

/// A surface phrase compiled to a word-boundary, case-insensitive regex
#[derive(Debug, Clone)]
pub struct SurfacePattern {
    pub surface: String,
    pub regex: Regex,
}

/// One canonical symptom with its ordered surface patterns
#[derive(Debug, Clone)]
pub struct SymptomEntry {
    pub key: String,
    pub patterns: Vec<SurfacePattern>,
}

/// A breed cue with its implied species
#[derive(Debug, Clone)]
pub struct BreedEntry {
    pub name: String,
    pub species: String,
    pub regex: Regex,
}

/// Immutable, compiled lexicon. `Send + Sync`; share one instance across
/// concurrent analyses.
#[derive(Debug)]
pub struct Lexicon {
    symptoms: Vec<SymptomEntry>,
    severity_keywords: Vec<(Severity, Vec<String>)>,
    frequency_keywords: Vec<(Frequency, Vec<String>)>,
    species_cues: Vec<(String, Vec<SurfacePattern>)>,
    breeds: Vec<BreedEntry>,
    gender_patterns: Vec<(String, Regex)>,
    age_patterns: Vec<Regex>,
    weight_patterns: Vec<Regex>,
    duration_pattern: Regex,
    negation_cues: Vec<String>,
}

impl Lexicon {
    /// Compile the default veterinary vocabulary
    pub fn with_defaults() -> Result<Self, ConfigError> {
        Self::from_tables(default_tables())
    }

    /// Compile an injected table set, failing fast on any malformed pattern
    pub fn from_tables(tables: LexiconTables) -> Result<Self, ConfigError> {
        let mut symptoms = Vec::with_capacity(tables.symptoms.len());
        for (key, phrases) in tables.symptoms {
            let mut patterns = Vec::with_capacity(phrases.len());
            for phrase in phrases {
                patterns.push(compile_phrase(&key, &phrase)?);
            }
            symptoms.push(SymptomEntry { key, patterns });
        }

        let mut species_cues = Vec::with_capacity(tables.species_cues.len());
        for (species, cues) in tables.species_cues {
            let mut patterns = Vec::with_capacity(cues.len());
            for cue in cues {
                patterns.push(compile_phrase(&species, &cue)?);
            }
            species_cues.push((species, patterns));
        }

        let mut breeds = Vec::with_capacity(tables.breeds.len());
        for (name, species) in tables.breeds {
            let pattern = compile_phrase("breed", &name)?;
            breeds.push(BreedEntry {
                name,
                species,
                regex: pattern.regex,
            });
        }

        let mut gender_patterns = Vec::with_capacity(tables.gender_patterns.len());
        for (gender, pattern) in tables.gender_patterns {
            gender_patterns.push((gender.clone(), compile_raw(&gender, &pattern)?));
        }

        let mut age_patterns = Vec::with_capacity(tables.age_patterns.len());
        for pattern in &tables.age_patterns {
            age_patterns.push(compile_raw("age", pattern)?);
        }

        let mut weight_patterns = Vec::with_capacity(tables.weight_patterns.len());
        for pattern in &tables.weight_patterns {
            weight_patterns.push(compile_raw("weight", pattern)?);
        }

        let duration_pattern = compile_raw("duration", &tables.duration_pattern)?;

        let severity_keywords = lowercase_table(tables.severity_keywords);
        let frequency_keywords = lowercase_table(tables.frequency_keywords);
        let negation_cues = tables
            .negation_cues
            .into_iter()
            .map(|c| c.to_lowercase())
            .collect();

        Ok(Self {
            symptoms,
            severity_keywords,
            frequency_keywords,
            species_cues,
            breeds,
            gender_patterns,
            age_patterns,
            weight_patterns,
            duration_pattern,
            negation_cues,
        })
    }

    pub fn symptoms(&self) -> &[SymptomEntry] {
        &self.symptoms
    }

    pub fn species_cues(&self) -> &[(String, Vec<SurfacePattern>)] {
        &self.species_cues
    }

    pub fn breeds(&self) -> &[BreedEntry] {
        &self.breeds
    }

    pub fn gender_patterns(&self) -> &[(String, Regex)] {
        &self.gender_patterns
    }

    pub fn age_patterns(&self) -> &[Regex] {
        &self.age_patterns
    }

    pub fn weight_patterns(&self) -> &[Regex] {
        &self.weight_patterns
    }

    pub fn negation_cues(&self) -> &[String] {
        &self.negation_cues
    }

    /// Classify the severity evidenced by a context window. Levels are
    /// checked in table order; the first keyword hit wins.
    pub fn severity_in(&self, window: &str) -> Severity {
        let lower = window.to_lowercase();
        for (level, keywords) in &self.severity_keywords {
            if keywords.iter().any(|k| lower.contains(k.as_str())) {
                return *level;
            }
        }
        Severity::Unknown
    }

    /// Classify the frequency evidenced by a context window
    pub fn frequency_in(&self, window: &str) -> Frequency {
        let lower = window.to_lowercase();
        for (level, keywords) in &self.frequency_keywords {
            if keywords.iter().any(|k| lower.contains(k.as_str())) {
                return *level;
            }
        }
        Frequency::Unknown
    }

    /// Find the duration phrase evidenced by a context window.
    ///
    /// Candidates that are actually age phrases ("5 years old") are skipped,
    /// and an explicitly anchored duration ("for 3 days") is preferred over
    /// a bare number-unit pair anywhere earlier in the window.
    pub fn duration_in(&self, window: &str) -> Option<Duration> {
        let mut first: Option<Duration> = None;

        for caps in self.duration_pattern.captures_iter(window) {
            let full = caps.get(0)?;

            // "5 years old" is an age, not a symptom duration
            let tail = window[full.end()..].trim_start();
            if tail.get(..3).is_some_and(|t| t.eq_ignore_ascii_case("old")) {
                continue;
            }

            let value: u32 = match caps.get(2).and_then(|m| m.as_str().parse().ok()) {
                Some(v) => v,
                None => continue,
            };
            let unit = match caps.get(3).and_then(|m| TimeUnit::parse(m.as_str())) {
                Some(u) => u,
                None => continue,
            };

            let duration = Duration {
                raw: full.as_str().to_string(),
                value,
                unit,
            };

            if caps.get(1).is_some() {
                return Some(duration);
            }
            if first.is_none() {
                first = Some(duration);
            }
        }

        first
    }
}

/// Compile a literal phrase into a word-boundary, case-insensitive regex.
/// Whitespace inside the phrase matches any whitespace run.
fn compile_phrase(key: &str, phrase: &str) -> Result<SurfacePattern, ConfigError> {
    let tokens: Vec<String> = phrase.split_whitespace().map(|t| regex::escape(t)).collect();
    if tokens.is_empty() {
        return Err(ConfigError::InvalidPattern {
            key: key.to_string(),
            pattern: phrase.to_string(),
            message: "empty phrase".to_string(),
        });
    }

    let source = format!(r"(?i)\b{}\b", tokens.join(r"\s+"));
    let regex = Regex::new(&source).map_err(|e| ConfigError::InvalidPattern {
        key: key.to_string(),
        pattern: phrase.to_string(),
        message: e.to_string(),
    })?;

    Ok(SurfacePattern {
        surface: phrase.to_string(),
        regex,
    })
}

/// Compile a raw regex pattern, failing fast on syntax errors
fn compile_raw(key: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        key: key.to_string(),
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn lowercase_table<L>(table: Vec<(L, Vec<String>)>) -> Vec<(L, Vec<String>)> {
    table
        .into_iter()
        .map(|(level, words)| (level, words.into_iter().map(|w| w.to_lowercase()).collect()))
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
