//! Text-only scoring of a rewrite against its input
//!
//! Scores compare the original feedback with a rewritten version and need no
//! model or network access. Simplify scores look at word length, readability and
//! how much the length changed; soften scores count polite and harsh markers.
//!
//! Readability uses the Flesch reading-ease and Flesch-Kincaid grade formulas
//! with a vowel-group syllable estimate, so values are close to, but not
//! identical with, dictionary-based syllable counters.
//!
//! # Example
//!
//! ```
//! use feedback_interp::metrics::{SimplifyMetrics, SoftenMetrics};
//!
//! let simplify = SimplifyMetrics::compare("Please utilize this.", "Please use this.");
//! assert!(simplify.avg_word_len_drop().unwrap() > 0.0);
//!
//! let soften = SoftenMetrics::compare("This is sloppy.", "Please consider tidying this.");
//! assert_eq!(soften.polite_marker_gain(), 2);
//! assert_eq!(soften.harsh_word_drop(), 1);
//! ```

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z']+").unwrap());

static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

static VOWEL_GROUP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[aeiouy]+").unwrap());

/// Phrases that read as polite; each counts at most once per text
pub const POLITE_MARKERS: &[&str] = &[
    "please",
    "could you",
    "would you",
    "consider",
    "i suggest",
    "it might help",
    "i recommend",
    "thanks",
    "thank you",
    "appreciate",
];

/// Words that read as harsh; every whole-word occurrence counts
pub const HARSH_WORDS: &[&str] = &[
    "stupid",
    "idiot",
    "dumb",
    "ridiculous",
    "unacceptable",
    "lazy",
    "sloppy",
];

static HARSH_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    HARSH_WORDS
        .iter()
        .map(|word| Regex::new(&format!(r"\b{}\b", regex::escape(word))).unwrap())
        .collect()
});

/// Word count and mean word length, where a word is a run of ASCII letters and apostrophes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WordStats {
    pub num_words: usize,
    /// `None` when the text has no words
    pub avg_word_len: Option<f64>,
}

impl WordStats {
    pub fn of(text: &str) -> Self {
        let lengths: Vec<usize> = WORD.find_iter(text).map(|m| m.as_str().len()).collect();
        let avg_word_len = (!lengths.is_empty())
            .then(|| lengths.iter().sum::<usize>() as f64 / lengths.len() as f64);
        Self {
            num_words: lengths.len(),
            avg_word_len,
        }
    }
}

/// Output length over input length, in characters
///
/// The input length is floored at 1 so an empty input does not divide by zero.
pub fn length_ratio(input: &str, output: &str) -> f64 {
    let input_len = input.chars().count().max(1);
    output.chars().count() as f64 / input_len as f64
}

/// Flesch reading ease (higher is easier) and Flesch-Kincaid grade level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Readability {
    pub flesch_ease: f64,
    pub fk_grade: f64,
}

impl Readability {
    /// `None` when the text has no words
    pub fn of(text: &str) -> Option<Self> {
        let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
        if words.is_empty() {
            return None;
        }

        let sentences = SENTENCE_END
            .split(text)
            .filter(|segment| WORD.is_match(segment))
            .count()
            .max(1) as f64;
        let syllables: usize = words.iter().map(|word| syllables(word)).sum();

        let words_per_sentence = words.len() as f64 / sentences;
        let syllables_per_word = syllables as f64 / words.len() as f64;

        Some(Self {
            flesch_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
            fk_grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
        })
    }
}

/// Estimate syllables as vowel groups, dropping a silent trailing "e"
fn syllables(word: &str) -> usize {
    let word = word.to_ascii_lowercase().replace('\'', "");
    let mut count = VOWEL_GROUP.find_iter(&word).count();
    if count > 1 && word.ends_with('e') && !word.ends_with("le") && !word.ends_with("ee") {
        count -= 1;
    }
    count.max(1)
}

fn difference(before: Option<f64>, after: Option<f64>) -> Option<f64> {
    Some(before? - after?)
}

/// How much simpler a rewrite reads than its input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimplifyMetrics {
    pub input_words: WordStats,
    pub output_words: WordStats,
    pub input_readability: Option<Readability>,
    pub output_readability: Option<Readability>,
    pub length_ratio: f64,
}

impl SimplifyMetrics {
    pub fn compare(input: &str, output: &str) -> Self {
        Self {
            input_words: WordStats::of(input),
            output_words: WordStats::of(output),
            input_readability: Readability::of(input),
            output_readability: Readability::of(output),
            length_ratio: length_ratio(input, output),
        }
    }

    /// Drop in mean word length; positive when the rewrite uses shorter words
    pub fn avg_word_len_drop(&self) -> Option<f64> {
        difference(self.input_words.avg_word_len, self.output_words.avg_word_len)
    }

    /// Gain in reading ease; positive when the rewrite is easier
    pub fn ease_gain(&self) -> Option<f64> {
        difference(
            self.output_readability.map(|r| r.flesch_ease),
            self.input_readability.map(|r| r.flesch_ease),
        )
    }

    /// Drop in grade level; positive when the rewrite needs less schooling
    pub fn grade_drop(&self) -> Option<f64> {
        difference(
            self.input_readability.map(|r| r.fk_grade),
            self.output_readability.map(|r| r.fk_grade),
        )
    }

    /// Single score for comparing rewrites; higher is better
    ///
    /// Weighted sum of ease gain, grade drop and word length drop, minus a
    /// penalty when the rewrite is under 55% or over 135% of the input length.
    /// Terms that cannot be computed count as zero.
    pub fn composite(&self) -> f64 {
        let ratio = self.length_ratio;
        let mut penalty = 0.0;
        if ratio < 0.55 {
            penalty += (0.55 - ratio) * 10.0;
        }
        if ratio > 1.35 {
            penalty += (ratio - 1.35) * 5.0;
        }

        0.08 * self.ease_gain().unwrap_or(0.0)
            + 0.6 * self.grade_drop().unwrap_or(0.0)
            + 0.4 * self.avg_word_len_drop().unwrap_or(0.0)
            - penalty
    }
}

/// How much gentler a rewrite reads than its input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SoftenMetrics {
    pub polite_markers_in: usize,
    pub polite_markers_out: usize,
    pub harsh_words_in: usize,
    pub harsh_words_out: usize,
    pub length_ratio: f64,
}

impl SoftenMetrics {
    pub fn compare(input: &str, output: &str) -> Self {
        Self {
            polite_markers_in: count_polite_markers(input),
            polite_markers_out: count_polite_markers(output),
            harsh_words_in: count_harsh_words(input),
            harsh_words_out: count_harsh_words(output),
            length_ratio: length_ratio(input, output),
        }
    }

    pub fn polite_marker_gain(&self) -> i64 {
        self.polite_markers_out as i64 - self.polite_markers_in as i64
    }

    pub fn harsh_word_drop(&self) -> i64 {
        self.harsh_words_in as i64 - self.harsh_words_out as i64
    }

    /// Single score for comparing rewrites; higher is better
    ///
    /// Rewards added polite markers and removed harsh words, minus a penalty
    /// when the rewrite is under 60% or over 150% of the input length.
    pub fn composite(&self) -> f64 {
        let ratio = self.length_ratio;
        let mut penalty = 0.0;
        if ratio < 0.6 {
            penalty += (0.6 - ratio) * 4.0;
        }
        if ratio > 1.5 {
            penalty += (ratio - 1.5) * 2.0;
        }

        0.2 * self.polite_marker_gain() as f64 + 0.3 * self.harsh_word_drop() as f64 - penalty
    }
}

/// Number of distinct polite markers present, case-insensitively
pub fn count_polite_markers(text: &str) -> usize {
    let lowered = text.to_lowercase();
    POLITE_MARKERS
        .iter()
        .filter(|marker| lowered.contains(*marker))
        .count()
}

/// Number of whole-word harsh word occurrences, case-insensitively
pub fn count_harsh_words(text: &str) -> usize {
    let lowered = text.to_lowercase();
    HARSH_PATTERNS
        .iter()
        .map(|pattern| pattern.find_iter(&lowered).count())
        .sum()
}
