//! Keyword-based intent strategy.
//!
//! Matching rules, in priority order:
//! 1. Any full-course keyword as a substring → FullCourse.
//! 2. Any quick-question keyword as a substring → QuickQuestion.
//! 3. Two or fewer tokens → NeedsProbing (too short to tell).
//! 4. Default → NeedsProbing.
//!
//! Input is normalized to lowercase before matching, so classification is
//! case-insensitive end to end.

use regex::Regex;
use tracing::debug;

use super::{ExperienceLevel, Intent, IntentStrategy};

/// Phrases that signal a request for a complete course.
const FULL_COURSE_KEYWORDS: &[&str] = &[
    "teach me",
    "master",
    "comprehensive",
    "deep dive",
    "full course",
    "everything about",
    "complete guide",
    "course on",
    "from scratch",
];

/// Phrases that signal a one-off question rather than a learning goal.
const QUICK_QUESTION_KEYWORDS: &[&str] = &[
    "what is",
    "what's",
    "what are",
    "explain",
    "why",
    "how do",
    "how does",
    "briefly",
    "quick question",
    "difference between",
];

/// Leading filler phrases stripped before treating the remainder as a topic.
/// Order matters: longer phrases first so "teach me about" wins over "about".
const TOPIC_FILLERS: &[&str] = &[
    "i want to learn about",
    "i want to learn",
    "i want to",
    "i would like to learn",
    "i'd like to learn",
    "teach me everything about",
    "teach me about",
    "teach me",
    "learn about",
    "learning",
    "learn",
    "study",
    "how to",
    "about",
    "please",
];

/// Level keywords, checked in order; later matches override earlier ones
/// within the same utterance.
const LEVEL_KEYWORDS: &[(&str, ExperienceLevel)] = &[
    ("beginner", ExperienceLevel::Beginner),
    ("new to", ExperienceLevel::Beginner),
    ("never", ExperienceLevel::Beginner),
    ("no experience", ExperienceLevel::Beginner),
    ("intermediate", ExperienceLevel::Intermediate),
    ("some experience", ExperienceLevel::Intermediate),
    ("familiar with", ExperienceLevel::Intermediate),
    ("advanced", ExperienceLevel::Advanced),
    ("expert", ExperienceLevel::Advanced),
    ("experienced", ExperienceLevel::Advanced),
];

/// Keyword-and-regex implementation of [`IntentStrategy`].
pub struct KeywordStrategy {
    filler_patterns: Vec<Regex>,
}

impl KeywordStrategy {
    pub fn new() -> Self {
        let filler_patterns = TOPIC_FILLERS
            .iter()
            .map(|phrase| {
                let escaped = regex::escape(phrase);
                // Whole-word match anywhere in the utterance.
                Regex::new(&format!(r"(?i)\b{escaped}\b")).expect("static filler pattern")
            })
            .collect();
        Self { filler_patterns }
    }
}

impl Default for KeywordStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl IntentStrategy for KeywordStrategy {
    fn classify(&self, utterance: &str) -> Intent {
        let normalized = utterance.to_lowercase();

        // Full-course keywords take priority: "teach me everything about X"
        // must not be swallowed by the quick-question list.
        if FULL_COURSE_KEYWORDS.iter().any(|k| normalized.contains(k)) {
            debug!(utterance = %normalized, "classified as full_course");
            return Intent::FullCourse;
        }

        if QUICK_QUESTION_KEYWORDS.iter().any(|k| normalized.contains(k)) {
            debug!(utterance = %normalized, "classified as quick_question");
            return Intent::QuickQuestion;
        }

        // Too short to tell (two or fewer tokens) and "no keyword matched"
        // resolve the same way: probe.
        Intent::NeedsProbing
    }

    fn extract_topic(&self, utterance: &str) -> Option<String> {
        let mut text = utterance.to_lowercase();
        for pattern in &self.filler_patterns {
            text = pattern.replace_all(&text, " ").into_owned();
        }
        let cleaned = text
            .trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '!' | '?'))
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned)
        }
    }

    fn detect_level(&self, utterance: &str) -> Option<ExperienceLevel> {
        let normalized = utterance.to_lowercase();
        let mut detected = None;
        for (keyword, level) in LEVEL_KEYWORDS {
            if normalized.contains(keyword) {
                detected = Some(*level);
            }
        }
        detected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strategy() -> KeywordStrategy {
        KeywordStrategy::new()
    }

    #[test]
    fn full_course_keywords_any_casing() {
        for input in [
            "Teach Me rust",
            "I want a COMPREHENSIVE overview of linear algebra",
            "let's do a deep dive on kubernetes, it'll take as long as it takes",
            "master sourdough baking",
        ] {
            assert_eq!(strategy().classify(input), Intent::FullCourse, "{input}");
        }
    }

    #[test]
    fn full_course_wins_over_quick_question() {
        // Contains "everything about" (full course) and "about" phrasing that
        // might otherwise read as a question.
        assert_eq!(
            strategy().classify("teach me everything about databases"),
            Intent::FullCourse
        );
        assert_eq!(
            strategy().classify("explain and teach me music theory"),
            Intent::FullCourse
        );
    }

    #[test]
    fn quick_question_keywords() {
        for input in [
            "what is a monad",
            "explain closures briefly",
            "why does ice float",
            "What's the difference between TCP and UDP",
        ] {
            assert_eq!(strategy().classify(input), Intent::QuickQuestion, "{input}");
        }
    }

    #[test]
    fn short_unmatched_input_needs_probing() {
        for input in ["spanish", "guitar chords", "rust", "  piano  "] {
            assert_eq!(strategy().classify(input), Intent::NeedsProbing, "{input}");
        }
    }

    #[test]
    fn ambiguous_long_input_defaults_to_probing() {
        assert_eq!(
            strategy().classify("i have been thinking lately that maybe languages"),
            Intent::NeedsProbing
        );
    }

    #[test]
    fn classify_never_panics_on_odd_input() {
        for input in ["", "   ", "🦀🦀🦀", "¿¡?"] {
            let _ = strategy().classify(input);
        }
    }

    #[test]
    fn topic_extraction_strips_fillers() {
        let s = strategy();
        assert_eq!(
            s.extract_topic("I want to learn Swift Programming").as_deref(),
            Some("swift programming")
        );
        assert_eq!(
            s.extract_topic("teach me everything about databases").as_deref(),
            Some("databases")
        );
        assert_eq!(s.extract_topic("how to play chess").as_deref(), Some("play chess"));
    }

    #[test]
    fn topic_extraction_empty_when_only_filler() {
        let s = strategy();
        assert_eq!(s.extract_topic("i want to learn"), None);
        assert_eq!(s.extract_topic("   "), None);
    }

    #[test]
    fn level_detection_ordered_override() {
        let s = strategy();
        assert_eq!(
            s.detect_level("i'm new to this"),
            Some(ExperienceLevel::Beginner)
        );
        assert_eq!(
            s.detect_level("some experience with python"),
            Some(ExperienceLevel::Intermediate)
        );
        assert_eq!(
            s.detect_level("I'm an EXPERT"),
            Some(ExperienceLevel::Advanced)
        );
        // Later keyword in the table overrides an earlier match.
        assert_eq!(
            s.detect_level("beginner at piano but experienced in guitar"),
            Some(ExperienceLevel::Advanced)
        );
        assert_eq!(s.detect_level("i like turtles"), None);
    }
}
