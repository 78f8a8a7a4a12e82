//! Keyword heuristics for ranking two free-text options
//!
//! Case-insensitive substring matching, no stemming. This is the fallback
//! engine's only view of the option text.

use crate::model::Winner;

/// Favorable and unfavorable keyword lists for one scoring axis
#[derive(Debug, Clone, Copy)]
pub struct KeywordSet {
    pub favorable: &'static [&'static str],
    pub unfavorable: &'static [&'static str],
}

/// Rewards simplicity and proven terms, penalizes complexity and modernity
pub const SAFETY: KeywordSet = KeywordSet {
    favorable: &[
        "flask", "simple", "basic", "minimal", "proven", "stable", "vanilla", "html", "css",
    ],
    unfavorable: &[
        "fastapi",
        "react",
        "vue",
        "angular",
        "typescript",
        "async",
        "microservice",
        "docker",
    ],
};

/// Rewards modern terms, penalizes traditional ones
pub const INNOVATION: KeywordSet = KeywordSet {
    favorable: &[
        "fastapi",
        "react",
        "vue",
        "typescript",
        "async",
        "modern",
        "latest",
        "cutting-edge",
        "ai",
        "ml",
    ],
    unfavorable: &["flask", "jquery", "vanilla", "basic", "simple", "traditional"],
};

/// Rewards architecture and testing terms, penalizes prototype terms
pub const ROBUSTNESS: KeywordSet = KeywordSet {
    favorable: &[
        "typescript",
        "architecture",
        "scalable",
        "enterprise",
        "testing",
        "ci/cd",
        "database",
        "api",
    ],
    unfavorable: &["simple", "basic", "minimal", "quick", "prototype"],
};

/// Axis along which two options are ranked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoringAxis {
    Safety,
    Innovation,
    Robustness,
}

impl ScoringAxis {
    pub fn keywords(&self) -> &'static KeywordSet {
        match self {
            ScoringAxis::Safety => &SAFETY,
            ScoringAxis::Innovation => &INNOVATION,
            ScoringAxis::Robustness => &ROBUSTNESS,
        }
    }
}

/// Favorable hits minus unfavorable hits
pub fn score(text: &str, keywords: &KeywordSet) -> i32 {
    let text = text.to_lowercase();
    let hits = |list: &[&str]| list.iter().filter(|k| text.contains(*k)).count() as i32;
    hits(keywords.favorable) - hits(keywords.unfavorable)
}

/// Pick the better option on an axis; ties go to Option A
pub fn select(axis: ScoringAxis, option_a: &str, option_b: &str) -> Winner {
    let keywords = axis.keywords();
    let a = score(option_a, keywords);
    let b = score(option_b, keywords);

    tracing::debug!(axis = ?axis, score_a = a, score_b = b, "Scored compare options");

    if a >= b { Winner::OptionA } else { Winner::OptionB }
}
