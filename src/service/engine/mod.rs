//! Deterministic decision engines
//!
//! Both engines are total: every `(context, judge)` pair produces a complete
//! decision. Policy lives in ordered rule tables evaluated first-match-wins,
//! so the specific high-risk and beginner rules must precede goal-based ones.

use crate::model::{
    Advantage, EVIDENCE_COUNT, EvidenceItem, Judge, MIN_REJECTED_ALTERNATIVES, ProjectContext,
    SkillLevel, TeamSize, evidence_id,
};

pub mod advisory;
pub mod compare;

pub use advisory::AdvisoryEngine;
pub use compare::CompareEngine;

/// Risk classification of a project context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskClass {
    High,
    Standard,
    Low,
}

impl RiskClass {
    pub fn classify(context: &ProjectContext) -> Self {
        let duration = context.duration;
        let skill = context.skill_level;
        let solo = context.team_size == TeamSize::Solo;

        let high = (duration <= 24 && skill == SkillLevel::Beginner)
            || (duration <= 36 && skill == SkillLevel::Beginner && solo);
        let low = (duration >= 48 && skill == SkillLevel::Advanced)
            || (duration >= 36 && skill == SkillLevel::Intermediate && !solo);

        if high {
            RiskClass::High
        } else if low {
            RiskClass::Low
        } else {
            RiskClass::Standard
        }
    }

    pub fn is_high(&self) -> bool {
        matches!(self, RiskClass::High)
    }
}

/// One `(condition -> outcome)` entry of a rule table
pub struct Rule<T> {
    pub name: &'static str,
    pub when: fn(&ProjectContext, RiskClass) -> bool,
    pub then: fn(&ProjectContext) -> T,
}

/// Ordered rules with a mandatory catch-all outcome
pub struct RuleTable<T: 'static> {
    pub rules: &'static [Rule<T>],
    pub otherwise: Rule<T>,
}

impl<T: 'static> RuleTable<T> {
    /// The first matching rule, or the catch-all
    pub fn select(&self, context: &ProjectContext, risk: RiskClass) -> &Rule<T> {
        self.rules
            .iter()
            .find(|rule| (rule.when)(context, risk))
            .unwrap_or(&self.otherwise)
    }

    pub fn evaluate(&self, context: &ProjectContext) -> (&'static str, T) {
        let risk = RiskClass::classify(context);
        let rule = self.select(context, risk);
        (rule.name, (rule.then)(context))
    }
}

/// Judge-specific rejected alternatives used when a list is short
pub fn default_rejected_alternatives(judge: Judge) -> [&'static str; 3] {
    match judge {
        Judge::Reliability => [
            "Overly complex architectures",
            "Unstable or experimental frameworks",
            "Heavy microservice designs",
        ],
        Judge::Innovation => [
            "Plain static implementations",
            "Low-visual-impact stacks",
            "Outdated UI frameworks",
        ],
    }
}

/// Pad a rejected-alternatives list to the minimum by cycling judge defaults
pub fn fill_rejected_alternatives(list: &mut Vec<String>, judge: Judge) {
    let defaults = default_rejected_alternatives(judge);
    while list.len() < MIN_REJECTED_ALTERNATIVES {
        list.push(defaults[list.len() % defaults.len()].to_string());
    }
}

/// Pad with generic items or truncate so exactly three items remain
pub fn ensure_evidence_count(evidence: &mut Vec<EvidenceItem>, beneficiary: &str) {
    if evidence.len() != EVIDENCE_COUNT {
        tracing::warn!(
            count = evidence.len(),
            "Evidence count mismatch, restoring to {}",
            EVIDENCE_COUNT
        );
    }

    while evidence.len() < EVIDENCE_COUNT {
        evidence.push(EvidenceItem {
            id: evidence_id(evidence.len()),
            title: "Additional Evidence".to_string(),
            explanation: format!(
                "{} provides additional benefits for the given constraints.",
                beneficiary
            ),
            beneficiary: beneficiary.to_string(),
            advantage: Some(Advantage::Winner),
        });
    }
    evidence.truncate(EVIDENCE_COUNT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PrimaryGoal;

    fn context(duration: u32, team_size: TeamSize, skill_level: SkillLevel) -> ProjectContext {
        ProjectContext {
            duration,
            team_size,
            skill_level,
            primary_goal: PrimaryGoal::Balanced,
        }
    }

    #[test]
    fn test_classify_high_risk() {
        assert_eq!(
            RiskClass::classify(&context(24, TeamSize::Medium, SkillLevel::Beginner)),
            RiskClass::High
        );
        assert_eq!(
            RiskClass::classify(&context(36, TeamSize::Solo, SkillLevel::Beginner)),
            RiskClass::High
        );
        assert_eq!(
            RiskClass::classify(&context(36, TeamSize::Small, SkillLevel::Beginner)),
            RiskClass::Standard
        );
    }

    #[test]
    fn test_classify_low_risk() {
        assert_eq!(
            RiskClass::classify(&context(48, TeamSize::Solo, SkillLevel::Advanced)),
            RiskClass::Low
        );
        assert_eq!(
            RiskClass::classify(&context(36, TeamSize::Small, SkillLevel::Intermediate)),
            RiskClass::Low
        );
        assert_eq!(
            RiskClass::classify(&context(36, TeamSize::Solo, SkillLevel::Intermediate)),
            RiskClass::Standard
        );
    }

    #[test]
    fn test_rule_table_first_match_wins() {
        static TABLE: RuleTable<u8> = RuleTable {
            rules: &[
                Rule { name: "high", when: |_, risk| risk.is_high(), then: |_| 1 },
                Rule { name: "beginner", when: |c, _| c.skill_level == SkillLevel::Beginner, then: |_| 2 },
            ],
            otherwise: Rule { name: "fallback", when: |_, _| true, then: |_| 3 },
        };

        let high = context(20, TeamSize::Solo, SkillLevel::Beginner);
        assert_eq!(TABLE.evaluate(&high), ("high", 1));

        let beginner = context(48, TeamSize::Large, SkillLevel::Beginner);
        assert_eq!(TABLE.evaluate(&beginner), ("beginner", 2));

        let advanced = context(48, TeamSize::Large, SkillLevel::Advanced);
        assert_eq!(TABLE.evaluate(&advanced), ("fallback", 3));
    }

    #[test]
    fn test_fill_rejected_alternatives_cycles_defaults() {
        let mut list = vec!["Kubernetes".to_string()];
        fill_rejected_alternatives(&mut list, Judge::Reliability);
        assert_eq!(
            list,
            vec![
                "Kubernetes",
                "Unstable or experimental frameworks",
                "Heavy microservice designs"
            ]
        );

        let mut empty = Vec::new();
        fill_rejected_alternatives(&mut empty, Judge::Innovation);
        assert_eq!(empty.len(), 3);
        assert_eq!(empty[0], "Plain static implementations");
    }

    #[test]
    fn test_ensure_evidence_count_pads_and_truncates() {
        let mut evidence = Vec::new();
        ensure_evidence_count(&mut evidence, "Option A");
        let ids: Vec<_> = evidence.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert!(evidence.iter().all(|e| e.title == "Additional Evidence"));

        evidence.push(evidence[0].clone());
        ensure_evidence_count(&mut evidence, "Option A");
        assert_eq!(evidence.len(), 3);
    }
}
