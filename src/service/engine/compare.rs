//! Deterministic compare engine

use crate::model::{
    Advantage, CompareDecision, Confidence, EvidenceItem, Judge, PrimaryGoal, ProjectContext,
    Severity, SkillLevel, Warning, Winner,
};
use crate::service::engine::{Rule, RuleTable, ensure_evidence_count};
use crate::service::scoring::{ScoringAxis, select};

/// Reason used when a reliability ruling is not confident for non-advanced teams
pub const TRADE_OFF_WARNING: &str =
    "This decision involves trade-offs that may introduce minor risk under hackathon constraints.";

/// Outcome of a compare rule, before the options are scored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareRuling {
    pub axis: ScoringAxis,
    pub confidence: Confidence,
    pub reasoning: String,
    pub warnings: Vec<String>,
}

static RELIABILITY_RULES: RuleTable<CompareRuling> = RuleTable {
    rules: &[
        Rule {
            name: "high-risk",
            when: |_, risk| risk.is_high(),
            then: |c| CompareRuling {
                axis: ScoringAxis::Safety,
                confidence: Confidence::High,
                reasoning: format!(
                    "The court strongly favors the safer technical approach given the high-risk constraints ({} skill level, {}-hour timeline, {} team). Proven stability takes precedence over innovation.",
                    c.skill_level.as_str(),
                    c.duration,
                    c.team_size.as_str()
                ),
                warnings: if c.primary_goal == PrimaryGoal::DemoFirst {
                    vec!["The court advises against demo-first goals given current risk factors".to_string()]
                } else {
                    Vec::new()
                },
            },
        },
        Rule {
            name: "beginner-or-short",
            when: |c, _| c.skill_level == SkillLevel::Beginner || c.duration <= 24,
            then: |c| CompareRuling {
                axis: ScoringAxis::Safety,
                confidence: Confidence::High,
                reasoning: format!(
                    "The court recommends the more established option to minimize learning overhead and implementation risk within the {}-hour constraint.",
                    c.duration
                ),
                warnings: Vec::new(),
            },
        },
        Rule {
            name: "advanced-production",
            when: |c, _| {
                c.primary_goal == PrimaryGoal::ProductionLeaning
                    && c.skill_level == SkillLevel::Advanced
            },
            then: |_| CompareRuling {
                axis: ScoringAxis::Robustness,
                confidence: Confidence::High,
                reasoning: "Given advanced skill level and production-leaning goals, the court favors the option with superior architectural foundations and long-term maintainability.".to_string(),
                warnings: Vec::new(),
            },
        },
    ],
    otherwise: Rule {
        name: "balanced-stability",
        when: |_, _| true,
        then: |_| CompareRuling {
            axis: ScoringAxis::Safety,
            confidence: Confidence::Medium,
            reasoning: "The court finds both options viable but leans toward the approach offering better stability-to-complexity ratio for intermediate constraints.".to_string(),
            warnings: Vec::new(),
        },
    },
};

static INNOVATION_RULES: RuleTable<CompareRuling> = RuleTable {
    rules: &[
        Rule {
            name: "demo-first",
            when: |c, _| {
                c.primary_goal == PrimaryGoal::DemoFirst && c.skill_level != SkillLevel::Beginner
            },
            then: |c| {
                let mut ruling = CompareRuling {
                    axis: ScoringAxis::Innovation,
                    confidence: if c.skill_level == SkillLevel::Advanced {
                        Confidence::High
                    } else {
                        Confidence::Medium
                    },
                    reasoning: format!(
                        "The court prioritizes demonstration impact and innovation. The selected option provides superior visual appeal and presentation capabilities for {} teams.",
                        c.skill_level.as_str()
                    ),
                    warnings: Vec::new(),
                };
                if c.duration <= 24 && c.skill_level == SkillLevel::Intermediate {
                    ruling.warnings.push(
                        "The court cautions that this ambitious approach requires careful time management".to_string(),
                    );
                    ruling.confidence = Confidence::Medium;
                }
                ruling
            },
        },
        Rule {
            name: "production-leaning",
            when: |c, _| c.primary_goal == PrimaryGoal::ProductionLeaning,
            then: |_| CompareRuling {
                axis: ScoringAxis::Robustness,
                confidence: Confidence::High,
                reasoning: "Despite innovation focus, the court recognizes production-leaning goals require architectural sophistication and long-term viability.".to_string(),
                warnings: Vec::new(),
            },
        },
        Rule {
            name: "high-risk",
            when: |_, risk| risk.is_high(),
            then: |_| CompareRuling {
                axis: ScoringAxis::Safety,
                confidence: Confidence::Medium,
                reasoning: "The court reluctantly recommends the safer option due to high-risk constraints, though this limits demonstration potential.".to_string(),
                warnings: vec![
                    "Consider focusing on core functionality over visual impact given constraints".to_string(),
                ],
            },
        },
    ],
    otherwise: Rule {
        name: "balanced-innovation",
        when: |_, _| true,
        then: |_| CompareRuling {
            axis: ScoringAxis::Innovation,
            confidence: Confidence::High,
            reasoning: "The court balances innovation potential with practical constraints, favoring the option with better demonstration capabilities while maintaining feasibility.".to_string(),
            warnings: Vec::new(),
        },
    },
};

pub fn rules_for(judge: Judge) -> &'static RuleTable<CompareRuling> {
    match judge {
        Judge::Reliability => &RELIABILITY_RULES,
        Judge::Innovation => &INNOVATION_RULES,
    }
}

/// Deterministic engine for compare cases
pub struct CompareEngine;

impl CompareEngine {
    pub fn decide(
        context: &ProjectContext,
        judge: Judge,
        option_a: &str,
        option_b: &str,
    ) -> CompareDecision {
        let (rule, ruling) = rules_for(judge).evaluate(context);
        let winner = select(ruling.axis, option_a, option_b);

        tracing::debug!(
            judge = judge.as_str(),
            rule = rule,
            axis = ?ruling.axis,
            winner = winner.label(),
            "Compare rule matched"
        );

        let mut evidence = build_evidence(context, judge, winner);
        ensure_evidence_count(&mut evidence, winner.label());

        let warning = build_warning(context, judge, &ruling);

        CompareDecision {
            winner,
            confidence: ruling.confidence,
            reasoning: ruling.reasoning,
            evidence,
            warning,
        }
    }
}

fn build_evidence(context: &ProjectContext, judge: Judge, winner: Winner) -> Vec<EvidenceItem> {
    let label = winner.label();

    let (title_b, explanation_b) = match judge {
        Judge::Reliability => (
            "Risk Assessment",
            format!(
                "{} presents lower implementation risk while maintaining development velocity.",
                label
            ),
        ),
        Judge::Innovation => (
            "Innovation Potential",
            format!(
                "{} offers superior demonstration impact and presentation capabilities.",
                label
            ),
        ),
    };

    vec![
        EvidenceItem {
            id: "A".to_string(),
            title: "Constraint-Technology Alignment".to_string(),
            explanation: format!(
                "{} demonstrates superior alignment with {}-hour timeline and {} skill level constraints.",
                label,
                context.duration,
                context.skill_level.as_str()
            ),
            beneficiary: label.to_string(),
            advantage: Some(Advantage::Winner),
        },
        EvidenceItem {
            id: "B".to_string(),
            title: title_b.to_string(),
            explanation: explanation_b,
            beneficiary: label.to_string(),
            advantage: Some(Advantage::Winner),
        },
        EvidenceItem {
            id: "C".to_string(),
            title: "Goal Optimization".to_string(),
            explanation: format!(
                "The selected approach prioritizes {} objectives while accounting for practical implementation constraints.",
                context.primary_goal.as_str()
            ),
            beneficiary: label.to_string(),
            advantage: Some(match winner {
                Winner::OptionA => Advantage::Winner,
                Winner::OptionB => Advantage::RunnerUp,
            }),
        },
    ]
}

/// Engine warnings take precedence over the reliability trade-off warning
fn build_warning(context: &ProjectContext, judge: Judge, ruling: &CompareRuling) -> Option<Warning> {
    if let Some((first, rest)) = ruling.warnings.split_first() {
        let severity = if ruling.confidence == Confidence::Low {
            Severity::High
        } else {
            Severity::Medium
        };
        let mut warning = Warning::new(severity, first.clone());
        if !rest.is_empty() {
            warning.recommendation = Some(format!("Additional considerations: {}.", rest.join("; ")));
        }
        return Some(warning);
    }

    let cautious_skill = matches!(
        context.skill_level,
        SkillLevel::Beginner | SkillLevel::Intermediate
    );
    (judge == Judge::Reliability && cautious_skill && ruling.confidence != Confidence::High)
        .then(|| Warning::new(Severity::Low, TRADE_OFF_WARNING))
}
