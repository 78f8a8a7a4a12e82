//! Deterministic advisory engine

use crate::model::{
    Advantage, AdvisoryDecision, Confidence, EvidenceItem, Judge, PrimaryGoal, ProjectContext,
    Severity, SkillLevel, TeamSize, Warning,
};
use crate::service::engine::{Rule, RuleTable, ensure_evidence_count, fill_rejected_alternatives};

/// A named technology stack the engine can recommend
#[derive(Debug, PartialEq, Eq)]
pub struct StackDefinition {
    pub name: &'static str,
    pub components: [&'static str; 4],
    pub description: &'static str,
}

pub const RAPID_PROTOTYPE: StackDefinition = StackDefinition {
    name: "Rapid Prototype Stack",
    components: [
        "Static HTML/CSS/JavaScript frontend",
        "Serverless functions (Vercel/Netlify)",
        "Third-party APIs for data",
        "Simple deployment",
    ],
    description: "Minimal custom code with maximum external service leverage",
};

pub const FLASK_SIMPLE: StackDefinition = StackDefinition {
    name: "Flask + Simple Frontend Stack",
    components: [
        "Flask API backend",
        "HTML/CSS/JavaScript frontend",
        "SQLite database",
        "Simple deployment",
    ],
    description: "Proven Python stack with minimal complexity",
};

pub const EXPRESS_STATIC: StackDefinition = StackDefinition {
    name: "Express + Static Frontend Stack",
    components: [
        "Express.js API backend",
        "Static HTML/CSS/JS frontend",
        "JSON file storage",
        "Node.js deployment",
    ],
    description: "Familiar JavaScript stack with low deployment complexity",
};

pub const BALANCED_MODERN: StackDefinition = StackDefinition {
    name: "Balanced Modern Stack",
    components: [
        "React or Vue.js frontend",
        "Node.js or Python backend",
        "REST API architecture",
        "Simple database (SQLite/PostgreSQL)",
    ],
    description: "Modern but proven technologies with good documentation",
};

pub const DEMO_IMPACT: StackDefinition = StackDefinition {
    name: "Demo-Impact Stack",
    components: [
        "Next.js or Nuxt.js framework",
        "Modern UI library (Tailwind CSS)",
        "API backend with real-time features",
        "Cloud deployment (Vercel/Netlify)",
    ],
    description: "Cutting-edge technologies optimized for presentation impact",
};

pub const PRODUCTION_LEANING: StackDefinition = StackDefinition {
    name: "Production-Leaning Stack",
    components: [
        "TypeScript frontend framework",
        "Structured backend architecture",
        "Proper database design",
        "Testing and CI/CD setup",
    ],
    description: "Enterprise-ready approach with clear separation of concerns",
};

#[cfg(test)]
static STACKS: [&StackDefinition; 6] = [
    &RAPID_PROTOTYPE,
    &FLASK_SIMPLE,
    &EXPRESS_STATIC,
    &BALANCED_MODERN,
    &DEMO_IMPACT,
    &PRODUCTION_LEANING,
];

const RELIABILITY_REJECTIONS: [(&str, &str); 3] = [
    ("Cutting-edge frameworks", "Unproven stability for hackathon timeline"),
    ("Complex microservices", "Excessive architectural complexity"),
    ("Experimental technologies", "High risk of unexpected issues"),
];

const INNOVATION_REJECTIONS: [(&str, &str); 3] = [
    (
        "Legacy technologies",
        "Limited demonstration impact and reduced judge engagement",
    ),
    (
        "Purely functional approaches",
        "Insufficient visual appeal for presentation-focused evaluation",
    ),
    (
        "Minimal UI frameworks",
        "Reduced capacity for impressive user experience demonstration",
    ),
];

/// Recommendation after the ruling step, before evidence is attached
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvisoryRuling {
    pub stack: &'static StackDefinition,
    pub confidence: Confidence,
    pub warnings: Vec<String>,
}

impl AdvisoryRuling {
    fn plain(stack: &'static StackDefinition) -> Self {
        Self {
            stack,
            confidence: Confidence::High,
            warnings: Vec::new(),
        }
    }
}

static RELIABILITY_RULES: RuleTable<AdvisoryRuling> = RuleTable {
    rules: &[
        Rule {
            name: "rapid-prototype",
            when: |c, risk| {
                risk.is_high() || (c.skill_level == SkillLevel::Beginner && c.duration <= 36)
            },
            then: |c| {
                let mut ruling = AdvisoryRuling::plain(&RAPID_PROTOTYPE);
                if c.primary_goal == PrimaryGoal::ProductionLeaning {
                    ruling.warnings.push(
                        "The court strongly advises against production-leaning goals given current constraints".to_string(),
                    );
                }
                ruling
            },
        },
        Rule {
            name: "flask-simple",
            when: |c, _| c.skill_level == SkillLevel::Beginner || c.duration <= 24,
            then: |_| AdvisoryRuling::plain(&FLASK_SIMPLE),
        },
        Rule {
            name: "production-leaning",
            when: |c, _| {
                c.primary_goal == PrimaryGoal::ProductionLeaning
                    || (c.skill_level == SkillLevel::Advanced && c.duration >= 48)
            },
            then: |_| AdvisoryRuling::plain(&PRODUCTION_LEANING),
        },
        Rule {
            name: "balanced-modern",
            when: |c, _| c.skill_level == SkillLevel::Intermediate && c.duration >= 36,
            then: |_| AdvisoryRuling::plain(&BALANCED_MODERN),
        },
    ],
    otherwise: Rule {
        name: "express-static",
        when: |_, _| true,
        then: |_| AdvisoryRuling::plain(&EXPRESS_STATIC),
    },
};

static INNOVATION_RULES: RuleTable<AdvisoryRuling> = RuleTable {
    rules: &[
        Rule {
            name: "demo-impact",
            when: |c, _| {
                c.primary_goal == PrimaryGoal::DemoFirst && c.skill_level != SkillLevel::Beginner
            },
            then: |c| {
                let mut ruling = AdvisoryRuling::plain(&DEMO_IMPACT);
                if c.duration <= 24 && c.skill_level == SkillLevel::Intermediate {
                    ruling.warnings.push(
                        "The court cautions that this ambitious approach requires careful time management".to_string(),
                    );
                    ruling.confidence = Confidence::Medium;
                }
                if c.duration <= 24 && c.team_size == TeamSize::Solo {
                    ruling.warnings.push(
                        "Solo development with demo-impact stack under 24 hours presents significant execution risk".to_string(),
                    );
                    ruling.confidence = Confidence::Low;
                }
                ruling
            },
        },
        Rule {
            name: "production-leaning",
            when: |c, _| c.primary_goal == PrimaryGoal::ProductionLeaning,
            then: |_| AdvisoryRuling::plain(&PRODUCTION_LEANING),
        },
        Rule {
            name: "balanced-modern",
            when: |c, _| c.skill_level == SkillLevel::Advanced && c.duration >= 36,
            then: |_| AdvisoryRuling::plain(&BALANCED_MODERN),
        },
        Rule {
            name: "rapid-prototype",
            when: |_, risk| risk.is_high(),
            then: |_| AdvisoryRuling {
                warnings: vec![
                    "The court recommends focusing on core functionality over visual impact given constraints".to_string(),
                ],
                ..AdvisoryRuling::plain(&RAPID_PROTOTYPE)
            },
        },
    ],
    otherwise: Rule {
        name: "express-static",
        when: |_, _| true,
        then: |_| AdvisoryRuling::plain(&EXPRESS_STATIC),
    },
};

pub fn rules_for(judge: Judge) -> &'static RuleTable<AdvisoryRuling> {
    match judge {
        Judge::Reliability => &RELIABILITY_RULES,
        Judge::Innovation => &INNOVATION_RULES,
    }
}

/// Deterministic engine for advisory cases
pub struct AdvisoryEngine;

impl AdvisoryEngine {
    pub fn decide(context: &ProjectContext, judge: Judge) -> AdvisoryDecision {
        let (rule, ruling) = rules_for(judge).evaluate(context);
        let stack = ruling.stack;

        tracing::debug!(
            judge = judge.as_str(),
            rule = rule,
            stack = stack.name,
            "Advisory rule matched"
        );

        let mut evidence = build_evidence(context, judge, stack);
        ensure_evidence_count(&mut evidence, stack.name);

        let mut rejected_alternatives: Vec<String> = rejections(judge)
            .iter()
            .map(|(name, reason)| format!("{}: {}", name, reason))
            .collect();
        fill_rejected_alternatives(&mut rejected_alternatives, judge);

        AdvisoryDecision {
            stack_name: stack.name.to_string(),
            stack: stack.components.iter().map(|c| c.to_string()).collect(),
            stack_description: Some(stack.description.to_string()),
            confidence: Some(ruling.confidence),
            reasoning: reasoning(context, judge, stack),
            evidence,
            rejected_alternatives,
            warning: build_warning(&ruling),
        }
    }
}

fn rejections(judge: Judge) -> &'static [(&'static str, &'static str); 3] {
    match judge {
        Judge::Reliability => &RELIABILITY_REJECTIONS,
        Judge::Innovation => &INNOVATION_REJECTIONS,
    }
}

fn reasoning(context: &ProjectContext, judge: Judge, stack: &StackDefinition) -> String {
    let philosophy = match judge {
        Judge::Reliability => "prioritizing proven stability and minimal risk",
        Judge::Innovation => "emphasizing demonstration impact and technical innovation",
    };

    format!(
        "The court finds that {} optimally balances project requirements with team constraints ({}-hour timeline, {} team, {} skill level, {} approach), {}. This approach leverages {} and {} to deliver {}.",
        stack.name,
        context.duration,
        context.team_size.as_str(),
        context.skill_level.as_str(),
        context.primary_goal.as_str(),
        philosophy,
        stack.components[0],
        stack.components[1],
        stack.description.to_lowercase()
    )
}

fn build_evidence(
    context: &ProjectContext,
    judge: Judge,
    stack: &StackDefinition,
) -> Vec<EvidenceItem> {
    let focus = match judge {
        Judge::Reliability => "minimizes technical risk",
        Judge::Innovation => "maximizes demonstration impact",
    };

    let item = |id: &str, title: &str, explanation: String| EvidenceItem {
        id: id.to_string(),
        title: title.to_string(),
        explanation,
        beneficiary: stack.name.to_string(),
        advantage: Some(Advantage::Winner),
    };

    vec![
        item(
            "A",
            "Technology-Constraint Alignment",
            format!(
                "{} aligns optimally with {}-hour timeline and {} skill level constraints.",
                stack.name,
                context.duration,
                context.skill_level.as_str()
            ),
        ),
        item(
            "B",
            "Risk-Benefit Assessment",
            format!(
                "Recommended approach {} while maintaining development velocity.",
                focus
            ),
        ),
        item(
            "C",
            "Goal Optimization",
            format!(
                "Stack selection prioritizes {} objectives while accounting for practical implementation constraints.",
                context.primary_goal.as_str()
            ),
        ),
    ]
}

fn build_warning(ruling: &AdvisoryRuling) -> Option<Warning> {
    let (first, rest) = ruling.warnings.split_first()?;
    let severity = if ruling.confidence == Confidence::Low {
        Severity::High
    } else {
        Severity::Medium
    };
    let recommendation = if rest.is_empty() {
        "Proceed with careful monitoring of identified risk factors.".to_string()
    } else {
        format!("Additional considerations: {}.", rest.join("; "))
    };

    Some(Warning {
        severity,
        reason: first.clone(),
        recommendation: Some(recommendation),
    })
}
