//! Repair of loosely-structured inference replies
//!
//! Normalization only fills absent fields and resolves ambiguous ones. It
//! never replaces an unambiguous winner or stack, and it leaves fields owned
//! by the other mode in place so validation can reject the contamination.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{
    CandidateDecision, CandidateEvidence, CandidateWarning, CasePayload, Confidence,
    EVIDENCE_COUNT, Judge, Severity, Winner, evidence_id,
};
use crate::service::engine::fill_rejected_alternatives;

const DEFAULT_COMPARE_REASONING: &str =
    "The court finds this option better aligned with the stated constraints and judging criteria.";
const DEFAULT_ADVISORY_REASONING: &str =
    "This stack balances development speed, stability, and demo readiness for the given constraints.";
const DEFAULT_STACK_NAME: &str = "Recommended Hackathon Stack";
const DEFAULT_STACK: [&str; 3] = ["Frontend Framework", "Backend API", "Lightweight Database"];
const DEFAULT_COMPARE_WARNING: &str = "Additional considerations may apply to this decision.";
const DEFAULT_ADVISORY_WARNING: &str =
    "Additional considerations may apply to this recommendation.";

const STRONG_ADVANTAGE: &str = "Strong Advantage";
const MODERATE_ADVANTAGE: &str = "Moderate Advantage";
const COMPARABLE: &str = "Comparable";

/// Padding evidence for advisory replies, by judge
const RELIABILITY_PADDING: [(&str, &str); 3] = [
    (
        "Stability under time pressure",
        "This stack maintains reliability even under tight hackathon deadlines.",
    ),
    (
        "Low operational risk",
        "The recommended technologies minimize deployment and runtime risks.",
    ),
    (
        "Proven ecosystem maturity",
        "This stack leverages well-established tools with extensive documentation.",
    ),
];

const INNOVATION_PADDING: [(&str, &str); 3] = [
    (
        "Demo impact",
        "This stack maximizes visual appeal and presentation capabilities.",
    ),
    (
        "Developer experience",
        "The recommended tools provide superior development workflow and productivity.",
    ),
    (
        "Modern tooling advantage",
        "This stack leverages cutting-edge technologies for competitive advantage.",
    ),
];

static OPTION_LETTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\boption\s*([ab])\b").expect("option letter pattern is valid")
});

/// Repair `candidate` into the shape the payload's mode requires
pub fn normalize(mut candidate: CandidateDecision, payload: &CasePayload) -> CandidateDecision {
    candidate.mode = Some(payload.mode().as_str().to_string());

    match payload.options() {
        Some((option_a, option_b)) => normalize_compare(&mut candidate, option_a, option_b),
        None => normalize_advisory(&mut candidate, payload.judge),
    }

    candidate
}

fn normalize_compare(candidate: &mut CandidateDecision, option_a: &str, option_b: &str) {
    let winner = resolve_winner(candidate, option_a, option_b);
    candidate.winner = Some(winner.label().to_string());

    let confidence = candidate
        .confidence
        .as_deref()
        .and_then(|c| Confidence::parse(&c.trim().to_lowercase()))
        .unwrap_or(Confidence::Medium);
    candidate.confidence = Some(confidence.as_str().to_string());

    candidate.reasoning = candidate
        .reasoning
        .take()
        .or_else(|| candidate.justification.clone())
        .or_else(|| candidate.summary.clone())
        .or_else(|| Some(DEFAULT_COMPARE_REASONING.to_string()));

    let label = winner.label();
    let mut evidence = candidate
        .evidence
        .take()
        .filter(|items| !items.is_empty())
        .unwrap_or_else(|| default_compare_evidence(label));

    while evidence.len() < EVIDENCE_COUNT {
        evidence.push(filler(
            "Additional Evidence",
            "This option provides additional benefits for the given constraints.",
            label,
        ));
    }
    evidence.truncate(EVIDENCE_COUNT);

    for (i, item) in evidence.iter_mut().enumerate() {
        item.id = Some(evidence_id(i));
        if item.beneficiary.is_none() {
            item.beneficiary = Some(label.to_string());
        }
    }
    candidate.evidence = Some(evidence);

    normalize_warning(candidate.warning.as_mut(), DEFAULT_COMPARE_WARNING);
}

fn normalize_advisory(candidate: &mut CandidateDecision, judge: Judge) {
    let stack_name = match (&candidate.stack_name, &candidate.stack) {
        (Some(name), _) => name.clone(),
        (None, Some(stack)) if !stack.is_empty() => format!("{} Stack", stack[0]),
        (None, _) => DEFAULT_STACK_NAME.to_string(),
    };
    candidate.stack_name = Some(stack_name.clone());

    if candidate.stack.as_ref().is_none_or(|stack| stack.is_empty()) {
        candidate.stack = Some(DEFAULT_STACK.iter().map(|s| s.to_string()).collect());
    }

    candidate.reasoning = candidate
        .reasoning
        .take()
        .or_else(|| candidate.justification.clone())
        .or_else(|| Some(DEFAULT_ADVISORY_REASONING.to_string()));

    let mut evidence = candidate
        .evidence
        .take()
        .filter(|items| !items.is_empty())
        .unwrap_or_else(|| {
            vec![filler(
                "Feasibility",
                "The recommended stack can be implemented reliably within the available time and skill constraints.",
                &stack_name,
            )]
        });

    let padding = match judge {
        Judge::Reliability => &RELIABILITY_PADDING,
        Judge::Innovation => &INNOVATION_PADDING,
    };
    while evidence.len() < EVIDENCE_COUNT {
        let (title, explanation) = padding[evidence.len() - 1];
        evidence.push(filler(title, explanation, &stack_name));
    }
    evidence.truncate(EVIDENCE_COUNT);

    for (i, item) in evidence.iter_mut().enumerate() {
        item.id = Some(evidence_id(i));
        item.beneficiary = Some(stack_name.clone());
    }
    rebalance_advantages(&mut evidence);
    candidate.evidence = Some(evidence);

    let mut rejected = candidate.rejected_alternatives.take().unwrap_or_default();
    fill_rejected_alternatives(&mut rejected, judge);
    candidate.rejected_alternatives = Some(rejected);

    normalize_warning(candidate.warning.as_mut(), DEFAULT_ADVISORY_WARNING);
}

/// Resolve the compare winner to a canonical option
///
/// Order: an already canonical value, an explicit option letter, the lead
/// name of one option in the winner text, the full text of option A
/// anywhere in the reply. Anything else resolves to Option B.
pub fn resolve_winner(candidate: &CandidateDecision, option_a: &str, option_b: &str) -> Winner {
    let raw = candidate
        .winner
        .as_deref()
        .or(candidate.decision.as_deref())
        .unwrap_or_default();

    if let Some(winner) = Winner::from_canonical(raw) {
        return winner;
    }

    let text = raw.trim().to_lowercase();

    if let Some(winner) = explicit_letter(&text) {
        tracing::debug!(raw = %raw, winner = winner.label(), "Resolved winner from option letter");
        return winner;
    }

    let mentions_a = lead_name(option_a).is_some_and(|name| text.contains(&name));
    let mentions_b = lead_name(option_b).is_some_and(|name| text.contains(&name));
    match (mentions_a, mentions_b) {
        (true, false) => return Winner::OptionA,
        (false, true) => return Winner::OptionB,
        _ => {}
    }

    let option_a = option_a.trim().to_lowercase();
    let combined = serde_json::to_string(candidate)
        .unwrap_or_default()
        .to_lowercase();
    let winner = if !option_a.is_empty() && combined.contains(&option_a) {
        Winner::OptionA
    } else {
        Winner::OptionB
    };

    tracing::debug!(raw = %raw, winner = winner.label(), "Resolved ambiguous winner by option text");
    winner
}

/// The single option letter named in `text`, if exactly one is
fn explicit_letter(text: &str) -> Option<Winner> {
    let mut letters = OPTION_LETTER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());

    let first = match letters.next() {
        Some(letter) => letter,
        None => text
            .trim_matches(|c: char| !c.is_alphanumeric())
            .to_string(),
    };
    if letters.any(|other| other != first) {
        return None;
    }

    match first.as_str() {
        "a" => Some(Winner::OptionA),
        "b" => Some(Winner::OptionB),
        _ => None,
    }
}

/// Leading name of an option description, e.g. "flask" for "Flask - Lightweight..."
fn lead_name(option: &str) -> Option<String> {
    let lead = [" - ", ":", ",", "("]
        .iter()
        .filter_map(|sep| option.find(sep))
        .min()
        .map_or(option, |end| &option[..end])
        .trim()
        .to_lowercase();
    (lead.chars().count() >= 3).then_some(lead)
}

/// Keep one decisive tier when the reply's distribution is degenerate
///
/// Missing tiers count as `Comparable`.
fn rebalance_advantages(evidence: &mut [CandidateEvidence]) {
    if evidence.len() != EVIDENCE_COUNT {
        return;
    }
    for item in evidence.iter_mut().filter(|item| item.advantage.is_none()) {
        item.advantage = Some(COMPARABLE.to_string());
    }

    let is_comparable = |item: &CandidateEvidence| {
        item.advantage.as_deref() == Some(COMPARABLE)
    };
    let strong = evidence
        .iter()
        .filter(|item| matches!(item.advantage.as_deref(), Some(STRONG_ADVANTAGE | "winner")))
        .count();
    let comparable = evidence.iter().filter(|item| is_comparable(*item)).count();

    if strong == 0 || comparable == EVIDENCE_COUNT {
        tracing::debug!(strong, comparable, "Reassigning degenerate advantage tiers");
        for (item, tier) in evidence
            .iter_mut()
            .zip([STRONG_ADVANTAGE, MODERATE_ADVANTAGE, COMPARABLE])
        {
            item.advantage = Some(tier.to_string());
        }
    } else if comparable > 1 {
        let mut to_fix = comparable - 1;
        for (i, item) in evidence.iter_mut().enumerate() {
            if to_fix == 0 {
                break;
            }
            if is_comparable(&*item) {
                let tier = if i == 0 { STRONG_ADVANTAGE } else { MODERATE_ADVANTAGE };
                item.advantage = Some(tier.to_string());
                to_fix -= 1;
            }
        }
    }
}

fn normalize_warning(warning: Option<&mut CandidateWarning>, default_reason: &str) {
    let Some(warning) = warning else {
        return;
    };

    let severity = warning
        .severity
        .as_deref()
        .and_then(Severity::parse)
        .unwrap_or(Severity::Medium);
    warning.severity = Some(severity.as_str().to_string());

    if warning.reason.is_none() {
        warning.reason = Some(default_reason.to_string());
    }
}

fn default_compare_evidence(winner: &str) -> Vec<CandidateEvidence> {
    vec![
        filler(
            "Constraint Alignment",
            "This option aligns more closely with time, skill, and demo constraints.",
            winner,
        ),
        filler(
            "Implementation Risk",
            "This option presents lower implementation risk for the given constraints.",
            winner,
        ),
        filler(
            "Technology Comparison",
            "Both options have merit, but this one better fits the project requirements.",
            "Both",
        ),
    ]
}

fn filler(title: &str, explanation: &str, beneficiary: &str) -> CandidateEvidence {
    CandidateEvidence {
        id: None,
        title: Some(title.to_string()),
        explanation: Some(explanation.to_string()),
        beneficiary: Some(beneficiary.to_string()),
        advantage: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PrimaryGoal, ProjectContext, SkillLevel, TeamSize};
    use serde_json::json;

    const FLASK: &str = "Flask - Lightweight Python web framework with minimal setup.";
    const FASTAPI: &str = "FastAPI - Modern Python API framework with async support.";

    fn context() -> ProjectContext {
        ProjectContext {
            duration: 36,
            team_size: TeamSize::Small,
            skill_level: SkillLevel::Intermediate,
            primary_goal: PrimaryGoal::Balanced,
        }
    }

    fn compare_payload() -> CasePayload {
        CasePayload::compare(Judge::Reliability, context(), FLASK, FASTAPI)
    }

    fn advisory_payload(judge: Judge) -> CasePayload {
        CasePayload::advisory(judge, context(), "Realtime chat app")
    }

    fn candidate(value: serde_json::Value) -> CandidateDecision {
        CandidateDecision::from_value(&value).unwrap()
    }

    #[test]
    fn test_free_text_option_b_resolves_to_option_b() {
        let raw = candidate(json!({"winner": "I think option b is better"}));
        let normalized = normalize(raw, &compare_payload());
        assert_eq!(normalized.winner.as_deref(), Some("Option B"));
    }

    #[test]
    fn test_article_a_does_not_pick_option_a() {
        let raw = candidate(json!({"winner": "A safer framework overall: option B"}));
        assert_eq!(
            resolve_winner(&raw, FLASK, FASTAPI),
            Winner::OptionB
        );
    }

    #[test]
    fn test_bare_letter_and_alternate_key() {
        let raw = candidate(json!({"decision": "a"}));
        assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionA);
    }

    #[test]
    fn test_bare_letter_with_punctuation() {
        for winner in ["A.", "A)", "(a)", " a! "] {
            let raw = candidate(json!({ "winner": winner }));
            assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionA, "{}", winner);
        }

        let raw = candidate(json!({"winner": "B:"}));
        assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionB);
    }

    #[test]
    fn test_both_letters_fall_through_to_names() {
        let raw = candidate(json!({"winner": "Option A (Flask) over option B"}));
        assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionA);

        let raw = candidate(json!({"winner": "Not option A, option B"}));
        // ambiguous letters, no names, option A text absent from the reply
        assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionB);
    }

    #[test]
    fn test_lead_name_resolves_winner() {
        let raw = candidate(json!({"winner": "FastAPI"}));
        assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionB);

        let raw = candidate(json!({"winner": "flask wins"}));
        assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionA);
    }

    #[test]
    fn test_missing_winner_defaults_to_option_b() {
        let raw = candidate(json!({"reasoning": "Both are fine"}));
        assert_eq!(resolve_winner(&raw, FLASK, FASTAPI), Winner::OptionB);
    }

    #[test]
    fn test_compare_defaults_are_filled() {
        let raw = candidate(json!({"winner": "Option A", "confidence": "very high"}));
        let normalized = normalize(raw, &compare_payload());

        assert_eq!(normalized.mode.as_deref(), Some("compare"));
        assert_eq!(normalized.confidence.as_deref(), Some("medium"));
        assert_eq!(normalized.reasoning.as_deref(), Some(DEFAULT_COMPARE_REASONING));

        let evidence = normalized.evidence.unwrap();
        assert_eq!(evidence.len(), 3);
        assert_eq!(evidence[0].title.as_deref(), Some("Constraint Alignment"));
        assert_eq!(evidence[2].beneficiary.as_deref(), Some("Both"));
    }

    #[test]
    fn test_compare_evidence_padded_and_truncated() {
        let raw = candidate(json!({
            "winner": "Option B",
            "justification": "FastAPI docs impress judges",
            "evidence": [{"id": "X", "title": "Docs", "explanation": "Auto docs"}]
        }));
        let normalized = normalize(raw, &compare_payload());
        assert_eq!(normalized.reasoning.as_deref(), Some("FastAPI docs impress judges"));

        let evidence = normalized.evidence.unwrap();
        let ids: Vec<_> = evidence.iter().map(|e| e.id.clone().unwrap()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
        assert_eq!(evidence[0].beneficiary.as_deref(), Some("Option B"));
        assert_eq!(evidence[1].title.as_deref(), Some("Additional Evidence"));

        let items: Vec<_> = (0..5)
            .map(|i| json!({"id": i.to_string(), "title": "t", "explanation": "e"}))
            .collect();
        let raw = candidate(json!({"winner": "Option A", "evidence": items}));
        assert_eq!(normalize(raw, &compare_payload()).evidence.unwrap().len(), 3);
    }

    #[test]
    fn test_mode_is_forced_from_payload() {
        let raw = candidate(json!({"mode": "advisory", "winner": "Option A"}));
        let normalized = normalize(raw, &compare_payload());
        assert_eq!(normalized.mode.as_deref(), Some("compare"));
    }

    #[test]
    fn test_advisory_single_comparable_item_is_rebalanced() {
        let raw = candidate(json!({
            "stackName": "SvelteKit Stack",
            "stack": ["SvelteKit", "Supabase"],
            "reasoning": "Fast to build",
            "evidence": [{"id": "A", "title": "Speed", "explanation": "Quick", "advantage": "Comparable"}]
        }));
        let normalized = normalize(raw, &advisory_payload(Judge::Reliability));

        let evidence = normalized.evidence.unwrap();
        assert_eq!(evidence.len(), 3);
        let tiers: Vec<_> = evidence.iter().map(|e| e.advantage.clone().unwrap()).collect();
        assert_eq!(tiers, vec!["Strong Advantage", "Moderate Advantage", "Comparable"]);
        assert_eq!(evidence[1].title.as_deref(), Some("Stability under time pressure"));
        assert_eq!(evidence[2].title.as_deref(), Some("Low operational risk"));
        assert!(
            evidence
                .iter()
                .all(|e| e.beneficiary.as_deref() == Some("SvelteKit Stack"))
        );
    }

    #[test]
    fn test_advisory_keeps_meaningful_distribution() {
        let raw = candidate(json!({
            "stackName": "MERN",
            "stack": ["MongoDB", "Express", "React", "Node"],
            "evidence": [
                {"title": "a", "explanation": "a", "advantage": "Comparable"},
                {"title": "b", "explanation": "b", "advantage": "Strong Advantage"},
                {"title": "c", "explanation": "c"}
            ]
        }));
        let evidence = normalize(raw, &advisory_payload(Judge::Innovation))
            .evidence
            .unwrap();
        let tiers: Vec<_> = evidence.iter().map(|e| e.advantage.clone().unwrap()).collect();
        assert_eq!(tiers, vec!["Strong Advantage", "Strong Advantage", "Comparable"]);
    }

    #[test]
    fn test_advisory_defaults() {
        let raw = candidate(json!({"stack": ["Next.js", "Tailwind"]}));
        let normalized = normalize(raw, &advisory_payload(Judge::Innovation));

        assert_eq!(normalized.stack_name.as_deref(), Some("Next.js Stack"));
        assert_eq!(normalized.reasoning.as_deref(), Some(DEFAULT_ADVISORY_REASONING));
        let evidence = normalized.evidence.unwrap();
        assert_eq!(evidence[0].title.as_deref(), Some("Feasibility"));
        assert_eq!(evidence[1].title.as_deref(), Some("Demo impact"));
        assert_eq!(
            normalized.rejected_alternatives.unwrap(),
            vec![
                "Plain static implementations",
                "Low-visual-impact stacks",
                "Outdated UI frameworks"
            ]
        );

        let empty = normalize(candidate(json!({})), &advisory_payload(Judge::Reliability));
        assert_eq!(empty.stack_name.as_deref(), Some(DEFAULT_STACK_NAME));
        assert_eq!(empty.stack.unwrap().len(), 3);
    }

    #[test]
    fn test_short_rejected_alternatives_are_cycled() {
        let raw = candidate(json!({"stackName": "LAMP", "rejectedAlternatives": ["Kubernetes", "Kafka"]}));
        let normalized = normalize(raw, &advisory_payload(Judge::Reliability));
        assert_eq!(
            normalized.rejected_alternatives.unwrap(),
            vec!["Kubernetes", "Kafka", "Heavy microservice designs"]
        );
    }

    #[test]
    fn test_contamination_is_left_for_validation() {
        let raw = candidate(json!({"winner": "Option A", "stackName": "MERN"}));
        let normalized = normalize(raw, &compare_payload());
        assert_eq!(normalized.stack_name.as_deref(), Some("MERN"));

        let raw = candidate(json!({"winner": "Option B", "stackName": "MERN"}));
        let normalized = normalize(raw, &advisory_payload(Judge::Reliability));
        assert_eq!(normalized.winner.as_deref(), Some("Option B"));
    }

    #[test]
    fn test_warning_shape_is_repaired() {
        let raw = candidate(json!({"winner": "Option A", "warning": {"severity": "CRITICAL"}}));
        let warning = normalize(raw, &compare_payload()).warning.unwrap();
        assert_eq!(warning.severity.as_deref(), Some("medium"));
        assert_eq!(warning.reason.as_deref(), Some(DEFAULT_COMPARE_WARNING));

        let raw = candidate(json!({"stackName": "LAMP", "warning": {"severity": "High", "reason": "Tight"}}));
        let warning = normalize(raw, &advisory_payload(Judge::Reliability)).warning.unwrap();
        assert_eq!(warning.severity.as_deref(), Some("high"));
        assert_eq!(warning.reason.as_deref(), Some("Tight"));
    }
}
