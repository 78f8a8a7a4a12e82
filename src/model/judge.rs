//! Judge profiles
//!
//! The weights are declared policy shown to users. No engine computes a
//! weighted sum from them.

use serde::Serialize;

use crate::model::case::Judge;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeWeight {
    pub factor: &'static str,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JudgeProfile {
    pub judge: Judge,
    pub name: &'static str,
    pub specialty: &'static str,
    pub philosophy: &'static str,
    pub weights: &'static [JudgeWeight],
}

const RELIABILITY: JudgeProfile = JudgeProfile {
    judge: Judge::Reliability,
    name: "Hon. Justice Reliability",
    specialty: "Stability & Proven Solutions",
    philosophy: "The court prioritizes proven solutions and minimal risk to ensure project success.",
    weights: &[
        JudgeWeight { factor: "stability", weight: 0.35 },
        JudgeWeight { factor: "learningCurve", weight: 0.25 },
        JudgeWeight { factor: "teamAlignment", weight: 0.20 },
        JudgeWeight { factor: "timeToImplementation", weight: 0.15 },
        JudgeWeight { factor: "visualImpact", weight: 0.05 },
    ],
};

const INNOVATION: JudgeProfile = JudgeProfile {
    judge: Judge::Innovation,
    name: "Hon. Justice Innovation",
    specialty: "Impact & Presentation",
    philosophy: "The court values innovation and presentation impact for maximum demonstration effect.",
    weights: &[
        JudgeWeight { factor: "visualImpact", weight: 0.35 },
        JudgeWeight { factor: "demoAppeal", weight: 0.25 },
        JudgeWeight { factor: "timeToDemo", weight: 0.20 },
        JudgeWeight { factor: "innovation", weight: 0.15 },
        JudgeWeight { factor: "stability", weight: 0.05 },
    ],
};

impl Judge {
    pub fn profile(&self) -> &'static JudgeProfile {
        match self {
            Judge::Reliability => &RELIABILITY,
            Judge::Innovation => &INNOVATION,
        }
    }

    /// Instruction sentence describing this judge to the inference service
    pub fn prompt_philosophy(&self) -> &'static str {
        match self {
            Judge::Reliability => {
                "You prefer stable, proven, low-risk technologies. You penalize novelty and unnecessary complexity."
            }
            Judge::Innovation => {
                "You prefer modern tooling, demo impact, and developer experience. You favor innovation and presentation capabilities."
            }
        }
    }
}

/// Both profiles in display order
pub fn all_profiles() -> [&'static JudgeProfile; 2] {
    [Judge::Reliability.profile(), Judge::Innovation.profile()]
}
