//! Case payloads submitted for arbitration

use serde::{Deserialize, Serialize};

/// Project description used when an advisory case is submitted without one
pub const DEFAULT_PROJECT_DESCRIPTION: &str = "General hackathon project";

/// Decision mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Compare,
    Advisory,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Compare => "compare",
            Mode::Advisory => "advisory",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "compare" => Some(Mode::Compare),
            "advisory" | "counsel" => Some(Mode::Advisory),
            _ => None,
        }
    }
}

/// Judge philosophy parameterizing rule selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Judge {
    Reliability,
    #[serde(alias = "demo")]
    Innovation,
}

impl Judge {
    pub fn as_str(&self) -> &'static str {
        match self {
            Judge::Reliability => "reliability",
            Judge::Innovation => "innovation",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "reliability" => Some(Judge::Reliability),
            "innovation" | "demo" => Some(Judge::Innovation),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSize {
    Solo,
    Small,
    Medium,
    Large,
}

impl TeamSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamSize::Solo => "solo",
            TeamSize::Small => "small",
            TeamSize::Medium => "medium",
            TeamSize::Large => "large",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryGoal {
    DemoFirst,
    Balanced,
    ProductionLeaning,
}

impl PrimaryGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryGoal::DemoFirst => "demo-first",
            PrimaryGoal::Balanced => "balanced",
            PrimaryGoal::ProductionLeaning => "production-leaning",
        }
    }
}

/// Project constraints collected by the form layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    /// Project duration in hours
    pub duration: u32,
    pub team_size: TeamSize,
    pub skill_level: SkillLevel,
    pub primary_goal: PrimaryGoal,
}

/// Mode-specific case content, discriminated by `mode`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CaseContent {
    /// Pick between two free-text options (A, B)
    Compare { options: [String; 2] },
    /// Recommend a technology stack for a described project
    #[serde(rename_all = "camelCase")]
    Advisory {
        #[serde(default)]
        project_description: String,
    },
}

/// One submitted decision request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CasePayload {
    pub judge: Judge,
    pub context: ProjectContext,
    #[serde(flatten)]
    pub content: CaseContent,
}

impl CasePayload {
    pub fn compare(
        judge: Judge,
        context: ProjectContext,
        option_a: impl Into<String>,
        option_b: impl Into<String>,
    ) -> Self {
        Self {
            judge,
            context,
            content: CaseContent::Compare {
                options: [option_a.into(), option_b.into()],
            },
        }
    }

    pub fn advisory(
        judge: Judge,
        context: ProjectContext,
        project_description: impl Into<String>,
    ) -> Self {
        Self {
            judge,
            context,
            content: CaseContent::Advisory {
                project_description: project_description.into(),
            },
        }
    }

    pub fn mode(&self) -> Mode {
        match self.content {
            CaseContent::Compare { .. } => Mode::Compare,
            CaseContent::Advisory { .. } => Mode::Advisory,
        }
    }

    /// The compare options, if this is a compare case
    pub fn options(&self) -> Option<(&str, &str)> {
        match &self.content {
            CaseContent::Compare { options: [a, b] } => Some((a.as_str(), b.as_str())),
            CaseContent::Advisory { .. } => None,
        }
    }

    /// Check the fields the form layer is responsible for
    ///
    /// Blank advisory descriptions are replaced by the default description
    /// rather than rejected.
    pub fn validate(mut self) -> Result<Self, String> {
        if self.context.duration == 0 {
            return Err("context.duration must be a positive number of hours".to_string());
        }

        match &mut self.content {
            CaseContent::Compare { options } => {
                for (label, option) in ["Option A", "Option B"].iter().zip(options.iter_mut()) {
                    let trimmed = option.trim();
                    if trimmed.is_empty() {
                        return Err(format!("{} must describe a technical option", label));
                    }
                    *option = trimmed.to_string();
                }
            }
            CaseContent::Advisory {
                project_description,
            } => {
                let trimmed = project_description.trim();
                *project_description = if trimmed.is_empty() {
                    DEFAULT_PROJECT_DESCRIPTION.to_string()
                } else {
                    trimmed.to_string()
                };
            }
        }

        Ok(self)
    }
}
