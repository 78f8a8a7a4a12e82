//! Built-in precedent cases users can replay

use serde::Serialize;

use crate::model::case::{CasePayload, Judge, PrimaryGoal, ProjectContext, SkillLevel, TeamSize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Precedent {
    pub id: &'static str,
    pub title: &'static str,
    pub case: CasePayload,
}

fn context(
    duration: u32,
    team_size: TeamSize,
    skill_level: SkillLevel,
    primary_goal: PrimaryGoal,
) -> ProjectContext {
    ProjectContext {
        duration,
        team_size,
        skill_level,
        primary_goal,
    }
}

/// The precedent catalogue in display order
pub fn precedents() -> Vec<Precedent> {
    vec![
        Precedent {
            id: "flask-vs-fastapi",
            title: "Flask vs FastAPI for a 24-hour build",
            case: CasePayload::compare(
                Judge::Reliability,
                context(24, TeamSize::Medium, SkillLevel::Intermediate, PrimaryGoal::Balanced),
                "Flask - Lightweight Python web framework with minimal setup. Proven stability, extensive documentation, and simple deployment. Perfect for rapid prototyping with familiar patterns.",
                "FastAPI - Modern Python API framework with automatic documentation generation. Built-in async support, type hints, and interactive API docs. Great for impressive demos.",
            ),
        },
        Precedent {
            id: "simple-vs-complex",
            title: "Simple stack vs enterprise architecture",
            case: CasePayload::compare(
                Judge::Reliability,
                context(48, TeamSize::Small, SkillLevel::Beginner, PrimaryGoal::Balanced),
                "Simple Stack - Static HTML/CSS/JavaScript frontend with serverless functions. Minimal dependencies, easy deployment, predictable behavior. Focus on core functionality.",
                "Enterprise Architecture - Microservices with Docker, API gateway, database clusters, CI/CD pipeline. Scalable and professional but complex setup and configuration.",
            ),
        },
        Precedent {
            id: "beginner-advisory",
            title: "Stack counsel for a first hackathon",
            case: CasePayload::advisory(
                Judge::Reliability,
                context(36, TeamSize::Small, SkillLevel::Beginner, PrimaryGoal::Balanced),
                "Simple task management web application with basic user authentication and data persistence. First hackathon for most team members.",
            ),
        },
        Precedent {
            id: "demo-focused",
            title: "Demo-first AI assistant",
            case: CasePayload::advisory(
                Judge::Innovation,
                context(48, TeamSize::Medium, SkillLevel::Advanced, PrimaryGoal::DemoFirst),
                "AI-powered code review assistant with real-time collaboration features and impressive visual interface for technical judges.",
            ),
        },
        Precedent {
            id: "fullstack-dilemma",
            title: "React vs Vue under demo pressure",
            case: CasePayload::compare(
                Judge::Innovation,
                context(36, TeamSize::Small, SkillLevel::Intermediate, PrimaryGoal::DemoFirst),
                "React - Popular component-based library with extensive ecosystem. Team has some experience, great for interactive UIs, large community support and resources.",
                "Vue.js - Progressive framework with gentler learning curve. Excellent documentation, simpler syntax, good performance, but team is less familiar with it.",
            ),
        },
    ]
}

pub fn find_precedent(id: &str) -> Option<Precedent> {
    precedents().into_iter().find(|p| p.id == id)
}
