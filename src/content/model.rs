//! The site's content model.
//!
//! Everything the page shows (hero banner, skills grid, project cards,
//! blog links, contact links) comes from one `Profile` value.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Error type for profile loading.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// The full content model for the site.
///
/// Fields default to empty, not to placeholder content, so a partial
/// profile file never silently inherits placeholder sections.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub tagline: String,

    /// Professional summary paragraphs, in display order.
    #[serde(default)]
    pub about: Vec<String>,

    #[serde(default)]
    pub skills: Vec<Skill>,

    #[serde(default)]
    pub projects: Vec<Project>,

    #[serde(default)]
    pub blog_posts: Vec<BlogPost>,

    #[serde(default)]
    pub links: Links,
}

/// One entry in the skills grid.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Skill {
    pub name: String,
    pub detail: String,
}

/// One project card.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Project {
    pub title: String,
    pub description: String,

    /// Methods/technology tags shown on the card.
    #[serde(default)]
    pub methods: Vec<String>,

    #[serde(default)]
    pub github: Option<String>,

    #[serde(default)]
    pub demo: Option<String>,
}

/// One linked blog post.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlogPost {
    pub title: String,
    pub excerpt: String,
    pub date: String,
    pub read_time: String,
    pub url: String,
}

/// Contact and external links.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Links {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub whatsapp: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub resume_url: Option<String>,
}

impl Profile {
    /// Load a profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ProfileError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Placeholder content served until a real profile file is configured.
    pub fn placeholder() -> Self {
        Self {
            name: "Jane Doe".to_string(),
            title: "Quantitative Analyst & Data Scientist".to_string(),
            tagline: "Bridging financial theory and data-driven practice".to_string(),
            about: vec![
                "I am a quantitative analyst and data scientist with a passion for \
                 bridging the gap between financial theory and practical data-driven \
                 solutions."
                    .to_string(),
                "My expertise spans time series analysis, risk modeling, and \
                 algorithmic trading systems."
                    .to_string(),
            ],
            skills: vec![
                Skill {
                    name: "Financial Modeling".to_string(),
                    detail: "DCF, Monte Carlo, VaR".to_string(),
                },
                Skill {
                    name: "Statistical Analysis".to_string(),
                    detail: "Regression, Time Series".to_string(),
                },
                Skill {
                    name: "Programming".to_string(),
                    detail: "Python, R, C++".to_string(),
                },
            ],
            projects: vec![
                Project {
                    title: "Portfolio Optimization Engine".to_string(),
                    description: "Mean-variance optimization with Monte Carlo \
                                  simulation for risk assessment."
                        .to_string(),
                    methods: vec![
                        "Mean-Variance Optimization".to_string(),
                        "Monte Carlo Simulation".to_string(),
                    ],
                    github: None,
                    demo: None,
                },
                Project {
                    title: "Options Pricing Framework".to_string(),
                    description: "Black-Scholes, binomial tree, and Monte Carlo \
                                  pricing with Greeks calculation."
                        .to_string(),
                    methods: vec!["Black-Scholes Model".to_string()],
                    github: None,
                    demo: None,
                },
            ],
            blog_posts: vec![BlogPost {
                title: "Understanding GARCH Models for Volatility Forecasting".to_string(),
                excerpt: "A deep dive into GARCH models and their applications in \
                          financial markets."
                    .to_string(),
                date: "Dec 15, 2024".to_string(),
                read_time: "8 min read".to_string(),
                url: "#".to_string(),
            }],
            links: Links::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_profile_has_content() {
        let profile = Profile::placeholder();
        assert!(!profile.name.is_empty());
        assert!(!profile.skills.is_empty());
        assert!(!profile.projects.is_empty());
    }

    #[test]
    fn profile_parses_from_toml() {
        let profile: Profile = toml::from_str(
            r#"
            name = "Ada Lovelace"
            title = "Analyst"

            [[skills]]
            name = "Mathematics"
            detail = "Analytical engines"

            [[projects]]
            title = "Notes on the Analytical Engine"
            description = "The first published program."
            methods = ["Bernoulli numbers"]

            [links]
            email = "ada@example.com"
            "#,
        )
        .unwrap();

        assert_eq!(profile.name, "Ada Lovelace");
        assert_eq!(profile.skills.len(), 1);
        assert_eq!(profile.projects[0].methods, vec!["Bernoulli numbers"]);
        assert_eq!(profile.links.email.as_deref(), Some("ada@example.com"));
        // Unspecified sections fall back to empty, not to placeholder data.
        assert!(profile.blog_posts.is_empty());
    }

    #[test]
    fn profile_round_trips_as_json() {
        let profile = Profile::placeholder();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["name"], "Jane Doe");
        assert!(json["skills"].as_array().is_some());
    }
}
