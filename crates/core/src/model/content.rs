use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything the page displays, declared once and never mutated.
///
/// The section set itself is fixed; content only fills the fixed layout in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub profile: Profile,
    pub about: Vec<String>,
    pub education: Vec<Education>,
    pub projects: Vec<Project>,
    pub skills: Vec<String>,
    pub contact_blurb: String,
    pub links: SocialLinks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub tagline: String,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Education {
    pub years: String,
    pub title: String,
    pub institution: String,
    #[serde(default)]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub blurb: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialLinks {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
}

impl PageContent {
    pub fn from_json(data: &[u8]) -> Result<Self, ContentError> {
        Ok(serde_json::from_slice(data)?)
    }

    /// Built-in placeholder content so every front end renders something
    /// meaningful before a real content file is supplied.
    pub fn sample() -> Self {
        Self {
            profile: Profile {
                name: "Branch Mathew".into(),
                tagline: "Welcome to my portfolio! Explore my projects, learn more \
                          about me, and get in touch."
                    .into(),
                photo: Some("profile.jpg".into()),
                resume_url: Some("resume.pdf".into()),
            },
            about: vec![
                "As a passionate software developer, I thrive on creating innovative \
                 solutions to complex problems."
                    .into(),
                "I specialize in full-stack web development, and I am deeply \
                 interested in how intelligent systems can make applications more \
                 responsive."
                    .into(),
            ],
            education: vec![
                Education {
                    years: "2023 - 2027".into(),
                    title: "Bachelor of Engineering".into(),
                    institution: "Fr. Conceicao Rodrigues College of Engineering".into(),
                    detail: Some("Electronics and Computer Science".into()),
                },
                Education {
                    years: "2021 - 2023".into(),
                    title: "Higher Secondary Certificate".into(),
                    institution: "St. Andrews College".into(),
                    detail: Some("80.53%".into()),
                },
                Education {
                    years: "2011 - 2021".into(),
                    title: "Secondary School Certificate".into(),
                    institution: "St. Stanislaus High School".into(),
                    detail: Some("91.60%".into()),
                },
            ],
            projects: (1..=6)
                .map(|n| Project {
                    title: format!("Project {n}"),
                    blurb: "Short description of the project".into(),
                    image: Some(format!("project{n}.jpg")),
                })
                .collect(),
            skills: [
                "HTML5",
                "CSS3",
                "JavaScript",
                "React",
                "Node.js",
                "Python",
                "SQL",
                "TypeScript",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            contact_blurb: "Feel free to reach out to me via email or social media.".into(),
            links: SocialLinks {
                email: Some("your-email@example.com".into()),
                github: Some("https://github.com/your-profile".into()),
                linkedin: Some("https://linkedin.com/in/your-profile".into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_roundtrips_through_json() {
        let sample = PageContent::sample();
        let json = serde_json::to_vec(&sample).unwrap();
        let back = PageContent::from_json(&json).unwrap();
        assert_eq!(back.profile.name, sample.profile.name);
        assert_eq!(back.projects.len(), 6);
        assert_eq!(back.skills.len(), 8);
    }

    #[test]
    fn optional_fields_default() {
        let json = br#"{
            "profile": {"name": "A", "tagline": "t"},
            "about": [],
            "education": [],
            "projects": [{"title": "P", "blurb": "b"}],
            "skills": ["Rust"],
            "contact_blurb": "hi",
            "links": {}
        }"#;
        let content = PageContent::from_json(json).unwrap();
        assert!(content.profile.photo.is_none());
        assert!(content.projects[0].image.is_none());
        assert!(content.links.github.is_none());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(PageContent::from_json(b"{not json").is_err());
    }
}
