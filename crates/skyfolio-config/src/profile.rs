//! Portfolio content loaded from `profile.toml`.

use std::fs;
use std::path::Path;

use color_eyre::{Result, eyre::WrapErr};
use serde::{Deserialize, Serialize};

/// The person and the sections shown on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Typed out by the intro.
    pub name: String,
    pub tagline: String,
    pub sections: Vec<Section>,
}

/// One page section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Section {
    /// Anchor used by the navigation menu.
    pub id: String,
    pub title: String,
    pub body: Vec<String>,
    /// Skill bars shown after the body.
    pub skills: Vec<Skill>,
}

impl Section {
    pub fn has_skills(&self) -> bool {
        !self.skills.is_empty()
    }
}

/// A named skill with a progress percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Percentage, 0 to 100.
    pub progress: u8,
}

impl Skill {
    pub fn new(name: impl Into<String>, progress: u8) -> Self {
        Self {
            name: name.into(),
            progress: progress.min(100),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        let line = |s: &str| s.to_string();
        Self {
            name: "Your Name".to_string(),
            tagline: "Software developer".to_string(),
            sections: vec![
                Section {
                    id: "about".to_string(),
                    title: "About".to_string(),
                    body: vec![
                        line("I build fast, reliable software and enjoy every layer of the stack."),
                        line("Edit profile.toml in your config directory to make this page yours."),
                    ],
                    skills: Vec::new(),
                },
                Section {
                    id: "skills".to_string(),
                    title: "Skills".to_string(),
                    body: Vec::new(),
                    skills: vec![
                        Skill::new("Rust", 90),
                        Skill::new("TypeScript", 80),
                        Skill::new("SQL", 70),
                        Skill::new("Linux", 85),
                    ],
                },
                Section {
                    id: "projects".to_string(),
                    title: "Projects".to_string(),
                    body: vec![
                        line("skyfolio: this portfolio, with a night sky behind it."),
                        line("Press space or click anywhere to launch a shooting star."),
                    ],
                    skills: Vec::new(),
                },
                Section {
                    id: "contact".to_string(),
                    title: "Contact".to_string(),
                    body: vec![line("you@example.com")],
                    skills: Vec::new(),
                },
            ],
        }
    }
}

impl Profile {
    /// Parse a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let profile: Profile = toml::from_str(text).wrap_err("invalid profile")?;
        Ok(profile.normalized())
    }

    /// Load from `path`, or the built-in profile if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("no profile at {}, using the built-in one", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read profile {}", path.display()))?;
        Self::from_toml(&text).wrap_err_with(|| format!("in profile {}", path.display()))
    }

    /// Clamp skill progress and fill in missing section ids from titles.
    pub fn normalized(mut self) -> Self {
        for section in &mut self.sections {
            if section.id.is_empty() {
                section.id = section.title.to_lowercase().replace(' ', "-");
            }
            for skill in &mut section.skills {
                skill.progress = skill.progress.min(100);
            }
        }
        self
    }

    /// Index of the section with the given id.
    pub fn section_index(&self, id: &str) -> Option<usize> {
        self.sections.iter().position(|s| s.id == id)
    }
}
