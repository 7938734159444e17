//! `coursepath.toml`: picker choices, the static course list and degree requirements.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::paths;

const MAX_DIFFICULTY: u8 = 5;

/// A course card shown on the page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Course {
    pub code: String,
    pub title: String,
    pub seats: u32,
    pub requirement: String,
    /// 1 (light) to 5 (heavy).
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
}

fn default_difficulty() -> u8 {
    3
}

impl Course {
    fn new(code: &str, title: &str, seats: u32, requirement: &str, difficulty: u8) -> Self {
        Self {
            code: code.into(),
            title: title.into(),
            seats,
            requirement: requirement.into(),
            difficulty,
        }
    }
}

/// Progress on one degree requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequirementStatus {
    Remaining,
    #[serde(rename = "In Progress")]
    InProgress,
    Fulfilled,
}

impl RequirementStatus {
    pub fn label(self) -> &'static str {
        match self {
            RequirementStatus::Remaining => "Remaining",
            RequirementStatus::InProgress => "In Progress",
            RequirementStatus::Fulfilled => "Fulfilled",
        }
    }
}

/// A row of the requirements list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Requirement {
    pub name: String,
    pub code: String,
    pub status: RequirementStatus,
}

impl Requirement {
    fn new(name: &str, code: &str, status: RequirementStatus) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub semesters: Vec<String>,
    pub majors: Vec<String>,
    /// Initially selected semester. Falls back to the first one.
    pub semester: Option<String>,
    /// Initially selected major. Falls back to the first one.
    pub major: Option<String>,
    pub log_level: String,
    pub courses: Vec<Course>,
    pub requirements: Vec<Requirement>,
}

fn default_semesters() -> Vec<String> {
    ["Spring 2026", "Fall 2025", "Summer 2025"]
        .map(String::from)
        .to_vec()
}

fn default_majors() -> Vec<String> {
    [
        "Computer Science (BS)",
        "Data Science (BS)",
        "Mathematics (BA)",
        "Information Systems (BS)",
    ]
    .map(String::from)
    .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            semesters: default_semesters(),
            majors: default_majors(),
            semester: None,
            major: None,
            log_level: "info".into(),
            courses: vec![
                Course::new("COP3502", "Programming Fundamentals 1", 151, "CS Core", 3),
                Course::new("MAC2311", "Analytic Geometry & Calculus 1", 48, "Math Core", 4),
                Course::new("ENC1101", "Expository & Argumentative Writing", 12, "Gen Ed: Comp", 2),
                Course::new("PSY2012", "General Psychology", 77, "Gen Ed: Soc Sci", 2),
                Course::new("STA2023", "Introduction to Statistics", 0, "Math Core", 3),
            ],
            requirements: vec![
                Requirement::new("Gen Ed: Composition (3cr)", "GE-C", RequirementStatus::Remaining),
                Requirement::new("Math Core: Calculus I (4cr)", "MAC2311", RequirementStatus::Fulfilled),
                Requirement::new("CS Core: Programming I (4cr)", "COP3502", RequirementStatus::InProgress),
                Requirement::new("Electives (6cr)", "ELEC", RequirementStatus::Remaining),
            ],
        }
    }
}

impl Config {
    /// Load from `$COURSEPATH_CONFIG` or the config dir. A missing file means defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match paths::config_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        Self::parse(&text, path)
    }

    pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.normalized())
    }

    /// Fill empty lists with defaults and clamp difficulties to 1..=5.
    fn normalized(mut self) -> Self {
        if self.semesters.is_empty() {
            self.semesters = default_semesters();
        }
        if self.majors.is_empty() {
            self.majors = default_majors();
        }
        for course in &mut self.courses {
            course.difficulty = course.difficulty.clamp(1, MAX_DIFFICULTY);
        }
        self
    }

    pub fn initial_semester(&self) -> String {
        pick(&self.semesters, self.semester.as_deref())
    }

    pub fn initial_major(&self) -> String {
        pick(&self.majors, self.major.as_deref())
    }

    /// Unknown levels fall back to `Info`.
    pub fn log_level(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }
}

fn pick(choices: &[String], wanted: Option<&str>) -> String {
    wanted
        .filter(|w| choices.iter().any(|c| c == w))
        .or_else(|| choices.first().map(String::as_str))
        .unwrap_or_default()
        .to_string()
}
