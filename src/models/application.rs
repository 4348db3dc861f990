//! Tier test applications.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::find_gamemode;

/// Reasons an application is refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error("Invalid Minecraft username: {0:?}")]
    InvalidUsername(String),

    #[error("Unknown gamemode: {0}")]
    UnknownGamemode(String),

    #[error("Region is required")]
    MissingRegion,

    #[error("Note is too long ({len} characters, max {max})")]
    NoteTooLong { len: usize, max: usize },
}

/// Longest free-text note accepted on the form.
pub const MAX_NOTE_LEN: usize = 500;

fn username_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]{3,16}$").expect("valid username pattern"))
}

/// Whether a string is a legal Minecraft Java username.
pub fn is_valid_username(username: &str) -> bool {
    username_pattern().is_match(username)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApplicationStatus::Pending => write!(f, "pending"),
            ApplicationStatus::Accepted => write!(f, "accepted"),
            ApplicationStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl std::str::FromStr for ApplicationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ApplicationStatus::Pending),
            "accepted" => Ok(ApplicationStatus::Accepted),
            "rejected" => Ok(ApplicationStatus::Rejected),
            other => Err(format!("unknown application status: {}", other)),
        }
    }
}

/// What the form submits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub username: String,
    pub gamemode: String,
    pub region: String,
    #[serde(default)]
    pub discord: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

/// A submitted application awaiting a tier test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub username: String,
    pub gamemode: String,
    pub region: String,
    pub discord: Option<String>,
    pub note: Option<String>,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}

impl Application {
    /// Validate a form and turn it into a pending application.
    pub fn from_form(form: ApplicationForm) -> Result<Self, ApplicationError> {
        let username = form.username.trim().to_string();
        if !is_valid_username(&username) {
            return Err(ApplicationError::InvalidUsername(username));
        }

        let gamemode = find_gamemode(&form.gamemode)
            .ok_or_else(|| ApplicationError::UnknownGamemode(form.gamemode.trim().to_string()))?;

        let region = form.region.trim().to_ascii_uppercase();
        if region.is_empty() {
            return Err(ApplicationError::MissingRegion);
        }

        let note = non_empty(form.note);
        if let Some(ref n) = note {
            let len = n.chars().count();
            if len > MAX_NOTE_LEN {
                return Err(ApplicationError::NoteTooLong {
                    len,
                    max: MAX_NOTE_LEN,
                });
            }
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            username,
            gamemode: gamemode.code.to_string(),
            region,
            discord: non_empty(form.discord),
            note,
            status: ApplicationStatus::Pending,
            submitted_at: Utc::now(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
