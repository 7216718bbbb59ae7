//! Problem is a single practice item: a name, where to find it, and its review schedule.
use super::ScheduleState;
use crate::error::{RecallError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_DIFFICULTY: i32 = 1;
pub const MAX_DIFFICULTY: i32 = 5;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

impl Tag {
    pub fn named(name: &str) -> Self {
        Self {
            id: 0,
            name: name.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub notes: String,
    /// Declared difficulty 1-5. Informational only, the scheduler ignores it
    pub difficulty: i32,
    pub schedule: ScheduleState,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Problem {
    pub fn new(name: &str, difficulty: i32, schedule: ScheduleState) -> Self {
        Self {
            id: 0,
            name: name.to_string(),
            url: String::new(),
            notes: String::new(),
            difficulty,
            schedule,
            tags: Vec::new(),
        }
    }

    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }
}

pub fn validate_difficulty(difficulty: i32) -> Result<i32> {
    if (MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&difficulty) {
        Ok(difficulty)
    } else {
        Err(RecallError::InvalidDifficulty(difficulty))
    }
}

/// Splits "array, dp,,graph" into trimmed, non-empty, de-duplicated tags.
pub fn parse_tags(input: &str) -> Vec<Tag> {
    let mut tags: Vec<Tag> = Vec::new();
    for part in input.split(',') {
        let tag = Tag::named(part);
        if !tag.name.is_empty() && !tags.iter().any(|t| t.name == tag.name) {
            tags.push(tag);
        }
    }
    tags
}
