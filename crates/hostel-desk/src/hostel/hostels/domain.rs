use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HostelId(pub String);

impl fmt::Display for HostelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostelCategory {
    Male,
    Female,
}

impl HostelCategory {
    pub const fn label(self) -> &'static str {
        match self {
            HostelCategory::Male => "male",
            HostelCategory::Female => "female",
        }
    }
}

impl FromStr for HostelCategory {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(HostelCategory::Male),
            "female" => Ok(HostelCategory::Female),
            other => Err(format!("unknown hostel category '{other}'")),
        }
    }
}

/// Stored hostel. `available + occupied == capacity` holds for every accepted write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostelRecord {
    pub id: HostelId,
    pub name: String,
    pub capacity: u32,
    pub occupied: u32,
    pub available: u32,
    pub category: HostelCategory,
    pub warden: String,
}

/// Request body for hostel creation. `available` is optional and only cross-checked.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostelDraft {
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub occupied: u32,
    #[serde(default)]
    pub available: Option<u32>,
    pub category: HostelCategory,
    #[serde(default)]
    pub warden: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HostelPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,
    #[serde(default)]
    pub occupied: Option<u32>,
    #[serde(default)]
    pub available: Option<u32>,
    #[serde(default)]
    pub category: Option<HostelCategory>,
    #[serde(default)]
    pub warden: Option<String>,
}
