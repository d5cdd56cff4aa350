//! Task entries and their identifiers

use serde::{Deserialize, Serialize};

/// Opaque task identifier, assigned by the store when a task is created
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(String);

impl TaskId {
    /// Generate a fresh time-ordered identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Get the full ID string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get a short prefix suitable for display
    ///
    /// UUIDv7 strings share their leading timestamp digits for tasks created
    /// close together, so the prefix is taken from the random tail.
    pub fn short(&self) -> &str {
        let start = self.0.len().saturating_sub(8);
        self.0.get(start..).unwrap_or(&self.0)
    }

    /// Check whether a user-typed reference identifies this task
    ///
    /// Matches the full ID, a leading prefix, or a trailing suffix (which is
    /// what [`TaskId::short`] displays).
    pub fn matches(&self, reference: &str) -> bool {
        !reference.is_empty() && (self.0.starts_with(reference) || self.0.ends_with(reference))
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for TaskId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self(s))
    }
}

/// A single entry in the task list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub completed: bool,
}

/// Read a completion flag, treating null or any non-boolean as not completed
fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Other(serde::de::IgnoredAny),
    }

    Ok(matches!(Raw::deserialize(deserializer)?, Raw::Flag(true)))
}

impl Task {
    /// Create a new incomplete task
    ///
    /// Returns `None` when the title is blank after trimming.
    pub fn new(id: TaskId, title: &str) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id,
            title: title.to_string(),
            completed: false,
        })
    }

    /// True when the task is still to be done
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}
