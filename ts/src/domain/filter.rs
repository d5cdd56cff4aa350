//! View filter and its route mapping

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Which tasks the list view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    /// All filters in navigation order
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    /// Map a navigation route to a filter
    ///
    /// Accepts `#/active`, `/active`, `active` and the same for `completed`.
    /// Anything else, including `#/` and the empty string, selects `All`.
    pub fn from_route(route: &str) -> Self {
        let name = route.trim().trim_start_matches('#').trim_start_matches('/');
        name.parse().unwrap_or_default()
    }

    /// Canonical hash route for this filter
    pub fn route(&self) -> &'static str {
        match self {
            Self::All => "#/",
            Self::Active => "#/active",
            Self::Completed => "#/completed",
        }
    }

    /// Label shown in the navigation control
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Active => "Active",
            Self::Completed => "Completed",
        }
    }

    /// Check whether a task with the given completion flag is visible
    pub fn accepts(&self, completed: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => !completed,
            Self::Completed => completed,
        }
    }
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

impl std::str::FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(format!("Unknown filter: {}", s)),
        }
    }
}

// Persisted values are read leniently so a bad filter never fails a load.
impl From<String> for Filter {
    fn from(s: String) -> Self {
        s.parse().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for Filter {
    /// Any value that isn't a known filter name (null, numbers, unknown
    /// strings) reads as `All`
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Other(IgnoredAny),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Name(name) => Filter::from(name),
            Raw::Other(_) => Filter::All,
        })
    }
}
