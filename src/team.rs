//! Team and player snapshot records.

use serde::{Deserialize, Serialize};

use crate::types::{Millis, PlayerId, Sport, TeamId};

/// Longest display name kept after sanitation.
pub const MAX_NAME_LEN: usize = 40;

/// Roster member snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Stable player identifier.
    pub id: PlayerId,
    /// Sanitized display name.
    pub name: String,
}

impl Player {
    /// Builds a player with a sanitized name.
    pub fn new(id: PlayerId, name: &str) -> Self {
        Self {
            id,
            name: sanitize_name(name, "Player"),
        }
    }
}

/// Immutable team snapshot consumed by the match engine.
///
/// Mutation goes through `with_*` methods that return a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Stable team identifier.
    pub id: TeamId,
    /// Sanitized display name.
    pub name: String,
    /// Sanitized short label used on scoreboards.
    pub short_name: String,
    /// UI color identifier.
    pub color: String,
    /// UI badge identifier.
    pub badge: String,
    /// Sport this team is affiliated with.
    pub sport: Sport,
    /// Roster snapshot.
    pub roster: Vec<Player>,
    /// Creation timestamp in milliseconds.
    pub created_at_ms: Millis,
}

impl Team {
    /// Builds a team with sanitized display fields and an empty roster.
    pub fn new(id: TeamId, name: &str, sport: Sport, created_at_ms: Millis) -> Self {
        let name = sanitize_name(name, "Team");
        let short_name = short_label(&name);
        Self {
            id,
            name,
            short_name,
            color: "default".to_string(),
            badge: "shield".to_string(),
            sport,
            roster: Vec::new(),
            created_at_ms,
        }
    }

    /// Returns a copy with a new sanitized name and matching short label.
    pub fn with_name(&self, name: &str) -> Self {
        let name = sanitize_name(name, "Team");
        let short_name = short_label(&name);
        Self {
            name,
            short_name,
            ..self.clone()
        }
    }

    /// Returns a copy with a new color identifier.
    pub fn with_color(&self, color: &str) -> Self {
        Self {
            color: sanitize_name(color, "default"),
            ..self.clone()
        }
    }

    /// Returns a copy with a new badge identifier.
    pub fn with_badge(&self, badge: &str) -> Self {
        Self {
            badge: sanitize_name(badge, "shield"),
            ..self.clone()
        }
    }

    /// Returns a copy with the given roster.
    pub fn with_roster(&self, roster: Vec<Player>) -> Self {
        Self {
            roster,
            ..self.clone()
        }
    }
}

/// Trims, collapses inner whitespace, and caps length; falls back to
/// `placeholder` when nothing printable remains.
pub fn sanitize_name(raw: &str, placeholder: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return placeholder.to_string();
    }
    collapsed.chars().take(MAX_NAME_LEN).collect()
}

fn short_label(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|w| w.chars().next())
        .take(3)
        .collect();
    if initials.len() >= 2 {
        initials.to_uppercase()
    } else {
        name.chars().take(3).collect::<String>().to_uppercase()
    }
}
