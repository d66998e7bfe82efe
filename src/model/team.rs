use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// A member of the project team.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    /// Short display tag rendered in the avatar circle (usually initials).
    pub avatar: String,
    /// Days this member is unavailable.
    pub time_off: BTreeSet<NaiveDate>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: Uuid::new_v4().to_string(),
            avatar: initials(&name),
            name,
            role: role.into(),
            time_off: BTreeSet::new(),
        }
    }
}

/// First letters of the first two words, uppercased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|w| w.chars().next())
        .flat_map(|c| c.to_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initials_take_first_two_words() {
        assert_eq!(initials("Alice Chen"), "AC");
        assert_eq!(initials("bob"), "B");
        assert_eq!(initials("Ana Maria Silva"), "AM");
        assert_eq!(initials(""), "");
    }

    #[test]
    fn new_member_starts_with_no_time_off() {
        let m = TeamMember::new("Alice Chen", "Project Manager");
        assert_eq!(m.avatar, "AC");
        assert!(m.time_off.is_empty());
    }
}
