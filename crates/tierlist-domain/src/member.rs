//! Member module - the people being ranked

use std::fmt;

/// Externally assigned member identifier (e.g. a chat platform user id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MemberId(pub u64);

impl MemberId {
    /// Get the raw value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for MemberId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for MemberId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|e| format!("Invalid member id '{}': {}", s, e))
    }
}

/// Snapshot of a member taken when they were placed in a tier
///
/// Later changes to the member's name or avatar elsewhere are not reflected;
/// re-adding the member refreshes the snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    /// Display name shown under the avatar
    pub name: String,

    /// URI of the avatar image
    pub avatar_url: String,
}

impl Member {
    /// Create a new member snapshot
    pub fn new(name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            avatar_url: avatar_url.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_id_parsing() {
        assert_eq!("42".parse::<MemberId>().unwrap(), MemberId(42));
        assert_eq!(" 7 ".parse::<MemberId>().unwrap(), MemberId(7));
        assert!("-1".parse::<MemberId>().is_err());
        assert!("alice".parse::<MemberId>().is_err());
    }

    #[test]
    fn test_member_id_display() {
        assert_eq!(MemberId(1234567890123).to_string(), "1234567890123");
    }
}
