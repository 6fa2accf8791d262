//! Error module - the closed set of tierlist command outcomes

use std::fmt;

/// Canonical name of a successful outcome
pub const SUCCESS: &str = "SUCCESS";

/// Result type for tierlist state operations
pub type TierlistResult<T> = Result<T, TierlistError>;

/// Rejections from the tierlist state machine
///
/// Together with `Ok(())` (SUCCESS) these form the complete set of outcomes
/// a command can have. None of them leaves state modified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TierlistError {
    /// The member is not in any tier of the active list
    UserNotFound,

    /// The requested tier is not one of S, A, B, C, D, F
    InvalidTier,

    /// The command needs an active list and there is none
    TierlistNotActive,

    /// `begin` was called while a list is already active
    TierlistAlreadyActive,
}

impl TierlistError {
    /// Canonical upper-case name, e.g. `TIERLIST_NOT_ACTIVE`
    pub fn as_str(&self) -> &'static str {
        match self {
            TierlistError::UserNotFound => "USER_NOT_FOUND",
            TierlistError::InvalidTier => "INVALID_TIER",
            TierlistError::TierlistNotActive => "TIERLIST_NOT_ACTIVE",
            TierlistError::TierlistAlreadyActive => "TIERLIST_ALREADY_ACTIVE",
        }
    }
}

impl fmt::Display for TierlistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TierlistError::UserNotFound => "User not found in the active tierlist",
            TierlistError::InvalidTier => "Invalid tier",
            TierlistError::TierlistNotActive => "No tierlist is active",
            TierlistError::TierlistAlreadyActive => "A tierlist is already active",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for TierlistError {}

/// Canonical name for any outcome, `SUCCESS` included
///
/// # Examples
///
/// ```
/// use tierlist_domain::{status_name, TierlistError, TierlistResult};
///
/// let ok: TierlistResult<()> = Ok(());
/// assert_eq!(status_name(&ok), "SUCCESS");
///
/// let err: TierlistResult<()> = Err(TierlistError::InvalidTier);
/// assert_eq!(status_name(&err), "INVALID_TIER");
/// ```
pub fn status_name<T>(result: &TierlistResult<T>) -> &'static str {
    match result {
        Ok(_) => SUCCESS,
        Err(e) => e.as_str(),
    }
}
