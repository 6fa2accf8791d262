//! Tierlist Domain Layer
//!
//! This crate holds the data model and the state machine for tierlists.
//! It has no external dependencies and performs no I/O; rendering and
//! asset fetching live in `tierlist-render`.
//!
//! ## Key Concepts
//!
//! - **Member**: someone being ranked, identified by an externally assigned id
//! - **Tier**: one of the fixed ranked categories S, A, B, C, D, F
//! - **Tierlist**: a categorization where each member sits in at most one tier
//! - **TierlistManager**: named tierlists plus the single active-list pointer
//! - **RenderSnapshot**: a frozen copy of a tierlist handed to the renderer
//!
//! ## Example
//!
//! ```
//! use tierlist_domain::{Member, MemberId, Tier, TierlistError, TierlistManager};
//!
//! let mut manager = TierlistManager::new();
//! manager.begin_tierlist("lunch").unwrap();
//! manager
//!     .add_to_tierlist(MemberId(1), Member::new("Alice", "https://cdn.example/a.png"), Tier::S)
//!     .unwrap();
//!
//! assert_eq!(manager.begin_tierlist("dinner"), Err(TierlistError::TierlistAlreadyActive));
//! assert_eq!(manager.remove_from_tierlist(MemberId(9)), Err(TierlistError::UserNotFound));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod manager;
pub mod member;
pub mod tier;
pub mod tierlist;

// Re-exports for convenience
pub use error::{status_name, TierlistError, TierlistResult, SUCCESS};
pub use manager::{SharedManager, TierlistManager};
pub use member::{Member, MemberId};
pub use tier::{IntoTier, Rgb, Tier};
pub use tierlist::{RenderSnapshot, Tierlist};
