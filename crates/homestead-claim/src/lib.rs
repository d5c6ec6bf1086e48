//! # homestead-claim
//!
//! Land claims for Homestead: who owns which rectangle of which world,
//! who else may do what there, and how to find the claim under a player's
//! feet quickly.
//!
//! ## Architecture
//!
//! ```text
//!  ┌───────────────────────────────────────────────┐
//!  │                  ClaimIndex                   │
//!  │                                               │
//!  │  claims: HashMap<ClaimId, Claim>              │
//!  │  worlds: HashMap<world, grid of 128² buckets> │
//!  └───────────────┬───────────────────────────────┘
//!                  │ claim_at(world, x, z)
//!                  ▼
//!          ┌──────────────┐      ┌────────────────────┐
//!          │    Claim     │─────▶│ trust: TrustType   │
//!          │ area, owner  │      │ settings: bool map │
//!          └──────────────┘      └────────────────────┘
//!                  │
//!                  ▼
//!       permission::evaluate(claim, actor, action)
//! ```
//!
//! Claims in one world never overlap. The index enforces that on every
//! insert and resize, so a point lookup returns at most one claim.

mod area;
mod claim;
mod error;
mod index;
pub mod permission;
mod setting;
mod trust;

pub use area::Area;
pub use claim::{ADMIN_OWNER_NAME, Claim};
pub use error::ClaimError;
pub use index::ClaimIndex;
pub use permission::{Action, Actor, can_build, can_build_at};
pub use setting::ClaimSetting;
pub use trust::TrustType;
