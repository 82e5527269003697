//! # availability-engine
//!
//! Joint availability for a league of teams, computed from weekly recurring
//! per-player rules that live in each player's own timezone.
//!
//! The engine resolves a status for every player, team and the league at a
//! single instant, then walks a time range minute by minute and compresses
//! the timeline into intervals of constant status that can be written out as
//! a multi-timezone schedule report.
//!
//! ## Modules
//!
//! - [`tier`] -- the ordered `No < Maybe < Yes` availability tiers
//! - [`instant`] -- an instant with a memoized per-timezone projection
//! - [`rule`] -- one weekly, timezone-scoped, optionally date-bounded rule
//! - [`player`] -- the rule set of one player
//! - [`team`] -- strict and lenient quorum over a team's players
//! - [`league`] -- all teams plus the cross-team player directory
//! - [`simulator`] -- minute-resolution simulation and interval compression
//! - [`loader`] -- CSV input with fill-down and field validation
//! - [`report`] -- timezone display columns and the CSV/JSON report writer
//! - [`error`] -- Error types

pub mod error;
pub mod instant;
pub mod league;
pub mod loader;
pub mod player;
pub mod report;
pub mod rule;
pub mod simulator;
pub mod team;
pub mod tier;

pub use error::{AvailabilityError, Field};
pub use instant::TimeInstant;
pub use league::{LeagueAvailability, RuleRecord};
pub use loader::{load_league, load_league_from_path};
pub use player::PlayerAvailability;
pub use report::{ReportConfig, ReportFormat, ReportWriter, TimezoneColumn};
pub use rule::{AvailabilityRule, DateBounds, WallTime};
pub use simulator::{CountRange, Horizon, PlayerInterval, Simulator, TeamInterval, TeamSpan};
pub use team::{TeamAvailability, TeamStatus, WILDCARD_PLAYER};
pub use tier::Tier;
