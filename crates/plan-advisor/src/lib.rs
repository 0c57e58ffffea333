//! # plan-advisor
//!
//! Domain layer of the plan viewer: account data, the portfolio aggregator,
//! dashboard tab views and the context the assistant is primed with.
//!
//! ## Summary Figures
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Total Balance      Σ balance                 $302,931.50   │
//! │  Change             Σ balance × change%       +$2,284.17    │
//! │  Change %           change / total × 100      0.75%         │
//! │  Vested Balance     total × vesting factor    $287,784.93   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A zero total balance yields a change percentage of zero. The vesting
//! factor is a flat placeholder (default 0.95), not a vesting schedule.

pub mod context;
pub mod dashboard;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod model;
pub mod summary;

pub use context::{assistant_config, context_blob, greeting, system_instruction, DEFAULT_PERSONA};
pub use dashboard::{Dashboard, TabPayload, TabView};
pub use error::{AdvisorError, Result};
pub use fixtures::sample_snapshot;
pub use model::{
    AccountSnapshot, AssetClass, Holding, PerformancePoint, PlanInfo, Transaction,
    TransactionKind,
};
pub use summary::{allocation_by_class, AllocationSlice, PortfolioSummary, VestingPolicy};
