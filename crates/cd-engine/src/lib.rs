//! Circadia aggregation and ranking engine.
//!
//! Pure, synchronous computation over in-memory observation sets:
//! - `index`: (minute-of-phase, day) lookup structures, built in one pass
//! - `cumulative`: per-entity running-sum tables for O(1) average queries
//! - `ranking`: entities ordered by running average at a queried minute
//! - `proportion`: cached male/female share-of-total curves
//! - `stats`: descriptive statistics shared by the summary derivations
//! - `session`: the context object owning all built structures
//!
//! No function in this crate performs I/O or returns an error: missing
//! entities, empty datasets, and out-of-range queries resolve to empty or
//! neutral results.

pub mod cumulative;
pub mod index;
pub mod proportion;
pub mod ranking;
pub mod session;
pub mod stats;

pub use cumulative::{AccumulationPolicy, CumulativeTable};
pub use index::MinuteIndex;
pub use proportion::{ProportionCache, ProportionPoint};
pub use ranking::{rank_at, EntityInfo, RankedEntity, RankingResult};
pub use session::AnalysisSession;
