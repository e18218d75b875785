//! Pipeline entry points for the polling workflow.
//!
//! - `filter_new`: Drop summaries already present in the store
//! - `Poller::run_cycle`: Run one Listing → Filtering → Dispatching cycle
//! - `process_summary`: Fetch-and-insert unit for a single summary

pub mod dedup;
pub mod poll;

pub use dedup::filter_new;
pub use poll::{CycleOutcome, Poller, process_summary, run_loop};
