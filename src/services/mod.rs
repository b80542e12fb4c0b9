//! Service layer modules.
//!
//! Contains the in-memory estimate session store.

pub mod estimates;

pub use estimates::EstimateStore;
