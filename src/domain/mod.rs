//! Domain types
//!
//! Records handed to the document composer, the auto-fill form that
//! produces them, and the cost estimator.

pub mod autofill;
pub mod estimates;
pub mod records;

// Re-export commonly used types
pub use autofill::{AutofillError, ProjectForm};
pub use estimates::{CostEstimate, CostLineItem, EstimateError, EstimateTotals};
pub use records::*;
