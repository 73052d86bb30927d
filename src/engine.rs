//! Cost engine: pure, synchronous computations over appliance usage snapshots.
//!
//! Nothing here performs I/O, logs, or keeps state between calls; failures are returned to the
//! caller, who decides what to tell the user.

mod aggregate;
mod breakdown;
mod comparison;
mod estimate;
mod fingerprint;

pub use self::{
    aggregate::{AggregateTotals, aggregate},
    breakdown::{CostBreakdown, compute_breakdown},
    comparison::{CostComparison, RateComparison, compare_to_rate, compare_to_saved_calculation},
    estimate::{BillRange, estimate_bill_range},
    fingerprint::{Fingerprint, derive_calculation_fingerprint, ensure_unique},
};
