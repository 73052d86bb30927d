use crate::engine::CostBreakdown;

/// Per-period sums over several breakdowns.
pub type AggregateTotals = CostBreakdown;

/// Sum the breakdowns period by period, empty input gives zeros.
pub fn aggregate<'a>(breakdowns: impl IntoIterator<Item = &'a CostBreakdown>) -> AggregateTotals {
    breakdowns.into_iter().copied().sum()
}
