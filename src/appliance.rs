mod entry;
mod set;
mod usage;
mod weekday;
mod weeks;

pub use self::{
    entry::{ApplianceEntry, EntryStatus, completed_usages},
    set::ApplianceSet,
    usage::ApplianceUsage,
    weekday::Weekday,
    weeks::WeeksPerMonth,
};
