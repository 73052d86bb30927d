//! Client of the prediction backend: monthly rate forecasts, appliance wattage lookups, and
//! energy-saving recommendations.

mod backend;
mod client;
mod recommendation;
mod wattage;

pub use self::backend::Backend;
