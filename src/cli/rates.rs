use std::path::PathBuf;

use clap::Parser;
use kuryente::{prelude::*, rates::HistoricalRates};

use crate::tables::{build_monthly_rates_table, build_yearly_summaries_table};

#[derive(Parser)]
pub struct RatesArgs {
    /// JSON file with the past monthly rates.
    #[clap(long = "historical-rates", env = "KURYENTE_HISTORICAL_RATES")]
    path: PathBuf,

    /// Year to show month by month, the latest by default.
    #[clap(long)]
    year: Option<i32>,
}

impl RatesArgs {
    pub fn run(self) -> Result {
        let rates = HistoricalRates::read_from(&self.path)?;
        let latest = rates.latest().context("there are no historical rates")?;
        info!(year = latest.year, month = latest.month, rate = %latest.rate, "latest known rate");

        println!("{}", build_yearly_summaries_table(&rates));
        let year = self.year.unwrap_or(latest.year);
        ensure!(rates.yearly_summary(year).is_some(), "no rates for {year}");
        println!("{}", build_monthly_rates_table(&rates, year));
        Ok(())
    }
}
