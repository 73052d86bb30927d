mod backend;
mod calculate;
mod comparison;
mod history;
mod predict;
mod rates;
mod sets;
mod store;
mod wattage;

use clap::{Parser, Subcommand};
use kuryente::prelude::*;

use crate::cli::{
    calculate::CalculateArgs,
    history::HistoryArgs,
    predict::PredictArgs,
    rates::RatesArgs,
    sets::SetsArgs,
    store::StoreArgs,
    wattage::WattageArgs,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    store: StoreArgs,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub async fn run(self) -> Result {
        match self.command {
            Command::Calculate(args) => args.run(&self.store),
            Command::Sets(args) => args.run(&self.store),
            Command::History(args) => args.run(&self.store).await,
            Command::Predict(args) => args.run(&self.store).await,
            Command::Rates(args) => args.run(),
            Command::Wattage(args) => args.run().await,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Price the appliances of a set at a fixed rate.
    Calculate(Box<CalculateArgs>),

    /// Manage appliance sets.
    Sets(SetsArgs),

    /// Browse saved calculations and predictions, or get advice on the appliances.
    History(HistoryArgs),

    /// Predict next month's bill from the forecasted rate.
    Predict(Box<PredictArgs>),

    /// Summarize the historical rates.
    Rates(RatesArgs),

    /// Look an appliance's typical wattage up.
    Wattage(WattageArgs),
}
