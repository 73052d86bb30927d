use chrono::Utc;
use clap::Parser;
use kuryente::{
    engine::compare_to_saved_calculation,
    error::DuplicateCalculationError,
    history::SavedCalculation,
    prelude::*,
    quantity::{cost::Cost, rate::KilowattHourRate},
    store::{CalculationId, Store},
};

use crate::{
    cli::{comparison::print_cost_comparison, store::StoreArgs},
    tables::build_breakdown_table,
};

#[derive(Parser)]
pub struct CalculateArgs {
    /// Appliance set to price.
    #[clap(long = "set")]
    set: String,

    /// Electricity rate in pesos per kilowatt-hour.
    #[clap(long = "rate", env = "KURYENTE_RATE", default_value = "12.1901")]
    rate: KilowattHourRate,

    /// Save the calculation to the history.
    #[clap(long)]
    save: bool,

    /// Name of the saved calculation.
    #[clap(long, requires = "save")]
    name: Option<String>,

    /// Average monthly bill to compare with, at least ₱500.
    #[clap(long = "monthly-bill")]
    monthly_bill: Option<Cost>,

    /// Saved calculation to compare with.
    #[clap(long = "compare-to")]
    compare_to: Option<CalculationId>,
}

impl CalculateArgs {
    #[instrument(skip_all, fields(set = %self.set))]
    pub fn run(self, store_args: &StoreArgs) -> Result {
        let mut store = store_args.open()?;
        let set = store
            .appliance_set(&store_args.user, &self.set)?
            .with_context(|| format!("appliance set `{}` not found", self.set))?;

        let calculation = SavedCalculation::builder()
            .usages(set.appliances().to_vec())
            .rate(self.rate)
            .created_at(Utc::now())
            .maybe_name(self.name)
            .maybe_monthly_bill(self.monthly_bill)
            .build()?;
        println!("{}", build_breakdown_table(calculation.items(), calculation.totals()));
        let total = calculation.total_cost();
        info!(rate = %self.rate, total = %total, "calculated");

        if let Some(monthly_bill) = calculation.monthly_bill() {
            let comparison = compare_to_saved_calculation(total, monthly_bill);
            print_cost_comparison(total, monthly_bill, "your average bill", comparison);
        }
        if let Some(id) = self.compare_to {
            let saved = store
                .calculation(&store_args.user, id)?
                .with_context(|| format!("calculation #{id} not found"))?;
            let label = saved.display_name(id);
            let comparison = compare_to_saved_calculation(total, saved.total_cost());
            print_cost_comparison(total, saved.total_cost(), &label, comparison);
        }

        if self.save {
            match store.insert_calculation(&store_args.user, calculation) {
                Ok(id) => {
                    store.save()?;
                    println!("Saved as #{id}");
                }
                Err(error) => {
                    let Some(duplicate) = error.downcast_ref::<DuplicateCalculationError>() else {
                        return Err(error);
                    };
                    warn!(
                        %duplicate.fingerprint,
                        "identical calculation is already saved, skipping",
                    );
                }
            }
        }
        Ok(())
    }
}
