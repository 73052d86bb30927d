use clap::{Parser, Subcommand};
use kuryente::{
    engine::compare_to_saved_calculation,
    prelude::*,
    store::{CalculationId, Store},
};

use crate::{
    cli::{backend::BackendArgs, comparison::print_cost_comparison, store::StoreArgs},
    tables::{build_breakdown_table, build_calculations_table, build_predictions_table},
};

#[derive(Parser)]
pub struct HistoryArgs {
    #[command(subcommand)]
    command: HistoryCommand,
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List the saved calculations, newest first.
    List,

    /// Show the breakdown of a saved calculation.
    Show { id: CalculationId },

    /// Compare the monthly totals of two saved calculations.
    Compare { id: CalculationId, other: CalculationId },

    /// Remove a saved calculation.
    Remove { id: CalculationId },

    /// Verify that the saved totals and fingerprints match their appliances.
    Check,

    /// List the saved bill predictions.
    Predictions,

    /// Ask for energy-saving advice on the appliances of saved calculations.
    Recommend {
        #[clap(required = true)]
        ids: Vec<CalculationId>,

        #[clap(flatten)]
        backend: BackendArgs,
    },
}

impl HistoryArgs {
    pub async fn run(self, store_args: &StoreArgs) -> Result {
        let mut store = store_args.open()?;
        let user = &store_args.user;
        match self.command {
            HistoryCommand::List => {
                println!("{}", build_calculations_table(&store.calculations(user)?));
            }
            HistoryCommand::Show { id } => {
                let calculation = store
                    .calculation(user, id)?
                    .with_context(|| format!("calculation #{id} not found"))?;
                println!("{}", calculation.display_name(id));
                println!("{}", build_breakdown_table(calculation.items(), calculation.totals()));
            }
            HistoryCommand::Compare { id, other } => {
                let calculation = store
                    .calculation(user, id)?
                    .with_context(|| format!("calculation #{id} not found"))?;
                let reference = store
                    .calculation(user, other)?
                    .with_context(|| format!("calculation #{other} not found"))?;
                print_cost_comparison(
                    calculation.total_cost(),
                    reference.total_cost(),
                    &reference.display_name(other),
                    compare_to_saved_calculation(calculation.total_cost(), reference.total_cost()),
                );
            }
            HistoryCommand::Remove { id } => {
                let calculation = store.remove_calculation(user, id)?;
                store.save()?;
                println!("Removed {}", calculation.display_name(id));
            }
            HistoryCommand::Check => check(&store, store_args)?,
            HistoryCommand::Predictions => {
                println!("{}", build_predictions_table(&store.bill_predictions(user)?));
            }
            HistoryCommand::Recommend { ids, backend } => {
                let calculations = ids
                    .into_iter()
                    .map(|id| {
                        store
                            .calculation(user, id)?
                            .with_context(|| format!("calculation #{id} not found"))
                    })
                    .collect::<Result<Vec<_>>>()?;
                println!("{}", backend.connect()?.recommend(&calculations).await?);
            }
        }
        Ok(())
    }
}

#[instrument(skip_all, fields(user = %store_args.user))]
fn check(store: &impl Store, store_args: &StoreArgs) -> Result {
    let calculations = store.calculations(&store_args.user)?;
    let mut n_inconsistent = 0_usize;
    for (id, calculation) in &calculations {
        if !calculation.is_consistent() {
            warn!(%id, name = %calculation.display_name(id), "inconsistent");
            n_inconsistent += 1;
        }
    }
    info!(n_calculations = calculations.len(), n_inconsistent, "checked");
    ensure!(n_inconsistent == 0, "{n_inconsistent} saved calculation(s) are inconsistent");
    Ok(())
}
