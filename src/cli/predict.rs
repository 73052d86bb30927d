use std::{path::PathBuf, slice};

use chrono::{Local, Utc};
use clap::Parser;
use kuryente::{
    engine::{compare_to_rate, compare_to_saved_calculation},
    error::PredictionExistsError,
    history::{BillPrediction, MonthKey},
    prelude::*,
    quantity::rate::KilowattHourRate,
    rates::{HistoricalRates, RatePrediction, RateSource},
    store::{Overwrite, Store},
};

use crate::{
    cli::{
        backend::BackendArgs,
        comparison::{print_cost_comparison, print_rate_comparison},
        store::StoreArgs,
    },
    tables::build_predictions_table,
};

#[derive(Parser)]
pub struct PredictArgs {
    /// Appliance sets whose monthly energy is summed.
    #[clap(long = "set", required = true, num_args = 1..)]
    sets: Vec<String>,

    /// Month to predict as `YYYY-MM`, the next month by default.
    #[clap(long)]
    month: Option<MonthKey>,

    /// Uncertainty of the predicted rate in pesos per kilowatt-hour.
    #[clap(long = "margin", env = "KURYENTE_MARGIN", default_value = "0.30")]
    margin: KilowattHourRate,

    /// Use this rate instead of asking the backend.
    #[clap(long = "rate")]
    rate: Option<KilowattHourRate>,

    #[clap(flatten)]
    backend: BackendArgs,

    /// JSON file with the past monthly rates, for the reference rate and seasonal factor.
    #[clap(long = "historical-rates", env = "KURYENTE_HISTORICAL_RATES")]
    historical_rates: Option<PathBuf>,

    /// Save the prediction.
    #[clap(long)]
    save: bool,

    /// Replace the already saved prediction for the month.
    #[clap(long, requires = "save")]
    overwrite: bool,
}

impl PredictArgs {
    #[instrument(skip_all)]
    pub async fn run(self, store_args: &StoreArgs) -> Result {
        let user = &store_args.user;
        let mut store = store_args.open()?;
        let month = self.month.unwrap_or_else(|| MonthKey::of(&Local::now().date_naive()).next());
        let sets = self
            .sets
            .iter()
            .map(|name| {
                store
                    .appliance_set(user, name)?
                    .with_context(|| format!("appliance set `{name}` not found"))
            })
            .collect::<Result<Vec<_>>>()?;
        let historical_rates =
            self.historical_rates.as_deref().map(HistoricalRates::read_from).transpose()?;

        let predicted = match self.rate {
            Some(rate) => RatePrediction { rate, reference: None, seasonal_factor: None },
            None => self.backend.connect()?.predict_rate(month).await?,
        };
        if let Some(historical_rates) = &historical_rates {
            info!(
                %month,
                backend = ?predicted.seasonal_factor,
                historical = historical_rates.seasonal_factor(month.month()),
                "seasonal factor",
            );
        }

        let prediction =
            BillPrediction::estimate(month, &sets, predicted.rate, self.margin, Utc::now())?;
        println!("{}", build_predictions_table(slice::from_ref(&prediction)));

        let reference = historical_rates
            .as_ref()
            .and_then(|rates| rates.reference_for(month))
            .or(predicted.reference);
        if let Some((reference_month, reference_rate)) = reference {
            print_rate_comparison(
                predicted.rate,
                reference_rate,
                &format!("the {} {} rate", reference_month.month_name(), reference_month.year()),
                compare_to_rate(predicted.rate, reference_rate),
            );
        }
        if let Some(saved) = store.bill_prediction(user, month)? {
            let (average, saved_average) =
                (prediction.estimated_bill.average, saved.estimated_bill.average);
            print_cost_comparison(
                average,
                saved_average,
                "the saved prediction",
                compare_to_saved_calculation(average, saved_average),
            );
        }

        if self.save {
            let overwrite = if self.overwrite { Overwrite::Confirmed } else { Overwrite::Refused };
            match store.put_bill_prediction(user, prediction, overwrite) {
                Ok(_) => store.save()?,
                Err(error) => {
                    let Some(exists) = error.downcast_ref::<PredictionExistsError>() else {
                        return Err(error);
                    };
                    warn!(
                        %exists.month,
                        "prediction is already saved, pass `--overwrite` to replace it",
                    );
                }
            }
        }
        Ok(())
    }
}
