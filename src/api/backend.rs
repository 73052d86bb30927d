use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    api::{client, recommendation::build_appliance_info, wattage::parse_wattage_reply},
    history::{MonthKey, SavedCalculation},
    prelude::*,
    quantity::{power::Watts, rate::KilowattHourRate},
    rates::{RatePrediction, RateSource},
};

/// Text generation runs well past the default client timeout.
const RECOMMEND_TIMEOUT: Duration = Duration::from_secs(120);

pub struct Backend {
    client: Client,
    base_url: Url,
}

impl Backend {
    pub fn try_new(base_url: Url) -> Result<Self> {
        Ok(Self { client: client::try_new()?, base_url })
    }

    fn url(&self, path: &str, query: &impl Serialize) -> Result<Url> {
        let mut url = self
            .base_url
            .join(path)
            .with_context(|| format!("invalid backend URL `{}`", self.base_url))?;
        url.set_query(Some(&serde_qs::to_string(query)?));
        Ok(url)
    }

    async fn get<R: DeserializeOwned>(&self, url: Url) -> Result<R> {
        debug!(%url, "requesting…");
        let response = self.client.get(url).send().await.context("failed to call the backend")?;
        let status = response.status();
        response
            .json::<R>()
            .await
            .with_context(|| format!("failed to deserialize the response ({status})"))
    }

    async fn post<R: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
        timeout: Duration,
    ) -> Result<R> {
        let url = self
            .base_url
            .join(path)
            .with_context(|| format!("invalid backend URL `{}`", self.base_url))?;
        debug!(%url, "posting…");
        let response = self
            .client
            .post(url)
            .json(body)
            .timeout(timeout)
            .send()
            .await
            .context("failed to call the backend")?;
        let status = response.status();
        response
            .json::<R>()
            .await
            .with_context(|| format!("failed to deserialize the response ({status})"))
    }

    /// Ask the backend to look the appliance's typical wattage up.
    #[instrument(skip_all, fields(appliance = appliance))]
    pub async fn get_wattage(&self, appliance: &str) -> Result<Watts> {
        ensure!(!appliance.trim().is_empty(), "appliance name must not be empty");
        let url = self.url("wattdabork/get-wattage/", &WattageQuery { appliance })?;
        match self.get::<WattageResponse>(url).await? {
            WattageResponse::Failure { error } => bail!("wattage lookup failed: {error}"),
            WattageResponse::Success { wattage_info } => {
                let wattage = parse_wattage_reply(&wattage_info)?;
                info!(%wattage, "looked up");
                Ok(wattage)
            }
        }
    }

    /// Ask the backend for energy-saving advice on the appliances of the calculations.
    ///
    /// The backend serves one request at a time and answers a concurrent one with an error.
    #[instrument(skip_all, fields(n_calculations = calculations.len()))]
    pub async fn recommend(&self, calculations: &[SavedCalculation]) -> Result<String> {
        let request = RecommendRequest { appliance_info: build_appliance_info(calculations)? };
        let response: RecommendResponse =
            self.post("api/recommend/", &request, RECOMMEND_TIMEOUT).await?;
        match response {
            RecommendResponse::Failure { error } => bail!("recommendation failed: {error}"),
            RecommendResponse::Success { recommendation } => {
                info!(n_chars = recommendation.len(), "recommended");
                Ok(recommendation)
            }
        }
    }
}

#[async_trait]
impl RateSource for Backend {
    #[instrument(skip_all, fields(month = %month))]
    async fn predict_rate(&self, month: MonthKey) -> Result<RatePrediction> {
        let query = PredictQuery { month: month.month(), year: month.year() };
        let url = self.url("api/predict/", &query)?;
        match self.get::<PredictResponse>(url).await? {
            PredictResponse::Failure { error } => bail!("rate prediction failed: {error}"),
            PredictResponse::Success(prediction) => {
                let prediction = prediction.into_rate_prediction(month)?;
                info!(
                    rate = %prediction.rate,
                    seasonal_factor = ?prediction.seasonal_factor,
                    "predicted",
                );
                Ok(prediction)
            }
        }
    }
}

#[derive(Serialize)]
struct PredictQuery {
    month: u32,
    year: i32,
}

#[derive(Serialize)]
struct WattageQuery<'a> {
    appliance: &'a str,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PredictResponse {
    Failure { error: String },
    Success(Prediction),
}

#[derive(Deserialize)]
struct Prediction {
    /// Final rate, calibrated and seasonally adjusted.
    prediction: KilowattHourRate,

    #[serde(default)]
    raw_prediction: Option<f64>,

    #[serde(default)]
    seasonal_factor: Option<f64>,

    /// Latest actual rate of the same calendar month.
    #[serde(default)]
    reference_month_value: Option<KilowattHourRate>,

    #[serde(default)]
    reference_year: Option<i32>,
}

impl Prediction {
    fn into_rate_prediction(self, month: MonthKey) -> Result<RatePrediction> {
        ensure!(
            self.prediction.is_finite() && self.prediction > KilowattHourRate::ZERO,
            "backend predicted a non-positive rate: {}",
            self.prediction,
        );
        if let Some(raw_prediction) = self.raw_prediction {
            debug!(raw_prediction, "uncalibrated");
        }
        let reference = match (self.reference_year, self.reference_month_value) {
            (Some(year), Some(rate)) => Some((MonthKey::new(year, month.month())?, rate)),
            _ => None,
        };
        Ok(RatePrediction {
            rate: self.prediction,
            reference,
            seasonal_factor: self.seasonal_factor,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WattageResponse {
    Failure { error: String },
    Success { wattage_info: String },
}

#[derive(Serialize)]
struct RecommendRequest {
    appliance_info: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecommendResponse {
    Failure { error: String },
    Success { recommendation: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month() -> MonthKey {
        MonthKey::new(2025, 5).unwrap()
    }

    #[test]
    fn deserialize_prediction() -> Result {
        // language=json
        let body = r#"
            {
                "prediction": 12.8731,
                "raw_prediction": 11.2034,
                "calibrated_prediction": 12.3780,
                "calibration_factor": 1.1048,
                "seasonal_factor": 1.04,
                "month": 5,
                "input_used": {"Month": 5, "Year": 2025},
                "reference_month_value": 12.5102,
                "reference_year": 2024
            }
        "#;
        let PredictResponse::Success(prediction) = serde_json::from_str(body)? else {
            bail!("expected a successful response");
        };
        let prediction = prediction.into_rate_prediction(month())?;
        assert_eq!(prediction.rate, KilowattHourRate(12.8731));
        assert_eq!(prediction.seasonal_factor, Some(1.04));
        assert_eq!(
            prediction.reference,
            Some((MonthKey::new(2024, 5)?, KilowattHourRate(12.5102))),
        );
        Ok(())
    }

    #[test]
    fn deserialize_prediction_without_reference() -> Result {
        // language=json
        let body = r#"{"prediction": 12.0, "month": 5}"#;
        let PredictResponse::Success(prediction) = serde_json::from_str(body)? else {
            bail!("expected a successful response");
        };
        let prediction = prediction.into_rate_prediction(month())?;
        assert_eq!(prediction.reference, None);
        assert_eq!(prediction.seasonal_factor, None);
        Ok(())
    }

    #[test]
    fn deserialize_prediction_error() -> Result {
        // language=json
        let body = r#"{"error": "model file not found"}"#;
        let PredictResponse::Failure { error } = serde_json::from_str(body)? else {
            bail!("expected an error response");
        };
        assert_eq!(error, "model file not found");
        Ok(())
    }

    #[test]
    fn rejects_zero_prediction() -> Result {
        // language=json
        let body = r#"{"prediction": 0.0}"#;
        let PredictResponse::Success(prediction) = serde_json::from_str(body)? else {
            bail!("expected a successful response");
        };
        assert!(prediction.into_rate_prediction(month()).is_err());
        Ok(())
    }

    #[test]
    fn deserialize_wattage() -> Result {
        // language=json
        let body = r#"{"wattage_info": "A typical electric fan uses about 75 watts."}"#;
        let WattageResponse::Success { wattage_info } = serde_json::from_str(body)? else {
            bail!("expected a successful response");
        };
        assert_eq!(parse_wattage_reply(&wattage_info)?, Watts(75.0));
        Ok(())
    }

    #[test]
    fn serialize_recommend_request() -> Result {
        let request = RecommendRequest { appliance_info: "Fan: 75W, 8h/day, 7d/week".to_owned() };
        // language=json
        let expected = r#"{"appliance_info":"Fan: 75W, 8h/day, 7d/week"}"#;
        assert_eq!(serde_json::to_string(&request)?, expected);
        Ok(())
    }

    #[test]
    fn deserialize_recommendation() -> Result {
        // language=json
        let body = r#"{"recommendation": "Run the rice cooker once a day."}"#;
        let RecommendResponse::Success { recommendation } = serde_json::from_str(body)? else {
            bail!("expected a successful response");
        };
        assert_eq!(recommendation, "Run the rice cooker once a day.");
        Ok(())
    }

    #[test]
    fn deserialize_busy_recommender() -> Result {
        // language=json
        let body = r#"
            {"error": "Model is currently processing another request. Please wait and try again."}
        "#;
        let RecommendResponse::Failure { error } = serde_json::from_str(body)? else {
            bail!("expected an error response");
        };
        assert!(error.starts_with("Model is currently processing"));
        Ok(())
    }

    #[test]
    fn build_predict_url() -> Result {
        let backend = Backend::try_new(Url::parse("http://localhost:8000/")?)?;
        let url = backend.url("api/predict/", &PredictQuery { month: 5, year: 2025 })?;
        assert_eq!(url.as_str(), "http://localhost:8000/api/predict/?month=5&year=2025");
        Ok(())
    }

    #[test]
    fn build_wattage_url() -> Result {
        let backend = Backend::try_new(Url::parse("http://localhost:8000/")?)?;
        let url = backend.url("wattdabork/get-wattage/", &WattageQuery { appliance: "Kettle" })?;
        assert_eq!(url.as_str(), "http://localhost:8000/wattdabork/get-wattage/?appliance=Kettle");
        Ok(())
    }
}
