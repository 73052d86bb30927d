use clap::Parser;
use kuryente::{api::Backend, prelude::*};
use reqwest::Url;

#[derive(Parser)]
pub struct BackendArgs {
    /// Prediction backend base URL.
    #[clap(
        long = "backend-url",
        env = "KURYENTE_BACKEND_URL",
        default_value = "http://localhost:8000"
    )]
    pub url: Url,
}

impl BackendArgs {
    pub fn connect(&self) -> Result<Backend> {
        Backend::try_new(self.url.clone())
    }
}
