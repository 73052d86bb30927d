use clap::Parser;
use kuryente::prelude::*;

use crate::cli::backend::BackendArgs;

#[derive(Parser)]
pub struct WattageArgs {
    /// Appliance name, for example `rice cooker`.
    appliance: String,

    #[clap(flatten)]
    backend: BackendArgs,
}

impl WattageArgs {
    pub async fn run(self) -> Result {
        let wattage = self.backend.connect()?.get_wattage(&self.appliance).await?;
        println!("{}: {wattage}", self.appliance);
        Ok(())
    }
}
