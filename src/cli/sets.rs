use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::{Parser, Subcommand};
use enumset::EnumSet;
use kuryente::{
    appliance::{ApplianceEntry, ApplianceSet, Weekday, WeeksPerMonth},
    prelude::*,
    quantity::{power::Watts, time::Hours},
    store::{FileStore, Store},
};
use serde::Deserialize;

use crate::{
    cli::store::StoreArgs,
    tables::{build_appliance_sets_table, build_appliances_table},
};

#[derive(Parser)]
pub struct SetsArgs {
    #[command(subcommand)]
    command: SetsCommand,
}

impl SetsArgs {
    pub fn run(self, store_args: &StoreArgs) -> Result {
        let mut store = store_args.open()?;
        match self.command {
            SetsCommand::List => {
                let sets = store.appliance_sets(&store_args.user)?;
                println!("{}", build_appliance_sets_table(&sets));
                Ok(())
            }
            SetsCommand::Show { name } => {
                let set = store
                    .appliance_set(&store_args.user, &name)?
                    .with_context(|| format!("appliance set `{name}` not found"))?;
                println!("{}", build_appliances_table(&set));
                info!(monthly_energy = %set.monthly_energy(), "total");
                Ok(())
            }
            SetsCommand::Add(args) => args.run(&mut store, store_args),
            SetsCommand::Import { file } => import(&mut store, store_args, &file),
            SetsCommand::Remove { name, appliance } => {
                let removed = if let Some(appliance) = appliance {
                    let usage = store.remove_appliance(&store_args.user, &name, &appliance)?;
                    format!("Removed `{}` from `{name}`", usage.name())
                } else {
                    let set = store.remove_appliance_set(&store_args.user, &name)?;
                    format!("Removed `{}` with {} appliance(s)", set.name(), set.len())
                };
                store.save()?;
                println!("{removed}");
                Ok(())
            }
        }
    }
}

#[derive(Subcommand)]
enum SetsCommand {
    /// List the appliance sets.
    List,

    /// Show the appliances of a set.
    Show { name: String },

    /// Add an appliance to a set, or replace the one with the same name.
    Add(AddArgs),

    /// Import appliance sets from a TOML file, replacing sets with the same names.
    Import {
        #[clap(long)]
        file: PathBuf,
    },

    /// Remove a set, or a single appliance from it.
    Remove {
        name: String,

        #[clap(long)]
        appliance: Option<String>,
    },
}

#[derive(Parser)]
struct AddArgs {
    /// Set to add the appliance to, created when missing.
    #[clap(long = "set")]
    set: String,

    #[clap(long)]
    name: Option<String>,

    /// Power draw in watts.
    #[clap(long = "watt")]
    wattage: Option<Watts>,

    #[clap(long = "hours")]
    hours_per_day: Option<Hours>,

    /// Days of use, for example `M,W,F` or `SU,S`.
    #[clap(long = "days", value_parser = Weekday::parse_set)]
    days_per_week: Option<EnumSet<Weekday>>,

    /// Weeks of use per month, for example `4` or `2 Weeks`.
    #[clap(long = "weeks")]
    weeks_per_month: Option<WeeksPerMonth>,

    #[clap(long = "quantity")]
    quantity: Option<u32>,
}

impl AddArgs {
    #[instrument(skip_all, fields(set = %self.set))]
    fn run(self, store: &mut FileStore, store_args: &StoreArgs) -> Result {
        let entry = ApplianceEntry {
            name: self.name,
            wattage: self.wattage,
            hours_per_day: self.hours_per_day,
            days_per_week: self.days_per_week.unwrap_or_default(),
            weeks_per_month: self.weeks_per_month,
            quantity: self.quantity,
        };
        let usage = entry.complete().context("the appliance entry is incomplete")?;

        let set = match store.appliance_set(&store_args.user, &self.set)? {
            Some(mut set) => {
                if set.upsert(usage).is_some() {
                    info!("replaced the existing appliance");
                }
                set
            }
            None => ApplianceSet::new(self.set, vec![usage])?,
        };
        println!("{}", build_appliances_table(&set));
        store.put_appliance_set(&store_args.user, set)?;
        store.save()
    }
}

#[derive(Deserialize)]
struct ImportFile {
    appliance_sets: Vec<ApplianceSet>,
}

#[instrument(skip_all, fields(file = %file.display()))]
fn import(store: &mut FileStore, store_args: &StoreArgs, file: &Path) -> Result {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read `{}`", file.display()))?;
    let import: ImportFile =
        toml::from_str(&text).with_context(|| format!("failed to parse `{}`", file.display()))?;
    for set in import.appliance_sets {
        store.put_appliance_set(&store_args.user, set)?;
    }
    println!("{}", build_appliance_sets_table(&store.appliance_sets(&store_args.user)?));
    store.save()
}
