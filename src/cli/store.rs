use std::path::PathBuf;

use clap::Parser;
use kuryente::{
    prelude::*,
    store::{FileStore, UserId},
};

#[derive(Parser)]
pub struct StoreArgs {
    /// Account whose records are used.
    #[clap(long = "user", env = "KURYENTE_USER", default_value = "default", global = true)]
    pub user: UserId,

    #[clap(long = "store", env = "KURYENTE_STORE", default_value = "kuryente.toml", global = true)]
    pub path: PathBuf,
}

impl StoreArgs {
    pub fn open(&self) -> Result<FileStore> {
        FileStore::open(&self.path)
    }
}
