use std::path::PathBuf;

use eyre::WrapErr;

use crate::cli::RootArgs;
use crate::http::LR2IR_SEARCH_URL;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub lr2ir_base_url: String,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env_and_args(args: &RootArgs) -> eyre::Result<Self> {
        let lr2ir_base_url =
            std::env::var("LR2IR_BASE_URL").unwrap_or_else(|_| LR2IR_SEARCH_URL.to_string());

        Ok(Self {
            lr2ir_base_url,
            data_dir: args.data_dir.clone(),
        })
    }

    pub fn ensure_dirs(&self) -> eyre::Result<()> {
        std::fs::create_dir_all(&self.data_dir).wrap_err("create data_dir")?;
        Ok(())
    }
}
