use anyhow::{anyhow, Result};
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct NullchanConfig {
    pub api_port: u16,
    pub paths: NullchanPaths,
}

impl NullchanConfig {
    pub fn from_env() -> Result<Self> {
        let paths = NullchanPaths::discover()?;
        let api_port = env::var("NULLCHAN_API_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(8080);
        Ok(Self { api_port, paths })
    }

    pub fn new(api_port: u16, paths: NullchanPaths) -> Self {
        Self { api_port, paths }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NullchanPaths {
    pub base: PathBuf,
    pub data_dir: PathBuf,
    pub db_path: PathBuf,
}

impl NullchanPaths {
    /// Resolves the base directory from `NULLCHAN_DATA_DIR`, falling back to
    /// the directory the executable lives in.
    pub fn discover() -> Result<Self> {
        if let Some(base) = env::var_os("NULLCHAN_DATA_DIR") {
            return Self::from_base_dir(PathBuf::from(base));
        }
        let exe_path = std::env::current_exe()
            .map_err(|err| anyhow!("failed to resolve current executable: {err}"))?;
        let base = exe_path
            .parent()
            .ok_or_else(|| anyhow!("executable path missing parent"))?
            .to_path_buf();
        Self::from_base_dir(base)
    }

    pub fn from_base_dir<P: AsRef<Path>>(base: P) -> Result<Self> {
        let base = base.as_ref().to_path_buf();
        let data_dir = base.join("data");
        let db_path = data_dir.join("nullchan.db");
        Ok(Self {
            base,
            data_dir,
            db_path,
        })
    }
}
