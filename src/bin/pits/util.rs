use anyhow::{anyhow, Result};
use std::path::PathBuf;

use pits::PitsConfig;

/// --dir, иначе PITS_DIR.
pub fn pick_dir(cfg: &PitsConfig, dir: Option<PathBuf>) -> Result<PathBuf> {
    dir.or_else(|| cfg.dir.clone())
        .ok_or_else(|| anyhow!("no snapshot directory: pass --dir or set PITS_DIR"))
}
