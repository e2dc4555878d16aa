use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::PathBuf;

use pits::{parse_point_in_time, resolve_for_read, with_reader, PitsConfig};

use super::util::pick_dir;

pub fn exec(
    cfg: &PitsConfig,
    dir: Option<PathBuf>,
    at: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let dir = pick_dir(cfg, dir)?;
    let pit = parse_point_in_time(at.as_deref())?;
    let handle = resolve_for_read(&dir, pit)?;
    let opts = cfg.stream_options();

    with_reader(&handle, &opts, |r| -> Result<()> {
        match &out {
            Some(out_path) => {
                if let Some(parent) = out_path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                let mut f = OpenOptions::new()
                    .create(true)
                    .truncate(true)
                    .write(true)
                    .open(out_path)
                    .with_context(|| format!("open {}", out_path.display()))?;
                let n = io::copy(r, &mut f)?;
                f.sync_all()?;
                eprintln!(
                    "{} ({} B) -> {}",
                    handle.path().display(),
                    n,
                    out_path.display()
                );
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                io::copy(r, &mut lock)?;
                lock.flush()?;
            }
        }
        Ok(())
    })
}
