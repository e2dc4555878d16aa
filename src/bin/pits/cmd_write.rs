use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io;
use std::path::PathBuf;

use pits::{parse_point_in_time, resolve_for_write, with_writer, PitsConfig};

use super::util::pick_dir;

pub fn exec(
    cfg: &PitsConfig,
    dir: Option<PathBuf>,
    at: Option<String>,
    input: Option<PathBuf>,
    gzip: bool,
    append: bool,
    exclusive: bool,
) -> Result<()> {
    let dir = pick_dir(cfg, dir)?;
    let pit = parse_point_in_time(at.as_deref())?;
    let handle = resolve_for_write(&dir, pit)?;

    let opts = cfg.write_options(gzip, append, exclusive);

    let written = with_writer(&handle, &opts, |w| -> Result<u64> {
        let n = match &input {
            Some(p) => {
                let mut f = File::open(p).with_context(|| format!("open {}", p.display()))?;
                io::copy(&mut f, w)?
            }
            None => io::copy(&mut io::stdin().lock(), w)?,
        };
        Ok(n)
    })?;

    info!(
        "wrote {} B -> {} (gzip={})",
        written,
        handle.path().display(),
        opts.compress
    );
    println!("{}", handle.path().display());
    Ok(())
}
