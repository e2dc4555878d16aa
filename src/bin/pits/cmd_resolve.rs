use anyhow::Result;
use std::path::PathBuf;

use pits::{parse_point_in_time, resolve_for_read, PitsConfig};

use super::util::pick_dir;

pub fn exec(cfg: &PitsConfig, dir: Option<PathBuf>, at: Option<String>, json: bool) -> Result<()> {
    let dir = pick_dir(cfg, dir)?;
    let pit = parse_point_in_time(at.as_deref())?;
    let handle = resolve_for_read(&dir, pit)?;
    let gzip = handle.is_gzipped()?;

    if json {
        let obj = serde_json::json!({
            "query": handle.query().to_string(),
            "pit": handle.pit().to_string(),
            "path": handle.path().display().to_string(),
            "gzip": gzip,
        });
        println!("{}", serde_json::to_string_pretty(&obj)?);
    } else {
        println!("query: {}", handle.query());
        println!("pit:   {}", handle.pit());
        println!("path:  {}", handle.path().display());
        println!("gzip:  {}", gzip);
    }
    Ok(())
}
