use anyhow::Result;
use log::warn;
use serde::Serialize;
use std::path::{Path, PathBuf};

use pits::{list_snapshots, PitsConfig};

use super::util::pick_dir;

#[derive(Serialize)]
struct Row {
    pit: String,
    path: String,
    bytes: u64,
}

/// Size on disk; an unreadable entry is reported as 0 with a warning.
fn snapshot_len(path: &Path) -> u64 {
    match std::fs::metadata(path) {
        Ok(m) => m.len(),
        Err(e) => {
            warn!("list: stat {} failed: {}", path.display(), e);
            0
        }
    }
}

pub fn exec(cfg: &PitsConfig, dir: Option<PathBuf>, json: bool) -> Result<()> {
    let dir = pick_dir(cfg, dir)?;
    let rows: Vec<Row> = list_snapshots(&dir)?
        .into_iter()
        .map(|s| Row {
            pit: s.pit.to_string(),
            bytes: snapshot_len(&s.path),
            path: s.path.display().to_string(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for r in &rows {
            println!("{}  {:>10} B  {}", r.pit, r.bytes, r.path);
        }
        println!("{} snapshot(s)", rows.len());
    }
    Ok(())
}
