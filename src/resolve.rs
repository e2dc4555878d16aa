//! Разрешение пути снапшота: куда писать и что читать "на момент T".
//!
//! Запись: `<dir>/<YYYY.MM.DD-HH:MM:SS>`, каталог создаётся при необходимости.
//! Чтение: дети каталога сортируются по имени по убыванию (для фиксированного
//! формата это хронологический порядок), берётся первый, чей момент <= T.
//! Имена не в каноническом формате молча пропускаются.

use std::cell::OnceCell;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use log::debug;

use crate::consts::GZIP_MAGIC;
use crate::error::{PitError, Result};
use crate::pit::PointInTime;

/// One conforming entry of a snapshot directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub pit: PointInTime,
    pub path: PathBuf,
}

/// Target for a new snapshot. The file may or may not exist yet.
#[derive(Debug, Clone)]
pub struct WriteHandle {
    dir: PathBuf,
    pit: PointInTime,
    path: PathBuf,
}

impl WriteHandle {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    pub fn pit(&self) -> PointInTime {
        self.pit
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Existing snapshot chosen for a query point in time.
#[derive(Debug)]
pub struct ReadHandle {
    dir: PathBuf,
    query: PointInTime,
    snapshot: Snapshot,
    gzip: OnceCell<bool>,
}

impl ReadHandle {
    pub fn dir(&self) -> &Path {
        &self.dir
    }
    /// The point in time that was asked for.
    pub fn query(&self) -> PointInTime {
        self.query
    }
    /// The point in time of the chosen snapshot (<= `query()`).
    pub fn pit(&self) -> PointInTime {
        self.snapshot.pit
    }
    pub fn path(&self) -> &Path {
        &self.snapshot.path
    }
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Whether the file starts with the gzip magic `1f 8b`.
    ///
    /// The header is read at most once per handle.
    pub fn is_gzipped(&self) -> Result<bool> {
        if let Some(v) = self.gzip.get() {
            return Ok(*v);
        }
        let v = sniff_gzip(self.path())?;
        let _ = self.gzip.set(v);
        Ok(v)
    }
}

fn sniff_gzip(path: &Path) -> Result<bool> {
    let mut head = Vec::with_capacity(GZIP_MAGIC.len());
    File::open(path)?
        .take(GZIP_MAGIC.len() as u64)
        .read_to_end(&mut head)?;
    Ok(head == GZIP_MAGIC)
}

/// Expand a leading `~` to `$HOME`. Other paths are returned unchanged.
pub fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match std::env::var_os("HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(rest),
        _ => path.to_path_buf(),
    }
}

/// Resolve the path for a new snapshot at `pit`, creating `dir` if needed.
///
/// No existence check on the snapshot file: a second write at the same
/// point in time truncates the first unless the caller opens with
/// `create_new`.
pub fn resolve_for_write<P: AsRef<Path>>(dir: P, pit: PointInTime) -> Result<WriteHandle> {
    let dir = expand_home(dir.as_ref());
    if dir.is_file() {
        return Err(PitError::NotADirectory { path: dir });
    }
    fs::create_dir_all(&dir)?;
    let path = dir.join(pit.filename());
    debug!("resolve_for_write: {} -> {}", pit, path.display());
    Ok(WriteHandle { dir, pit, path })
}

/// Resolve the latest snapshot in `dir` whose point in time is <= `pit`.
pub fn resolve_for_read<P: AsRef<Path>>(dir: P, pit: PointInTime) -> Result<ReadHandle> {
    let dir = expand_home(dir.as_ref());
    check_read_dir(&dir)?;

    let mut names = child_names(&dir)?;
    // от поздних к ранним
    names.sort_unstable_by(|a, b| b.cmp(a));

    let found = names.into_iter().find_map(|name| {
        PointInTime::from_filename(&name)
            .filter(|p| *p <= pit)
            .map(|p| Snapshot {
                pit: p,
                path: dir.join(&name),
            })
    });

    match found {
        Some(snapshot) => {
            debug!(
                "resolve_for_read: {} -> {}",
                pit,
                snapshot.path.display()
            );
            Ok(ReadHandle {
                dir,
                query: pit,
                snapshot,
                gzip: OnceCell::new(),
            })
        }
        None => Err(PitError::NoSnapshotFound { pit, dir }),
    }
}

/// All conforming snapshots in `dir`, oldest first.
pub fn list_snapshots<P: AsRef<Path>>(dir: P) -> Result<Vec<Snapshot>> {
    let dir = expand_home(dir.as_ref());
    check_read_dir(&dir)?;

    let mut out: Vec<Snapshot> = child_names(&dir)?
        .into_iter()
        .filter_map(|name| {
            PointInTime::from_filename(&name).map(|pit| Snapshot {
                pit,
                path: dir.join(&name),
            })
        })
        .collect();
    out.sort_by_key(|s| s.pit);
    Ok(out)
}

fn check_read_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        return Err(PitError::NotFound {
            path: dir.to_path_buf(),
        });
    }
    // metadata() следует по симлинкам
    if !fs::metadata(dir)?.is_dir() {
        return Err(PitError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}

/// UTF-8 names of the direct children of `dir`; anything else can't be canonical.
fn child_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}
