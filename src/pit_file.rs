//! PointInTimeFile — удобная обёртка "перейти к моменту T и открыть каталог".
//!
//! Момент фиксируется при создании (`goto`), затем тот же объект можно
//! использовать для чтения и записи в разных каталогах. После открытия
//! доступен путь выбранного файла (`filename()`).

use std::path::{Path, PathBuf};

use crate::clock::{Clock, SystemClock};
use crate::error::{PitError, Result};
use crate::pit::PointInTime;
use crate::resolve::{resolve_for_read, resolve_for_write};
use crate::stream::{open_read, open_write, PitReader, PitWriter, StreamOptions};

/// A point in time bound to nothing yet; resolves a directory on open.
#[derive(Debug, Clone)]
pub struct PointInTimeFile {
    pit: PointInTime,
    filename: Option<PathBuf>,
    gzip: bool,
}

/// Bind to `spec` (or to "now" when `None`).
pub fn goto(spec: Option<&str>) -> Result<PointInTimeFile> {
    PointInTimeFile::with_clock(spec, &SystemClock)
}

impl PointInTimeFile {
    pub fn with_clock(spec: Option<&str>, clock: &dyn Clock) -> Result<Self> {
        Ok(Self::at(PointInTime::parse(spec, clock)?))
    }

    pub fn at(pit: PointInTime) -> Self {
        Self {
            pit,
            filename: None,
            gzip: false,
        }
    }

    pub fn pit(&self) -> PointInTime {
        self.pit
    }

    /// Path resolved by the last successful open, if any.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_deref()
    }

    /// Whether the last opened file is gzip. `false` before any open.
    pub fn is_gzipped(&self) -> bool {
        self.gzip
    }

    /// Open the snapshot current as of `pit()` in `dir`.
    pub fn open_read<P: AsRef<Path>>(&mut self, dir: P, opts: &StreamOptions) -> Result<PitReader> {
        let h = resolve_for_read(dir, self.pit)?;
        let r = open_read(&h, opts)?;
        self.filename = Some(h.path().to_path_buf());
        self.gzip = r.is_gzipped();
        Ok(r)
    }

    /// Create (or truncate) the snapshot for `pit()` in `dir`.
    pub fn open_write<P: AsRef<Path>>(&mut self, dir: P, opts: &StreamOptions) -> Result<PitWriter> {
        let h = resolve_for_write(dir, self.pit)?;
        let w = open_write(&h, opts)?;
        self.filename = Some(h.path().to_path_buf());
        self.gzip = w.is_gzipped();
        Ok(w)
    }

    /// Scoped read; the file is closed when this returns.
    pub fn read<P, T, E, F>(&mut self, dir: P, opts: &StreamOptions, f: F) -> std::result::Result<T, E>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut PitReader) -> std::result::Result<T, E>,
        E: From<PitError>,
    {
        let mut r = self.open_read(dir, opts)?;
        f(&mut r)
    }

    /// Scoped write; finishes the stream on success, closes it on any exit.
    pub fn write<P, T, E, F>(&mut self, dir: P, opts: &StreamOptions, f: F) -> std::result::Result<T, E>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut PitWriter) -> std::result::Result<T, E>,
        E: From<PitError>,
    {
        let mut w = self.open_write(dir, opts)?;
        let out = f(&mut w)?;
        w.finish()?;
        Ok(out)
    }
}

/// Write a snapshot named by the current local time.
pub fn write_now<P, T, E, F>(dir: P, opts: &StreamOptions, f: F) -> std::result::Result<T, E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut PitWriter) -> std::result::Result<T, E>,
    E: From<PitError>,
{
    goto(None)?.write(dir, opts, f)
}

/// Read the latest snapshot as of the current local time.
pub fn read_now<P, T, E, F>(dir: P, opts: &StreamOptions, f: F) -> std::result::Result<T, E>
where
    P: AsRef<Path>,
    F: FnOnce(&mut PitReader) -> std::result::Result<T, E>,
    E: From<PitError>,
{
    goto(None)?.read(dir, opts, f)
}
