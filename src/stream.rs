//! Открытие потоков для разрешённых снапшотов.
//!
//! Чтение: gzip определяется по первым двум байтам (`1f 8b`) и снимается
//! прозрачно. Запись: gzip только если вызывающий явно попросил
//! (`StreamOptions::compress`), автодетекта при записи нет.
//!
//! Файл закрывается ровно один раз — в Drop обёртки. `with_reader`/`with_writer`
//! дают scoped-использование: ресурс освобождается на любом пути выхода.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use log::debug;

use crate::consts::{DEFAULT_BUF_CAPACITY, DEFAULT_GZIP_LEVEL};
use crate::error::{PitError, Result};
use crate::resolve::{ReadHandle, WriteHandle};

/// Caller-chosen stream options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamOptions {
    /// gzip-compress bytes on write. Ignored on read (detected instead).
    pub compress: bool,
    /// gzip level 0..=9.
    pub compression_level: u32,
    /// Append to an existing snapshot instead of truncating it.
    pub append: bool,
    /// Fail with `DuplicateSnapshot` if the snapshot already exists.
    pub create_new: bool,
    /// Buffer size for the underlying file stream.
    pub buffer_capacity: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            compress: false,
            compression_level: DEFAULT_GZIP_LEVEL,
            append: false,
            create_new: false,
            buffer_capacity: DEFAULT_BUF_CAPACITY,
        }
    }
}

impl StreamOptions {
    pub fn with_compress(mut self, on: bool) -> Self {
        self.compress = on;
        self
    }

    pub fn with_compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    pub fn with_append(mut self, on: bool) -> Self {
        self.append = on;
        self
    }

    pub fn with_create_new(mut self, on: bool) -> Self {
        self.create_new = on;
        self
    }

    pub fn with_buffer_capacity(mut self, cap: usize) -> Self {
        self.buffer_capacity = cap.max(1);
        self
    }
}

enum ReaderKind {
    Plain(BufReader<File>),
    Gzip(MultiGzDecoder<BufReader<File>>),
}

/// Byte stream over a resolved snapshot, decompressed if it was gzip.
pub struct PitReader {
    inner: ReaderKind,
}

impl PitReader {
    pub fn is_gzipped(&self) -> bool {
        matches!(self.inner, ReaderKind::Gzip(_))
    }
}

impl Read for PitReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            ReaderKind::Plain(r) => r.read(buf),
            ReaderKind::Gzip(r) => r.read(buf),
        }
    }
}

enum WriterKind {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

/// Byte sink for a new snapshot.
///
/// Call [`PitWriter::finish`] to flush (and write the gzip trailer) with
/// error reporting; dropping without `finish` still closes the file but
/// swallows late I/O errors.
pub struct PitWriter {
    inner: WriterKind,
}

impl PitWriter {
    pub fn is_gzipped(&self) -> bool {
        matches!(self.inner, WriterKind::Gzip(_))
    }

    pub fn finish(self) -> Result<()> {
        match self.inner {
            WriterKind::Plain(mut w) => w.flush()?,
            WriterKind::Gzip(enc) => enc.finish()?.flush()?,
        }
        Ok(())
    }
}

impl Write for PitWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.inner {
            WriterKind::Plain(w) => w.write(buf),
            WriterKind::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.inner {
            WriterKind::Plain(w) => w.flush(),
            WriterKind::Gzip(w) => w.flush(),
        }
    }
}

/// Open a resolved snapshot for reading.
pub fn open_read(handle: &ReadHandle, opts: &StreamOptions) -> Result<PitReader> {
    let gz = handle.is_gzipped()?;
    let f = File::open(handle.path())?;
    let base = BufReader::with_capacity(opts.buffer_capacity.max(1), f);
    debug!("open_read: {} (gzip={})", handle.path().display(), gz);
    let inner = if gz {
        ReaderKind::Gzip(MultiGzDecoder::new(base))
    } else {
        ReaderKind::Plain(base)
    };
    Ok(PitReader { inner })
}

/// Open a resolved write target.
pub fn open_write(handle: &WriteHandle, opts: &StreamOptions) -> Result<PitWriter> {
    let mut oo = OpenOptions::new();
    oo.write(true);
    if opts.create_new {
        oo.create_new(true);
    } else {
        oo.create(true);
    }
    if opts.append {
        oo.append(true);
    } else if !opts.create_new {
        oo.truncate(true);
    }

    let f = oo.open(handle.path()).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            PitError::DuplicateSnapshot {
                path: handle.path().to_path_buf(),
            }
        } else {
            PitError::Io(e)
        }
    })?;
    let base = BufWriter::with_capacity(opts.buffer_capacity.max(1), f);
    debug!(
        "open_write: {} (gzip={}, append={})",
        handle.path().display(),
        opts.compress,
        opts.append
    );
    let inner = if opts.compress {
        WriterKind::Gzip(GzEncoder::new(
            base,
            Compression::new(opts.compression_level.min(9)),
        ))
    } else {
        WriterKind::Plain(base)
    };
    Ok(PitWriter { inner })
}

/// Run `f` over a reader; the file is closed when this returns.
pub fn with_reader<T, E, F>(
    handle: &ReadHandle,
    opts: &StreamOptions,
    f: F,
) -> std::result::Result<T, E>
where
    F: FnOnce(&mut PitReader) -> std::result::Result<T, E>,
    E: From<PitError>,
{
    let mut r = open_read(handle, opts)?;
    f(&mut r)
}

/// Run `f` over a writer, then finish it. On error from `f` the file is
/// still closed; whatever was written so far stays on disk.
pub fn with_writer<T, E, F>(
    handle: &WriteHandle,
    opts: &StreamOptions,
    f: F,
) -> std::result::Result<T, E>
where
    F: FnOnce(&mut PitWriter) -> std::result::Result<T, E>,
    E: From<PitError>,
{
    let mut w = open_write(handle, opts)?;
    let out = f(&mut w)?;
    w.finish()?;
    Ok(out)
}
