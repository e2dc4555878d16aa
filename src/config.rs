//! Configuration for callers that don't want to thread options by hand
//! (the `pits` binary, scripts).
//!
//! The core functions never read the environment; they take explicit
//! `StreamOptions`. `PitsConfig::from_env()` is the one place ENV is looked up.
//!
//! Env:
//! - PITS_DIR: default snapshot directory (no default)
//! - PITS_GZIP: compress on write, "1|true|on|yes" => true (default false)
//! - PITS_GZIP_LEVEL: 0..=9 (default 6)
//! - PITS_BUF_CAPACITY: stream buffer bytes (default 65536)

use std::fmt;
use std::path::PathBuf;

use crate::consts::{
    DEFAULT_BUF_CAPACITY, DEFAULT_GZIP_LEVEL, ENV_BUF_CAPACITY, ENV_DIR, ENV_GZIP, ENV_GZIP_LEVEL,
};
use crate::stream::StreamOptions;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PitsConfig {
    /// Snapshot directory used when none is given explicitly.
    pub dir: Option<PathBuf>,

    /// gzip on write unless overridden per call.
    pub gzip: bool,

    pub gzip_level: u32,

    pub buf_capacity: usize,
}

impl Default for PitsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            gzip: false,
            gzip_level: DEFAULT_GZIP_LEVEL,
            buf_capacity: DEFAULT_BUF_CAPACITY,
        }
    }
}

fn env_flag(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s == "1" || s == "true" || s == "on" || s == "yes"
}

impl PitsConfig {
    /// Load configuration from environment variables. Unparsable values
    /// keep the default.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var(ENV_DIR) {
            let s = v.trim();
            if !s.is_empty() {
                cfg.dir = Some(PathBuf::from(s));
            }
        }

        if let Ok(v) = std::env::var(ENV_GZIP) {
            cfg.gzip = env_flag(&v);
        }

        if let Ok(v) = std::env::var(ENV_GZIP_LEVEL) {
            if let Ok(n) = v.trim().parse::<u32>() {
                cfg.gzip_level = n.min(9);
            }
        }

        if let Ok(v) = std::env::var(ENV_BUF_CAPACITY) {
            if let Ok(n) = v.trim().parse::<usize>() {
                if n > 0 {
                    cfg.buf_capacity = n;
                }
            }
        }

        cfg
    }

    pub fn with_dir<P: Into<PathBuf>>(mut self, dir: Option<P>) -> Self {
        self.dir = dir.map(Into::into);
        self
    }

    pub fn with_gzip(mut self, on: bool) -> Self {
        self.gzip = on;
        self
    }

    pub fn with_gzip_level(mut self, level: u32) -> Self {
        self.gzip_level = level.min(9);
        self
    }

    pub fn with_buf_capacity(mut self, cap: usize) -> Self {
        self.buf_capacity = cap.max(1);
        self
    }

    /// Stream options seeded from this config.
    pub fn stream_options(&self) -> StreamOptions {
        StreamOptions::default()
            .with_compress(self.gzip)
            .with_compression_level(self.gzip_level)
            .with_buffer_capacity(self.buf_capacity)
    }

    /// Options for a write. `gzip` can only turn compression on; with
    /// PITS_GZIP set it stays on either way.
    pub fn write_options(&self, gzip: bool, append: bool, exclusive: bool) -> StreamOptions {
        let opts = self
            .stream_options()
            .with_append(append)
            .with_create_new(exclusive);
        if gzip {
            opts.with_compress(true)
        } else {
            opts
        }
    }
}

impl fmt::Display for PitsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PitsConfig {{ dir: {}, gzip: {}, gzip_level: {}, buf_capacity: {} }}",
            self.dir
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string()),
            self.gzip,
            self.gzip_level,
            self.buf_capacity,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags() {
        for on in ["1", "true", " ON ", "yes"] {
            assert!(env_flag(on), "{on}");
        }
        for off in ["0", "false", "", "nope"] {
            assert!(!env_flag(off), "{off}");
        }
    }

    #[test]
    fn builder_feeds_stream_options() {
        let cfg = PitsConfig::default()
            .with_gzip(true)
            .with_gzip_level(12)
            .with_buf_capacity(4096);
        let o = cfg.stream_options();
        assert!(o.compress);
        assert_eq!(o.compression_level, 9);
        assert_eq!(o.buffer_capacity, 4096);
        assert!(!o.append);
        assert!(!o.create_new);
    }

    #[test]
    fn write_options_gzip_flag_only_enables() {
        let plain = PitsConfig::default();
        assert!(!plain.write_options(false, false, false).compress);
        assert!(plain.write_options(true, false, false).compress);

        let gz = PitsConfig::default().with_gzip(true).with_gzip_level(2);
        let o = gz.write_options(false, true, true);
        assert!(o.compress);
        assert_eq!(o.compression_level, 2);
        assert!(o.append);
        assert!(o.create_new);
    }

    #[test]
    fn display_mentions_fields() {
        let s = PitsConfig::default().with_dir(Some("/tmp/snaps")).to_string();
        assert!(s.contains("/tmp/snaps"));
        assert!(s.contains("gzip: false"));
    }
}
