use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI для point-in-time хранилища
#[derive(Parser, Debug)]
#[command(name = "pits", version, about = "Point-in-time snapshot storage CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Write a snapshot from stdin (or --input) into --dir
    ///
    /// Пример:
    ///   echo hi | pits write --dir ./snaps
    ///   pits write --dir ./snaps --at "2024-06-15 08:00" --gzip --input data.bin
    Write {
        /// Snapshot directory (default: $PITS_DIR)
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Point in time; digits only matter (YYYYMMDD[HH[MM[SS]]]). Default: now
        #[arg(long)]
        at: Option<String>,
        /// Read payload from a file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
        /// gzip the snapshot (default: $PITS_GZIP)
        #[arg(long, default_value_t = false)]
        gzip: bool,
        /// Append to an existing snapshot at the same point in time
        #[arg(long, default_value_t = false)]
        append: bool,
        /// Fail if a snapshot at the same point in time already exists
        #[arg(long, default_value_t = false)]
        exclusive: bool,
    },
    /// Print the snapshot current as of --at (decompressed) to stdout or --out
    Read {
        #[arg(long)]
        dir: Option<PathBuf>,
        /// Date-only specs mean "end of that day" (23:59:59). Default: now
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show which file a read as of --at would pick
    Resolve {
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        at: Option<String>,
        /// JSON output (single object)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List conforming snapshots, oldest first
    List {
        #[arg(long)]
        dir: Option<PathBuf>,
        /// JSON output (array)
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Parse a spec and print its canonical filename
    Parse {
        /// Spec to parse. Default: now
        spec: Option<String>,
    },
}
