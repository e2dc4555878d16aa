use anyhow::Result;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_write;
mod cmd_read;
mod cmd_resolve;
mod cmd_list;
mod cmd_parse;

use clap::Parser;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug pits read --dir ./snaps
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    let cfg = pits::PitsConfig::from_env();
    match cli.cmd {
        cli::Cmd::Write { dir, at, input, gzip, append, exclusive } =>
            cmd_write::exec(&cfg, dir, at, input, gzip, append, exclusive),

        cli::Cmd::Read { dir, at, out } =>
            cmd_read::exec(&cfg, dir, at, out),

        cli::Cmd::Resolve { dir, at, json } =>
            cmd_resolve::exec(&cfg, dir, at, json),

        cli::Cmd::List { dir, json } =>
            cmd_list::exec(&cfg, dir, json),

        cli::Cmd::Parse { spec } =>
            cmd_parse::exec(spec),
    }
}
