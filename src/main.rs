mod args;
mod tab;

use clap::Parser;
use log::{info, LevelFilter};
use snafu::ErrorCompat;

use crate::args::Args;

fn main() {
    let args = Args::parse();

    if args.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }
    info!("args: {:?}", args);

    let res = tab::run_computation(&args);
    if let Err(e) = res {
        eprintln!("An error occurred: {}", e);
        if let Some(bt) = ErrorCompat::backtrace(e.as_ref()) {
            eprintln!("trace: {}", bt);
        }
        std::process::exit(1);
    }
}
