#![forbid(unsafe_code)]

//! sparkstack demo binary entry point.

use sparkstack_demo::{app, cli, logging};

fn main() {
    let opts = cli::Opts::parse();

    if let Some(path) = opts.log_file.as_deref()
        && let Err(e) = logging::init_file_logging(path)
    {
        eprintln!("Failed to open log file {}: {e}", path.display());
        std::process::exit(1);
    }

    if let Err(e) = app::run(&opts) {
        eprintln!("Runtime error: {e}");
        std::process::exit(1);
    }
}
