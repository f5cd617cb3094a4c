//! Chainprep binary: set up logging, load the run configuration, go.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chainprep::options::RunOptions;

/// Append-only log file written next to the working directory.
const LOG_FILE: &str = "chainprep.log";

/// Log sink writing every record to both stderr and the log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

fn init_logging() {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("debug"),
    );
    match File::options().create(true).append(true).open(LOG_FILE) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
        }
        Err(e) => {
            eprintln!("cannot open {LOG_FILE}: {e}; logging to stderr only");
        }
    }
    builder.init();
}

fn main() {
    init_logging();

    let options = match std::env::args().nth(1) {
        Some(path) => match RunOptions::load(Path::new(&path)) {
            Ok(options) => options,
            Err(e) => {
                log::error!("failed to load run config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => RunOptions::default(),
    };

    if let Err(e) = chainprep::run(&options) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
