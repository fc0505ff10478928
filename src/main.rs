use anyhow::{Context, Result};
use linefile::cli::{Invocation, USAGE};
use linefile::logging;
use linefile::LineFileHandler;
use std::io::Write;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if Invocation::help_requested(&args) {
        println!("{}", USAGE);
        return Ok(());
    }

    let invocation = match Invocation::parse(&args) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("linefile: {}", e);
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    };

    logging::init(invocation.logger()).context("failed to install logger")?;

    let handler = LineFileHandler::new(&invocation.path);
    match invocation.command.execute(&handler) {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .and_then(|_| stdout.flush())
                .context("failed to write output")?;
            Ok(())
        }
        Err(e) => {
            log::debug!("{}", e.detail());
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
