//! Scene compiler binary

use scenegen::cli::Cli;
use scenegen::ConvertError;
use std::process;

fn main() {
    match Cli::new().run() {
        Ok(()) => {}
        Err(ConvertError::Io(e)) => {
            eprintln!("IO Error: {}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Conversion failed: {}", e);
            process::exit(1);
        }
    }
}
