//! Command-line decoder for logic-analyzer captures of an SD bus.

use std::{fs::File, path::PathBuf, process::ExitCode};

use clap::Parser;

use interposer::{
    avec::{self, FromFrames},
    sans::frame::Frame,
};

#[derive(Parser, Debug)]
#[command(
    name = "interposer",
    about = "Reads commands from a serial data stream and decodes."
)]
struct Args {
    /// Input CSV filename.
    input_file: PathBuf,

    /// Sample rate in nanoseconds.
    #[arg(short, long, default_value_t = 10.0)]
    sample_rate: f64,
}

fn main() -> ExitCode {
    let args = Args::parse();

    println!("Reading from : {}", args.input_file.display());

    let file = match File::open(&args.input_file) {
        Ok(file) => file,
        Err(error) => {
            eprintln!("{}: {error}", args.input_file.display());
            return ExitCode::FAILURE;
        }
    };

    let mut printer = Printer;

    if let Err(error) = avec::decode_reader(file, args.sample_rate * 1e-9, &mut printer) {
        eprintln!("{error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Receiver printing every event as it decodes.
struct Printer;

impl FromFrames for Printer {
    fn add_frame(&mut self, frame: Frame) {
        println!("{frame}");
    }

    fn add_clock_rate(&mut self, frequency_hz: f64) {
        println!("Transaction Clock Rate: {frequency_hz} Hz");
    }

    fn truncated_frame(&mut self, bits_acquired: usize, expected_bits: usize) {
        eprintln!("Capture ended {bits_acquired} bits into a {expected_bits}-bit frame.");
    }
}
