use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use pcapdump::{CaptureReader, DumpOptions, dump};
use tracing_subscriber::EnvFilter;

/// Prints a text summary of every packet in a pcap or pcapng file
#[derive(Parser, Debug)]
#[clap(name = "pcapdump", version)]
struct Args {
    /// Path to the capture file
    file: PathBuf,
    /// Zero-based index of the first packet to print
    #[clap(long, default_value_t = 0)]
    from: u64,
    /// Zero-based index of the last packet to print, inclusive
    #[clap(long)]
    to: Option<u64>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();

    let reader = CaptureReader::open(&args.file)
        .with_context(|| format!("Failed to read capture file: {}", args.file.display()))?;
    let options = DumpOptions {
        from: args.from,
        to: args.to,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = dump(reader, options, &mut out);
    // Records decoded before a failure are still printed
    out.flush().context("Failed to write to stdout")?;
    result.with_context(|| format!("Failed to decode {}", args.file.display()))?;
    Ok(())
}
