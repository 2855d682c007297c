//! Entry point for the era5-nc2bin application.
//! Handles logging setup and CLI parsing, then dispatches conversion, verification or synthesis.

use clap::Parser;
use era5_nc2bin::cli::{Args, Command};
use era5_nc2bin::convert::Converter;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let result = match args.selected_command() {
        Command::Convert(run) => {
            info!(
                start_year = run.start_year,
                end_year = run.end_year,
                input = %run.input_dir.display(),
                output = %run.output_dir.display(),
                "starting conversion"
            );
            Converter::new(run.to_config())
                .convert(run.start_year, run.end_year)
                .map(|summary| {
                    println!(
                        "✅ Converted {} files ({} bytes) into {}",
                        summary.files,
                        summary.bytes,
                        run.output_dir.display()
                    );
                })
        }
        Command::Verify(run) => Converter::new(run.to_config())
            .verify(run.start_year, run.end_year)
            .map(|summary| {
                println!("✅ Verified {} files ({} bytes)", summary.files, summary.bytes);
            }),
        Command::Synthesize(synth) => synth
            .to_generator()
            .generate(synth.start_year, synth.end_year)
            .map(|written| {
                println!(
                    "✅ Wrote {} synthetic files into {}",
                    written.len(),
                    synth.output_dir.display()
                );
            }),
    };

    result?;
    Ok(())
}
