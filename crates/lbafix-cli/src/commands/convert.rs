//! Convert command implementation.

use anyhow::{Context, Result};
use lbafix::{ConversionRequest, FlagStatus, run_conversion};
use owo_colors::OwoColorize;

use crate::cli::ConvertArgs;

pub fn request_from_args(args: &ConvertArgs) -> ConversionRequest {
    let mut request =
        ConversionRequest::new(&args.binary, &args.boot_sector).replace(args.replace);
    if let Some(ref output) = args.output {
        request = request.output(output);
    }
    request
}

/// Run the convert command
pub fn run(args: &ConvertArgs) -> Result<()> {
    let request = request_from_args(args);
    let report = run_conversion(&request)
        .with_context(|| format!("Failed to convert {}", args.binary.display()))?;

    match report.flag {
        FlagStatus::Cleared { previous } => println!(
            "Modified {} (0x{:02X} -> 0x30 at offset 0x3E)",
            args.boot_sector.display(),
            previous
        ),
        FlagStatus::AlreadyCleared => println!(
            "{}",
            format!("Flag already removed from {}", args.boot_sector.display()).dimmed()
        ),
    }

    match report.written_to {
        Some(ref path) if report.replaced => println!(
            "{} Replaced original {} with converted version",
            "OK".green(),
            path.display()
        ),
        Some(ref path) => println!(
            "{} Converted {} to {}",
            "OK".green(),
            args.binary.display(),
            path.display()
        ),
        None => println!(
            "{}",
            format!(
                "{} seems to be already converted, nothing to do",
                args.binary.display()
            )
            .yellow()
        ),
    }

    Ok(())
}
