//! Patch command implementation.

use anyhow::{Result, bail};
use lbafix::{Config, ConfigBuilder, JobReport, PatchJobDriver};
use owo_colors::OwoColorize;
use serde_json::{Map, Value, json};
use tracing::warn;

use crate::cli::PatchArgs;
use crate::profile::load_profile;

/// Merge the profile with the command-line flags.
///
/// Profile modes are combined with the flags unless `--reset-modes` is
/// given. Write mode only ever comes from `-w`.
pub fn build_config(base: &Config, args: &PatchArgs) -> Result<Config> {
    let keep = !args.reset_modes;
    let mut builder = ConfigBuilder::from_config(base)
        .mode0((keep && base.mode0) || args.hack0)
        .mode1((keep && base.mode1) || args.hack1)
        .mode2((keep && base.mode2) || args.hack2)
        .mode3((keep && base.mode3) || args.hack3)
        .unprotect((keep && base.unprotect) || args.unprotect)
        .write_enabled(args.write);
    if let Some(old) = args.old_pos {
        builder = builder.old_value(old);
    }
    if let Some(new) = args.new_pos {
        builder = builder.new_value(new);
    }
    Ok(builder.build()?)
}

/// Run the patch command
pub fn run(args: &PatchArgs) -> Result<()> {
    let base = load_profile(args.profile.as_deref())?;
    let config = build_config(&base, args)?;

    if !config.unprotect && !config.any_relocation() {
        warn!("No patch selected (use -0/-1/-2/-3 or -p), only scanning files");
    }

    let report = PatchJobDriver::new(&config).run(&args.files);
    if report.is_empty() {
        bail!("No valid target files found");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report_json(&report))?);
    } else {
        print_report(&report, &config);
    }

    let failures = report.failures().count();
    if failures > 0 {
        bail!("{} of {} file(s) failed", failures, report.len());
    }
    Ok(())
}

fn print_report(report: &JobReport, config: &Config) {
    for (path, result) in &report.files {
        println!("{} {}", "Processing:".bold(), path.display());
        match result {
            Ok(file) => {
                for line in file.outcome.log() {
                    println!("  {}", line);
                }
                if file.written {
                    println!("  {} {}", "Successfully patched:".green(), path.display());
                } else if file.outcome.hits.is_empty() {
                    println!("  {}", "No patterns found".dimmed());
                }
            }
            Err(e) => println!("  {} {}", "Error:".red(), e),
        }
        println!();
    }

    let written = report.written().count();
    println!(
        "Processing complete: {} file(s), {} patched, {} failed",
        report.len(),
        written,
        report.failures().count()
    );
    if !config.write_enabled {
        println!("{}", "Dry run, nothing was written (use -w to write)".yellow());
    }
}

/// JSON view of a report, keyed by path
pub fn report_json(report: &JobReport) -> Value {
    let files: Map<String, Value> = report
        .files
        .iter()
        .map(|(path, result)| {
            let value = match result {
                Ok(file) => json!(file),
                Err(e) => json!({
                    "error": e.to_string(),
                    "not_found": e.is_not_found(),
                }),
            };
            (path.display().to_string(), value)
        })
        .collect();
    Value::Object(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::fs;

    fn patch_args(args: &[&str]) -> PatchArgs {
        let mut argv = vec!["lbafix", "patch"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Patch(args) => args,
            _ => panic!("expected patch"),
        }
    }

    #[test]
    fn test_flags_override_profile() {
        let base = Config {
            new_value: 5167,
            mode1: true,
            write_enabled: true,
            ..Config::default()
        };
        let config = build_config(&base, &patch_args(&["-o", "0x8000", "-2", "a.bin"])).unwrap();

        assert_eq!(config.old_value, 0x8000);
        assert_eq!(config.new_value, 5167);
        assert!(config.mode1);
        assert!(config.mode2);
        assert!(!config.mode0);
        // Write mode never comes from the profile
        assert!(!config.write_enabled);
    }

    #[test]
    fn test_reset_modes_drops_profile_modes() {
        let base = Config {
            mode1: true,
            unprotect: true,
            ..Config::default()
        };
        let config = build_config(&base, &patch_args(&["--reset-modes", "-2", "a.bin"])).unwrap();

        assert!(!config.mode1);
        assert!(config.mode2);
        assert!(!config.unprotect);
    }

    #[test]
    fn test_report_json() {
        let dir = tempfile::tempdir().unwrap();
        let present = dir.path().join("1ST_READ.BIN");
        let missing = dir.path().join("MISSING.BIN");
        let mut data = vec![0u8; 16];
        data[4..8].copy_from_slice(&lbafix::encode_u32(0xAFC8));
        fs::write(&present, &data).unwrap();

        let config = Config {
            mode0: true,
            ..Config::default()
        };
        let report = PatchJobDriver::new(&config).run(&[
            present.display().to_string(),
            missing.display().to_string(),
        ]);
        let value = report_json(&report);

        let entry = &value[present.display().to_string()];
        assert_eq!(entry["written"], json!(false));
        assert_eq!(entry["changed"], json!(false));
        assert!(entry.get("outcome").is_none());
        assert_eq!(entry["hits"][0]["kind"], json!("HACK0"));
        assert_eq!(entry["hits"][0]["offset"], json!(4));
        assert_eq!(entry["hits"][0]["applied"], json!(false));

        let entry = &value[missing.display().to_string()];
        assert_eq!(entry["not_found"], json!(true));
    }
}
