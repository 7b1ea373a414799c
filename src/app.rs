//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads the source CSVs
//! - builds the dashboard
//! - prints reports/plots
//! - writes exports and charts

use clap::Parser;

use crate::cli::{BuildArgs, Command, ShowArgs};
use crate::domain::DashboardConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `ppd` binary.
pub fn run() -> Result<(), AppError> {
    // `PPD_*` settings may come from a `.env` file.
    dotenvy::dotenv().ok();

    // We want `ppd` and `ppd --base-year 2000` to behave like `ppd build ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Build(args) => handle_build(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_build(args: BuildArgs) -> Result<(), AppError> {
    let config = dashboard_config_from_args(&args);
    let run = pipeline::run_dashboard(&args.data_dir, &config)?;
    let dashboard = &run.dashboard;

    println!("{}", crate::report::format_dashboard_summary(dashboard));
    println!("{}", crate::report::format_combined_table(&dashboard.combined));

    if !args.no_plot {
        println!(
            "{}",
            crate::plot::render_combined_ascii(&dashboard.combined, args.width, args.height)
        );
    }

    if !args.no_export {
        crate::io::export::export_dashboard(&args.out_dir, dashboard)?;
    }
    if args.svg {
        std::fs::create_dir_all(&args.out_dir).map_err(|e| {
            AppError::new(
                2,
                format!("Failed to create output directory '{}': {e}", args.out_dir.display()),
            )
        })?;
        crate::plot::write_dashboard_svgs(&args.out_dir, dashboard, config.base_year())?;
    }

    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let dashboard = crate::io::export::read_dashboard_json(&args.dashboard)?;

    println!("{}", crate::report::format_dashboard_summary(&dashboard));
    println!("{}", crate::report::format_combined_table(&dashboard.combined));
    if !args.no_plot {
        println!(
            "{}",
            crate::plot::render_combined_ascii(&dashboard.combined, args.width, args.height)
        );
    }
    Ok(())
}

pub fn dashboard_config_from_args(args: &BuildArgs) -> DashboardConfig {
    let mut config = DashboardConfig::for_base_year(args.base_year);
    if let Some(cutoff) = args.cutoff {
        config.cutoff = cutoff;
    }

    // Keep the first mention of each series; order is significant.
    for id in &args.series {
        if !config.series.contains(id) {
            config.series.push(*id);
        }
    }
    for &(id, amount) in &args.unit_amounts {
        config.specs.set_unit_amount(id, amount);
    }
    for &(id, policy) in &args.policies {
        config.specs.set_policy(id, policy);
    }
    config
}

/// Rewrite argv so `ppd` defaults to `ppd build`.
///
/// Rules:
/// - `ppd`                       -> `ppd build`
/// - `ppd --base-year 2000 ...`  -> `ppd build --base-year 2000 ...`
/// - `ppd --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("build".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "build" | "show");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "build flags".
    if arg1.starts_with('-') {
        argv.insert(1, "build".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::domain::{ResamplePolicy, SeriesId};

    fn args(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_build() {
        assert_eq!(rewrite_args(args(&["ppd"])), args(&["ppd", "build"]));
        assert_eq!(
            rewrite_args(args(&["ppd", "--base-year", "2000"])),
            args(&["ppd", "build", "--base-year", "2000"])
        );
        assert_eq!(rewrite_args(args(&["ppd", "--help"])), args(&["ppd", "--help"]));
        assert_eq!(rewrite_args(args(&["ppd", "show"])), args(&["ppd", "show"]));
    }

    #[test]
    fn config_applies_overrides() {
        let cli = Cli::parse_from(args(&[
            "ppd",
            "build",
            "--base-year",
            "2000",
            "--series",
            "cpi",
            "--series",
            "cpi",
            "--series",
            "bigmac",
            "--policy",
            "bigmac=last",
            "--unit-amount",
            "cpi=100",
        ]));
        let Command::Build(build) = cli.command else {
            panic!("expected build");
        };
        let config = dashboard_config_from_args(&build);

        assert_eq!(config.base_year(), 2000);
        assert_eq!(config.series, vec![SeriesId::Cpi, SeriesId::Bigmac]);
        assert_eq!(config.specs.get(SeriesId::Bigmac).policy, ResamplePolicy::Last);
        assert_eq!(config.specs.get(SeriesId::Cpi).unit_amount, 100.0);
        assert!(!config.is_enabled(SeriesId::Gasoline));
    }
}
