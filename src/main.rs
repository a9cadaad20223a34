use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use blues_setup::cli::{run_build, BuildArgs};
use blues_setup::config;
use blues_setup::revision::{resolve_revision, source_for};
use blues_setup::ui;

#[derive(clap::Parser)]
#[command(
    name = "blues-setup",
    version,
    about = "Stamp the version file and assemble the blues package for the packaging tool"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short,
        long,
        default_value = ".",
        help = "Project directory containing the package sources"
    )]
    project_dir: PathBuf,

    #[arg(long, help = "Write the version file and manifest without running the packaging tool")]
    dry_run: bool,

    #[arg(long, help = "Only write the version file")]
    stamp_only: bool,

    #[arg(long, help = "Print the resolved version fields and exit without writing anything")]
    print_version: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity (-v, -vv)")]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = match config::load_config(args.config.as_deref(), &args.project_dir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if args.print_version {
        let spec = config.version.spec();
        let source = source_for(&config.revision);
        let info = spec.resolve(resolve_revision(&args.project_dir, source.as_ref()));
        ui::display_version_info(&info);
        return Ok(());
    }

    let build_args = BuildArgs {
        project_dir: args.project_dir,
        dry_run: args.dry_run,
        stamp_only: args.stamp_only,
    };

    ui::display_status(&format!(
        "Building {} from {}",
        config.metadata.name,
        build_args.project_dir.display()
    ));

    match run_build(&build_args, &config) {
        Ok(report) => {
            ui::display_build_summary(&report);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&format!("Build failed: {}", e));
            std::process::exit(1);
        }
    }
}
