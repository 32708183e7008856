//! `droidpin` - Pin Android apps to the desktop as scrcpy shortcuts
//!
//! Lists applications on a connected Android device, extracts their
//! launcher icons and creates scrcpy desktop shortcuts for them.

// CLI definitions live only in the binary, not the library
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands, ShortcutArgs};
use console::style;
use droidpin::{
    adb::PackageRef,
    config::{AppConfig, ConfigManager},
    error::user_message,
    pipeline::Pipeline,
    utils,
};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::init_logging().context("Failed to initialize logging")?;
    info!("droidpin v{} starting", env!("CARGO_PKG_VERSION"));

    let config = ConfigManager::load();
    let pipeline = Pipeline::new(config.clone());

    let result = match cli.command {
        Commands::List => run_list(&pipeline),
        Commands::Shortcut(args) => run_shortcut(&pipeline, &config, &args),
        Commands::Icons => run_icons(&pipeline),
    };

    if let Err(e) = result {
        eprintln!("{}", style(user_message(&e)).red());
        std::process::exit(1);
    }

    Ok(())
}

fn run_list(pipeline: &Pipeline) -> droidpin::Result<()> {
    let packages = pipeline.list_packages()?;
    if packages.is_empty() {
        println!("No third-party packages found. Is a device connected?");
        return Ok(());
    }

    for package in &packages {
        let marker = if package.icon.is_some() {
            style("●").green()
        } else {
            style("○").dim()
        };
        println!("{marker} {}", package.label);
    }
    println!(
        "\n{} packages ({} with icons)",
        packages.len(),
        packages.iter().filter(|p| p.icon.is_some()).count()
    );
    Ok(())
}

fn run_shortcut(
    pipeline: &Pipeline,
    config: &AppConfig,
    args: &ShortcutArgs,
) -> droidpin::Result<()> {
    let package = match &args.package {
        Some(package) => package.clone(),
        None => {
            let packages = pipeline.list_packages()?;
            match select_package(&packages)? {
                Some(package) => package,
                None => {
                    println!("Cancelled.");
                    return Ok(());
                }
            }
        }
    };

    let audio = match args.audio_choice() {
        Some(audio) => audio,
        None => confirm_audio(config.preferences.audio_default)?,
    };

    let link_path = pipeline.create_shortcut(&package, audio)?;
    println!(
        "{} Shortcut created at {}",
        style("✓").green(),
        link_path.display()
    );
    Ok(())
}

fn run_icons(pipeline: &Pipeline) -> droidpin::Result<()> {
    let packages = pipeline.list_packages()?;
    if packages.is_empty() {
        println!("No third-party packages found. Is a device connected?");
        return Ok(());
    }

    let bar = ProgressBar::new(packages.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let summary = pipeline.generate_all_icons(&packages, |package| {
        bar.set_message(package.package.clone());
        bar.inc(1);
    });
    bar.finish_and_clear();

    println!(
        "Icons created: {}\nSkipped: {}\nFailed: {}",
        style(summary.created).green(),
        summary.skipped,
        if summary.failed > 0 {
            style(summary.failed).red()
        } else {
            style(summary.failed)
        }
    );
    Ok(())
}

/// Interactive package picker; `Ok(None)` means the user backed out
fn select_package(packages: &[PackageRef]) -> droidpin::Result<Option<String>> {
    if packages.is_empty() {
        println!("No third-party packages found. Is a device connected?");
        return Ok(None);
    }

    let items: Vec<String> = packages.iter().map(|p| p.label.clone()).collect();
    let selection = inquire::Select::new("Select an app to pin", items)
        .with_page_size(15)
        .with_help_message("↑↓ to move, ENTER to select, ESC to cancel")
        .prompt_skippable()
        .map_err(|e| droidpin::DroidpinError::Io(std::io::Error::other(e)))?;

    let Some(label) = selection else {
        return Ok(None);
    };
    Ok(packages
        .iter()
        .find(|p| p.label == label)
        .map(|p| p.package.clone()))
}

fn confirm_audio(default: bool) -> droidpin::Result<bool> {
    inquire::Confirm::new("Forward device audio?")
        .with_default(default)
        .prompt_skippable()
        .map(|choice| choice.unwrap_or(default))
        .map_err(|e| droidpin::DroidpinError::Io(std::io::Error::other(e)))
}
