// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

mod cli;
mod logger;

use std::path::Path;
use std::process::exit;

use anyhow::Result;
use clap::CommandFactory;
use clap::FromArgMatches;
use cli::{Cli, Commands};
use colored::Colorize;
use cpu_governor::auth::is_root;
use cpu_governor::governor::parse_available;
use cpu_governor::governor::read_available;
use cpu_governor::install::install_self;
use cpu_governor::profile;
use cpu_governor::topology::enumerate_cores;
use cpu_governor::topology::reference_core;
use cpu_governor::*;

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;

fn render_catalog(catalog: &[GovernorInfo]) -> String {
    let governors: String = catalog
        .iter()
        .map(|info| format!("  {:<12} - {}\n", info.name, info.description))
        .collect();
    format!(
        "{}\n{governors}\n{}\n  sudo cpu-governor performance  # Max performance\n  sudo cpu-governor powersave    # Power saving\n  cpu-governor status            # Check status\n",
        "Governors:".yellow(),
        "Examples:".yellow()
    )
}

fn success(msg: impl std::fmt::Display) {
    println!("{} {}", "[SUCCESS]".green(), msg);
}

fn require_root(privileged: bool, what: &str) -> bool {
    if privileged {
        return true;
    }
    log::error!("{what} requires root privileges (use sudo)");
    false
}

fn cmd_status(surface: &dyn ControlSurface) -> i32 {
    let snapshot = match report(surface) {
        Ok(snapshot) => snapshot,
        Err(err) => {
            log::error!("{err:#}");
            return EXIT_FAILURE;
        }
    };

    println!("{}", "=== CPU Governor Status ===".blue());
    println!("Current Governor: {}", snapshot.governor.green());
    if let Some(available) = &snapshot.available {
        println!("Available: {available}");
    }
    println!("CPU Cores: {}", snapshot.cpu_count);

    let mut freqs: String = snapshot
        .freqs
        .iter()
        .map(|s| format!("CPU{}:{} ", s.core, s.mhz))
        .collect();
    if snapshot.truncated() {
        freqs.push_str("...");
    }
    println!("Frequencies (MHz): {}", freqs.trim_end());

    if let Some(boost) = snapshot.boost {
        println!("Boost: {}", if boost { "enabled" } else { "disabled" });
    }
    EXIT_OK
}

fn cmd_list(surface: &dyn ControlSurface) -> i32 {
    let available = enumerate_cores(surface)
        .ok()
        .and_then(|cores| reference_core(&cores).map(|core| read_available(surface, core)))
        .and_then(Result::ok);
    let offered = available.as_deref().map(parse_available).unwrap_or_default();

    for info in CATALOG {
        let mark = if offered.contains(&info.name) {
            "*".green()
        } else {
            " ".normal()
        };
        println!("{mark} {:<12} - {}", info.name, info.description);
    }
    for name in offered.iter().filter(|n| !CATALOG.iter().any(|i| i.name == **n)) {
        println!("{} {name}", "*".green());
    }
    if available.is_none() {
        log::warn!("Cannot read available governors");
    }
    EXIT_OK
}

fn render_apply(outcome: &ApplyOutcome) -> i32 {
    match outcome {
        ApplyOutcome::Applied(res) => {
            success(format!("Applied to {} CPU cores", res.attempts));
            EXIT_OK
        }
        ApplyOutcome::PartialWriteFailure(res) => {
            log::error!("{outcome}");
            let failed: Vec<String> = res.failed.iter().map(|id| format!("cpu{id}")).collect();
            log::error!("Rejected by: {}", failed.join(" "));
            EXIT_FAILURE
        }
        ApplyOutcome::ValidationFailed { available, .. } => {
            log::error!("{outcome}");
            if !available.is_empty() {
                log::info!("Available: {}", available.join(" "));
            }
            EXIT_FAILURE
        }
        ApplyOutcome::NoCoresFound | ApplyOutcome::ReadFailure(_) => {
            log::error!("{outcome}");
            EXIT_FAILURE
        }
    }
}

fn render_boost(outcome: &BoostOutcome) {
    match outcome {
        BoostOutcome::Applied { .. } => log::info!("{outcome}"),
        BoostOutcome::WriteFailed { .. } => log::warn!("{outcome}"),
        BoostOutcome::Unavailable => log::debug!("{outcome}"),
    }
}

fn cmd_governor(surface: &dyn ControlSurface, name: &str, privileged: bool) -> i32 {
    if !require_root(privileged, "Setting governors") {
        println!("Use 'cpu-governor status' to check current settings");
        return EXIT_FAILURE;
    }

    let code = render_apply(&apply(surface, name));
    if code != EXIT_OK {
        println!("Use 'cpu-governor help' for usage information");
    }
    code
}

fn cmd_profile(
    surface: &dyn ControlSurface,
    preset: Profile,
    skip_boost_on_failure: bool,
    privileged: bool,
) -> i32 {
    if !require_root(privileged, "Setting governors") {
        println!("Use 'cpu-governor status' to check current settings");
        return EXIT_FAILURE;
    }

    let outcome = profile::run(surface, preset, skip_boost_on_failure);
    let code = render_apply(&outcome.governor);
    if let Some(boost) = &outcome.boost {
        render_boost(boost);
    }
    code
}

fn cmd_install(path: &Path, privileged: bool) -> i32 {
    if !require_root(privileged, "Installation") {
        return EXIT_FAILURE;
    }

    match install_self(path) {
        Ok(()) => {
            success(format!("Installed to {}", path.display()));
            println!("You can now use: cpu-governor performance");
            EXIT_OK
        }
        Err(err) => {
            log::error!("Installation failed: {err:#}");
            EXIT_FAILURE
        }
    }
}

fn main() -> Result<()> {
    let mut cmd = Cli::command().after_help(render_catalog(CATALOG));
    let matches = cmd.clone().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    logger::init_logger(cli.verbose)?;

    let surface = Sysfs::new_with_root(cli.sysfs_root.clone());
    let privileged = is_root();
    log::debug!("Using control root {}", surface.root().display());

    let code = match cli.command {
        None => {
            cmd.print_help()?;
            EXIT_FAILURE
        }
        Some(Commands::Status) => cmd_status(&surface),
        Some(Commands::List) => cmd_list(&surface),
        Some(Commands::Performance) => cmd_profile(
            &surface,
            Profile::Performance,
            cli.skip_boost_on_failure,
            privileged,
        ),
        Some(Commands::Powersave) => cmd_profile(
            &surface,
            Profile::Powersave,
            cli.skip_boost_on_failure,
            privileged,
        ),
        Some(Commands::Install { path }) => cmd_install(&path, privileged),
        Some(Commands::Governor(args)) => match args.as_slice() {
            [name] => cmd_governor(&surface, name, privileged),
            _ => {
                log::error!("Expected a single governor name, got: {}", args.join(" "));
                EXIT_FAILURE
            }
        },
    };

    exit(code);
}
