// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cpu_governor::install::DEFAULT_INSTALL_PATH;
use cpu_governor::sysfs::DEFAULT_SYSFS_ROOT;

#[derive(Parser, Debug)]
#[command(
    name = "cpu-governor",
    author,
    version,
    about = "Minimal CPU frequency control",
    long_about = None
)]
pub struct Cli {
    #[arg(
        long,
        env = "CPU_GOVERNOR_SYSFS_ROOT",
        default_value = DEFAULT_SYSFS_ROOT,
        help = "Root of the per-CPU control hierarchy"
    )]
    pub sysfs_root: PathBuf,

    #[arg(
        long,
        env = "CPU_GOVERNOR_SKIP_BOOST_ON_FAILURE",
        help = "Leave boost untouched when a preset fails to apply its governor"
    )]
    pub skip_boost_on_failure: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Show current governor, frequencies and boost state")]
    Status,
    #[command(about = "Performance governor with boost enabled (requires root)")]
    Performance,
    #[command(about = "Powersave governor with boost disabled (requires root)")]
    Powersave,
    #[command(about = "List known governors and which ones this system offers")]
    List,
    #[command(about = "Install system-wide (requires root)")]
    Install {
        #[arg(long, default_value = DEFAULT_INSTALL_PATH, help = "Install destination")]
        path: PathBuf,
    },
    // Anything else is a governor name.
    #[command(external_subcommand)]
    Governor(Vec<String>),
}
