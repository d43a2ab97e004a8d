// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;

pub const DEFAULT_INSTALL_PATH: &str = "/usr/local/bin/cpu-governor";

/// Copy the running executable to `dest` and make it world-executable.
pub fn install_self(dest: &Path) -> Result<()> {
    let exe = std::env::current_exe().context("Cannot determine executable path")?;
    install_from(&exe, dest)
}

pub fn install_from(src: &Path, dest: &Path) -> Result<()> {
    if src == dest {
        log::info!("{} is already installed", dest.display());
    } else {
        fs::copy(src, dest)
            .with_context(|| format!("Failed to copy {:?} to {:?}", src, dest))?;
    }
    fs::set_permissions(dest, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to chmod {:?}", dest))?;
    Ok(())
}
