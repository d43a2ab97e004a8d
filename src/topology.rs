// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

//! # Core discovery
//!
//! A [`Core`] is any CPU directory that exposes a cpufreq governor control,
//! i.e. every match of `cpu[0-9]*/cpufreq/scaling_governor` under the
//! control root. CPUs without cpufreq support, or offline CPUs whose cpufreq
//! directory has been removed, are not cores as far as this crate is
//! concerned.
//!
//! The list reflects the topology at the moment of the scan. If CPUs are
//! hotplugged afterwards, enumerate again.

use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use sscanf::sscanf;

use crate::sysfs::ControlSurface;

/// Glob matching every per-core governor control node.
pub const GOVERNOR_NODE_PATTERN: &str = "cpu[0-9]*/cpufreq/scaling_governor";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Core {
    id: usize,
    governor_node: PathBuf,
    freq_node: PathBuf,
}

impl Core {
    pub fn new(id: usize) -> Core {
        let cpufreq = PathBuf::from(format!("cpu{id}")).join("cpufreq");
        Core {
            id,
            governor_node: cpufreq.join("scaling_governor"),
            freq_node: cpufreq.join("scaling_cur_freq"),
        }
    }

    /// Get the ID of this Core
    pub fn id(&self) -> usize {
        self.id
    }

    /// Node holding the active governor
    pub fn governor_node(&self) -> &Path {
        &self.governor_node
    }

    /// Node listing the governors this core's driver accepts
    pub fn available_governors_node(&self) -> PathBuf {
        self.governor_node.with_file_name("scaling_available_governors")
    }

    /// Node reporting the current frequency in kHz
    pub fn freq_node(&self) -> &Path {
        &self.freq_node
    }
}

/// Discover all controllable cores, ordered by core ID.
///
/// An empty result is not an error; it means the platform exposes no
/// cpufreq governor controls.
pub fn enumerate_cores(surface: &dyn ControlSurface) -> Result<Vec<Core>> {
    let mut cores = Vec::new();

    for node in surface.scan(GOVERNOR_NODE_PATTERN)? {
        match core_id_from_node(&node) {
            Some(id) => cores.push(Core::new(id)),
            None => log::debug!("Skipping unrecognized governor node {:?}", node),
        }
    }

    cores.sort_by_key(Core::id);
    cores.dedup_by_key(|core| core.id());
    log::debug!("Discovered {} cpufreq cores", cores.len());
    Ok(cores)
}

/// The core every platform-wide read is made against: the first one
/// enumerated. Being in the list, it is always among the cores written to.
pub fn reference_core(cores: &[Core]) -> Option<&Core> {
    cores.first()
}

fn core_id_from_node(node: &Path) -> Option<usize> {
    let cpu_dir = node.components().next()?.as_os_str().to_str()?;
    sscanf!(cpu_dir, "cpu{usize}").ok()
}
