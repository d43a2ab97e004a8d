// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

//! Turbo/boost control.
//!
//! Platforms expose boost through different nodes with opposite encodings:
//! `cpufreq/boost` (acpi-cpufreq, amd-pstate) holds 1 when boost is on,
//! `intel_pstate/no_turbo` holds 1 when it is off. Each node is described by
//! a [`BoostCandidate`] and the first one that exists is the one used.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use crate::sysfs::ControlSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoostCandidate {
    pub node: &'static str,
    pub enabled_value: &'static str,
    pub disabled_value: &'static str,
}

impl BoostCandidate {
    pub fn value_for(&self, enabled: bool) -> &'static str {
        if enabled {
            self.enabled_value
        } else {
            self.disabled_value
        }
    }

    /// Decode a value read back from the node.
    pub fn decode(&self, value: &str) -> Option<bool> {
        match value.trim() {
            v if v == self.enabled_value => Some(true),
            v if v == self.disabled_value => Some(false),
            _ => None,
        }
    }
}

/// Boost nodes in the order they are tried.
pub const BOOST_CANDIDATES: &[BoostCandidate] = &[
    BoostCandidate {
        node: "cpufreq/boost",
        enabled_value: "1",
        disabled_value: "0",
    },
    BoostCandidate {
        node: "intel_pstate/no_turbo",
        enabled_value: "0",
        disabled_value: "1",
    },
];

#[derive(Debug)]
pub enum BoostOutcome {
    /// The value was written to `node`.
    Applied { node: PathBuf, enabled: bool },
    /// `node` exists but rejected the write. No other node was tried.
    WriteFailed { node: PathBuf, error: anyhow::Error },
    /// No boost control exists on this platform.
    Unavailable,
}

impl fmt::Display for BoostOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoostOutcome::Applied { enabled, .. } => write!(
                f,
                "CPU boost {}",
                if *enabled { "enabled" } else { "disabled" }
            ),
            BoostOutcome::WriteFailed { node, error } => {
                write!(f, "Cannot change CPU boost via {}: {error:#}", node.display())
            }
            BoostOutcome::Unavailable => write!(f, "CPU boost control not available"),
        }
    }
}

/// Turn boost on or off through the default candidates.
pub fn set_boost(surface: &dyn ControlSurface, enabled: bool) -> BoostOutcome {
    set_boost_with(surface, BOOST_CANDIDATES, enabled)
}

/// Turn boost on or off through the first existing node in `candidates`.
pub fn set_boost_with(
    surface: &dyn ControlSurface,
    candidates: &[BoostCandidate],
    enabled: bool,
) -> BoostOutcome {
    let Some(candidate) = first_present(surface, candidates) else {
        log::debug!("No boost control node present");
        return BoostOutcome::Unavailable;
    };

    let node = PathBuf::from(candidate.node);
    match surface.write(&node, candidate.value_for(enabled)) {
        Ok(()) => BoostOutcome::Applied { node, enabled },
        Err(error) => BoostOutcome::WriteFailed { node, error },
    }
}

/// Current boost state, or `None` if there is no boost control or its value
/// cannot be read or decoded.
pub fn boost_state(surface: &dyn ControlSurface) -> Option<bool> {
    boost_state_with(surface, BOOST_CANDIDATES)
}

pub fn boost_state_with(
    surface: &dyn ControlSurface,
    candidates: &[BoostCandidate],
) -> Option<bool> {
    let candidate = first_present(surface, candidates)?;
    match surface.read(Path::new(candidate.node)) {
        Ok(value) => candidate.decode(&value),
        Err(err) => {
            log::debug!("{err:#}");
            None
        }
    }
}

fn first_present<'a>(
    surface: &dyn ControlSurface,
    candidates: &'a [BoostCandidate],
) -> Option<&'a BoostCandidate> {
    candidates
        .iter()
        .find(|candidate| surface.exists(Path::new(candidate.node)))
}
