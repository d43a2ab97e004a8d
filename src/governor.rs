// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

//! Governor validation and application.
//!
//! Which governors a core accepts is decided by the running cpufreq driver
//! and is read from `scaling_available_governors` on the reference core.
//! [`CATALOG`] only describes well-known governors for help output and is
//! never consulted when validating a request.
//!
//! Applying is best effort: the governor is written to every core, a
//! rejected write does not stop the remaining ones, and nothing is rolled
//! back.

use std::fmt;

use anyhow::Result;

use crate::sysfs::ControlSurface;
use crate::topology::enumerate_cores;
use crate::topology::reference_core;
use crate::topology::Core;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GovernorInfo {
    pub name: &'static str,
    pub description: &'static str,
}

/// Well-known governors and what they do.
pub const CATALOG: &[GovernorInfo] = &[
    GovernorInfo {
        name: "performance",
        description: "Maximum performance, highest frequencies",
    },
    GovernorInfo {
        name: "powersave",
        description: "Power saving, lowest frequencies",
    },
    GovernorInfo {
        name: "ondemand",
        description: "Dynamic scaling based on CPU load",
    },
    GovernorInfo {
        name: "conservative",
        description: "Conservative frequency scaling",
    },
    GovernorInfo {
        name: "schedutil",
        description: "Scheduler-guided frequency scaling",
    },
    GovernorInfo {
        name: "userspace",
        description: "User-controlled frequency scaling",
    },
];

/// Split the raw `scaling_available_governors` text into names.
pub fn parse_available(raw: &str) -> Vec<&str> {
    raw.split_whitespace().collect()
}

/// Governors the driver reports for `core`, as the raw node text.
pub fn read_available(surface: &dyn ControlSurface, core: &Core) -> Result<String> {
    surface.read(&core.available_governors_node())
}

/// Is `name` one of the governors `core` accepts?
///
/// Names must match a whole token: `ondemand2` is not accepted because
/// `ondemand` is, and neither is `save` because `powersave` is.
pub fn is_supported(surface: &dyn ControlSurface, core: &Core, name: &str) -> Result<bool> {
    Ok(check_supported(surface, core, name)?.is_ok())
}

/// Like [`is_supported`], but a rejection carries the governors `core` does
/// accept.
pub fn check_supported(
    surface: &dyn ControlSurface,
    core: &Core,
    name: &str,
) -> Result<std::result::Result<(), Vec<String>>> {
    let available = read_available(surface, core)?;
    let available = parse_available(&available);
    if available.contains(&name) {
        Ok(Ok(()))
    } else {
        Ok(Err(available.into_iter().map(String::from).collect()))
    }
}

/// Tally of one governor application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationResult {
    pub requested: String,
    pub successes: usize,
    pub attempts: usize,
    /// IDs of the cores that rejected the write.
    pub failed: Vec<usize>,
}

impl ApplicationResult {
    fn new(requested: &str) -> Self {
        Self {
            requested: requested.to_string(),
            successes: 0,
            attempts: 0,
            failed: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.attempts > 0 && self.successes == self.attempts
    }
}

#[derive(Debug)]
pub enum ApplyOutcome {
    /// Every core accepted the governor.
    Applied(ApplicationResult),
    /// Some cores rejected the write. `successes < attempts`.
    PartialWriteFailure(ApplicationResult),
    /// No core exposes a governor control; nothing was written.
    NoCoresFound,
    /// The reference core's available governors could not be read; nothing
    /// was written.
    ReadFailure(anyhow::Error),
    /// The driver does not offer the requested governor; nothing was
    /// written.
    ValidationFailed {
        requested: String,
        available: Vec<String>,
    },
}

impl ApplyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ApplyOutcome::Applied(_))
    }

    /// The write tally, if any write was attempted.
    pub fn result(&self) -> Option<&ApplicationResult> {
        match self {
            ApplyOutcome::Applied(res) | ApplyOutcome::PartialWriteFailure(res) => Some(res),
            _ => None,
        }
    }
}

impl fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplyOutcome::Applied(res) => {
                write!(f, "Applied {} to {} CPU cores", res.requested, res.attempts)
            }
            ApplyOutcome::PartialWriteFailure(res) => write!(
                f,
                "Failed on some cores ({}/{})",
                res.successes, res.attempts
            ),
            ApplyOutcome::NoCoresFound => write!(f, "No cpufreq-capable CPU cores found"),
            ApplyOutcome::ReadFailure(err) => {
                write!(f, "Cannot read available governors: {err:#}")
            }
            ApplyOutcome::ValidationFailed { requested, .. } => {
                write!(f, "Governor '{requested}' not available")
            }
        }
    }
}

/// Validate `name` against the reference core, then write it to every core.
pub fn apply(surface: &dyn ControlSurface, name: &str) -> ApplyOutcome {
    let cores = match enumerate_cores(surface) {
        Ok(cores) => cores,
        Err(err) => return ApplyOutcome::ReadFailure(err),
    };
    let Some(reference) = reference_core(&cores) else {
        return ApplyOutcome::NoCoresFound;
    };

    match check_supported(surface, reference, name) {
        Ok(Ok(())) => {}
        Ok(Err(available)) => {
            return ApplyOutcome::ValidationFailed {
                requested: name.to_string(),
                available,
            }
        }
        Err(err) => return ApplyOutcome::ReadFailure(err),
    }

    log::info!("Setting governor to: {name}");
    let res = write_all(surface, &cores, name);

    if res.is_complete() {
        ApplyOutcome::Applied(res)
    } else {
        ApplyOutcome::PartialWriteFailure(res)
    }
}

fn write_all(surface: &dyn ControlSurface, cores: &[Core], name: &str) -> ApplicationResult {
    cores.iter().fold(ApplicationResult::new(name), |mut res, core| {
        res.attempts += 1;
        match surface.write(core.governor_node(), name) {
            Ok(()) => res.successes += 1,
            Err(err) => {
                log::warn!("cpu{}: {err:#}", core.id());
                res.failed.push(core.id());
            }
        }
        res
    })
}
