// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

//! Performance and powersave presets: a governor plus a boost setting.

use crate::boost::set_boost;
use crate::boost::BoostOutcome;
use crate::governor::apply;
use crate::governor::ApplyOutcome;
use crate::sysfs::ControlSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Performance,
    Powersave,
}

impl Profile {
    pub fn governor(&self) -> &'static str {
        match self {
            Profile::Performance => "performance",
            Profile::Powersave => "powersave",
        }
    }

    pub fn boost(&self) -> bool {
        match self {
            Profile::Performance => true,
            Profile::Powersave => false,
        }
    }
}

#[derive(Debug)]
pub struct ProfileOutcome {
    pub governor: ApplyOutcome,
    /// `None` when the boost step was skipped after a governor failure.
    pub boost: Option<BoostOutcome>,
}

impl ProfileOutcome {
    /// Success hinges on the governor. Boost is absent on many platforms.
    pub fn is_success(&self) -> bool {
        self.governor.is_success()
    }
}

/// Apply the profile's governor, then its boost setting.
///
/// Boost is set even if the governor could not be applied, unless
/// `skip_boost_on_failure` is given.
pub fn run(
    surface: &dyn ControlSurface,
    profile: Profile,
    skip_boost_on_failure: bool,
) -> ProfileOutcome {
    let governor = apply(surface, profile.governor());

    let boost = if skip_boost_on_failure && !governor.is_success() {
        log::debug!("Skipping boost after governor failure");
        None
    } else {
        Some(set_boost(surface, profile.boost()))
    };

    ProfileOutcome { governor, boost }
}

pub fn performance_mode(surface: &dyn ControlSurface) -> ProfileOutcome {
    run(surface, Profile::Performance, false)
}

pub fn powersave_mode(surface: &dyn ControlSurface) -> ProfileOutcome {
    run(surface, Profile::Powersave, false)
}
