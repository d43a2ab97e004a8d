// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

use anyhow::Context;
use anyhow::Result;

use crate::boost::boost_state;
use crate::governor::read_available;
use crate::sysfs::read_value;
use crate::sysfs::ControlSurface;
use crate::topology::enumerate_cores;
use crate::topology::reference_core;

/// How many cores get their frequency sampled for a status report.
pub const FREQ_SAMPLE_CORES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreqSample {
    pub core: usize,
    pub mhz: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub governor: String,
    /// Raw `scaling_available_governors` text, if readable.
    pub available: Option<String>,
    pub cpu_count: usize,
    pub freqs: Vec<FreqSample>,
    /// `None` when the platform has no readable boost control.
    pub boost: Option<bool>,
}

impl StatusSnapshot {
    /// Were some cores left out of frequency sampling? Cores that were
    /// sampled but had no readable frequency do not count.
    pub fn truncated(&self) -> bool {
        self.cpu_count > FREQ_SAMPLE_CORES
    }
}

/// Read the current governor, available governors, core count, a sample of
/// current frequencies and the boost state. Never writes.
pub fn report(surface: &dyn ControlSurface) -> Result<StatusSnapshot> {
    let cores = enumerate_cores(surface)?;
    let reference = reference_core(&cores).context("No cpufreq-capable CPU cores found")?;

    let governor = surface
        .read(reference.governor_node())
        .context("Cannot read current governor")?;

    let available = match read_available(surface, reference) {
        Ok(available) => Some(available),
        Err(err) => {
            log::debug!("{err:#}");
            None
        }
    };

    let freqs = cores
        .iter()
        .take(FREQ_SAMPLE_CORES)
        .filter_map(|core| match read_value::<u64>(surface, core.freq_node()) {
            Ok(khz) => Some(FreqSample {
                core: core.id(),
                mhz: khz / 1000,
            }),
            Err(err) => {
                log::debug!("{err:#}");
                None
            }
        })
        .collect();

    Ok(StatusSnapshot {
        governor,
        available,
        cpu_count: cores.len(),
        freqs,
        boost: boost_state(surface),
    })
}
