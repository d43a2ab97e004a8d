// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

//! # CPU frequency governor control
//!
//! Inspect and switch the cpufreq scaling governor of every CPU, and toggle
//! turbo/boost, through the per-core control nodes the kernel exposes under
//! `/sys/devices/system/cpu`.
//!
//! The pieces, leaf first:
//!
//! - [`sysfs`]: the [`ControlSurface`] all reads and writes go through.
//! - [`topology`]: discovery of cores with a governor control.
//! - [`governor`]: the catalog, validation against the driver's list, and
//!   best-effort application to every core.
//! - [`boost`]: platform-specific boost nodes with their polarities.
//! - [`status`]: a read-only snapshot of the current state.
//! - [`profile`]: performance and powersave presets.
//!
//! Everything is synchronous and one-shot. There is no locking against
//! other writers of the same nodes; the last write wins.

pub mod auth;
pub mod boost;
pub mod governor;
pub mod install;
pub mod profile;
pub mod status;
pub mod sysfs;
pub mod topology;

pub use boost::set_boost;
pub use boost::BoostCandidate;
pub use boost::BoostOutcome;
pub use governor::apply;
pub use governor::is_supported;
pub use governor::ApplicationResult;
pub use governor::ApplyOutcome;
pub use governor::GovernorInfo;
pub use governor::CATALOG;
pub use profile::Profile;
pub use profile::ProfileOutcome;
pub use status::report;
pub use status::StatusSnapshot;
pub use sysfs::ControlSurface;
pub use sysfs::Sysfs;
pub use topology::enumerate_cores;
pub use topology::Core;
