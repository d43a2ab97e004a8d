// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

use nix::unistd::geteuid;

/// Check if current process is running as root
pub fn is_root() -> bool {
    geteuid().is_root()
}
