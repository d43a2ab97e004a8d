// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

//! Access to the cpufreq control hierarchy.
//!
//! Every read, write and scan the engine performs goes through
//! [`ControlSurface`]. Node paths handed to a surface are relative to its
//! root, e.g. `cpu0/cpufreq/scaling_governor`, which lets tests point the
//! whole engine at a simulated tree.
//!
//! All I/O is synchronous and blocking. Nothing here locks the hierarchy:
//! concurrent writers (another invocation, a daemon, the kernel itself) race
//! and the last write to a node wins.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use glob::glob;
use glob::Pattern;

/// Where the kernel exposes per-CPU frequency scaling controls.
pub const DEFAULT_SYSFS_ROOT: &str = "/sys/devices/system/cpu";

/// Read/write endpoints of the control hierarchy.
pub trait ControlSurface {
    /// Read a node and return its first line with trailing whitespace and
    /// NUL padding stripped.
    fn read(&self, node: &Path) -> Result<String>;

    /// Write `value` to an existing node. Nodes are never created.
    fn write(&self, node: &Path, value: &str) -> Result<()>;

    /// Does the node exist?
    fn exists(&self, node: &Path) -> bool;

    /// Return all nodes matching a glob `pattern` relative to the root, in
    /// the order the scan produced them.
    fn scan(&self, pattern: &str) -> Result<Vec<PathBuf>>;
}

/// The live sysfs hierarchy, or a directory tree laid out like it.
#[derive(Debug, Clone)]
pub struct Sysfs {
    root: PathBuf,
}

impl Sysfs {
    pub fn new() -> Self {
        Self::new_with_root(DEFAULT_SYSFS_ROOT)
    }

    pub fn new_with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for Sysfs {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlSurface for Sysfs {
    fn read(&self, node: &Path) -> Result<String> {
        let path = self.root.join(node);
        let val = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to open or read file {:?}", path))?;
        Ok(first_line(&val).to_string())
    }

    fn write(&self, node: &Path, value: &str) -> Result<()> {
        let path = self.root.join(node);
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open {:?} for writing", path))?;
        file.write_all(value.as_bytes())
            .with_context(|| format!("Failed to write '{}' to {:?}", value, path))?;
        Ok(())
    }

    fn exists(&self, node: &Path) -> bool {
        std::fs::exists(self.root.join(node)).unwrap_or(false)
    }

    fn scan(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        let root = match self.root.to_str() {
            Some(root) => root,
            None => bail!("Control root {:?} is not valid UTF-8", self.root),
        };
        let full = format!("{}/{}", Pattern::escape(root), pattern);

        let mut nodes = Vec::new();
        for path in glob(&full)?.filter_map(Result::ok) {
            match path.strip_prefix(&self.root) {
                Ok(rel) => nodes.push(rel.to_path_buf()),
                Err(_) => log::debug!("Ignoring {:?} outside of {:?}", path, self.root),
            }
        }
        Ok(nodes)
    }
}

/// Read a node and parse its content into the specified type.
pub fn read_value<T>(surface: &dyn ControlSurface, node: &Path) -> Result<T>
where
    T: std::str::FromStr,
{
    let val = surface.read(node)?;
    match val.parse::<T>() {
        Ok(parsed) => Ok(parsed),
        Err(_) => {
            bail!("Failed to parse content '{}' from {:?}", val, node);
        }
    }
}

fn first_line(val: &str) -> &str {
    let val = val.trim_end_matches('\0');
    val.lines().next().unwrap_or_default().trim()
}
