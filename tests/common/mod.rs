// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Result;
use cpu_governor::ControlSurface;
use cpu_governor::Sysfs;
use tempfile::TempDir;

pub const AVAILABLE: &str = "performance powersave schedutil";

/// A directory tree laid out like `/sys/devices/system/cpu`.
pub struct FakeCpuTree {
    tmp: TempDir,
}

impl FakeCpuTree {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().unwrap(),
        }
    }

    /// `nr_cpus` cores running `governor`, each offering [`AVAILABLE`] and
    /// sitting at `(id + 1) * 1 GHz`.
    pub fn with_cores(nr_cpus: usize, governor: &str) -> Self {
        let tree = Self::new();
        for id in 0..nr_cpus {
            tree.add_core(id, governor, AVAILABLE);
            tree.node(
                &format!("cpu{id}/cpufreq/scaling_cur_freq"),
                &format!("{}\n", (id + 1) * 1_000_000),
            );
        }
        tree
    }

    pub fn add_core(&self, id: usize, governor: &str, available: &str) {
        self.node(
            &format!("cpu{id}/cpufreq/scaling_governor"),
            &format!("{governor}\n"),
        );
        self.node(
            &format!("cpu{id}/cpufreq/scaling_available_governors"),
            &format!("{available} \n"),
        );
    }

    pub fn node(&self, rel: &str, content: &str) {
        let path = self.tmp.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// Replace a node with a directory so that writes to it fail while it
    /// still exists.
    pub fn make_unwritable(&self, rel: &str) {
        let path = self.tmp.path().join(rel);
        if path.is_file() {
            std::fs::remove_file(&path).unwrap();
        }
        std::fs::create_dir_all(path).unwrap();
    }

    pub fn remove(&self, rel: &str) {
        std::fs::remove_file(self.tmp.path().join(rel)).unwrap();
    }

    pub fn contents(&self, rel: &str) -> String {
        std::fs::read_to_string(self.tmp.path().join(rel)).unwrap()
    }

    pub fn sysfs(&self) -> Sysfs {
        Sysfs::new_with_root(self.tmp.path())
    }
}

/// Records every write made through the wrapped surface.
pub struct WriteSpy<S> {
    inner: S,
    writes: RefCell<Vec<(PathBuf, String)>>,
}

impl<S: ControlSurface> WriteSpy<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            writes: RefCell::new(Vec::new()),
        }
    }

    pub fn writes(&self) -> Vec<(PathBuf, String)> {
        self.writes.borrow().clone()
    }

    pub fn writes_to(&self, node: &str) -> usize {
        self.writes
            .borrow()
            .iter()
            .filter(|(path, _)| path == Path::new(node))
            .count()
    }
}

impl<S: ControlSurface> ControlSurface for WriteSpy<S> {
    fn read(&self, node: &Path) -> Result<String> {
        self.inner.read(node)
    }

    fn write(&self, node: &Path, value: &str) -> Result<()> {
        self.writes
            .borrow_mut()
            .push((node.to_path_buf(), value.to_string()));
        self.inner.write(node, value)
    }

    fn exists(&self, node: &Path) -> bool {
        self.inner.exists(node)
    }

    fn scan(&self, pattern: &str) -> Result<Vec<PathBuf>> {
        self.inner.scan(pattern)
    }
}
