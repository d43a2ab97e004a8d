// SPDX-License-Identifier: GPL-2.0
//
// This software may be used and distributed according to the terms of the
// GNU General Public License version 2.

mod common;

use common::FakeCpuTree;
use common::WriteSpy;
use cpu_governor::boost::boost_state;
use cpu_governor::profile;
use cpu_governor::*;

const BOOST: &str = "cpufreq/boost";
const NO_TURBO: &str = "intel_pstate/no_turbo";

#[test]
fn test_boost_node_polarity() {
    let tree = FakeCpuTree::new();
    tree.node(BOOST, "0\n");
    let sysfs = tree.sysfs();

    assert!(matches!(
        set_boost(&sysfs, true),
        BoostOutcome::Applied { enabled: true, .. }
    ));
    assert_eq!(tree.contents(BOOST), "1");
    assert_eq!(boost_state(&sysfs), Some(true));

    set_boost(&sysfs, false);
    assert_eq!(tree.contents(BOOST), "0");
    assert_eq!(boost_state(&sysfs), Some(false));
}

#[test]
fn test_no_turbo_node_polarity() {
    let tree = FakeCpuTree::new();
    tree.node(NO_TURBO, "1\n");
    let sysfs = tree.sysfs();

    set_boost(&sysfs, true);
    assert_eq!(tree.contents(NO_TURBO), "0");
    assert_eq!(boost_state(&sysfs), Some(true));

    set_boost(&sysfs, false);
    assert_eq!(tree.contents(NO_TURBO), "1");
    assert_eq!(boost_state(&sysfs), Some(false));
}

#[test]
fn test_first_candidate_wins() {
    let tree = FakeCpuTree::new();
    tree.node(BOOST, "0\n");
    tree.node(NO_TURBO, "1\n");
    let spy = WriteSpy::new(tree.sysfs());

    set_boost(&spy, true);
    assert_eq!(spy.writes_to(BOOST), 1);
    assert_eq!(spy.writes_to(NO_TURBO), 0);
    assert_eq!(tree.contents(NO_TURBO), "1\n");
}

#[test]
fn test_failed_first_candidate_stops() {
    let tree = FakeCpuTree::new();
    tree.make_unwritable(BOOST);
    tree.node(NO_TURBO, "1\n");
    let spy = WriteSpy::new(tree.sysfs());

    let outcome = set_boost(&spy, true);
    match &outcome {
        BoostOutcome::WriteFailed { node, .. } => assert!(node.ends_with("boost")),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert_eq!(spy.writes_to(BOOST), 1);
    assert_eq!(spy.writes_to(NO_TURBO), 0);
    assert_eq!(tree.contents(NO_TURBO), "1\n");
}

#[test]
fn test_no_boost_control() {
    let tree = FakeCpuTree::with_cores(2, "powersave");
    let spy = WriteSpy::new(tree.sysfs());

    assert!(matches!(set_boost(&spy, true), BoostOutcome::Unavailable));
    assert!(spy.writes().is_empty());
    assert_eq!(boost_state(&spy), None);
}

#[test]
fn test_performance_mode() {
    let tree = FakeCpuTree::with_cores(4, "powersave");
    tree.node(NO_TURBO, "1\n");

    let outcome = profile::performance_mode(&tree.sysfs());
    assert!(outcome.is_success());
    assert!(matches!(
        outcome.boost,
        Some(BoostOutcome::Applied { enabled: true, .. })
    ));
    assert_eq!(tree.contents("cpu3/cpufreq/scaling_governor"), "performance");
    assert_eq!(tree.contents(NO_TURBO), "0");
}

#[test]
fn test_powersave_mode() {
    let tree = FakeCpuTree::with_cores(4, "performance");
    tree.node(BOOST, "1\n");

    let outcome = profile::powersave_mode(&tree.sysfs());
    assert!(outcome.is_success());
    assert_eq!(tree.contents("cpu0/cpufreq/scaling_governor"), "powersave");
    assert_eq!(tree.contents(BOOST), "0");
}

#[test]
fn test_profile_boosts_after_governor_failure() {
    let tree = FakeCpuTree::new();
    tree.add_core(0, "schedutil", "schedutil");
    tree.node(BOOST, "0\n");

    let outcome = profile::performance_mode(&tree.sysfs());
    assert!(!outcome.is_success());
    assert!(matches!(
        outcome.governor,
        ApplyOutcome::ValidationFailed { .. }
    ));
    assert!(outcome.boost.is_some());
    assert_eq!(tree.contents(BOOST), "1");
}

#[test]
fn test_profile_skip_boost_on_failure() {
    let tree = FakeCpuTree::new();
    tree.add_core(0, "schedutil", "schedutil");
    tree.node(BOOST, "0\n");
    let spy = WriteSpy::new(tree.sysfs());

    let outcome = profile::run(&spy, Profile::Performance, true);
    assert!(outcome.boost.is_none());
    assert!(spy.writes().is_empty());
    assert_eq!(tree.contents(BOOST), "0\n");
}
