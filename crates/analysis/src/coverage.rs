//! Service coverage reconciliation.
//!
//! The universe of services is whatever the dataplane inbounds are tagged
//! with. A policy covers the service named by its first `to` target. Sets are
//! ordered so the gap list, and therefore the findings built from it, are
//! stable across runs.

use crate::snapshot::{Dataplane, Policy};
use std::collections::BTreeSet;

/// Target reference meaning "every service".
pub const WILDCARD: &str = "*";

/// How a `"*"` target is treated when building the covered set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    /// `"*"` covers every known service. Named targets outside the universe
    /// are dropped, so the covered set is always a subset of it.
    Expand,
    /// `"*"` is recorded as an ordinary service name.
    Literal,
}

pub fn all_services(dataplanes: &[Dataplane]) -> BTreeSet<String> {
    dataplanes
        .iter()
        .flat_map(Dataplane::services)
        .map(str::to_string)
        .collect()
}

pub fn covered_services(
    policies: &[Policy],
    all: &BTreeSet<String>,
    wildcard: Wildcard,
) -> BTreeSet<String> {
    let mut covered = BTreeSet::new();
    for target in policies.iter().filter_map(Policy::target) {
        match wildcard {
            Wildcard::Expand if target == WILDCARD => {
                covered.extend(all.iter().cloned());
            }
            Wildcard::Expand => {
                if all.contains(target) {
                    covered.insert(target.to_string());
                }
            }
            Wildcard::Literal => {
                covered.insert(target.to_string());
            }
        }
    }
    covered
}

/// Services present in `all` but absent from `covered`, in lexicographic order.
pub fn coverage_gaps<'a>(all: &'a BTreeSet<String>, covered: &BTreeSet<String>) -> Vec<&'a str> {
    all.iter()
        .filter(|service| !covered.contains(*service))
        .map(String::as_str)
        .collect()
}
