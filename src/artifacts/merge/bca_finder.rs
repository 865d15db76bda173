//! Common ancestor finder for merge operations
//!
//! Finds the best common ancestor (BCA) between two commits: the merge
//! base from which three-way differences are computed.
//!
//! ## Algorithm Overview
//!
//! Two phases:
//!
//! 1. **Find all common ancestors.** A bidirectional traversal walks the
//!    history of both input commits with a timestamp-ordered priority
//!    queue, marking each commit as visited from the source side, the
//!    target side, or both. A commit visited from both sides is a common
//!    ancestor; its own ancestors are marked stale to prune the search.
//! 2. **Filter to best common ancestors.** A best common ancestor is any
//!    common ancestor that is not an ancestor of another common ancestor.
//!    Redundant candidates are removed by re-running the traversal between
//!    candidates; the newest survivor is returned.
//!
//! Both parents of a merge commit are traversed, so the search is correct
//! over arbitrary histories (linear, forked, repeated merges, criss-cross
//! with multiple candidate bases).

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use chrono::{DateTime, FixedOffset};
use std::collections::{BinaryHeap, HashMap, HashSet};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const VISITED_FROM_SOURCE = 0b0001;
        const VISITED_FROM_TARGET = 0b0010;
        const VISITED_FROM_BOTH = Self::VISITED_FROM_SOURCE.bits() | Self::VISITED_FROM_TARGET.bits();
        const STALE = 0b0100; // commit is an ancestor of an already-found common ancestor
        const RESULT = 0b1000; // commit is a common ancestor
    }
}

/// Finds the best common ancestor between commits
///
/// Takes a loader function so the traversal is independent of the storage
/// backend; tests drive it from an in-memory commit graph.
pub struct BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    /// Function to load commit data for any given commit ID
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> BCAFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Find the best common ancestor between two commits
    ///
    /// # Returns
    ///
    /// - `Some(oid)`: one of the best common ancestors (the newest, when
    ///   several exist)
    /// - `None`: no common ancestor (disjoint histories)
    pub fn find_best_common_ancestor(
        &self,
        source_commit_id: &ObjectId,
        target_commit_id: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let target_commit_ids = HashSet::from([target_commit_id.clone()]);
        let common_ancestors = self
            .find_common_ancestors(source_commit_id, &target_commit_ids)?
            .into_keys()
            .collect::<HashSet<_>>();

        if common_ancestors.is_empty() {
            return Ok(None);
        }

        // Remove every candidate that is an ancestor of another candidate
        let mut redundant_ancestors = HashSet::<ObjectId>::new();
        for commit_id in &common_ancestors {
            if redundant_ancestors.contains(commit_id) {
                continue;
            }

            let others = common_ancestors
                .iter()
                .filter(|other| *other != commit_id && !redundant_ancestors.contains(*other))
                .cloned()
                .collect::<HashSet<_>>();
            if others.is_empty() {
                continue;
            }

            let common_states = self.find_common_ancestors(commit_id, &others)?;

            if common_states
                .get(commit_id)
                .is_some_and(|state| state.contains(VisitState::VISITED_FROM_TARGET))
            {
                redundant_ancestors.insert(commit_id.clone());
            }

            for other in others {
                if common_states
                    .get(&other)
                    .is_some_and(|state| state.contains(VisitState::VISITED_FROM_SOURCE))
                {
                    redundant_ancestors.insert(other);
                }
            }
        }

        let mut best: Option<(DateTime<FixedOffset>, ObjectId)> = None;
        for commit_id in common_ancestors {
            if redundant_ancestors.contains(&commit_id) {
                continue;
            }

            let slim_commit = (self.commit_loader)(&commit_id)?;
            let candidate = (slim_commit.timestamp, commit_id);
            if best.as_ref().is_none_or(|current| candidate > *current) {
                best = Some(candidate);
            }
        }

        Ok(best.map(|(_, commit_id)| commit_id))
    }

    /// Find all common ancestors between a source commit and a set of
    /// target commits
    ///
    /// Returns the commits visited from both sides, excluding stale ones
    /// (those that have a descendant which is itself a common ancestor).
    fn find_common_ancestors(
        &self,
        source_commit_id: &ObjectId,
        target_commit_ids: &HashSet<ObjectId>,
    ) -> anyhow::Result<HashMap<ObjectId, VisitState>> {
        if target_commit_ids.contains(source_commit_id) {
            // The source commit is also a target, so it is the common ancestor
            return Ok(HashMap::from([(
                source_commit_id.clone(),
                VisitState::RESULT | VisitState::VISITED_FROM_BOTH,
            )]));
        }

        let mut ancestors_states = HashMap::<ObjectId, VisitState>::new();
        let mut priority_queue = BinaryHeap::new();

        let source_commit = (self.commit_loader)(source_commit_id)?;
        ancestors_states.insert(source_commit_id.clone(), VisitState::VISITED_FROM_SOURCE);
        priority_queue.push((source_commit.timestamp, source_commit_id.clone()));

        for target_commit_id in target_commit_ids {
            let target_commit = (self.commit_loader)(target_commit_id)?;
            ancestors_states.insert(target_commit_id.clone(), VisitState::VISITED_FROM_TARGET);
            priority_queue.push((target_commit.timestamp, target_commit_id.clone()));
        }

        while let Some((_, commit_id)) = priority_queue.pop() {
            let current_state = ancestors_states
                .get(&commit_id)
                .copied()
                .unwrap_or(VisitState::empty());

            if current_state.contains(VisitState::STALE) {
                continue;
            }

            let is_common_ancestor = current_state.contains(VisitState::VISITED_FROM_BOTH);
            if is_common_ancestor {
                ancestors_states
                    .entry(commit_id.clone())
                    .and_modify(|state| *state |= VisitState::RESULT);
            }

            let current_commit = (self.commit_loader)(&commit_id)?;
            for parent_id in &current_commit.parents {
                let parent_state = ancestors_states
                    .get(parent_id)
                    .copied()
                    .unwrap_or(VisitState::empty());

                // Inherit visit state from the current commit
                let mut new_state = parent_state | current_state;
                if is_common_ancestor {
                    new_state |= VisitState::STALE;
                }

                // Only requeue the parent when it gains new visit flags
                if !parent_state.contains(current_state) {
                    let parent_commit = (self.commit_loader)(parent_id)?;
                    ancestors_states.insert(parent_id.clone(), new_state);
                    priority_queue.push((parent_commit.timestamp, parent_id.clone()));
                }
            }
        }

        Ok(ancestors_states
            .into_iter()
            .filter(|(_, state)| {
                state.contains(VisitState::RESULT) && !state.contains(VisitState::STALE)
            })
            .collect())
    }
}
