//! Split-point discovery for three-way merges
//!
//! The split point of two branch tips is the common ancestor closest to both
//! of them. Merge commits give a commit several ancestor chains, so the chains
//! cannot simply be intersected position by position. Instead:
//!
//! 1. Run a breadth-first search from each tip over *all* parent edges,
//!    recording the shortest edge distance to every ancestor.
//! 2. If one tip appears in the other's map it is the split point (the merge
//!    is then a no-op or a fast-forward).
//! 3. Otherwise pick the commit present in both maps with the smallest
//!    `distance_a + distance_b`, then the smallest `max(distance_a,
//!    distance_b)`, then the smallest id.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let cache = CommitCache::new();
//! let finder = SplitPointFinder::new(|oid| cache.get_or_load_slim_commit(database, oid));
//!
//! let split = finder.find_split_point(&current, &given)?;
//! ```

use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Finds split points between commits
///
/// Generic over the commit loader so the walk works the same on the object
/// database and on in-memory graphs.
pub struct SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> SplitPointFinder<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Shortest edge distance from `start` to each of its ancestors,
    /// `start` itself included at distance 0
    pub fn distances_from(&self, start: &ObjectId) -> anyhow::Result<HashMap<ObjectId, usize>> {
        let mut distances = HashMap::from([(start.clone(), 0)]);
        let mut queue = VecDeque::from([start.clone()]);

        while let Some(oid) = queue.pop_front() {
            let distance = distances[&oid];
            let commit = (self.commit_loader)(&oid)?;

            for parent in commit.parents {
                if !distances.contains_key(&parent) {
                    distances.insert(parent.clone(), distance + 1);
                    queue.push_back(parent);
                }
            }
        }

        Ok(distances)
    }

    /// Reflexive ancestor set of `start`
    pub fn ancestors_of(&self, start: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        Ok(self.distances_from(start)?.into_keys().collect())
    }

    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.distances_from(descendant)?.contains_key(ancestor))
    }

    pub fn find_split_point(
        &self,
        current: &ObjectId,
        given: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let from_current = self.distances_from(current)?;
        if from_current.contains_key(given) {
            debug!(%current, %given, "given tip is an ancestor of current tip");
            return Ok(given.clone());
        }

        let from_given = self.distances_from(given)?;
        if from_given.contains_key(current) {
            debug!(%current, %given, "current tip is an ancestor of given tip");
            return Ok(current.clone());
        }

        let split_point = from_current
            .iter()
            .filter_map(|(oid, &to_current)| {
                from_given
                    .get(oid)
                    .map(|&to_given| (to_current + to_given, to_current.max(to_given), oid))
            })
            .min()
            .map(|(_, _, oid)| oid.clone())
            .ok_or_else(|| anyhow::anyhow!("{current} and {given} share no history"))?;

        debug!(%current, %given, split = %split_point, "found split point");

        Ok(split_point)
    }
}
