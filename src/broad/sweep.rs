//! [Sweep and prune](https://en.wikipedia.org/wiki/Sweep_and_prune) broadphase.

use super::{Axis, Broadphase};
use crate::{
    hitbox::{CollisionType, Hitbox, Potential},
    prim::Aabb,
};
use fnv::FnvBuildHasher;
use indexmap::IndexSet;
use log::trace;
use std::cmp::Ordering;

type ActiveSet = IndexSet<usize, FnvBuildHasher>;

#[derive(Debug, Clone, Copy)]
struct Entry {
    /// Position in the queried hitbox slice.
    index: usize,
    aabb: Aabb,
    kind: CollisionType,
}

#[inline]
fn entry_order(a: &Entry, b: &Entry, axis: Axis) -> Ordering {
    axis.min(&a.aabb).total_cmp(&axis.min(&b.aabb)).then(a.index.cmp(&b.index))
}

// code based off of https://en.wikipedia.org/wiki/Insertion_sort#Algorithm
fn insertion_sort(a: &mut [Entry], axis: Axis) {
    for i in 1..a.len() {
        let val = a[i];
        let mut j = i;
        while j != 0 && entry_order(&val, &a[j - 1], axis) == Ordering::Less {
            a[j] = a[j - 1];
            j -= 1;
        }
        a[j] = val;
    }
}

/// Sorts extents by their minimum along one axis and sweeps them, pairing each newly reached extent
/// with the still-open extents that also overlap it on the other axis. `O(n log n + k)` for `k` pairs.
///
/// The sorted order is kept between queries; with temporal coherence it is mostly sorted already.
#[derive(Debug, Clone, Default)]
pub struct Sweep {
    axis: Axis,
    entries: Vec<Entry>,
    active: ActiveSet,
}

impl Sweep {
    pub fn new(axis: Axis) -> Sweep {
        Sweep { axis, entries: Vec::new(), active: ActiveSet::default() }
    }
}

impl<T: Hitbox> Broadphase<T> for Sweep {
    type Query<'a> = SweepQuery<'a, T> where T: 'a;

    fn query<'a>(&'a mut self, hitboxes: &'a mut [T]) -> SweepQuery<'a, T> {
        let axis = self.axis;
        let fresh = self.entries.len() != hitboxes.len();
        if fresh {
            // hitboxes were added or removed, previous order is meaningless
            self.entries.clear();
            self.entries.extend((0..hitboxes.len()).map(|index| Entry {
                index,
                aabb: Aabb::default(),
                kind: CollisionType::Inactive,
            }));
        }
        for entry in self.entries.iter_mut() {
            let hitbox = &mut hitboxes[entry.index];
            entry.aabb = hitbox.bounding_box();
            entry.kind = hitbox.collision_type();
        }

        if fresh {
            self.entries.sort_unstable_by(|a, b| entry_order(a, b, axis));
        } else {
            insertion_sort(&mut self.entries, axis);
        }
        self.active.clear();
        trace!("sweeping {} hitboxes along {:?}", self.entries.len(), axis);

        let hitboxes: &'a [T] = hitboxes;
        SweepQuery {
            hitboxes,
            entries: &self.entries,
            active: &mut self.active,
            axis,
            next: 0,
            current: None,
            probe: 0,
        }
    }
}

/// Lazily produced pairs of a [`Sweep`] query.
pub struct SweepQuery<'a, T> {
    hitboxes: &'a [T],
    entries: &'a [Entry],
    active: &'a mut ActiveSet,
    axis: Axis,
    /// Next entry to reach.
    next: usize,
    /// Entry being paired against the active set, not yet inserted.
    current: Option<usize>,
    /// Position in the active set for `current`.
    probe: usize,
}

impl<'a, T> Iterator for SweepQuery<'a, T> {
    type Item = Potential<'a, T>;

    fn next(&mut self) -> Option<Potential<'a, T>> {
        let entries = self.entries;
        loop {
            if let Some(cur) = self.current {
                let entry = &entries[cur];
                while let Some(&other) = self.active.get_index(self.probe) {
                    self.probe += 1;
                    let other = &entries[other];
                    if entry.kind.pairs_with(other.kind) && entry.aabb.aabb_test(&other.aabb) {
                        return Some(Potential::new(self.hitboxes, other.index, entry.index));
                    }
                }
                self.active.insert(cur);
                self.current = None;
            }

            let cur = self.next;
            let entry = entries.get(cur)?;
            self.next += 1;
            if entry.kind == CollisionType::Inactive || entry.aabb.is_degenerate() {
                continue;
            }

            // retire extents the sweep has moved past
            let axis = self.axis;
            let min = axis.min(&entry.aabb);
            self.active.retain(|&k| axis.max(&entries[k].aabb) >= min);
            self.current = Some(cur);
            self.probe = 0;
        }
    }
}
