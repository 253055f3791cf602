//! Broadphase data and logic module.
//!
//! A broadphase turns the current set of hitboxes into [`Potential`] pairs whose bounding boxes overlap.
//! It never decides that a collision happened: every pair must still go through a narrow phase.

pub mod grid;
pub mod sweep;

pub use grid::Grid;
pub use sweep::Sweep;

use crate::{
    hitbox::{Hitbox, Potential},
    prim::Aabb,
    Fp,
};

/// A strategy producing candidate pairs for a set of hitboxes.
///
/// The hitbox slice stays owned by the caller and is borrowed for as long as the returned pairs live,
/// so additions and removals show up on the next query. Pairs are produced lazily, never repeat within
/// a query, never pair a hitbox with itself, and come out in the same order for the same input.
pub trait Broadphase<T: Hitbox> {
    type Query<'a>: Iterator<Item = Potential<'a, T>>
    where
        Self: 'a,
        T: 'a;

    fn query<'a>(&'a mut self, hitboxes: &'a mut [T]) -> Self::Query<'a>;
}

/// Sweep axis selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}
impl Default for Axis {
    fn default() -> Self {
        // screens and game worlds are usually wider than they are tall
        Axis::X
    }
}
impl Axis {
    #[inline]
    pub fn min(self, aabb: &Aabb) -> Fp {
        match self {
            Axis::X => aabb.min.x,
            Axis::Y => aabb.min.y,
        }
    }
    #[inline]
    pub fn max(self, aabb: &Aabb) -> Fp {
        match self {
            Axis::X => aabb.max.x,
            Axis::Y => aabb.max.y,
        }
    }
}
