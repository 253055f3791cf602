//! The collision-participation capability and candidate pairs.

use crate::prim::Aabb;
use std::{
    fmt::{Debug, Formatter},
    hash::{Hash, Hasher},
    ptr,
};

/// How a hitbox takes part in broadphase pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Paired with every other participating hitbox.
    Active,
    /// Paired with `Active` hitboxes only.
    Passive,
    /// Never paired.
    Inactive,
}
impl Default for CollisionType {
    fn default() -> Self {
        CollisionType::Active
    }
}
impl CollisionType {
    #[inline]
    pub fn pairs_with(self, other: CollisionType) -> bool {
        match (self, other) {
            (CollisionType::Inactive, _) | (_, CollisionType::Inactive) => false,
            (CollisionType::Passive, CollisionType::Passive) => false,
            _ => true,
        }
    }
}

/// Anything a broadphase can sort and pair: it exposes a global-space bounding box.
///
/// Takes `&mut self` so shapes may refresh cached global geometry on demand.
pub trait Hitbox {
    fn bounding_box(&mut self) -> Aabb;

    fn collision_type(&self) -> CollisionType {
        CollisionType::Active
    }
}

impl Hitbox for Aabb {
    #[inline]
    fn bounding_box(&mut self) -> Aabb {
        *self
    }
}

/// An unordered candidate pair produced by a broadphase, to be verified by a narrow phase.
///
/// Equality and hashing go by the identity of the two referenced hitboxes, ignoring order.
pub struct Potential<'a, T> {
    pub a: &'a T,
    pub b: &'a T,
    indices: (usize, usize),
}
impl<'a, T> Potential<'a, T> {
    pub(crate) fn new(hitboxes: &'a [T], ia: usize, ib: usize) -> Potential<'a, T> {
        debug_assert_ne!(ia, ib, "a hitbox cannot be paired with itself");
        Potential { a: &hitboxes[ia], b: &hitboxes[ib], indices: (ia, ib) }
    }

    #[inline]
    pub fn indices(&self) -> (usize, usize) {
        //! Positions of `a` and `b` in the slice the pair was queried from.
        self.indices
    }
    pub fn sorted_indices(&self) -> (usize, usize) {
        let (a, b) = self.indices;
        if a < b { (a, b) } else { (b, a) }
    }

    #[inline]
    fn addrs(&self) -> (usize, usize) {
        let a = self.a as *const T as usize;
        let b = self.b as *const T as usize;
        if a < b { (a, b) } else { (b, a) }
    }
}
impl<'a, T> Clone for Potential<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<'a, T> Copy for Potential<'a, T> {}
impl<'a, T> PartialEq for Potential<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        (ptr::eq(self.a, other.a) && ptr::eq(self.b, other.b))
            || (ptr::eq(self.a, other.b) && ptr::eq(self.b, other.a))
    }
}
impl<'a, T> Eq for Potential<'a, T> {}
impl<'a, T> Hash for Potential<'a, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.addrs().hash(state);
    }
}
impl<'a, T> Debug for Potential<'a, T> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.debug_struct("Potential")
            .field("a", &self.indices.0)
            .field("b", &self.indices.1)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnv::FnvHashSet;

    #[test]
    fn pairing_rules() {
        use CollisionType::*;
        assert!(Active.pairs_with(Active));
        assert!(Active.pairs_with(Passive));
        assert!(Passive.pairs_with(Active));
        assert!(!Passive.pairs_with(Passive));
        assert!(!Inactive.pairs_with(Active));
        assert!(!Active.pairs_with(Inactive));
    }

    #[test]
    fn identity_is_unordered() {
        let boxes = [Aabb::new(0.0, 0.0, 1.0, 1.0), Aabb::new(0.0, 0.0, 1.0, 1.0), Aabb::new(5.0, 5.0, 6.0, 6.0)];
        let ab = Potential::new(&boxes, 0, 1);
        let ba = Potential::new(&boxes, 1, 0);
        let ac = Potential::new(&boxes, 0, 2);

        // geometrically equal boxes are still distinct hitboxes
        assert_eq!(ab, ba);
        assert_ne!(ab, ac);
        assert_eq!(ba.sorted_indices(), (0, 1));

        let set: FnvHashSet<_> = vec![ab, ba, ac].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
