//! Derived-value caching keyed on transform parameters.

use crate::{Fp, Vec2};

/// The externally driven placement of a shape: translation, per-axis scale and rotation in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub scale: Vec2,
    pub angle: Fp,
}
impl Transform {
    #[inline]
    pub fn new(position: Vec2, scale: Vec2, angle: Fp) -> Transform {
        Transform { position, scale, angle }
    }
    #[inline]
    pub fn flips_winding(&self) -> bool {
        //! True when exactly one scale axis is negative, mirroring the shape.
        (self.scale.x < 0.0) != (self.scale.y < 0.0)
    }
}
impl Default for Transform {
    fn default() -> Self {
        Transform { position: Vec2::new(0.0, 0.0), scale: Vec2::new(1.0, 1.0), angle: 0.0 }
    }
}

/// Stores a derived value together with the parameters that produced it.
///
/// The value is valid only while the current parameters compare equal to the stored snapshot.
/// Any difference invalidates the whole value; there is no per-field tracking.
#[derive(Debug, Clone)]
pub struct TransformCache<V, P> {
    value: V,
    params: Option<P>,
}
impl<V, P: PartialEq> TransformCache<V, P> {
    pub fn new(storage: V) -> Self {
        //! Wraps pre-allocated storage. No parameters are recorded, so the first check always misses.
        TransformCache { value: storage, params: None }
    }

    #[inline]
    pub fn is_valid(&self, params: &P) -> bool {
        self.params.as_ref() == Some(params)
    }

    pub fn update(&mut self, value: V, params: P) {
        //! Replaces both the value and the snapshot.
        self.value = value;
        self.params = Some(params);
    }
    pub fn recompute<F: FnOnce(&mut V)>(&mut self, params: P, f: F) -> &V {
        //! Rebuilds the stored value in place, then records `params` as its snapshot.
        f(&mut self.value);
        self.params = Some(params);
        &self.value
    }

    #[inline]
    pub fn value(&self) -> &V {
        //! The stored value, whether or not it is currently valid.
        &self.value
    }
    #[inline]
    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.params = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_check_misses() {
        let cache = TransformCache::<Vec<Vec2>, Transform>::new(vec![]);
        assert!(!cache.is_valid(&Transform::default()));
        assert!(cache.params().is_none());
    }

    #[test]
    fn whole_tuple_validity() {
        let t = Transform::new(Vec2::new(1.0, 2.0), Vec2::new(1.0, 1.0), 0.5);
        let mut cache = TransformCache::new(0u32);
        cache.update(7, t);

        assert!(cache.is_valid(&t));
        assert_eq!(*cache.value(), 7);

        let mut moved = t;
        moved.position.x += 1.0;
        assert!(!cache.is_valid(&moved));
        let mut scaled = t;
        scaled.scale.y = -1.0;
        assert!(!cache.is_valid(&scaled));
        let mut turned = t;
        turned.angle = 0.25;
        assert!(!cache.is_valid(&turned));

        cache.invalidate();
        assert!(!cache.is_valid(&t));
    }

    #[test]
    fn recompute_in_place() {
        let mut cache = TransformCache::<Vec<Fp>, Transform>::new(Vec::with_capacity(4));
        let ptr = cache.value().as_ptr();
        let t = Transform::default();

        cache.recompute(t, |v| v.extend_from_slice(&[1.0, 2.0, 3.0]));
        assert!(cache.is_valid(&t));
        assert_eq!(cache.value().as_slice(), &[1.0, 2.0, 3.0]);
        assert_eq!(cache.value().as_ptr(), ptr);
    }

    #[test]
    fn winding_flip() {
        let mut t = Transform::default();
        assert!(!t.flips_winding());
        t.scale = Vec2::new(-1.0, 1.0);
        assert!(t.flips_winding());
        t.scale = Vec2::new(-1.0, -2.0);
        assert!(!t.flips_winding());
    }
}
