//! Vector, segment and bounding box primitives.

use crate::{Fp, Vec2};

// ---------- Point & Line ---------- //

#[inline]
pub fn rotate_about(point: Vec2, center: Vec2, angle: Fp) -> Vec2 {
    //! Rotates `point` counter-clockwise by `angle` radians around `center`.
    let (sin, cos) = angle.sin_cos();
    let d = point - center;
    Vec2::new(center.x + d.x * cos - d.y * sin, center.y + d.x * sin + d.y * cos)
}

#[inline]
pub fn seg_seg_test(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> bool {
    //! Returns whether a line segment-line segment intersection occurs.
    let da = a2 - a1;
    let db = b2 - b1;

    let dot = da.x * db.y - db.x * da.y;

    // keeps the result consistent with seg_seg_query()
    if dot == 0.0 { return false; }
    let dd = dot * dot;

    let nd1 = a1 - b1;
    let tdd = da.perp_dot(nd1) * dot;
    let udd = db.perp_dot(nd1) * dot;
    udd >= 0.0 && udd <= dd && tdd >= 0.0 && tdd <= dd
}
#[inline]
pub fn seg_seg_query(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<Fp> {
    //! Returns the coefficient distance along line segment `a` an intersection occurs.
    let da = a2 - a1;
    let db = b2 - b1;

    let dot = da.x * db.y - db.x * da.y;
    if dot == 0.0 { return None; } // guard against colinearity
    let dd = dot * dot;

    let nd1 = a1 - b1;
    let tdd = db.perp_dot(nd1) * dot;
    if tdd < 0.0 || tdd > dd { return None; } // seg a guard

    let udd = da.perp_dot(nd1) * dot;
    if udd < 0.0 || udd > dd { return None; } // seg b guard

    Some(tdd / dd)
}

// ---------- Segment ---------- //

/// A directed line segment, `from` -> `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Vec2,
    pub to: Vec2,
}
impl Segment {
    #[inline]
    pub fn new(from: Vec2, to: Vec2) -> Segment {
        Segment { from, to }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.to - self.from
    }
    #[inline]
    pub fn side(&self, point: Vec2) -> Fp {
        //! Positive when `point` is left of `from -> to`, negative when right, zero when colinear.
        self.direction().perp_dot(point - self.from)
    }

    #[inline]
    pub fn intersects(&self, other: &Segment) -> bool {
        seg_seg_test(self.from, self.to, other.from, other.to)
    }
    pub fn intersection(&self, other: &Segment) -> Option<Vec2> {
        //! Optionally returns the point at which the segments cross. Colinear segments never cross.
        seg_seg_query(self.from, self.to, other.from, other.to).map(|t| self.from + self.direction() * t)
    }
}

// ---------- Aabb ---------- //

/// Axis-aligned bounding box. `min` is the top-left corner of the box in local terms.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}
impl Aabb {
    #[inline]
    pub fn new(minx: Fp, miny: Fp, maxx: Fp, maxy: Fp) -> Aabb {
        debug_assert!(minx <= maxx);
        debug_assert!(miny <= maxy);

        Aabb {
            min: Vec2::new(minx, miny),
            max: Vec2::new(maxx, maxy),
        }
    }
    pub fn from_points(points: &[Vec2]) -> Aabb {
        //! Smallest box holding every point. Returns a zeroed box for an empty slice.
        if points.is_empty() {
            return Aabb::default();
        }
        let (mut ix, mut iy, mut ax, mut ay) = (Fp::MAX, Fp::MAX, Fp::MIN, Fp::MIN);
        for p in points {
            if p.x < ix { ix = p.x; }
            if p.x > ax { ax = p.x; }
            if p.y < iy { iy = p.y; }
            if p.y > ay { ay = p.y; }
        }
        Aabb { min: Vec2::new(ix, iy), max: Vec2::new(ax, ay) }
    }

    #[inline]
    pub fn width(&self) -> Fp {
        self.max.x - self.min.x
    }
    #[inline]
    pub fn height(&self) -> Fp {
        self.max.y - self.min.y
    }
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        //! True for zero, negative or NaN extents on either axis.
        !(self.width() > 0.0 && self.height() > 0.0)
    }

    #[inline]
    pub fn point_test(&self, point: Vec2) -> bool {
        //! Returns whether an AABB-point intersection occurs.
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
    pub fn seg_test(&self, a: Vec2, b: Vec2) -> bool {
        //! Returns whether an AABB-segment intersection occurs.
        // SAT tests: https://www.gamedev.net/forums/topic/338987-aabb---line-segment-intersection-test/
        let half_ab = (b - a) * 0.5;
        let half_aabb = (self.max - self.min) * 0.5;
        let half_diff = a + half_ab - (self.min + self.max) * 0.5;
        let abs_hd_x = Fp::abs(half_ab.x);
        let abs_hd_y = Fp::abs(half_ab.y);
        !(Fp::abs(half_diff.x) > half_aabb.x + abs_hd_x
        || Fp::abs(half_diff.y) > half_aabb.y + abs_hd_y
        || Fp::abs(half_ab.x * half_diff.y - half_ab.y * half_diff.x) > half_aabb.x * abs_hd_y + half_aabb.y * abs_hd_x + 0.00001)
    }
    #[inline]
    pub fn aabb_test(&self, other: &Aabb) -> bool {
        //! Inclusive overlap test: boxes sharing only an edge or corner intersect.
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}
