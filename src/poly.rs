//! Convex polygon shape with cached global-space geometry.

use crate::{
    cache::{Transform, TransformCache},
    error::ShapeError,
    hitbox::{CollisionType, Hitbox},
    prim::{rotate_about, Aabb, Segment},
    Fp, Vec2,
};
use log::{debug, trace};

/// Construction settings for a [`Polygon`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonOptions {
    pub position: Vec2,
    pub scale: Vec2,
    /// Radians, counter-clockwise.
    pub angle: Fp,
    /// Point of the size box that `position` refers to, `(0, 0)` being the local origin and `(1, 1)` the far corner.
    pub anchor: Vec2,
    /// Fixes the size instead of deriving it from the vertices' bounds.
    pub size: Option<Vec2>,
    pub collision_type: CollisionType,
}
impl Default for PolygonOptions {
    fn default() -> Self {
        PolygonOptions {
            position: Vec2::new(0.0, 0.0),
            scale: Vec2::new(1.0, 1.0),
            angle: 0.0,
            anchor: Vec2::new(0.0, 0.0),
            size: None,
            collision_type: CollisionType::Active,
        }
    }
}

/// Global-space buffers, allocated once per polygon and rewritten in place.
#[derive(Debug, Clone)]
struct GlobalGeometry {
    vertices: Vec<Vec2>,
    edges: Vec<Segment>,
    aabb: Aabb,
}
impl GlobalGeometry {
    fn with_len(len: usize) -> GlobalGeometry {
        let zero = Vec2::new(0.0, 0.0);
        GlobalGeometry {
            vertices: vec![zero; len],
            edges: vec![Segment::new(zero, zero); len],
            aabb: Aabb::default(),
        }
    }

    fn rebuild(&mut self, local: &[Vec2], origin: Vec2, transform: &Transform) {
        // scale, translate, then rotate about the translated origin
        for (g, &v) in self.vertices.iter_mut().zip(local) {
            *g = rotate_about(origin + v * transform.scale, origin, transform.angle);
        }
        if transform.flips_winding() {
            self.vertices.reverse();
        }

        let len = self.vertices.len();
        let vertices = &self.vertices;
        for (i, edge) in self.edges.iter_mut().enumerate() {
            *edge = Segment::new(vertices[i], vertices[(i + 1) % len]);
        }
        self.aabb = Aabb::from_points(vertices);
    }
}

/// A convex polygon with local vertices wound counter-clockwise (y-up).
///
/// The vertex count is fixed at construction. Global-space vertices, edges and bounds are derived
/// from `transform` on demand and reused until the transform changes.
#[derive(Debug, Clone)]
pub struct Polygon {
    /// Written by the owner each frame; read on every query.
    pub transform: Transform,
    anchor: Vec2,
    size: Vec2,
    shrink_to_bounds: bool,
    vertices: Vec<Vec2>,
    /// Present for shapes built with `from_normals`.
    normals: Option<Vec<Vec2>>,
    path: Vec<Vec2>,
    global: TransformCache<GlobalGeometry, Transform>,
    collision_type: CollisionType,
}

impl Polygon {
    pub fn new(vertices: &[Vec2]) -> Result<Polygon, ShapeError> {
        Polygon::with_options(vertices, PolygonOptions::default())
    }
    pub fn with_options(vertices: &[Vec2], options: PolygonOptions) -> Result<Polygon, ShapeError> {
        //! `vertices` must form a convex polygon wound counter-clockwise.
        let len = vertices.len();
        if len < 3 {
            return Err(ShapeError::TooFewVertices(len));
        }

        let mut poly = Polygon {
            transform: Transform::new(options.position, options.scale, options.angle),
            anchor: options.anchor,
            size: options.size.unwrap_or_else(|| Vec2::new(0.0, 0.0)),
            shrink_to_bounds: options.size.is_none(),
            vertices: vertices.to_vec(),
            normals: None,
            path: Vec::with_capacity(len + 1),
            global: TransformCache::new(GlobalGeometry::with_len(len)),
            collision_type: options.collision_type,
        };
        poly.rebuild_local();
        Ok(poly)
    }
    pub fn from_normals(normals: &[Vec2], size: Vec2, options: PolygonOptions) -> Result<Polygon, ShapeError> {
        //! Builds the polygon relative to a `size` box: each unit direction in `normals` maps from
        //! the box's centre towards its edges. E.g. `(0, -1), (1, 0), (0, 1), (-1, 0)` gives a diamond.
        let half = size * 0.5;
        let vertices = normals.iter().map(|&n| n * half + half).collect::<Vec<_>>();
        let mut poly = Polygon::with_options(&vertices, options)?;
        poly.normals = Some(normals.to_vec());
        Ok(poly)
    }

    pub fn refresh_vertices(&mut self, new_vertices: Option<&[Vec2]>) -> Result<(), ShapeError> {
        //! Copies `new_vertices` into local storage, if given, and re-derives the boundary path,
        //! size and origin alignment. The vertex count cannot change.
        if let Some(new_vertices) = new_vertices {
            if new_vertices.len() != self.vertices.len() {
                return Err(ShapeError::VertexCountMismatch {
                    expected: self.vertices.len(),
                    found: new_vertices.len(),
                });
            }
            self.vertices.copy_from_slice(new_vertices);
        }
        self.rebuild_local();
        Ok(())
    }
    pub fn fit_to_size(&mut self, size: Vec2) -> bool {
        //! Re-derives a `from_normals` polygon for a new bounding `size`, e.g. when a parent resizes.
        //! Returns `false` and changes nothing for polygons built from absolute vertices.
        let normals = match &self.normals {
            Some(normals) => normals,
            None => return false,
        };
        let half = size * 0.5;
        for (v, &n) in self.vertices.iter_mut().zip(normals.iter()) {
            *v = n * half + half;
        }
        if !self.shrink_to_bounds {
            self.size = size;
        }
        self.rebuild_local();
        true
    }

    fn rebuild_local(&mut self) {
        let bounds = Aabb::from_points(&self.vertices);
        if self.shrink_to_bounds {
            self.size = bounds.size();
        }

        // move the bounds' top-left onto the local origin, keeping the global geometry in place
        let top_left = bounds.min;
        if top_left != Vec2::new(0.0, 0.0) {
            for v in self.vertices.iter_mut() {
                *v -= top_left;
            }
            let t = self.transform;
            self.transform.position += rotate_about(top_left * t.scale, Vec2::new(0.0, 0.0), t.angle);
        }

        self.path.clear();
        self.path.extend_from_slice(&self.vertices);
        self.path.push(self.vertices[0]);

        self.global.invalidate();
        debug!("refreshed {} polygon vertices, size {:?}", self.vertices.len(), self.size);
    }

    fn global(&mut self) -> &GlobalGeometry {
        let transform = self.transform;
        if !self.global.is_valid(&transform) {
            trace!("recomputing global vertices for {:?}", transform);
            let origin = self.origin();
            let local = &self.vertices;
            self.global.recompute(transform, |g| g.rebuild(local, origin, &transform));
        }
        self.global.value()
    }

    pub fn global_vertices(&mut self) -> &[Vec2] {
        //! The transformed vertices, counter-clockwise. Recomputed only when `transform` changed
        //! since the last query; the returned buffer is the same allocation every time.
        &self.global().vertices
    }
    pub fn contains_point(&mut self, point: Vec2) -> bool {
        //! Inclusive of the boundary. Always false for a zero-width or zero-height polygon.
        if self.size.x == 0.0 || self.size.y == 0.0 {
            return false;
        }
        let global = self.global();
        // strictly right of any counter-clockwise edge means outside
        global.aabb.point_test(point) && global.edges.iter().all(|edge| edge.side(point) >= 0.0)
    }
    pub fn possible_intersection_vertices(&mut self, rect: Option<Aabb>) -> impl Iterator<Item = &Segment> + '_ {
        //! Global edges intersecting `rect`, or every edge when `rect` is `None`.
        let degenerate = self.size.x == 0.0
            || self.size.y == 0.0
            || rect.map_or(false, |r| r.width() == 0.0 || r.height() == 0.0);

        let edges = &self.global().edges;
        let edges = if degenerate { &edges[..0] } else { &edges[..] };
        edges.iter().filter(move |e| rect.map_or(true, |r| r.seg_test(e.from, e.to)))
    }
    pub fn get_edge(&mut self, i: isize) -> &Segment {
        //! Global edge from vertex `i` to vertex `i + 1`. Any index wraps around the polygon.
        let edges = &self.global().edges;
        &edges[i.rem_euclid(edges.len() as isize) as usize]
    }
    pub fn get_vertex(&mut self, i: isize) -> Vec2 {
        let vertices = &self.global().vertices;
        vertices[i.rem_euclid(vertices.len() as isize) as usize]
    }
    pub fn signed_area(&mut self) -> Fp {
        //! Area of the global polygon, positive when wound counter-clockwise.
        let twice: Fp = self.global().edges.iter().map(|e| e.from.perp_dot(e.to)).sum();
        twice * 0.5
    }

    pub fn origin(&self) -> Vec2 {
        //! Global position of the local origin. Equals `transform.position` for a zero anchor.
        let t = &self.transform;
        let anchored = self.anchor * self.size * t.scale;
        t.position - rotate_about(anchored, Vec2::new(0.0, 0.0), t.angle)
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
    #[inline]
    pub fn path(&self) -> &[Vec2] {
        //! Closed boundary for rendering: the local vertices followed by the first one again.
        &self.path
    }
    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }
    #[inline]
    pub fn anchor(&self) -> Vec2 {
        self.anchor
    }
    pub fn set_anchor(&mut self, anchor: Vec2) {
        self.anchor = anchor;
        self.global.invalidate();
    }
    pub fn set_collision_type(&mut self, collision_type: CollisionType) {
        self.collision_type = collision_type;
    }
}

impl Hitbox for Polygon {
    fn bounding_box(&mut self) -> Aabb {
        self.global().aabb
    }
    #[inline]
    fn collision_type(&self) -> CollisionType {
        self.collision_type
    }
}
