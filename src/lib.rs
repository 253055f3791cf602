//! 2D convex polygon hitboxes with cached global geometry, and broadphase pair generation.
//!
//! Shapes keep their vertices in local space. The owner moves them by writing a [`cache::Transform`]
//! each frame; global vertices, edges and bounds are rederived only when that transform changes.
//! A [`broad::Broadphase`] then turns a slice of [`hitbox::Hitbox`]es into candidate pairs for a
//! narrow phase to confirm.
//!
//! Enable the `f64` feature for double precision.

pub mod broad;
pub mod cache;
pub mod error;
pub mod hitbox;
pub mod poly;
pub mod prim;

pub use error::ShapeError;
pub use hitbox::{CollisionType, Hitbox, Potential};
pub use poly::{Polygon, PolygonOptions};
pub use prim::{Aabb, Segment};

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;
