//! Uniform grid (spatial hash) broadphase.

use super::Broadphase;
use crate::{
    hitbox::{CollisionType, Hitbox, Potential},
    prim::Aabb,
    Fp,
};
use fnv::FnvHashMap;
use log::{trace, warn};

type Cell = (i32, i32);

/// Boxes spanning more cells than this are kept out of the grid and tested against every other box.
pub const MAX_CELLS_PER_BOX: i64 = 1024;

#[derive(Debug, Clone, Copy)]
struct Placed {
    aabb: Aabb,
    kind: CollisionType,
    oversize: bool,
}

/// Buckets hitboxes into square cells and pairs hitboxes sharing a cell.
///
/// Suits many similarly sized hitboxes spread over a large area. A pair is reported only from the
/// cell holding the min corner of the two boxes' intersection, so it is never reported twice.
/// Boxes too large for the cell size (see [`MAX_CELLS_PER_BOX`]) bypass the grid.
#[derive(Debug, Clone)]
pub struct Grid {
    cell_size: Fp,
    cells: FnvHashMap<Cell, Vec<usize>>,
    /// Per hitbox: `None` when it does not take part in this query.
    boxes: Vec<Option<Placed>>,
    /// Ascending indices of the boxes that bypass the grid.
    oversize: Vec<usize>,
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(64.0)
    }
}

impl Grid {
    pub fn new(cell_size: Fp) -> Grid {
        //! `cell_size` must be positive and finite, falls back to `1.0` otherwise.
        let cell_size = if cell_size > 0.0 && cell_size.is_finite() {
            cell_size
        } else {
            warn!("invalid grid cell size {}, using 1.0", cell_size);
            1.0
        };
        Grid { cell_size, cells: FnvHashMap::default(), boxes: Vec::new(), oversize: Vec::new() }
    }

    #[inline]
    pub fn cell_size(&self) -> Fp {
        self.cell_size
    }

    #[inline]
    fn cell_of(&self, x: Fp, y: Fp) -> Cell {
        // saturates for huge and infinite coordinates
        ((x / self.cell_size).floor() as i32, (y / self.cell_size).floor() as i32)
    }
    #[inline]
    fn cell_span(&self, aabb: &Aabb) -> (Cell, Cell) {
        (self.cell_of(aabb.min.x, aabb.min.y), self.cell_of(aabb.max.x, aabb.max.y))
    }
    #[inline]
    fn owner_cell(&self, a: &Aabb, b: &Aabb) -> Cell {
        self.cell_of(Fp::max(a.min.x, b.min.x), Fp::max(a.min.y, b.min.y))
    }

    fn rebuild<T: Hitbox>(&mut self, hitboxes: &mut [T]) {
        // drop cells left empty by the previous query, keep the rest of the allocations
        self.cells.retain(|_, bucket| !bucket.is_empty());
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        self.boxes.clear();
        self.oversize.clear();

        for (index, hitbox) in hitboxes.iter_mut().enumerate() {
            let kind = hitbox.collision_type();
            let aabb = hitbox.bounding_box();
            if kind == CollisionType::Inactive || aabb.is_degenerate() {
                self.boxes.push(None);
                continue;
            }

            let ((x0, y0), (x1, y1)) = self.cell_span(&aabb);
            let count = (x1 as i64 - x0 as i64 + 1) * (y1 as i64 - y0 as i64 + 1);
            let oversize = count > MAX_CELLS_PER_BOX;
            self.boxes.push(Some(Placed { aabb, kind, oversize }));
            if oversize {
                self.oversize.push(index);
                continue;
            }

            for cx in x0..=x1 {
                for cy in y0..=y1 {
                    self.cells.entry((cx, cy)).or_insert_with(Vec::new).push(index);
                }
            }
        }
        trace!(
            "gridded {} hitboxes into {} cells, {} oversize",
            hitboxes.len(),
            self.cells.len(),
            self.oversize.len()
        );
    }

    #[inline]
    fn pairs(&self, placed: &Placed, other: usize) -> bool {
        match self.boxes[other] {
            Some(o) => placed.kind.pairs_with(o.kind) && placed.aabb.aabb_test(&o.aabb),
            None => false,
        }
    }
}

impl<T: Hitbox> Broadphase<T> for Grid {
    type Query<'a> = GridQuery<'a, T> where T: 'a;

    fn query<'a>(&'a mut self, hitboxes: &'a mut [T]) -> GridQuery<'a, T> {
        self.rebuild(hitboxes);
        let hitboxes: &'a [T] = hitboxes;
        GridQuery { hitboxes, grid: self, next: 0, cursor: None }
    }
}

/// What is left to check for the hitbox under the cursor. Only partners with a higher index count.
#[derive(Debug, Clone, Copy)]
enum Walk {
    /// The grid cells the hitbox covers, then `Oversize`.
    Cells { min: Cell, max: Cell, cell: Cell, slot: usize },
    /// The boxes that bypass the grid.
    Oversize { slot: usize },
    /// Every other box, for a hitbox that bypasses the grid itself.
    All { other: usize },
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    index: usize,
    placed: Placed,
    walk: Walk,
}

/// Lazily produced pairs of a [`Grid`] query, ordered by the lower hitbox index.
pub struct GridQuery<'a, T> {
    hitboxes: &'a [T],
    grid: &'a Grid,
    next: usize,
    cursor: Option<Cursor>,
}

impl<'a, T> GridQuery<'a, T> {
    fn advance(&self, c: &mut Cursor) -> Option<usize> {
        //! Next partner for the cursor's hitbox, or `None` once its walk is done.
        let grid = self.grid;
        loop {
            match &mut c.walk {
                Walk::Cells { min, max, cell, slot } => {
                    if let Some(bucket) = grid.cells.get(&*cell) {
                        // buckets are filled in index order
                        while let Some(&other) = bucket.get(*slot) {
                            *slot += 1;
                            if other <= c.index || !grid.pairs(&c.placed, other) {
                                continue;
                            }
                            if let Some(o) = grid.boxes[other] {
                                if grid.owner_cell(&c.placed.aabb, &o.aabb) == *cell {
                                    return Some(other);
                                }
                            }
                        }
                    }

                    *slot = 0;
                    if cell.1 < max.1 {
                        cell.1 += 1;
                    } else if cell.0 < max.0 {
                        *cell = (cell.0 + 1, min.1);
                    } else {
                        c.walk = Walk::Oversize { slot: 0 };
                    }
                }
                Walk::Oversize { slot } => {
                    let other = *grid.oversize.get(*slot)?;
                    *slot += 1;
                    if other > c.index && grid.pairs(&c.placed, other) {
                        return Some(other);
                    }
                }
                Walk::All { other } => {
                    let candidate = *other;
                    if candidate >= grid.boxes.len() {
                        return None;
                    }
                    *other += 1;
                    if candidate > c.index && grid.pairs(&c.placed, candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
    }
}

impl<'a, T> Iterator for GridQuery<'a, T> {
    type Item = Potential<'a, T>;

    fn next(&mut self) -> Option<Potential<'a, T>> {
        loop {
            if let Some(mut c) = self.cursor.take() {
                if let Some(other) = self.advance(&mut c) {
                    self.cursor = Some(c);
                    return Some(Potential::new(self.hitboxes, c.index, other));
                }
            }

            let index = self.next;
            let slot = self.grid.boxes.get(index)?;
            self.next += 1;
            if let Some(placed) = *slot {
                let walk = if placed.oversize {
                    Walk::All { other: index + 1 }
                } else {
                    let (min, max) = self.grid.cell_span(&placed.aabb);
                    Walk::Cells { min, max, cell: min, slot: 0 }
                };
                self.cursor = Some(Cursor { index, placed, walk });
            }
        }
    }
}
