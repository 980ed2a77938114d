use crate::core::bounds::BoundsOriginRoot;
use crate::core::{Tile, Vec2};

/// Row-major cell storage that never changes size after construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoundedGrid<T> {
    bounds: BoundsOriginRoot,
    cells: Vec<T>,
}

pub type Grid = BoundedGrid<Tile>;

impl<T> BoundedGrid<T> {
    pub fn new_square(size: usize, default: T) -> Option<Self>
    where
        T: Clone,
    {
        BoundedGrid::new(BoundsOriginRoot::square(size)?, default)
    }

    /// `None` when the bounds have no representable area.
    pub fn new(bounds: BoundsOriginRoot, default: T) -> Option<Self>
    where
        T: Clone,
    {
        let cells = vec![default; bounds.area()?];
        Some(BoundedGrid { bounds, cells })
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        if !self.bounds.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.bounds.columns().max(1) as usize)
    }

    pub fn positions_where<F>(&self, predicate: F) -> impl Iterator<Item = Vec2> + '_
    where
        F: Fn(&T) -> bool + 'static,
    {
        let columns = self.bounds.columns();
        self.cells
            .iter()
            .enumerate()
            .filter(move |(_, cell)| predicate(cell))
            .map(move |(index, _)| Vec2 {
                i: index as i32 / columns,
                j: index as i32 % columns,
            })
    }

    fn index_of(&self, pos: &Vec2) -> usize {
        debug_assert!(self.bounds.contains(pos), "position outside grid");
        (pos.i * self.bounds.columns() + pos.j) as usize
    }
}

impl<T> std::ops::Index<&Vec2> for BoundedGrid<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[self.index_of(index)]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for BoundedGrid<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        let at = self.index_of(index);
        &mut self.cells[at]
    }
}
