use crate::core::Vec2;

/// A bounding box with one corner fixed at 0,0 and assumed to have positive extent
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundsOriginRoot {
    pub extent: Vec2,
}

impl BoundsOriginRoot {
    pub fn new(rows: i32, columns: i32) -> BoundsOriginRoot {
        BoundsOriginRoot {
            extent: Vec2 { i: rows, j: columns },
        }
    }

    /// `None` when the side does not fit a grid coordinate.
    pub fn square(size: usize) -> Option<BoundsOriginRoot> {
        let side = i32::try_from(size).ok()?;
        Some(BoundsOriginRoot::new(side, side))
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.i >= 0 && pos.i < self.extent.i && pos.j >= 0 && pos.j < self.extent.j
    }

    pub fn columns(&self) -> i32 {
        self.extent.j
    }

    pub fn area(&self) -> Option<usize> {
        let rows = usize::try_from(self.extent.i).ok()?;
        let columns = usize::try_from(self.extent.j).ok()?;
        rows.checked_mul(columns)
    }
}
