use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// A single point on the board, addressed `(row, col)`, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub row: u16,
    pub col: u16,
}

impl Point {
    pub fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }
}

/// The full board. `size` points on a side; `cells` is row-major, `size * size` long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: u16,
    cells: Vec<Option<Color>>,
}

impl Board {
    pub fn new(size: u16) -> Self {
        let count = size as usize * size as usize;
        Self {
            size,
            cells: vec![None; count],
        }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.row < self.size && p.col < self.size
    }

    fn index(&self, p: Point) -> usize {
        p.row as usize * self.size as usize + p.col as usize
    }

    pub fn get(&self, p: Point) -> Option<Color> {
        self.cells[self.index(p)]
    }

    pub fn set(&mut self, p: Point, color: Option<Color>) {
        let idx = self.index(p);
        self.cells[idx] = color;
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Point::new(row, col)))
    }

    pub fn neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        let size = self.size;
        [(-1i32, 0i32), (1, 0), (0, -1), (0, 1)]
            .into_iter()
            .filter_map(move |(dr, dc)| {
                let row = p.row as i32 + dr;
                let col = p.col as i32 + dc;
                if row >= 0 && col >= 0 && row < size as i32 && col < size as i32 {
                    Some(Point::new(row as u16, col as u16))
                } else {
                    None
                }
            })
    }

    /// The full connected group of same-colored stones containing `p`, or
    /// empty if `p` is unoccupied.
    pub fn group(&self, p: Point) -> HashSet<Point> {
        let Some(color) = self.get(p) else {
            return HashSet::new();
        };

        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(p);
        seen.insert(p);

        while let Some(cur) = queue.pop_front() {
            for n in self.neighbors(cur) {
                if self.get(n) == Some(color) && !seen.contains(&n) {
                    seen.insert(n);
                    queue.push_back(n);
                }
            }
        }

        seen
    }

    /// Number of empty points adjacent to any stone in `group`.
    pub fn liberties(&self, group: &HashSet<Point>) -> usize {
        let mut libs = HashSet::new();
        for &p in group {
            for n in self.neighbors(p) {
                if self.get(n).is_none() {
                    libs.insert(n);
                }
            }
        }
        libs.len()
    }

    /// Flood-fill the empty region containing `p`, returning the region's
    /// points and the set of colors bordering it (for territory scoring).
    pub fn empty_region(&self, p: Point) -> (HashSet<Point>, HashSet<Color>) {
        let mut region = HashSet::new();
        let mut border = HashSet::new();
        let mut queue = VecDeque::new();
        queue.push_back(p);
        region.insert(p);

        while let Some(cur) = queue.pop_front() {
            for n in self.neighbors(cur) {
                match self.get(n) {
                    None => {
                        if region.insert(n) {
                            queue.push_back(n);
                        }
                    }
                    Some(color) => {
                        border.insert(color);
                    }
                }
            }
        }

        (region, border)
    }
}
