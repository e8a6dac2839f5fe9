use std::ops;

use ndarray::{Array, Array2};
use serde::{Deserialize, Serialize};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};


// An 8x8 board of optional values. Storage is rank-major starting from the 8th rank, the same
// order FEN and the sensor payload use.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Grid<T: Clone> {
    data: Array2<Option<T>>,
}

impl<T: Clone> Grid<T> {
    pub fn new() -> Self {
        Grid {
            data: Array::from_elem((NUM_ROWS as usize, NUM_COLS as usize), None),
        }
    }

    pub fn from_fn(mut f: impl FnMut(Coord) -> Option<T>) -> Self {
        let mut grid = Self::new();
        for coord in Coord::all() {
            grid[coord] = f(coord);
        }
        grid
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord, &Option<T>)> + '_ {
        Coord::all().map(move |coord| (coord, &self[coord]))
    }

    pub fn occupied(&self) -> impl Iterator<Item = (Coord, &T)> + '_ {
        self.iter().filter_map(|(coord, value)| value.as_ref().map(|v| (coord, v)))
    }

    pub fn is_empty(&self) -> bool { self.data.iter().all(Option::is_none) }

    pub fn count(&self) -> usize { self.data.iter().filter(|v| v.is_some()).count() }

    pub fn map<U: Clone>(&self, f: impl FnMut(&T) -> U + Copy) -> Grid<U> {
        Grid { data: self.data.map(|v| v.as_ref().map(f)) }
    }

    // Rows in rank-major order, 8th rank first.
    pub fn ranks(&self) -> impl Iterator<Item = Vec<Option<T>>> + '_ {
        self.data.rows().into_iter().map(|row| row.to_vec())
    }
}

impl<T: Clone> Default for Grid<T> {
    fn default() -> Self { Self::new() }
}

impl<T: Clone> ops::Index<Coord> for Grid<T> {
    type Output = Option<T>;
    fn index(&self, pos: Coord) -> &Self::Output { &self.data[coord_to_index(pos)] }
}

impl<T: Clone> ops::IndexMut<Coord> for Grid<T> {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        &mut self.data[coord_to_index(pos)]
    }
}

fn coord_to_index(pos: Coord) -> [usize; 2] {
    let (rank_idx, file_idx) = pos.to_grid_index();
    [rank_idx as usize, file_idx as usize]
}
