//! Maze generation

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::{Cell, Grid, MazeError, Point};

/// Pending carve step: the cell being carved, its shuffled directions and
/// the index of the next direction to try.
struct Frame {
    cell: Point,
    directions: [(i64, i64); 4],
    next: usize,
}

/// Perfect maze generator (randomized recursive backtracker)
///
/// Every call to [MazeGenerator::generate] draws from the generator's own
/// random stream, so two generators seeded alike produce the same mazes.
pub struct MazeGenerator<R = StdRng> {
    random: R,
}

impl MazeGenerator<StdRng> {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            random: if let Some(state) = seed {
                StdRng::seed_from_u64(state)
            } else {
                StdRng::from_entropy()
            },
        }
    }
}

impl<R: Rng> MazeGenerator<R> {
    /// Up, down, left, right
    const DIRECTIONS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

    /// Use an existing random stream
    pub fn from_rng(random: R) -> Self {
        Self { random }
    }

    /// Generate a perfect maze carved from the top left corner
    ///
    /// Returns [MazeError::InvalidDimension] unless both `width` and
    /// `height` are positive. With even dimensions, the last column or row
    /// stays wall.
    pub fn generate(&mut self, width: i64, height: i64) -> Result<Grid, MazeError> {
        self.generate_from(width, height, Point::new(0, 0))
    }

    /// Generate a perfect maze carved from `start`
    ///
    /// Carving moves two cells at a time and opens the cell in between, so
    /// passages are separated by walls one cell thick. Cells already carved
    /// are never entered again, which keeps the passages free of loops.
    pub fn generate_from(
        &mut self,
        width: i64,
        height: i64,
        start: Point,
    ) -> Result<Grid, MazeError> {
        let (w, h) = match (usize::try_from(width), usize::try_from(height)) {
            (Ok(w), Ok(h)) if w > 0 && h > 0 => (w, h),
            _ => return Err(MazeError::InvalidDimension { width, height }),
        };
        if start.x >= w || start.y >= h {
            return Err(MazeError::StartOutOfBounds {
                x: start.x,
                y: start.y,
            });
        }
        debug!("Carving {}x{} maze from x={}, y={}", w, h, start.x, start.y);

        let mut grid = Grid::filled(w, h, Cell::Wall);
        let mut visited = vec![false; w * h];
        let mut stack = vec![self.enter(&mut grid, &mut visited, start)];
        let mut carved: usize = 1;
        let mut max_depth: usize = 1;

        while let Some(frame) = stack.last_mut() {
            if frame.next == frame.directions.len() {
                stack.pop();
                continue;
            }
            let (dx, dy) = frame.directions[frame.next];
            frame.next += 1;
            let here = frame.cell;

            let nx = here.x as i64 + 2 * dx;
            let ny = here.y as i64 + 2 * dy;
            if nx < 0 || ny < 0 || nx >= width || ny >= height {
                continue;
            }
            let neighbor = Point::new(nx as usize, ny as usize);
            if visited[neighbor.y * w + neighbor.x] {
                continue;
            }

            // Open the wall between current cell and neighbor
            let between = Point::new(
                (here.x as i64 + dx) as usize,
                (here.y as i64 + dy) as usize,
            );
            grid.set(between, Cell::Path);

            let frame = self.enter(&mut grid, &mut visited, neighbor);
            stack.push(frame);
            carved += 1;
            max_depth = max_depth.max(stack.len());
        }

        debug!("Carved {} cells, deepest walk {}", carved, max_depth);
        Ok(grid)
    }

    /// Mark `cell` as carved and shuffle the order its neighbors are tried
    fn enter(&mut self, grid: &mut Grid, visited: &mut [bool], cell: Point) -> Frame {
        visited[cell.y * grid.width() + cell.x] = true;
        grid.set(cell, Cell::Path);

        let mut directions = Self::DIRECTIONS;
        directions.shuffle(&mut self.random);
        trace!("Enter x={}, y={}, directions {:?}", cell.x, cell.y, directions);

        Frame {
            cell,
            directions,
            next: 0,
        }
    }
}
