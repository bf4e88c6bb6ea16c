//! Carve perfect mazes on a grid
//!
//! A maze is a [Grid] of wall and path cells. [maze_generator::MazeGenerator]
//! carves one with a randomized recursive backtracker, so the path cells
//! always form a spanning tree: every path cell is reachable from the start
//! and there is exactly one route between any two of them.
//!
//! # Examples
//! ## Generating a maze
//! ```
//! use maze_carver::maze_generator::MazeGenerator;
//!
//! let mut generator = MazeGenerator::new(Some(7));
//! let grid = generator.generate(5, 5).unwrap();
//!
//! assert!(grid.is_path(0, 0));
//! assert_eq!(grid.path_count(), 17);
//! assert!(grid.analyze().is_perfect);
//! println!("{}", grid);
//! ```
//!
//! ## Reading a rendered maze
//! ```
//! use maze_carver::Grid;
//!
//! let emojis = "
//! 🟩🟩🟩🟩🟩
//! 🟫🟫🟫🟫🟩
//! 🟩🟩🟩🟩🟩";
//! let grid = Grid::parse(emojis.trim()).unwrap();
//! let report = grid.analyze();
//! assert_eq!(report.path_cells, 11);
//! assert_eq!(report.dead_ends, 2);
//! assert!(report.is_tree);
//! assert!(report.is_perfect);
//! ```

use std::fmt;

use itertools::Itertools;
use petgraph::algo::connected_components;
use petgraph::graph::NodeIndex;
use petgraph::visit::Bfs;
use petgraph::{Graph, Undirected};

pub mod logging;
pub mod maze_generator;

/// State of a single maze cell
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Cell {
    Wall,
    Path,
}

impl Cell {
    const S_WALL: char = '🟫';
    const S_PATH: char = '🟩';
    const A_WALL: char = '#';
    const A_PATH: char = '.';

    /// Read a cell from either its emoji or its ASCII symbol
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            Self::S_WALL | Self::A_WALL => Some(Cell::Wall),
            Self::S_PATH | Self::A_PATH => Some(Cell::Path),
            _ => None,
        }
    }

    pub fn emoji(self) -> char {
        match self {
            Cell::Wall => Self::S_WALL,
            Cell::Path => Self::S_PATH,
        }
    }

    pub fn ascii(self) -> char {
        match self {
            Cell::Wall => Self::A_WALL,
            Cell::Path => Self::A_PATH,
        }
    }
}

/// Symbol set used by [Grid::render]
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Style {
    #[default]
    Emoji,
    Ascii,
}

/// Location in the maze: column `x`, row `y`
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Errors raised while generating or reading a maze
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum MazeError {
    /// Width or height was zero or negative
    InvalidDimension { width: i64, height: i64 },
    /// Requested start cell does not lie in the grid
    StartOutOfBounds { x: usize, y: usize },
    /// Text contained no rows
    EmptyMaze,
    /// Row `y` has a different length than the first row
    RaggedRow {
        y: usize,
        expected: usize,
        found: usize,
    },
    /// Symbol is neither a wall nor a path
    UnexpectedCharacter { character: char, x: usize, y: usize },
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InvalidDimension { width, height } => write!(
                f,
                "Invalid maze dimensions {}x{}, width and height must be positive",
                width, height
            ),
            MazeError::StartOutOfBounds { x, y } => {
                write!(f, "Start cell x={}, y={} is outside the maze", x, y)
            }
            MazeError::EmptyMaze => write!(f, "Maze has no rows"),
            MazeError::RaggedRow { y, expected, found } => write!(
                f,
                "Row y={} has {} cells, expected {}",
                y, found, expected
            ),
            MazeError::UnexpectedCharacter { character, x, y } => write!(
                f,
                "Unexpected character `{}` at y={}, x={}",
                character, y, x
            ),
        }
    }
}

impl std::error::Error for MazeError {}

/// Rectangular maze of wall and path cells
///
/// The dimensions are fixed at creation. Grids handed out by the generator
/// or by [Grid::parse] cannot be modified.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Cells indexed `[y][x]`
    cells: Vec<Vec<Cell>>,
}

impl Grid {
    pub(crate) fn filled(width: usize, height: usize, cell: Cell) -> Self {
        Self {
            width,
            height,
            cells: (0..height)
                .map(|_| (0..width).map(|_| cell).collect())
                .collect(),
        }
    }

    pub(crate) fn set(&mut self, point: Point, cell: Cell) {
        self.cells[point.y][point.x] = cell;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at (x, y), or `None` outside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Whether (x, y) is a path cell. Cells outside the grid are not.
    pub fn is_path(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(Cell::Path)
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.cells
    }

    pub fn path_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Path)
            .count()
    }

    /// Draw the grid one symbol per cell, rows separated by newlines
    pub fn render(&self, style: Style) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&c| match style {
                        Style::Emoji => c.emoji(),
                        Style::Ascii => c.ascii(),
                    })
                    .join("")
            })
            .join("\n")
    }

    /// Parse maze representation from string
    ///
    /// - `text`: one row per line, either emoji (`🟫`, `🟩`) or ASCII
    ///   (`#`, `.`) symbols. Surrounding whitespace is ignored.
    ///
    /// Returns error, if the rows differ in length or contain unknown
    /// characters.
    ///
    /// # Examples
    /// ```
    /// use maze_carver::Grid;
    /// let grid = Grid::parse("🟩🟩🟩\n🟫🟫🟩").unwrap();
    /// assert_eq!((grid.width(), grid.height()), (3, 2));
    /// assert!(grid.is_path(2, 1));
    /// ```
    pub fn parse(text: &str) -> Result<Self, MazeError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MazeError::EmptyMaze);
        }

        let mut cells: Vec<Vec<Cell>> = Vec::new();
        for (y, line) in text.lines().enumerate() {
            let row = line
                .trim_end()
                .chars()
                .enumerate()
                .map(|(x, character)| {
                    Cell::from_char(character)
                        .ok_or(MazeError::UnexpectedCharacter { character, x, y })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = cells.first() {
                if row.len() != first.len() {
                    return Err(MazeError::RaggedRow {
                        y,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            cells.push(row);
        }

        Ok(Self {
            width: cells[0].len(),
            height: cells.len(),
            cells,
        })
    }

    /// Build the graph of passages between path cells
    ///
    /// Every path cell becomes a node; every pair of 4-adjacent path cells
    /// becomes an edge. Only the right and lower neighbours are examined,
    /// because the graph is undirected.
    pub fn passage_graph(&self) -> PassageGraph {
        let mut graph = Graph::new_undirected();
        let mut nodes: Vec<Vec<Option<NodeIndex>>> = (0..self.height)
            .map(|_| (0..self.width).map(|_| None).collect())
            .collect();

        for (y, row) in self.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if *cell == Cell::Wall {
                    continue;
                }
                let node_a = Self::get_or_create_node(Point::new(x, y), &mut nodes, &mut graph);
                for (dx, dy) in [(1, 0), (0, 1)] {
                    let (x1, y1) = (x + dx, y + dy);
                    if self.is_path(x1, y1) {
                        let node_b =
                            Self::get_or_create_node(Point::new(x1, y1), &mut nodes, &mut graph);
                        graph.add_edge(node_a, node_b, ());
                    }
                }
            }
        }

        PassageGraph { nodes, graph }
    }

    fn get_or_create_node(
        point: Point,
        nodes: &mut [Vec<Option<NodeIndex>>],
        graph: &mut Graph<Point, (), Undirected>,
    ) -> NodeIndex {
        if let Some(node) = nodes[point.y][point.x] {
            node
        } else {
            let node = graph.add_node(point);
            nodes[point.y][point.x] = Some(node);
            node
        }
    }

    /// Summarize the maze structure
    pub fn analyze(&self) -> MazeReport {
        let passages = self.passage_graph();
        let is_tree = passages.is_tree();
        MazeReport {
            width: self.width,
            height: self.height,
            path_cells: passages.node_count(),
            passages: passages.edge_count(),
            components: passages.component_count(),
            dead_ends: passages.dead_ends(),
            is_tree,
            is_perfect: self.is_path(0, 0) && is_tree,
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(Style::Emoji))
    }
}

/// Undirected graph of path cells, built by [Grid::passage_graph]
pub struct PassageGraph {
    /// Node indices, `[y][x]`
    nodes: Vec<Vec<Option<NodeIndex>>>,
    /// Weights of the nodes are the grid coordinates
    graph: Graph<Point, (), Undirected>,
}

impl PassageGraph {
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_at(&self, point: Point) -> Option<NodeIndex> {
        self.nodes
            .get(point.y)
            .and_then(|row| row.get(point.x))
            .copied()
            .flatten()
    }

    pub fn component_count(&self) -> usize {
        connected_components(&self.graph)
    }

    /// Connected, and exactly one edge fewer than nodes
    pub fn is_tree(&self) -> bool {
        self.node_count() > 0
            && self.component_count() == 1
            && self.edge_count() == self.node_count() - 1
    }

    /// Number of path cells reached by a flood fill from `start`
    pub fn reachable_from(&self, start: Point) -> usize {
        let Some(node) = self.node_at(start) else {
            return 0;
        };
        let mut bfs = Bfs::new(&self.graph, node);
        let mut count = 0;
        while bfs.next(&self.graph).is_some() {
            count += 1;
        }
        count
    }

    /// Path cells with exactly one path neighbour
    pub fn dead_ends(&self) -> usize {
        self.graph
            .node_indices()
            .filter(|&n| self.graph.neighbors(n).count() == 1)
            .count()
    }
}

/// Structural summary of a maze
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct MazeReport {
    pub width: usize,
    pub height: usize,
    pub path_cells: usize,
    /// Adjacent path cell pairs
    pub passages: usize,
    pub components: usize,
    pub dead_ends: usize,
    /// Passages form a spanning tree, wherever carving started
    pub is_tree: bool,
    /// Passages form a spanning tree and the start cell (0, 0) is open
    pub is_perfect: bool,
}

impl MazeReport {
    /// Report lines, without trailing newlines
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Maze is {}x{} cells.", self.width, self.height),
            format!(
                "{} path cells joined by {} passages in {} component(s), {} dead end(s).",
                self.path_cells, self.passages, self.components, self.dead_ends
            ),
            if self.is_tree {
                "The passages form a tree.".to_string()
            } else {
                "The passages do not form a tree.".to_string()
            },
            if self.is_perfect {
                "The maze is perfect from the top left corner.".to_string()
            } else {
                "The maze is not perfect from the top left corner.".to_string()
            },
        ]
    }

    /// Print report
    pub fn print_report(&self) {
        println!("{}", self.lines().join("\n"));
    }
}

#[cfg(test)]
mod tests {
    use crate::{Cell, Grid, MazeError, Point, Style};

    #[test]
    fn parse_emoji_maze() {
        let emojis = "
🟩🟩🟩🟩🟩
🟫🟫🟫🟫🟩
🟩🟩🟩🟫🟩
🟩🟫🟩🟩🟩"
            .trim();
        let grid = Grid::parse(emojis).unwrap();

        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.get(0, 1), Some(Cell::Wall));
        assert_eq!(grid.get(4, 3), Some(Cell::Path));
        assert_eq!(grid.get(5, 0), None);
        assert_eq!(grid.path_count(), 14);
    }

    #[test]
    fn render_round_trips_ascii() {
        let ascii = "..#\n#..\n..#";
        let grid = Grid::parse(ascii).unwrap();

        assert_eq!(grid.render(Style::Ascii), ascii);
        assert_eq!(grid.to_string(), "🟩🟩🟫\n🟫🟩🟩\n🟩🟩🟫");
    }

    #[test]
    fn out_of_bounds_is_not_path() {
        let grid = Grid::parse("..\n..").unwrap();

        assert!(grid.is_path(1, 1));
        assert!(!grid.is_path(2, 0));
        assert!(!grid.is_path(0, 2));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!(Grid::parse("  \n "), Err(MazeError::EmptyMaze));
        assert_eq!(
            Grid::parse("...\n..\n..."),
            Err(MazeError::RaggedRow {
                y: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Grid::parse("..\n.x"),
            Err(MazeError::UnexpectedCharacter {
                character: 'x',
                x: 1,
                y: 1
            })
        );
    }

    #[test]
    fn passage_graph_counts_adjacent_paths() {
        let grid = Grid::parse("..#\n#..\n..#").unwrap();
        let passages = grid.passage_graph();

        assert_eq!(passages.node_count(), 6);
        assert_eq!(passages.edge_count(), 5);
        assert!(passages.is_tree());
        assert_eq!(passages.dead_ends(), 3);
        assert_eq!(passages.reachable_from(Point::new(0, 2)), 6);
        assert_eq!(passages.reachable_from(Point::new(2, 0)), 0);
    }

    #[test]
    fn loop_is_not_a_tree() {
        let grid = Grid::parse("...\n.#.\n...").unwrap();
        let report = grid.analyze();

        assert_eq!(report.path_cells, 8);
        assert_eq!(report.passages, 8);
        assert_eq!(report.components, 1);
        assert_eq!(report.dead_ends, 0);
        assert!(!report.is_perfect);
    }

    #[test]
    fn disconnected_regions_are_not_perfect() {
        let grid = Grid::parse(".#.\n.#.").unwrap();
        let report = grid.analyze();

        assert_eq!(report.components, 2);
        assert!(!report.is_perfect);
        assert_eq!(grid.passage_graph().reachable_from(Point::new(0, 0)), 2);
    }

    #[test]
    fn closed_start_is_not_perfect() {
        let grid = Grid::parse("#..\n###").unwrap();

        let report = grid.analyze();
        assert!(grid.passage_graph().is_tree());
        assert!(report.is_tree);
        assert!(!report.is_perfect);
        assert_eq!(
            report.lines()[2..],
            [
                "The passages form a tree.",
                "The maze is not perfect from the top left corner."
            ]
        );
    }

    #[test]
    fn parse_ascii_wall_row() {
        let ascii = "
.....
####.
....."
            .trim();
        let grid = Grid::parse(ascii).unwrap();
        let report = grid.analyze();

        assert_eq!(grid.width(), 5);
        assert_eq!(report.path_cells, 11);
        assert_eq!(report.dead_ends, 2);
        assert!(report.is_tree);
        assert!(report.is_perfect);
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            MazeError::InvalidDimension {
                width: 0,
                height: 5
            }
            .to_string(),
            "Invalid maze dimensions 0x5, width and height must be positive"
        );
        assert_eq!(
            MazeError::UnexpectedCharacter {
                character: '?',
                x: 3,
                y: 1
            }
            .to_string(),
            "Unexpected character `?` at y=1, x=3"
        );
    }
}
