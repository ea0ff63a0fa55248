use crate::direction::Direction;
use crate::geom::{PointExt, Vector2};
use crate::{C, D};
use core::fmt;
use grid_util::point::Point;
use itertools::Itertools;
use smallvec::SmallVec;

/// Decides whether a cell can be entered. Implemented for every `Fn(&Point) -> bool`.
pub trait TileValidator {
    fn is_traversable(&self, point: &Point) -> bool;
}

impl<F> TileValidator for F
where
    F: Fn(&Point) -> bool,
{
    fn is_traversable(&self, point: &Point) -> bool {
        self(point)
    }
}

/// Dense row-major index of `point` in a `width x height` grid, `None` when it lies outside.
pub(crate) fn grid_ix(width: usize, height: usize, point: &Point) -> Option<usize> {
    let in_bounds = point.x >= 0
        && point.y >= 0
        && (point.x as usize) < width
        && (point.y as usize) < height;
    in_bounds.then(|| point.y as usize * width + point.x as usize)
}

/// Movement settings of a [PathingGrid].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Expand all eight neighbours instead of the four cardinal ones.
    pub allow_diagonal_move: bool,
    /// Succeed as soon as the target is discovered next to the current cell, without entering it.
    pub stop_adjacent: bool,
    /// In adjacent-stop mode, end the returned path with the target itself.
    pub include_target: bool,
    /// Allow diagonal steps that squeeze between two blocked cardinal cells.
    pub allow_corner_cutting: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            allow_diagonal_move: false,
            stop_adjacent: false,
            include_target: false,
            allow_corner_cutting: true,
        }
    }
}

impl SearchConfig {
    pub fn new() -> SearchConfig {
        SearchConfig::default()
    }
    pub fn with_diagonal_move(mut self, allow: bool) -> SearchConfig {
        self.allow_diagonal_move = allow;
        self
    }
    pub fn with_stop_adjacent(mut self, stop: bool) -> SearchConfig {
        self.stop_adjacent = stop;
        self
    }
    pub fn with_include_target(mut self, include: bool) -> SearchConfig {
        self.include_target = include;
        self
    }
    pub fn with_corner_cutting(mut self, allow: bool) -> SearchConfig {
        self.allow_corner_cutting = allow;
        self
    }
}

/// The static part of a search: grid bounds, movement rules and the tile validator.
#[derive(Clone)]
pub struct PathingGrid<V> {
    width: usize,
    height: usize,
    pub config: SearchConfig,
    validator: V,
}

impl<V: TileValidator> PathingGrid<V> {
    pub fn new(width: usize, height: usize, config: SearchConfig, validator: V) -> PathingGrid<V> {
        PathingGrid {
            width,
            height,
            config,
            validator,
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    pub fn in_bounds(&self, point: &Point) -> bool {
        grid_ix(self.width, self.height, point).is_some()
    }
    /// Dense index of an in-bounds point.
    pub fn get_ix_point(&self, point: &Point) -> Option<usize> {
        grid_ix(self.width, self.height, point)
    }
    /// Bounds are checked first, so the validator never sees an out-of-grid point.
    pub fn can_move_to_simple(&self, pos: &Point) -> bool {
        self.in_bounds(pos) && self.validator.is_traversable(pos)
    }
    /// Whether a single step from `start` into the adjacent cell `pos` is allowed.
    pub fn can_move_to(&self, start: &Point, pos: &Point) -> bool {
        self.can_move_to_simple(pos) && self.corner_clear(start, pos)
    }
    /// Whether the corner-cutting policy admits the step from `start` to the adjacent `pos`.
    /// Only diagonal steps are restricted: with corner cutting off, both flanking cardinal
    /// cells must be enterable. `pos` itself is not validated.
    pub fn corner_clear(&self, start: &Point, pos: &Point) -> bool {
        if self.config.allow_corner_cutting || !start.is_diagonal_to(pos) {
            return true;
        }
        debug_assert!(start.chebyshev_distance(pos) == 1);
        self.can_move_to_simple(&Point::new(start.x, pos.y))
            && self.can_move_to_simple(&Point::new(pos.x, start.y))
    }
    pub fn directions(&self) -> &'static [Direction] {
        Direction::neighbourhood(self.config.allow_diagonal_move)
    }
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; 8]> {
        self.directions().iter().map(|&dir| *point + dir).collect()
    }
    /// True if the validator rejects every neighbour of `target`, which makes it unreachable
    /// by any step.
    pub fn enclosed(&self, target: &Point) -> bool {
        !self
            .neighborhood_points(target)
            .iter()
            .any(|p| self.can_move_to_simple(p))
    }
    /// Euclidean distance times [C], rounded, with diagonal moves; Manhattan distance times
    /// [C] otherwise.
    pub fn heuristic(&self, p: &Point, target: &Point) -> i32 {
        if self.config.allow_diagonal_move {
            let d = Vector2::from(*p).distance_to(&Vector2::from(*target));
            (d * C as f64).round() as i32
        } else {
            p.manhattan_distance(target) * C
        }
    }
    /// Uses [C] for steps within a row or column and [D] for everything else.
    pub fn cost(&self, from: &Point, to: &Point) -> i32 {
        if from.is_orthogonal_to(to) {
            C
        } else {
            D
        }
    }
    /// Total cost of walking `path` starting at `start`, which is not part of the path itself.
    pub fn path_cost(&self, start: &Point, path: &[Point]) -> i32 {
        std::iter::once(start)
            .chain(path)
            .tuple_windows()
            .map(|(a, b)| self.cost(a, b))
            .sum()
    }
}

impl<V: TileValidator> fmt::Display for PathingGrid<V> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height as i32 {
            let row = (0..self.width as i32)
                .map(|x| {
                    if self.validator.is_traversable(&Point::new(x, y)) {
                        '.'
                    } else {
                        '#'
                    }
                })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(config: SearchConfig) -> PathingGrid<impl Fn(&Point) -> bool> {
        PathingGrid::new(4, 3, config, |_: &Point| true)
    }

    #[test]
    fn bounds_and_indices() {
        let grid = open_grid(SearchConfig::new());
        assert!(grid.in_bounds(&Point::new(3, 2)));
        assert!(!grid.in_bounds(&Point::new(4, 0)));
        assert!(!grid.in_bounds(&Point::new(0, -1)));
        assert_eq!(grid.get_ix_point(&Point::new(1, 2)), Some(9));
        assert_eq!(grid.get_ix_point(&Point::new(-1, 2)), None);
        assert_eq!(grid_ix(4, 3, &Point::new(3, 2)), Some(11));
        assert_eq!(grid_ix(4, 3, &Point::new(0, 3)), None);
    }

    #[test]
    fn validator_never_sees_outside_points() {
        let grid = PathingGrid::new(2, 2, SearchConfig::new(), |p: &Point| {
            assert!(p.x >= 0 && p.y >= 0 && p.x < 2 && p.y < 2);
            true
        });
        for p in grid.neighborhood_points(&Point::new(0, 0)) {
            grid.can_move_to_simple(&p);
        }
        assert!(!grid.enclosed(&Point::new(0, 0)));
    }

    #[test]
    fn heuristic_per_mode() {
        let target = Point::new(3, 2);
        let four = open_grid(SearchConfig::new());
        let eight = open_grid(SearchConfig::new().with_diagonal_move(true));
        assert_eq!(four.heuristic(&Point::new(0, 0), &target), 50);
        // sqrt(13) * 10 = 36.06
        assert_eq!(eight.heuristic(&Point::new(0, 0), &target), 36);
        assert_eq!(eight.heuristic(&target, &target), 0);
    }

    #[test]
    fn step_costs() {
        let grid = open_grid(SearchConfig::new().with_diagonal_move(true));
        let p = Point::new(1, 1);
        assert_eq!(grid.cost(&p, &Point::new(1, 0)), C);
        assert_eq!(grid.cost(&p, &Point::new(2, 1)), C);
        assert_eq!(grid.cost(&p, &Point::new(2, 2)), D);
        let path = [Point::new(2, 2), Point::new(3, 2)];
        assert_eq!(grid.path_cost(&p, &path), D + C);
        assert_eq!(grid.path_cost(&p, &[]), 0);
    }

    #[test]
    fn corner_cutting_policy() {
        //  _
        // |.#|
        // |#.|
        let diagonal_only = |p: &Point| p.x == p.y;
        let cutting = PathingGrid::new(
            2,
            2,
            SearchConfig::new().with_diagonal_move(true),
            diagonal_only,
        );
        let strict = PathingGrid::new(
            2,
            2,
            SearchConfig::new()
                .with_diagonal_move(true)
                .with_corner_cutting(false),
            diagonal_only,
        );
        let (a, b) = (Point::new(0, 0), Point::new(1, 1));
        assert!(cutting.can_move_to(&a, &b));
        assert!(!strict.can_move_to(&a, &b));
        // The blocked side cells decide, whatever the destination is.
        assert!(!strict.corner_clear(&a, &b));
        assert!(strict.corner_clear(&a, &Point::new(1, 0)));
        assert!(cutting.corner_clear(&a, &b));
        assert_eq!(format!("{}", cutting), ".#\n#.\n");
    }
}
