use crate::astar::SearchContext;
use crate::error::{SearchError, SearchResult};
use crate::geom::PointExt;
use crate::node::{NodeState, NodeStore};
use crate::pathing_grid::{PathingGrid, SearchConfig, TileValidator};
use grid_util::point::Point;
use log::{debug, info};

/// A* searcher bound to one grid. It owns a [NodeStore] that is reused across calls to
/// [find](Self::find), so repeated searches on the same grid allocate nothing after warm-up.
///
/// A searcher runs one search at a time; independent searches need independent searchers.
#[derive(Clone)]
pub struct Searcher<V> {
    grid: PathingGrid<V>,
    store: NodeStore,
}

impl<V: TileValidator> Searcher<V> {
    pub fn new(width: usize, height: usize, config: SearchConfig, validator: V) -> Searcher<V> {
        Searcher {
            grid: PathingGrid::new(width, height, config, validator),
            store: NodeStore::new(width, height),
        }
    }

    pub fn grid(&self) -> &PathingGrid<V> {
        &self.grid
    }

    pub fn config(&self) -> &SearchConfig {
        &self.grid.config
    }

    /// Number of cells that have had a search node allocated so far.
    pub fn node_count(&self) -> usize {
        self.store.allocated()
    }

    /// True when no node is open or closed, which holds between calls to [find](Self::find).
    pub fn is_idle(&self) -> bool {
        self.store.idle()
    }

    /// Computes a path from `start` to `target`. The path excludes `start` and ends at
    /// `target`, or, in adjacent-stop mode, at the cell from which `target` was discovered
    /// (followed by `target` itself if [SearchConfig::include_target] is set). A cell only
    /// discovers `target` across a corner the grid's corner-cutting policy admits.
    ///
    /// Returns `Ok(None)` if no path exists, which is decided without searching when every
    /// neighbour of `target` is blocked. Both points must lie on the grid.
    pub fn find(&mut self, start: Point, target: Point) -> SearchResult<Option<Vec<Point>>> {
        let grid = &self.grid;
        if !grid.in_bounds(&start) {
            return Err(SearchError::StartOutOfBounds {
                x: start.x,
                y: start.y,
                width: grid.width(),
                height: grid.height(),
            });
        }
        if !grid.in_bounds(&target) {
            return Err(SearchError::TargetOutOfBounds {
                x: target.x,
                y: target.y,
                width: grid.width(),
                height: grid.height(),
            });
        }
        if grid.enclosed(&target) {
            debug!("No neighbour of {:?} can be entered, skipping search", target);
            return Ok(None);
        }

        let config = grid.config;
        let mut ctx = SearchContext::new(&mut self.store);
        ctx.open(cell(&start), None, 0, grid.heuristic(&start, &target));

        while let Some(current) = ctx.pop_best() {
            let Some((current_point, current_g)) = ctx
                .store()
                .get(current)
                .map(|n| (point(n.position), n.g))
            else {
                break;
            };
            if current_point == target {
                let path = to_points(ctx.reconstruct(current));
                debug!("Found path of {} steps to {:?}", path.len(), target);
                return Ok(Some(path));
            }
            for &dir in grid.directions() {
                let candidate = current_point + dir;
                if config.stop_adjacent
                    && candidate == target
                    && (config.allow_diagonal_move || current_point.is_orthogonal_to(&candidate))
                    && grid.corner_clear(&current_point, &candidate)
                {
                    let mut path = to_points(ctx.reconstruct(current));
                    if config.include_target {
                        path.push(target);
                    }
                    debug!("Stopped next to {:?} after {} steps", target, path.len());
                    return Ok(Some(path));
                }
                if !grid.can_move_to(&current_point, &candidate) {
                    continue;
                }
                let Some(ix) = grid.get_ix_point(&candidate) else {
                    continue;
                };
                let g = current_g + grid.cost(&current_point, &candidate);
                match ctx.state(ix) {
                    NodeState::Closed => {}
                    NodeState::Open => ctx.relax(ix, current, g),
                    NodeState::None => {
                        let h = grid.heuristic(&candidate, &target);
                        ctx.open(cell(&candidate), Some(current), g, h);
                    }
                }
            }
        }
        info!("Frontier exhausted, {:?} is not reachable from {:?}", target, start);
        Ok(None)
    }
}

fn cell(point: &Point) -> (usize, usize) {
    debug_assert!(point.x >= 0 && point.y >= 0);
    (point.x as usize, point.y as usize)
}

fn point(position: (usize, usize)) -> Point {
    Point::new(position.0 as i32, position.1 as i32)
}

fn to_points(positions: Vec<(usize, usize)>) -> Vec<Point> {
    positions.into_iter().map(point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_searcher(n: usize, config: SearchConfig) -> Searcher<impl Fn(&Point) -> bool> {
        Searcher::new(n, n, config, |_: &Point| true)
    }

    fn points(coords: &[(i32, i32)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        for allow_diag in [false, true] {
            let config = SearchConfig::new().with_diagonal_move(allow_diag);
            let mut searcher = open_searcher(3, config);
            let p = Point::new(1, 1);
            assert_eq!(searcher.find(p, p), Ok(Some(vec![])));
            assert!(searcher.is_idle());
        }
    }

    #[test]
    fn straight_line_without_diagonals() {
        let mut searcher = open_searcher(5, SearchConfig::new());
        let path = searcher.find(Point::new(0, 0), Point::new(4, 0));
        assert_eq!(path, Ok(Some(points(&[(1, 0), (2, 0), (3, 0), (4, 0)]))));
    }

    #[test]
    fn diagonal_line() {
        let mut searcher = open_searcher(5, SearchConfig::new().with_diagonal_move(true));
        let path = searcher.find(Point::new(0, 0), Point::new(4, 4));
        assert_eq!(path, Ok(Some(points(&[(1, 1), (2, 2), (3, 3), (4, 4)]))));
    }

    /// East is tried before south, so the first of two equal-cost detours wins.
    #[test]
    fn tie_break_follows_direction_order() {
        let mut searcher = open_searcher(3, SearchConfig::new());
        let path = searcher.find(Point::new(0, 0), Point::new(1, 1));
        assert_eq!(path, Ok(Some(points(&[(1, 0), (1, 1)]))));
    }

    #[test]
    fn path_around_wall() {
        // |S  |
        // | # |
        // |  G|
        let mut searcher = Searcher::new(3, 3, SearchConfig::new(), |p: &Point| {
            *p != Point::new(1, 1)
        });
        let start = Point::new(0, 0);
        let path = searcher.find(start, Point::new(2, 2)).unwrap().unwrap();
        assert_eq!(path.len(), 4);
        assert_eq!(path.last(), Some(&Point::new(2, 2)));
        assert_eq!(searcher.grid().path_cost(&start, &path), 40);
    }

    #[test]
    fn enclosed_target_is_rejected_without_search() {
        let walls = [(2, 1), (3, 2), (2, 3), (1, 2)].map(|(x, y)| Point::new(x, y));
        let mut searcher = Searcher::new(5, 5, SearchConfig::new(), move |p: &Point| {
            !walls.contains(p)
        });
        assert_eq!(searcher.find(Point::new(0, 0), Point::new(2, 2)), Ok(None));
        assert_eq!(searcher.node_count(), 0);
    }

    #[test]
    fn unreachable_target_exhausts_frontier() {
        // A wall splits the grid in two columns.
        let mut searcher = Searcher::new(3, 3, SearchConfig::new(), |p: &Point| p.x != 1);
        assert_eq!(searcher.find(Point::new(0, 0), Point::new(2, 2)), Ok(None));
        assert_eq!(searcher.node_count(), 3);
        assert!(searcher.is_idle());
    }

    #[test]
    fn out_of_bounds_is_an_error() {
        let mut searcher = open_searcher(3, SearchConfig::new());
        assert_eq!(
            searcher.find(Point::new(-1, 0), Point::new(2, 2)),
            Err(SearchError::StartOutOfBounds {
                x: -1,
                y: 0,
                width: 3,
                height: 3
            })
        );
        assert!(matches!(
            searcher.find(Point::new(0, 0), Point::new(0, 3)),
            Err(SearchError::TargetOutOfBounds { x: 0, y: 3, .. })
        ));
    }

    #[test]
    fn adjacent_stop_on_blocked_target() {
        let target = Point::new(4, 0);
        for (include_target, expected) in [
            (false, points(&[(1, 0), (2, 0), (3, 0)])),
            (true, points(&[(1, 0), (2, 0), (3, 0), (4, 0)])),
        ] {
            let config = SearchConfig::new()
                .with_stop_adjacent(true)
                .with_include_target(include_target);
            let mut searcher = Searcher::new(5, 5, config, move |p: &Point| *p != target);
            assert_eq!(searcher.find(Point::new(0, 0), target), Ok(Some(expected)));
            assert!(searcher.is_idle());
        }
    }

    #[test]
    fn adjacent_stop_with_diagonals() {
        let target = Point::new(2, 2);
        let config = SearchConfig::new()
            .with_diagonal_move(true)
            .with_stop_adjacent(true);
        let mut searcher = Searcher::new(3, 3, config, move |p: &Point| *p != target);
        assert_eq!(
            searcher.find(Point::new(0, 0), target),
            Ok(Some(points(&[(1, 1)])))
        );
    }

    #[test]
    fn adjacent_stop_from_start() {
        let config = SearchConfig::new()
            .with_stop_adjacent(true)
            .with_include_target(true);
        let mut searcher = open_searcher(3, config);
        let target = Point::new(1, 0);
        assert_eq!(searcher.find(Point::new(0, 0), target), Ok(Some(vec![target])));
    }

    #[test]
    fn blocked_target_without_adjacent_stop() {
        let target = Point::new(4, 0);
        let mut searcher = Searcher::new(5, 5, SearchConfig::new(), move |p: &Point| *p != target);
        assert_eq!(searcher.find(Point::new(0, 0), target), Ok(None));
    }

    #[test]
    fn repeated_searches_agree() {
        let config = SearchConfig::new().with_diagonal_move(true);
        let mut searcher = Searcher::new(6, 6, config, |p: &Point| !(p.x == 3 && p.y < 5));
        let (start, target) = (Point::new(0, 0), Point::new(5, 0));
        let first = searcher.find(start, target);
        assert!(matches!(first, Ok(Some(_))));
        assert!(searcher.is_idle());
        let other = searcher.find(Point::new(5, 5), Point::new(0, 5));
        assert!(matches!(other, Ok(Some(_))));
        assert_eq!(searcher.find(start, target), first);
        assert!(searcher.is_idle());
    }

    // Tests whether the corner-cutting policy has the expected effect on path existence in a minimal setting.
    #[test]
    fn test_corner_cutting_switch() {
        //  __
        // |S#|
        // |#G|
        //  __
        let diagonal_only = |p: &Point| p.x == p.y;
        let base = SearchConfig::new().with_diagonal_move(true);
        let (start, goal) = (Point::new(0, 0), Point::new(1, 1));

        let mut cutting = Searcher::new(2, 2, base, diagonal_only);
        assert_eq!(cutting.find(start, goal), Ok(Some(vec![goal])));

        let mut strict = Searcher::new(2, 2, base.with_corner_cutting(false), diagonal_only);
        assert_eq!(strict.find(start, goal), Ok(None));

        let mut four = Searcher::new(2, 2, SearchConfig::new(), diagonal_only);
        assert_eq!(four.find(start, goal), Ok(None));
    }

    #[test]
    fn adjacent_stop_respects_corner_cutting() {
        //  ___
        // |S# |
        // |#G |
        // |   |
        //  ___
        let walls = [(1, 0), (0, 1), (1, 1)].map(|(x, y)| Point::new(x, y));
        let validator = move |p: &Point| !walls.contains(p);
        let base = SearchConfig::new()
            .with_diagonal_move(true)
            .with_stop_adjacent(true);
        let (start, target) = (Point::new(0, 0), Point::new(1, 1));

        let mut cutting = Searcher::new(3, 3, base, validator);
        assert_eq!(cutting.find(start, target), Ok(Some(vec![])));
        let mut cutting = Searcher::new(3, 3, base.with_include_target(true), validator);
        assert_eq!(cutting.find(start, target), Ok(Some(vec![target])));

        for include_target in [false, true] {
            let config = base
                .with_corner_cutting(false)
                .with_include_target(include_target);
            let mut strict = Searcher::new(3, 3, config, validator);
            assert!(!strict.grid().can_move_to(&start, &target));
            assert_eq!(strict.find(start, target), Ok(None));
            assert_eq!(strict.node_count(), 1);
            assert!(strict.is_idle());
        }
    }

    #[test]
    fn validator_only_sees_grid_cells() {
        //  _____
        // |S   G|
        // |  #  |
        // |     |
        //  _____
        let (width, height) = (5, 3);
        let config = SearchConfig::new()
            .with_diagonal_move(true)
            .with_corner_cutting(false);
        let mut searcher = Searcher::new(width, height, config, move |p: &Point| {
            assert!(
                p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height,
                "validator called with {:?}",
                p
            );
            *p != Point::new(2, 1)
        });
        let path = searcher.find(Point::new(0, 0), Point::new(4, 0));
        assert_eq!(path, Ok(Some(points(&[(1, 0), (2, 0), (3, 0), (4, 0)]))));
        assert!(searcher.is_idle());
        for (start, target) in [((4, 2), (0, 0)), ((0, 2), (4, 0)), ((4, 0), (0, 2))] {
            let (start, target) = (Point::new(start.0, start.1), Point::new(target.0, target.1));
            let path = searcher.find(start, target).unwrap().unwrap();
            assert_eq!(path.last(), Some(&target));
            assert!(searcher.is_idle());
        }
    }
}
