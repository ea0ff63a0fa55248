use crate::pathing_grid::{grid_ix, PathingGrid, TileValidator};
use grid_util::point::Point;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;

/// Connected components of the traversable cells of a [PathingGrid] under its movement rules.
/// Answers reachability questions without searching.
#[derive(Clone, Debug)]
pub struct Components {
    width: usize,
    height: usize,
    components: UnionFind<usize>,
}

impl Components {
    /// Generates a new [UnionFind] structure and links up grid neighbours to the same components.
    pub fn generate<V: TileValidator>(grid: &PathingGrid<V>) -> Components {
        let (width, height) = (grid.width(), grid.height());
        info!("Generating connected components for a {width}x{height} grid");
        let mut components = UnionFind::new(width * height);
        for (x, y) in iproduct!(0..width as i32, 0..height as i32) {
            let point = Point::new(x, y);
            if !grid.can_move_to_simple(&point) {
                continue;
            }
            let Some(ix) = grid.get_ix_point(&point) else {
                continue;
            };
            for n in grid.neighborhood_points(&point) {
                if grid.can_move_to(&point, &n) {
                    if let Some(n_ix) = grid.get_ix_point(&n) {
                        components.union(ix, n_ix);
                    }
                }
            }
        }
        Components {
            width,
            height,
            components,
        }
    }

    fn ix(&self, point: &Point) -> Option<usize> {
        grid_ix(self.width, self.height, point)
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Option<usize> {
        self.ix(point).map(|ix| self.components.find(ix))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        match (self.ix(start), self.ix(goal)) {
            (Some(a), Some(b)) => self.components.equiv(a, b),
            _ => false,
        }
    }

    /// Checks if any neighbour of the goal that may step onto it is on the same component as
    /// the start. A neighbour counts when it can be entered and the corner-cutting policy admits
    /// its step to the goal, which is exactly when an adjacent-stop search succeeds.
    pub fn neighbours_reachable<V: TileValidator>(
        &self,
        grid: &PathingGrid<V>,
        start: &Point,
        goal: &Point,
    ) -> bool {
        grid.neighborhood_points(goal).iter().any(|p| {
            grid.can_move_to_simple(p) && grid.corner_clear(p, goal) && self.reachable(start, p)
        })
    }
}
