//! Grid line drawing.
use crate::pathing_grid::TileValidator;
use grid_util::point::Point;

/// Cells on the line from `from` to `to`, both included, using Bresenham's algorithm.
/// Consecutive cells are always neighbours in the Moore sense.
pub fn bresenham(from: Point, to: Point) -> Vec<Point> {
    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (from.x, from.y);
    let mut line = Vec::with_capacity(dx.max(-dy) as usize + 1);
    loop {
        line.push(Point::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    line
}

/// Turns waypoints into a path on the grid which can be followed step by step. Each waypoint
/// appears once; segments between waypoints are drawn with [bresenham].
pub fn waypoints_to_path(waypoints: &[Point]) -> Vec<Point> {
    let mut path: Vec<Point> = waypoints.first().copied().into_iter().collect();
    for pair in waypoints.windows(2) {
        path.extend(bresenham(pair[0], pair[1]).into_iter().skip(1));
    }
    path
}

/// True if every cell on the line between the two points, endpoints included, is traversable.
pub fn line_of_sight<V: TileValidator>(from: Point, to: Point, validator: &V) -> bool {
    bresenham(from, to)
        .iter()
        .all(|p| validator.is_traversable(p))
}
