//! # boar
//!
//! A small grid toolkit built around an A* [Searcher] for bounded 2D grids. Traversability is
//! decided by a caller-supplied [TileValidator], movement is either 4- or 8-directional, and an
//! adjacent-stop mode ends the search next to a target that cannot itself be entered. Each
//! searcher keeps a dense [node store](node::NodeStore) with one lazily created node per cell,
//! which is reused by every later search on the same grid.
//!
//! The remaining modules are stateless helpers: [geom] (vectors, angles, point relations),
//! [line] (Bresenham lines, line of sight), [noise] (Perlin noise) and [components]
//! (connected-component reachability).
mod astar;
pub mod components;
pub mod direction;
mod error;
pub mod geom;
pub mod line;
pub mod node;
pub mod noise;
pub mod pathing_grid;
pub mod searcher;

pub use components::Components;
pub use direction::Direction;
pub use error::{SearchError, SearchResult};
pub use geom::{Angle, PointExt, Vector2};
pub use grid_util::point::Point;
pub use noise::PerlinNoise;
pub use pathing_grid::{PathingGrid, SearchConfig, TileValidator};
pub use searcher::Searcher;

/// Cost of a cardinal (straight) move.
pub const C: i32 = 10;
/// Cost of a diagonal move.
pub const D: i32 = 14;
