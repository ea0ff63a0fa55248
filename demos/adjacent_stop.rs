use boar::line::waypoints_to_path;
use boar::{Point, SearchConfig, Searcher};

// Walks up to a chest standing on a blocked cell:
// ......
// .####.
// .#C...
// ......
fn main() {
    env_logger::init();
    let chest = Point::new(2, 2);
    let blocked = move |p: &Point| {
        *p == chest || (p.y == 1 && (1..=4).contains(&p.x)) || (p.x == 1 && p.y == 2)
    };
    for include_target in [false, true] {
        let config = SearchConfig::new()
            .with_diagonal_move(true)
            .with_stop_adjacent(true)
            .with_include_target(include_target);
        let mut searcher = Searcher::new(6, 4, config, move |p: &Point| !blocked(p));
        let start = Point::new(0, 0);
        match searcher.find(start, chest) {
            Ok(Some(path)) => {
                println!("include_target = {include_target}: {:?}", path);
                let mut waypoints = vec![start];
                waypoints.extend(path.last().copied());
                println!("straight line would be {:?}", waypoints_to_path(&waypoints));
            }
            Ok(None) => println!("The chest cannot be approached"),
            Err(e) => eprintln!("{e}"),
        }
    }
}
