use boar::{Point, SearchConfig, Searcher};

// In this example a path is found on a grid with shape
// #####
// #S  #
// # # #
// #  E#
// #####
// S marks the start
// E marks the end
fn main() {
    env_logger::init();
    let walls = |p: &Point| {
        p.x == 0 || p.y == 0 || p.x == 4 || p.y == 4 || (p.x == 2 && p.y == 2)
    };
    let config = SearchConfig::new().with_diagonal_move(true);
    let mut searcher = Searcher::new(5, 5, config, |p: &Point| !walls(p));
    print!("{}", searcher.grid());
    let start = Point::new(1, 1);
    let end = Point::new(3, 3);
    match searcher.find(start, end) {
        Ok(Some(path)) => {
            println!("A path has been found:");
            for p in &path {
                println!("{:?}", p);
            }
            println!("Cost: {}", searcher.grid().path_cost(&start, &path));
        }
        Ok(None) => println!("No path from {:?} to {:?}", start, end),
        Err(e) => eprintln!("{e}"),
    }
}
