use boar::{PerlinNoise, Point, SearchConfig, Searcher};

// Generates terrain from Perlin noise, treats low values as water and paths across the land.
fn main() {
    env_logger::init();
    const W: usize = 48;
    const H: usize = 20;
    let noise = PerlinNoise::new(2024);
    let land: Vec<bool> = (0..W * H)
        .map(|i| noise.noise_2d((i % W) as f64, (i / W) as f64, 4, 12.0, 1.0) > -0.15)
        .collect();
    let validator = |p: &Point| land[p.y as usize * W + p.x as usize];
    let config = SearchConfig::new().with_diagonal_move(true);
    let mut searcher = Searcher::new(W, H, config, validator);

    let start = Point::new(0, 0);
    let end = Point::new(W as i32 - 1, H as i32 - 1);
    let path = match searcher.find(start, end) {
        Ok(path) => path.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    for y in 0..H as i32 {
        let row: String = (0..W as i32)
            .map(|x| {
                let p = Point::new(x, y);
                if p == start || path.contains(&p) {
                    '*'
                } else if validator(&p) {
                    '.'
                } else {
                    '~'
                }
            })
            .collect();
        println!("{row}");
    }
    println!("{} steps", path.len());
}
