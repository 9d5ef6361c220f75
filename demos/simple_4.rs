use grid_astar::{run_search, Grid, Mark, Never, SearchResult, Step};

// In this example a path is found on a 5x5 grid with shape
//  _____
// |S....|
// |.###.|
// |...#.|
// |##.#.|
// |....E|
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Every expansion is printed the way a front-end would redraw it.

fn main() {
    env_logger::init();
    let mut grid: Grid = "S....\n.###.\n...#.\n##.#.\n....E"
        .parse()
        .expect("valid grid");
    let (start, end) = grid.endpoints().expect("start and end are marked");
    let result = run_search(
        &mut grid,
        start,
        end,
        |grid, step| {
            if let Step::Expanded(p) = step {
                let closed = grid.nodes().filter(|n| n.mark() == Mark::Closed).count();
                println!("Expanded {p}, {closed} closed");
            }
        },
        &Never,
    )
    .expect("preconditions hold");
    println!("{}", grid);
    match result {
        SearchResult::Found(path) => {
            println!("Path of cost {}:", path.cost());
            for p in path {
                println!("{:?}", p);
            }
        }
        other => println!("No path: {:?}", other),
    }
}
