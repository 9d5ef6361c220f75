/// Fuzzes the search by checking for many random grids that a path is found exactly when the end
/// shares a connected component with the start, that its cost matches a breadth-first search,
/// and that repeating the search gives the same path.
use grid_astar::*;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(n: usize, rng: &mut StdRng) -> Grid {
    let mut grid = Grid::create(n);
    for row in 0..n {
        for col in 0..n {
            if rng.gen_bool(0.4) {
                grid.set_obstacle(row, col);
            }
        }
    }
    grid.clear_cell(0, 0);
    grid.clear_cell(n - 1, n - 1);
    grid.set_role(0, 0, Role::Start);
    grid.set_role(n - 1, n - 1, Role::End);
    grid.compute_neighbors();
    grid.generate_components();
    grid
}

fn bfs_distance(grid: &Grid, start: Point, end: Point) -> Option<Cost> {
    let n = grid.rows();
    let mut dist = vec![None; n * n];
    let ix = |p: &Point| p.x as usize * n + p.y as usize;
    dist[ix(&start)] = Some(0);
    let mut queue = VecDeque::from([start]);
    while let Some(p) = queue.pop_front() {
        let d = dist[ix(&p)]?;
        if p == end {
            return Some(d);
        }
        for q in grid.neighbors(&p) {
            if dist[ix(&q)].is_none() {
                dist[ix(&q)] = Some(d + 1);
                queue.push_back(q);
            }
        }
    }
    None
}

fn visualize_grid(grid: &Grid) {
    print!("{grid}");
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let reachable = grid.reachable(&start, &end);
        let result = run_search(&mut grid, start, end, |_, _| {}, &Never).unwrap();
        // Show the grid if a path is not found
        if result.is_found() != reachable {
            visualize_grid(&grid);
        }
        assert_eq!(result.is_found(), reachable);
        if let Some(path) = result.path() {
            assert_eq!(Some(path.cost()), bfs_distance(&grid, start, end));
        }
    }
}

#[test]
fn fuzz_determinism() {
    const N: usize = 8;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let (start, end) = grid.endpoints().unwrap();
        let mut first_steps = Vec::new();
        let first = run_search(&mut grid, start, end, |_, s| first_steps.push(s), &Never).unwrap();
        let mut second_steps = Vec::new();
        let second =
            run_search(&mut grid, start, end, |_, s| second_steps.push(s), &Never).unwrap();
        assert_eq!(first, second);
        assert_eq!(first_steps, second_steps);
    }
}

/// Every step along a found path is a move between adjacent passable nodes.
#[test]
fn fuzz_path_validity() {
    const N: usize = 12;
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(N, &mut rng);
        let (start, end) = grid.endpoints().unwrap();
        let result = run_search(&mut grid, start, end, |_, _| {}, &Never).unwrap();
        if let Some(path) = result.path() {
            assert_eq!(path.first(), Some(&start));
            assert_eq!(path.last(), Some(&end));
            for pair in path.points().windows(2) {
                assert_eq!(pair[0].manhattan_distance(&pair[1]), 1);
                assert!(grid.node_at(&pair[1]).unwrap().is_passable());
            }
        }
    }
}
