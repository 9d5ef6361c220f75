use criterion::{criterion_group, criterion_main, Criterion};
use grid_astar::{run_search, Grid, Never, Role};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

/// Grid size used by the interactive editor.
const ROWS: usize = 50;

fn endpoints(grid: &mut Grid) {
    grid.clear_cell(0, 0);
    grid.clear_cell(ROWS - 1, ROWS - 1);
    grid.set_role(0, 0, Role::Start);
    grid.set_role(ROWS - 1, ROWS - 1, Role::End);
    grid.compute_neighbors();
}

fn open_grid() -> Grid {
    let mut grid = Grid::create(ROWS);
    endpoints(&mut grid);
    grid
}

fn random_grid(rng: &mut StdRng) -> Grid {
    let mut grid = Grid::create(ROWS);
    for row in 0..ROWS {
        for col in 0..ROWS {
            if rng.gen_bool(0.25) {
                grid.set_obstacle(row, col);
            }
        }
    }
    endpoints(&mut grid);
    grid
}

fn search_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    for (name, mut grid) in [
        ("open", open_grid()),
        ("random 25%", random_grid(&mut rng)),
    ] {
        let (start, end) = grid.endpoints().unwrap();
        c.bench_function(format!("{name}, {ROWS}x{ROWS}").as_str(), |b| {
            b.iter(|| black_box(run_search(&mut grid, start, end, |_, _| {}, &Never)))
        });
    }
}

criterion_group!(benches, search_bench);
criterion_main!(benches);
