//! Race all six strategies over the same randomly walled grid and print
//! their statistics, the tail of one run's step log, and the size of its
//! exploration-tree projection.
//!
//! Usage: `maze-race [seed]`

use rand::SeedableRng;
use rand::rngs::StdRng;

use gridprobe_core::{Grid, Point, scatter_walls};
use gridprobe_search::{Runner, StrategyKind, exploration_tree};

const N: i32 = 25;
const WALL_PCT: f64 = 0.25;

fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42u64);

    let start = Point::new(1, 1);
    let goal = Point::new(N - 2, N - 2);

    let mut grid = Grid::new(N, N);
    let mut rng = StdRng::seed_from_u64(seed);
    let walls = scatter_walls(&mut grid, WALL_PCT, &mut rng, &[start, goal]);
    println!("{N}x{N} grid, {walls} walls (seed {seed}), {start} -> {goal}\n");

    let runner = match Runner::new(grid, start, goal) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    render(&runner);

    println!(
        "{:<14} {:>8} {:>10} {:>10} {:>12}",
        "strategy", "success", "path len", "explored", "elapsed"
    );
    for kind in StrategyKind::ALL {
        let report = runner.run(kind);
        println!(
            "{:<14} {:>8} {:>10} {:>10} {:>12?}",
            kind.label(),
            report.result.success,
            report.result.path.len(),
            report.result.nodes_explored,
            report.elapsed
        );
    }

    // Show the trace surface one consumer would fold.
    let report = runner.run(StrategyKind::AStar);
    println!("\nA* step log tail:");
    for event in report.trace.steps().events().rev().take(5).collect::<Vec<_>>().into_iter().rev() {
        println!("  [{:>4}] {}", event.seq, event.message);
    }
    let tree = exploration_tree(&report.trace, start, &report.result.path);
    println!(
        "\nexploration tree: {} nodes, {} deltas recorded, {} edges",
        tree.size(),
        report.trace.deltas().len(),
        report.trace.edges().len()
    );
}

/// Print the grid with the walls, start and goal.
fn render(runner: &Runner) {
    let grid = runner.grid();
    for y in 0..grid.height() {
        let mut line = String::new();
        for x in 0..grid.width() {
            let p = Point::new(x, y);
            line.push(if p == runner.start() {
                'S'
            } else if p == runner.goal() {
                'G'
            } else if grid.is_wall(p) {
                '#'
            } else {
                '.'
            });
        }
        println!("{line}");
    }
    println!();
}
