use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vinculum::problems::{Problem, NQueens, Sudoku};
use vinculum::solver::{
    BacktrackingSolver, MinConflictsQueens, Solver, SolverConfig, VariableHeuristic,
};

fn bench_n_queens(c: &mut Criterion) {
    let mut group = c.benchmark_group("n_queens");

    for n in [8, 12, 16] {
        let csp = NQueens::new(n).unwrap().build().unwrap();
        group.bench_with_input(BenchmarkId::new("backtracking", n), &csp, |b, csp| {
            b.iter(|| {
                let solver = BacktrackingSolver::new();
                black_box(solver.solve(csp))
            })
        });
    }

    for n in [100, 500] {
        group.bench_with_input(BenchmarkId::new("min_conflicts", n), &n, |b, &n| {
            b.iter(|| {
                let mut solver = MinConflictsQueens::new(n);
                black_box(solver.solve())
            })
        });
    }

    group.finish();
}

fn bench_sudoku(c: &mut Criterion) {
    let mut group = c.benchmark_group("sudoku");

    for (label, puzzle) in [("easy", Sudoku::easy()), ("medium", Sudoku::medium())] {
        let csp = puzzle.build().unwrap();
        group.bench_with_input(BenchmarkId::new("solve", label), &csp, |b, csp| {
            b.iter(|| {
                let solver = BacktrackingSolver::new();
                black_box(solver.solve(csp))
            })
        });
    }

    group.finish();
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("heuristics");
    let csp = NQueens::new(12).unwrap().build().unwrap();

    for (label, heuristic) in [
        ("mrv", VariableHeuristic::Mrv),
        ("mrv_degree", VariableHeuristic::MrvDegree),
        ("dom_wdeg", VariableHeuristic::DomWdeg),
    ] {
        group.bench_with_input(BenchmarkId::new("12_queens", label), &csp, |b, csp| {
            b.iter(|| {
                let solver = BacktrackingSolver::with_config(
                    SolverConfig::default().with_variable_heuristic(heuristic),
                );
                black_box(solver.solve(csp))
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_n_queens, bench_sudoku, bench_heuristics);
criterion_main!(benches);
