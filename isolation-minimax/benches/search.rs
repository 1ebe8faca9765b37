use isolation_game_types::{wire_representation::Game, Board};
use isolation_minimax::{AlphaBetaSearch, EvaluationStrategy, MinimaxSearch, TimeGuard};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn load_board() -> Board {
    let game_json = include_str!("../../isolation-game-types/fixtures/mid_game.json");
    let game: Game = serde_json::from_str(game_json).unwrap();

    Board::try_from(game).unwrap()
}

fn bench_search_to_depth(c: &mut Criterion, depth: usize) {
    let board = load_board();
    let time_left = || f64::INFINITY;
    let time_guard = TimeGuard::new(&time_left, 1.0);

    let mut group = c.benchmark_group(format!("Mid game: Depth {}", depth));

    for strategy in [
        EvaluationStrategy::Improved,
        EvaluationStrategy::Centrality,
        EvaluationStrategy::MobilityRatio,
    ] {
        group.bench_function(format!("minimax {strategy}"), |b| {
            let search = MinimaxSearch::new(&strategy, &time_guard);
            b.iter(|| search.minimax(black_box(&board), depth))
        });

        group.bench_function(format!("alphabeta {strategy}"), |b| {
            let search = AlphaBetaSearch::new(&strategy, &time_guard);
            b.iter(|| search.alphabeta(black_box(&board), depth))
        });
    }

    group.finish();
}

fn bench_deepened_alphabeta(c: &mut Criterion) {
    let board = load_board();
    let time_left = || f64::INFINITY;
    let time_guard = TimeGuard::new(&time_left, 1.0);
    let search = AlphaBetaSearch::new(&EvaluationStrategy::Improved, &time_guard);

    c.bench_function("alphabeta iterative deepened to 5", |b| {
        b.iter(|| search.deepened_alphabeta(black_box(&board), Some(5)))
    });
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_search_to_depth(c, 3);
    bench_search_to_depth(c, 4);
    bench_deepened_alphabeta(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
