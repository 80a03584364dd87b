use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use snake_common::games::SessionRng;
use snake_common::games::snake::{Direction, SnakeGameState, SnakeSettings};

fn random_walk(ticks: usize, seed: u64) -> u32 {
    let mut state = SnakeGameState::new(&SnakeSettings::default(), SessionRng::new(seed))
        .expect("default settings are valid");
    let mut input_rng = SessionRng::new(seed.wrapping_add(1));
    let mut total_score = 0;

    for _ in 0..ticks {
        if let Some(direction) = input_rng.pick(&Direction::ALL) {
            state.change_direction(direction);
        }
        if state.move_snake().is_err() || state.is_game_over() {
            total_score += state.score();
            state.reinitialize();
        }
    }

    total_score + state.score()
}

fn bench_board_scan(state: &SnakeGameState) -> usize {
    state.board().empty_positions().count()
}

fn snake_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("snake");

    group.bench_function("random_walk_10k_ticks", |b| {
        b.iter(|| random_walk(black_box(10_000), black_box(7)))
    });

    let settings = SnakeSettings::with_size(100, 100);
    let state = SnakeGameState::new(&settings, SessionRng::new(3)).expect("100x100 is a valid board");
    group.bench_function("empty_positions_100x100", |b| {
        b.iter(|| bench_board_scan(black_box(&state)))
    });

    group.finish();
}

criterion_group!(benches, snake_bench);
criterion_main!(benches);
