use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_recall::core::{generate_positions, GameState, SimpleRng};
use tui_recall::term::{FrameBuffer, GameView, Viewport};
use tui_recall::types::{Bounds, Difficulty, TILE_COUNT};

fn bench_layout(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_positions", |b| {
        b.iter(|| generate_positions(&mut rng, black_box(Bounds::default())))
    });
}

fn bench_cramped_layout(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    // Exhausts the attempt cap for most tiles.
    c.bench_function("generate_positions_cramped", |b| {
        b.iter(|| generate_positions(&mut rng, black_box(Bounds::new(150.0, 120.0))))
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345, Bounds::default());
    state.start_game();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
        })
    });
}

fn bench_full_round(c: &mut Criterion) {
    let mut state = GameState::new(12345, Bounds::default()).with_difficulty(Difficulty::Fast);

    c.bench_function("full_round", |b| {
        b.iter(|| {
            state.start_game();
            state.tick(Difficulty::Fast.reveal_ms());
            for n in 0..TILE_COUNT {
                state.handle_tap(n);
            }
            state.tick(100);
            black_box(state.take_feedback());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let vp = Viewport::new(120, 40);
    let view = GameView::default();
    let mut state = GameState::new(12345, view.board_bounds(vp));
    state.start_game();
    state.tick(Difficulty::Normal.reveal_ms());
    let snap = state.snapshot();
    let mut fb = FrameBuffer::new(vp.width, vp.height);

    c.bench_function("render_recall_board", |b| {
        b.iter(|| view.render_into(black_box(&snap), None, vp, &mut fb))
    });
}

criterion_group!(
    benches,
    bench_layout,
    bench_cramped_layout,
    bench_tick,
    bench_full_round,
    bench_render
);
criterion_main!(benches);
