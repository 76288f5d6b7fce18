use criterion::{black_box, criterion_group, criterion_main, Criterion};
use flip_tetris::core::{flip_board, Board, EngineConfig, GameState};
use flip_tetris::types::{Gravity, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("game_tick_16ms", |b| {
        b.iter(|| {
            state.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::default();
            // Fill bottom 4 rows
            for y in 16..20 {
                for x in 0..20 {
                    board.set(x, y, Some(PieceKind::I));
                }
            }
            board.clear_full_rows(black_box(Gravity::Down));
        })
    });
}

fn bench_board_flip(c: &mut Criterion) {
    let mut stack = Board::default();
    for y in 10..20 {
        for x in (y % 3)..20 {
            stack.set(x, y, Some(PieceKind::L));
        }
    }

    c.bench_function("flip_board_20x20", |b| {
        b.iter(|| {
            let mut board = stack.clone();
            flip_board(&mut board, black_box(Gravity::Up), 4)
        })
    });
}

fn bench_piece_spawn(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("spawn_piece", |b| {
        b.iter(|| {
            state.spawn_piece();
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let mut state = GameState::new(12345);
    state.start();

    c.bench_function("try_move", |b| {
        b.iter(|| {
            state.try_move(1, 0);
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut state = GameState::with_config(EngineConfig::flip(), 12345).unwrap();
    state.start();

    c.bench_function("rotate_cw", |b| {
        b.iter(|| {
            state.rotate_cw();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_board_flip,
    bench_piece_spawn,
    bench_try_move,
    bench_rotate
);
criterion_main!(benches);
