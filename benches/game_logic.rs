use std::io;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris96::core::{ButtonState, Field, FixedClock, GameSession, GameSnapshot, MemoryStore, PieceController};
use tetris96::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tetris96::types::{Button, PieceKind, Rules};

fn session() -> GameSession<MemoryStore> {
    GameSession::new(12345, Rules::default(), MemoryStore::new(), FixedClock(0))
}

fn bench_tick(c: &mut Criterion) {
    let mut game = session();
    let idle = ButtonState::empty();

    c.bench_function("session_tick_idle", |b| {
        b.iter(|| {
            if game.is_game_over() {
                game.restart_with_seed(12345);
            }
            game.tick(black_box(&idle));
        })
    });
}

fn bench_hard_drop_tick(c: &mut Criterion) {
    let mut game = session();
    let drop = ButtonState::from_buttons(&[Button::HardDrop]);
    let idle = ButtonState::empty();

    c.bench_function("session_tick_hard_drop", |b| {
        b.iter(|| {
            if game.is_game_over() {
                game.restart_with_seed(12345);
            }
            game.tick(black_box(&drop));
            game.tick(black_box(&idle));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut field = Field::new();
            // Fill bottom 4 rows
            for row in 18..22 {
                for col in 0..10 {
                    field.set(col, row, Some(PieceKind::I));
                }
            }
            black_box(field.clear_full_rows());
        })
    });
}

fn bench_try_move(c: &mut Criterion) {
    let field = Field::new();
    let mut pieces = PieceController::new(12345);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            if !pieces.try_move(&field, 1, 0) {
                pieces.reset(12345);
            }
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let field = Field::new();
    let mut pieces = PieceController::new(12345);

    c.bench_function("try_rotate", |b| {
        b.iter(|| {
            pieces.try_rotate(&field, true);
        })
    });
}

fn bench_snapshot_and_render(c: &mut Criterion) {
    let game = session();
    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut term = TerminalRenderer::with_writer(io::sink());

    c.bench_function("snapshot_render_draw", |b| {
        b.iter(|| {
            game.snapshot_into(&mut snap);
            view.render_into(&snap, Viewport::new(80, 24), &mut fb);
            term.draw(black_box(&fb)).unwrap();
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_hard_drop_tick,
    bench_line_clear,
    bench_try_move,
    bench_try_rotate,
    bench_snapshot_and_render
);
criterion_main!(benches);
