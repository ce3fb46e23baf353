// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use card_stack::{Card, StackController};
use card_stack_surface::Surface;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};

const FRAME: Duration = Duration::from_micros(16_667);

fn presented(count: usize) -> StackController<()> {
    let cards = (0..count).map(|_| Card::new(())).collect();
    let surface = Surface::new(Rect::new(0.0, 0.0, 390.0, 844.0));
    let mut stack = StackController::new(surface, cards).unwrap();
    stack.present();
    stack
}

/// Open every card in turn, then close the first one, which cascades.
fn open_all_then_close(stack: &mut StackController<()>) {
    for i in 0..stack.len() {
        black_box(stack.toggle(i));
        black_box(stack.settle());
    }
    for i in (0..stack.len()).rev() {
        black_box(stack.toggle(i));
        black_box(stack.settle());
    }
}

fn bench_settle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle_settle");
    for count in 2..=4 {
        group.bench_function(format!("cards_{count}"), |b| {
            b.iter_batched(
                || presented(count),
                |mut stack| open_all_then_close(&mut stack),
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_frame_loop(c: &mut Criterion) {
    c.bench_function("advance_60hz_transition", |b| {
        b.iter_batched(
            || {
                let mut stack = presented(4);
                stack.toggle(0);
                stack
            },
            |mut stack| {
                while stack.is_animating() {
                    black_box(stack.advance(FRAME));
                    black_box(stack.take_damage());
                }
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_tap(c: &mut Criterion) {
    let mut stack = presented(4);
    for i in 0..3 {
        stack.toggle(i);
        stack.settle();
    }
    c.bench_function("tap_hit_test_miss", |b| {
        b.iter(|| black_box(stack.tap(black_box(Point::new(-1.0, -1.0)))));
    });
}

criterion_group!(benches, bench_settle, bench_frame_loop, bench_tap);
criterion_main!(benches);
