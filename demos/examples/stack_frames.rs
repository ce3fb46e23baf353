// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-by-frame transition.
//!
//! Drive the controller from a simulated 60 Hz frame loop and print the presented frame of
//! the first card while it slides up, plus the damage each frame produces.
//!
//! Run:
//! - `cargo run -p card_stack_demos --example stack_frames`

use core::time::Duration;

use card_stack::{Card, StackController};
use card_stack_surface::Surface;
use kurbo::Rect;

const FRAME: Duration = Duration::from_micros(16_667);

fn main() {
    let cards = (0..2).map(|_| Card::new(())).collect();
    let surface = Surface::new(Rect::new(0.0, 0.0, 390.0, 844.0));
    let mut stack = StackController::new(surface, cards).expect("two cards are accepted");
    stack.present();
    let _ = stack.take_damage();

    println!("toggle: {:?}", stack.toggle(0));
    let mut frame = 0;
    while stack.is_animating() {
        frame += 1;
        let completed = stack.advance(FRAME);
        let top = stack.presented_frame(0).map_or(0.0, |r| r.y0);
        let damage = stack.take_damage();
        println!(
            "frame {frame:>2} t={:>6.1}ms top={top:>6.1} damage={:?}",
            stack.now().as_secs_f64() * 1000.0,
            damage.union_rect(),
        );
        for done in completed {
            println!("  completed: {done:?}");
        }
    }
    assert!(stack.is_rendered(1), "second card is revealed after the slide");
}
