// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Card stack walkthrough.
//!
//! Build four colored cards, route a few taps through the controller, and print the
//! state after each step. Set `RUST_LOG=card_stack=trace` to see the controller's events.
//!
//! Run:
//! - `cargo run -p card_stack_demos --example stack_walkthrough`

use card_stack::{Card, CardContent, Rgba8, StackController};
use card_stack_surface::Surface;
use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;

struct Panel {
    title: &'static str,
    color: Rgba8,
}

impl CardContent for Panel {
    fn background(&self) -> Option<Rgba8> {
        Some(self.color)
    }
}

fn print_stack(label: &str, stack: &StackController<Panel>) {
    println!("-- {label}");
    for (i, card) in stack.cards().iter().enumerate() {
        let frame = stack.frame(i).unwrap_or(Rect::ZERO);
        println!(
            "  {} {:<12} {:?} rendered={} top={:>6.1} opacity={:.2}",
            card.indicator().symbol(),
            card.content().title,
            card.state(),
            stack.is_rendered(i),
            frame.y0,
            card.opacity(),
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cards = [
        ("First View", Rgba8::rgb(255, 59, 48)),
        ("Second View", Rgba8::rgb(0, 122, 255)),
        ("Third View", Rgba8::rgb(255, 149, 0)),
        ("Fourth View", Rgba8::rgb(52, 199, 89)),
    ]
    .into_iter()
    .map(|(title, color)| Card::new(Panel { title, color }))
    .collect();

    let surface = Surface::new(Rect::new(0.0, 0.0, 390.0, 844.0));
    let mut stack = match StackController::new(surface, cards) {
        Ok(stack) => stack,
        Err(err) => {
            eprintln!("cannot build the stack: {err}");
            return;
        }
    };
    stack.present();
    print_stack("presented", &stack);

    // Taps land on the strip peeking above the bottom edge.
    let peek = Point::new(195.0, 820.0);
    for step in ["open first", "open second", "open third"] {
        let outcome = stack.tap(peek);
        let _ = stack.settle();
        print_stack(&format!("{step}: {outcome:?}"), &stack);
    }

    // The first card sits 50 points from the top; tapping it is refused while the second is open.
    let outcome = stack.tap(Point::new(195.0, 60.0));
    print_stack(&format!("tap first card: {outcome:?}"), &stack);

    // Close the second card, which closes everything after it.
    let outcome = stack.toggle(1);
    let _ = stack.settle();
    print_stack(&format!("close second: {outcome:?}"), &stack);
}
