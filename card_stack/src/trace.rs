// Copyright 2025 the Card Stack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Feature-gated diagnostics.
//!
//! With the `tracing` feature off every macro here expands to an empty block,
//! so call sites cost nothing. With it on they forward to the `tracing` crate.

/// Lifecycle events: present, toggles, completions.
macro_rules! debug_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::debug!($($arg)*);
        }
    }};
}

/// Per-card detail inside a toggle (cascade steps, opacity writes).
macro_rules! trace_event {
    ($($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        {
            tracing::trace!($($arg)*);
        }
    }};
}
