//! Player intent snapshots and the latch that collects them between ticks.
//!
//! Hosts translate keyboard or touch events into [`Intent`] flags. Input
//! changes arrive asynchronously, so they are latched in an [`IntentLatch`]
//! and read once at the top of the next tick.
//!
//! # Example
//!
//! ```
//! use stompline_core::input::{Intent, IntentLatch, Key};
//!
//! let mut latch = IntentLatch::new();
//! latch.key_down(Key::ArrowRight);
//! latch.key_down(Key::Space);
//! assert_eq!(latch.snapshot(), Intent::RIGHT | Intent::JUMP);
//!
//! latch.key_up(Key::Space);
//! assert_eq!(latch.snapshot(), Intent::RIGHT);
//! ```

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Normalized `{left, right, jump}` intent for one tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Intent: u8 {
        /// Move left.
        const LEFT = 1 << 0;
        /// Move right.
        const RIGHT = 1 << 1;
        /// Jump (held).
        const JUMP = 1 << 2;
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::empty()
    }
}

impl Intent {
    /// Builds an intent from three booleans.
    #[must_use]
    pub fn from_controls(left: bool, right: bool, jump: bool) -> Self {
        let mut intent = Self::empty();
        intent.set(Self::LEFT, left);
        intent.set(Self::RIGHT, right);
        intent.set(Self::JUMP, jump);
        intent
    }

    /// Left is held.
    #[must_use]
    pub fn left(self) -> bool {
        self.contains(Self::LEFT)
    }

    /// Right is held.
    #[must_use]
    pub fn right(self) -> bool {
        self.contains(Self::RIGHT)
    }

    /// Jump is held.
    #[must_use]
    pub fn jump(self) -> bool {
        self.contains(Self::JUMP)
    }

    /// Horizontal direction: `-1.0`, `0.0`, or `1.0`.
    ///
    /// Left is checked before right, so holding both moves left.
    #[must_use]
    pub fn horizontal(self) -> f32 {
        if self.left() {
            -1.0
        } else if self.right() {
            1.0
        } else {
            0.0
        }
    }
}

/// Physical keys a keyboard host maps onto intent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// `A`.
    A,
    /// `D`.
    D,
    /// `W`.
    W,
    /// Space bar.
    Space,
}

impl Key {
    /// The intent flag driven by this key.
    #[must_use]
    pub const fn intent(self) -> Intent {
        match self {
            Self::ArrowLeft | Self::A => Intent::LEFT,
            Self::ArrowRight | Self::D => Intent::RIGHT,
            Self::ArrowUp | Self::W | Self::Space => Intent::JUMP,
        }
    }
}

/// Latches discrete input changes until the next tick reads them.
///
/// Touch hosts call [`IntentLatch::replace`] with a whole snapshot; keyboard
/// hosts call [`IntentLatch::key_down`] / [`IntentLatch::key_up`].
#[derive(Debug, Clone, Default)]
pub struct IntentLatch {
    held: Intent,
    changes: u32,
}

impl IntentLatch {
    /// Creates a latch with nothing held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the flags as held.
    pub fn press(&mut self, flags: Intent) {
        if !self.held.contains(flags) {
            self.held.insert(flags);
            self.changes += 1;
        }
    }

    /// Marks the flags as released.
    pub fn release(&mut self, flags: Intent) {
        if self.held.intersects(flags) {
            self.held.remove(flags);
            self.changes += 1;
        }
    }

    /// Replaces the held set wholesale (touch controls).
    pub fn replace(&mut self, intent: Intent) {
        if self.held != intent {
            self.held = intent;
            self.changes += 1;
        }
    }

    /// Handles a key press.
    pub fn key_down(&mut self, key: Key) {
        self.press(key.intent());
    }

    /// Handles a key release.
    pub fn key_up(&mut self, key: Key) {
        self.release(key.intent());
    }

    /// Current intent, as read at the top of a tick.
    #[must_use]
    pub fn snapshot(&self) -> Intent {
        self.held
    }

    /// Number of state changes since the last [`IntentLatch::take_changes`].
    pub fn take_changes(&mut self) -> u32 {
        std::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod intent_tests {
        use super::*;

        #[test]
        fn from_controls_sets_flags() {
            let intent = Intent::from_controls(true, false, true);
            assert!(intent.left());
            assert!(!intent.right());
            assert!(intent.jump());
        }

        #[test]
        fn default_is_empty() {
            assert!(Intent::default().is_empty());
            assert_eq!(Intent::default().horizontal(), 0.0);
        }

        #[test]
        fn left_wins_over_right() {
            let both = Intent::LEFT | Intent::RIGHT;
            assert_eq!(both.horizontal(), -1.0);
        }

        #[test]
        fn right_alone_is_positive() {
            assert_eq!(Intent::RIGHT.horizontal(), 1.0);
        }
    }

    mod latch_tests {
        use super::*;

        #[test]
        fn key_mapping_matches_layout() {
            assert_eq!(Key::A.intent(), Intent::LEFT);
            assert_eq!(Key::D.intent(), Intent::RIGHT);
            assert_eq!(Key::W.intent(), Intent::JUMP);
            assert_eq!(Key::ArrowUp.intent(), Intent::JUMP);
        }

        #[test]
        fn press_and_release_track_held_state() {
            let mut latch = IntentLatch::new();
            latch.key_down(Key::ArrowLeft);
            assert_eq!(latch.snapshot(), Intent::LEFT);
            latch.key_up(Key::ArrowLeft);
            assert!(latch.snapshot().is_empty());
        }

        #[test]
        fn repeated_press_counts_once() {
            let mut latch = IntentLatch::new();
            latch.key_down(Key::Space);
            latch.key_down(Key::W);
            assert_eq!(latch.take_changes(), 1);
            assert_eq!(latch.take_changes(), 0);
        }

        #[test]
        fn release_without_press_is_no_op() {
            let mut latch = IntentLatch::new();
            latch.key_up(Key::D);
            assert!(latch.snapshot().is_empty());
            assert_eq!(latch.take_changes(), 0);
        }

        #[test]
        fn replace_sets_whole_snapshot() {
            let mut latch = IntentLatch::new();
            latch.key_down(Key::A);
            latch.replace(Intent::RIGHT | Intent::JUMP);
            assert_eq!(latch.snapshot(), Intent::RIGHT | Intent::JUMP);
        }
    }
}
