//! Keyboard input boundary
//!
//! The key-event source writes flags through a [`SharedInput`] handle; the
//! session takes one [`InputFlags`] snapshot at the start of every frame.
//! Flags are packed into a single atomic byte so a snapshot is never torn.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Directions and trigger held during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

/// One controllable flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

impl Control {
    const fn bit(self) -> u8 {
        match self {
            Control::Left => 1 << 0,
            Control::Right => 1 << 1,
            Control::Up => 1 << 2,
            Control::Down => 1 << 3,
            Control::Fire => 1 << 4,
        }
    }

    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Control::Left),
            "ArrowRight" => Some(Control::Right),
            "ArrowUp" => Some(Control::Up),
            "ArrowDown" => Some(Control::Down),
            " " => Some(Control::Fire),
            _ => None,
        }
    }
}

impl InputFlags {
    fn from_bits(bits: u8) -> Self {
        Self {
            left: bits & Control::Left.bit() != 0,
            right: bits & Control::Right.bit() != 0,
            up: bits & Control::Up.bit() != 0,
            down: bits & Control::Down.bit() != 0,
            fire: bits & Control::Fire.bit() != 0,
        }
    }

    fn to_bits(self) -> u8 {
        let mut bits = 0;
        for (held, control) in [
            (self.left, Control::Left),
            (self.right, Control::Right),
            (self.up, Control::Up),
            (self.down, Control::Down),
            (self.fire, Control::Fire),
        ] {
            if held {
                bits |= control.bit();
            }
        }
        bits
    }
}

/// Cloneable, thread-safe handle to the current input flags
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    bits: Arc<AtomicU8>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press or release one control
    pub fn set(&self, control: Control, held: bool) {
        if held {
            self.bits.fetch_or(control.bit(), Ordering::AcqRel);
        } else {
            self.bits.fetch_and(!control.bit(), Ordering::AcqRel);
        }
    }

    /// Replace every flag at once
    pub fn store(&self, flags: InputFlags) {
        self.bits.store(flags.to_bits(), Ordering::Release);
    }

    /// Apply a key event; returns false for unmapped keys
    pub fn apply_key(&self, key: &str, pressed: bool) -> bool {
        match Control::from_key(key) {
            Some(control) => {
                self.set(control, pressed);
                true
            }
            None => false,
        }
    }

    /// Release everything (e.g. when the window loses focus)
    pub fn clear(&self) {
        self.bits.store(0, Ordering::Release);
    }

    pub fn snapshot(&self) -> InputFlags {
        InputFlags::from_bits(self.bits.load(Ordering::Acquire))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        let input = SharedInput::new();
        assert!(input.apply_key("ArrowLeft", true));
        assert!(input.apply_key(" ", true));
        assert!(!input.apply_key("a", true));

        let flags = input.snapshot();
        assert!(flags.left && flags.fire);
        assert!(!flags.right && !flags.up && !flags.down);

        input.apply_key("ArrowLeft", false);
        assert!(!input.snapshot().left);
        assert!(input.snapshot().fire);
    }

    #[test]
    fn test_clones_share_flags() {
        let writer = SharedInput::new();
        let reader = writer.clone();
        writer.set(Control::Down, true);
        assert!(reader.snapshot().down);
        reader.clear();
        assert_eq!(writer.snapshot(), InputFlags::default());
    }

    #[test]
    fn test_store_round_trips_all_flags() {
        let input = SharedInput::new();
        let flags = InputFlags {
            left: true,
            right: false,
            up: true,
            down: false,
            fire: true,
        };
        input.store(flags);
        assert_eq!(input.snapshot(), flags);
    }

    #[test]
    fn test_writes_from_another_thread() {
        let input = SharedInput::new();
        let writer = input.clone();
        std::thread::spawn(move || writer.set(Control::Right, true))
            .join()
            .expect("writer thread");
        assert!(input.snapshot().right);
    }
}
