//! Rotary encoder quadrature decoding
//!
//! Decodes quadrature transitions from pin-change interrupts into a signed
//! step count.
//!
//! Quadrature encoding (code = A << 1 | B):
//! CW:  00 -> 01 -> 11 -> 10 -> 00
//! CCW: 00 -> 10 -> 11 -> 01 -> 00
//!
//! Any other transition (both lines changing at once, or no change) is
//! bounce and contributes nothing.

use portable_atomic::{AtomicI32, AtomicU8, Ordering};
use uvlamp_hal::InputPin;

/// Step contribution indexed by `(previous << 2) | current`
const TRANSITIONS: [i8; 16] = [
    // prev=00: 00, 01, 10, 11
    0, 1, -1, 0,
    // prev=01: 00, 01, 10, 11
    -1, 0, 0, 1,
    // prev=10: 00, 01, 10, 11
    1, 0, 0, -1,
    // prev=11: 00, 01, 10, 11
    0, -1, 1, 0,
];

/// Combine both line levels into a 2-bit quadrature code
pub fn quadrature_code(a: bool, b: bool) -> u8 {
    ((a as u8) << 1) | (b as u8)
}

/// Step for a transition between two 2-bit codes (-1, 0 or +1)
pub fn transition_step(previous: u8, current: u8) -> i8 {
    TRANSITIONS[(((previous & 0b11) << 2) | (current & 0b11)) as usize]
}

/// Encoder mailbox shared between the edge handler and the control loop
///
/// The last code is only touched by the producer. The accumulated delta is
/// drained by the consumer with a single atomic swap, so an edge arriving
/// mid-drain is either counted now or on the next iteration, never lost.
pub struct EncoderMailbox {
    last_code: AtomicU8,
    delta: AtomicI32,
}

impl Default for EncoderMailbox {
    fn default() -> Self {
        Self::new()
    }
}

impl EncoderMailbox {
    /// Create an empty mailbox (usable in a `static`)
    pub const fn new() -> Self {
        Self {
            last_code: AtomicU8::new(0),
            delta: AtomicI32::new(0),
        }
    }

    /// Record the resting line levels before edge handling starts
    pub fn prime(&self, a: bool, b: bool) {
        self.last_code.store(quadrature_code(a, b), Ordering::Relaxed);
    }

    /// Record the resting levels of both encoder lines
    pub fn prime_from<P: InputPin>(&self, a: &P, b: &P) {
        self.prime(a.is_high(), b.is_high());
    }

    /// Producer side: handle one edge given the current line levels
    pub fn on_edge(&self, a: bool, b: bool) {
        let current = quadrature_code(a, b);
        let previous = self.last_code.swap(current, Ordering::Relaxed);

        let step = transition_step(previous, current);
        if step != 0 {
            self.delta.fetch_add(step as i32, Ordering::AcqRel);
        }
    }

    /// Producer side: sample both lines and handle the edge
    pub fn sample<P: InputPin>(&self, a: &P, b: &P) {
        self.on_edge(a.is_high(), b.is_high());
    }

    /// Consumer side: drain the accumulated delta and reset it to zero
    pub fn take_delta(&self) -> i32 {
        self.delta.swap(0, Ordering::AcqRel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Clockwise code order
    const CW: [u8; 4] = [0b00, 0b01, 0b11, 0b10];

    fn feed(mailbox: &EncoderMailbox, code: u8) {
        mailbox.on_edge(code & 0b10 != 0, code & 0b01 != 0);
    }

    #[test]
    fn test_full_detent_clockwise() {
        let mailbox = EncoderMailbox::new();
        mailbox.prime(false, false);

        for code in [0b01, 0b11, 0b10, 0b00] {
            feed(&mailbox, code);
        }

        assert_eq!(mailbox.take_delta(), 4);
        assert_eq!(mailbox.take_delta(), 0);
    }

    #[test]
    fn test_full_detent_counter_clockwise() {
        let mailbox = EncoderMailbox::new();
        mailbox.prime(false, false);

        for code in [0b10, 0b11, 0b01, 0b00] {
            feed(&mailbox, code);
        }

        assert_eq!(mailbox.take_delta(), -4);
    }

    #[test]
    fn test_invalid_transitions_ignored() {
        // Both lines changing at once carries no direction
        assert_eq!(transition_step(0b00, 0b11), 0);
        assert_eq!(transition_step(0b01, 0b10), 0);
        assert_eq!(transition_step(0b11, 0b00), 0);
        assert_eq!(transition_step(0b10, 0b01), 0);

        // Repeated code (edge with no level change)
        for code in 0..4 {
            assert_eq!(transition_step(code, code), 0);
        }
    }

    #[test]
    fn test_bounce_cancels_out() {
        let mailbox = EncoderMailbox::new();
        mailbox.prime(false, false);

        // Contact chatter on line B
        for code in [0b01, 0b00, 0b01, 0b00, 0b01] {
            feed(&mailbox, code);
        }

        assert_eq!(mailbox.take_delta(), 1);
    }

    #[test]
    fn test_sample_reads_pins() {
        struct Level(bool);
        impl InputPin for Level {
            fn is_high(&self) -> bool {
                self.0
            }
        }

        let mailbox = EncoderMailbox::new();
        mailbox.prime(false, false);
        mailbox.sample(&Level(false), &Level(true));

        assert_eq!(mailbox.take_delta(), 1);
    }

    #[test]
    fn test_prime_from_resting_position() {
        struct Level(bool);
        impl InputPin for Level {
            fn is_high(&self) -> bool {
                self.0
            }
        }

        // Pull-ups: an encoder parked on a detent reads 11
        let mailbox = EncoderMailbox::new();
        mailbox.prime_from(&Level(true), &Level(true));
        mailbox.sample(&Level(true), &Level(false));

        assert_eq!(mailbox.take_delta(), 1);
    }

    proptest! {
        /// Walk the code wheel with random steps, bounces and skipped codes;
        /// the drained delta is always CW steps minus CCW steps.
        #[test]
        fn prop_delta_matches_steps(ops in prop::collection::vec(0u8..4, 0..256)) {
            let mailbox = EncoderMailbox::new();
            mailbox.prime(false, false);

            let mut position = 0usize;
            let mut expected = 0i32;
            let mut drained = 0i32;

            for (i, op) in ops.iter().enumerate() {
                match op {
                    0 => {
                        position = (position + 1) % 4;
                        expected += 1;
                    }
                    1 => {
                        position = (position + 3) % 4;
                        expected -= 1;
                    }
                    // Skipped code: both lines flipped between edges
                    2 => position = (position + 2) % 4,
                    // Bounce: edge with unchanged levels
                    _ => {}
                }
                feed(&mailbox, CW[position]);

                if i % 7 == 0 {
                    drained += mailbox.take_delta();
                }
            }
            drained += mailbox.take_delta();

            prop_assert_eq!(drained, expected);
        }
    }
}
