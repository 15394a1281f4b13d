//! The audio FIFO collaborator contract (§3.1, §4.2's timer-driven sampling
//! hook). The mixer and channel state themselves are out of scope; this
//! module only defines what the timer array needs to drive FIFO sampling in
//! the right order.

/// What a timer overflow needs from the audio collaborator to decide whether
/// (and which) FIFO should be resampled.
pub trait FifoSource {
    /// Whether the sound controller is powered on at all.
    fn enabled(&self) -> bool;

    /// Whether DMA channel A (0) or B (1) currently has an active side
    /// (left, right, or both) routed to the mixer.
    fn channel_active(&self, channel: u8) -> bool;

    /// Which timer (0 or 1) drives `channel`'s FIFO consumption.
    fn channel_timer(&self, channel: u8) -> u8;

    /// Consume one sample from `channel`'s FIFO. `late_by` is how far past
    /// the ideal sample point the scheduler already was (always `<= 0`),
    /// mirroring the source's practice of passing timing slop through to
    /// the DMA refill decision rather than silently dropping it.
    fn sample_fifo(&mut self, channel: u8, late_by: i32);
}

/// A collaborator stand-in that never routes anything. Used by callers (and
/// tests) that only care about timer/interrupt behavior.
pub struct NullAudio;

impl FifoSource for NullAudio {
    fn enabled(&self) -> bool {
        false
    }

    fn channel_active(&self, _channel: u8) -> bool {
        false
    }

    fn channel_timer(&self, _channel: u8) -> u8 {
        0
    }

    fn sample_fifo(&mut self, _channel: u8, _late_by: i32) {}
}

/// A minimal in-core FIFO router exercising ordering and routing contracts
/// without implementing the mixer itself (§3.1).
#[derive(Clone, Copy, Debug, Default)]
pub struct FifoRouter {
    pub powered_on: bool,
    pub channel_a_timer: u8,
    pub channel_b_timer: u8,
    pub channel_a_active: bool,
    pub channel_b_active: bool,
    pub samples_taken: [u32; 2],
}

impl FifoSource for FifoRouter {
    fn enabled(&self) -> bool {
        self.powered_on
    }

    fn channel_active(&self, channel: u8) -> bool {
        match channel {
            0 => self.channel_a_active,
            1 => self.channel_b_active,
            _ => false,
        }
    }

    fn channel_timer(&self, channel: u8) -> u8 {
        match channel {
            0 => self.channel_a_timer,
            1 => self.channel_b_timer,
            _ => u8::MAX,
        }
    }

    fn sample_fifo(&mut self, channel: u8, _late_by: i32) {
        if let Some(slot) = self.samples_taken.get_mut(channel as usize) {
            *slot += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_only_samples_the_channel_bound_to_the_overflowing_timer() {
        let mut router = FifoRouter {
            powered_on: true,
            channel_a_timer: 0,
            channel_b_timer: 1,
            channel_a_active: true,
            channel_b_active: true,
            samples_taken: [0, 0],
        };
        assert!(router.channel_active(0) && router.channel_timer(0) == 0);
        router.sample_fifo(0, 0);
        assert_eq!(router.samples_taken, [1, 0]);
    }
}
