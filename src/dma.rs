//! DMA channel activation contract (§3.1, §4.1 scheduler ordering). Actual
//! memory-to-memory transfer is out of scope; this stand-in only tracks
//! which of the four channels are armed and when they're due to run, so
//! ordering relative to timers/audio can be exercised.

use crate::scheduler::SchedulerParticipant;

#[derive(Clone, Copy, Debug, Default)]
pub struct Channel {
    pub active: bool,
    pub next_event: i32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Dma {
    pub channels: [Channel; 4],
}

impl Dma {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn activate(&mut self, channel: usize, at_cycle: i32) {
        self.channels[channel].active = true;
        self.channels[channel].next_event = at_cycle;
    }
}

impl SchedulerParticipant for Dma {
    fn process_events(&mut self, cycles: i32) -> i32 {
        let mut next_event = i32::MAX;
        for channel in self.channels.iter_mut() {
            if !channel.active {
                continue;
            }
            channel.next_event -= cycles;
            if channel.next_event <= 0 {
                channel.active = false;
                continue;
            }
            next_event = next_event.min(channel.next_event);
        }
        next_event
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_channels_never_win_the_scheduler_fold() {
        let mut dma = Dma::new();
        assert_eq!(dma.process_events(100), i32::MAX);
    }

    #[test]
    fn active_channel_reports_its_remaining_cycles() {
        let mut dma = Dma::new();
        dma.activate(0, 50);
        assert_eq!(dma.process_events(10), 40);
    }
}
