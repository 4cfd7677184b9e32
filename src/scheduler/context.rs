use crate::sample::Timestamp;

/// Tick number, wrapping at 100.
#[must_use]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct TickCounter(u8);

impl TickCounter {
    const MODULUS: u8 = 100;

    /// Move on to the next tick and return its number.
    pub const fn advance(&mut self) -> u8 {
        self.0 = (self.0 + 1) % Self::MODULUS;
        self.0
    }
}

/// State carried between the polling ticks.
#[derive(Default)]
pub struct SchedulerContext {
    pub counter: TickCounter,

    /// Timestamp of the most recent metric sample.
    pub last_timestamp: Option<Timestamp>,
}
