use std::sync::atomic::{AtomicU8, Ordering};

/// Hands out wrap-around 8-bit sequence numbers.
///
/// Values only need to be unique among requests that are in flight at the
/// same time; reuse after 256 allocations is expected.
#[derive(Debug, Default)]
pub struct Sequencer {
    last: AtomicU8,
}

impl Sequencer {
    /// The first allocated sequence is 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue after `last`; the next allocation is `last + 1`.
    pub fn starting_after(last: u8) -> Self {
        Self {
            last: AtomicU8::new(last),
        }
    }

    /// Allocate the next sequence number.
    pub fn next(&self) -> u8 {
        self.last.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }
}
