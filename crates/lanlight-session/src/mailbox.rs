//! Per-sequence mailbox shared by the socket reader and waiting callers.
//!
//! Every lookup, registration and delivery happens under one lock, so a
//! response is either handed to a registered waiter or parked for a later
//! one, never both and never neither.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use lanlight_frame::Response;
use tokio::sync::oneshot;

/// Outcome of handing a response to the mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// A waiter for the sequence took it.
    Waiter,
    /// Nobody was waiting; parked until it expires or is claimed.
    Parked,
    /// The mailbox is closed; dropped.
    Dropped,
}

/// Outcome of registering interest in a sequence.
#[derive(Debug)]
pub enum Registration {
    /// A fresh parked response was already waiting.
    Ready(Response),
    /// Await the response on this waiter.
    Waiting(Waiter),
    /// The reader has stopped.
    Closed,
}

#[derive(Debug, Default)]
struct State {
    waiters: HashMap<u8, VecDeque<oneshot::Sender<Response>>>,
    parked: HashMap<u8, Response>,
    closed: bool,
}

/// Pending-response mailbox keyed by sequence number.
#[derive(Debug)]
pub struct Mailbox {
    expiry: Duration,
    state: Mutex<State>,
}

impl Mailbox {
    /// Parked responses older than `expiry` are treated as absent.
    pub fn new(expiry: Duration) -> Arc<Self> {
        Arc::new(Self {
            expiry,
            state: Mutex::new(State::default()),
        })
    }

    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Claim a fresh parked response for `sequence`, or register a waiter.
    pub fn register(self: &Arc<Self>, sequence: u8, now: Instant) -> Registration {
        let mut state = self.lock();
        if state.closed {
            return Registration::Closed;
        }

        if let Some(parked) = state.parked.remove(&sequence) {
            if self.is_fresh(&parked, now) {
                return Registration::Ready(parked);
            }
        }

        let (tx, rx) = oneshot::channel();
        state.waiters.entry(sequence).or_default().push_back(tx);

        Registration::Waiting(Waiter {
            sequence,
            rx: Some(rx),
            mailbox: Arc::clone(self),
        })
    }

    /// Hand `response` to the oldest live waiter for its sequence, or park it.
    pub fn deliver(&self, response: Response) -> Delivery {
        let mut state = self.lock();
        if state.closed {
            return Delivery::Dropped;
        }

        let sequence = response.sequence;
        let mut response = response;
        if let Some(queue) = state.waiters.get_mut(&sequence) {
            while let Some(tx) = queue.pop_front() {
                match tx.send(response) {
                    Ok(()) => {
                        if queue.is_empty() {
                            state.waiters.remove(&sequence);
                        }
                        return Delivery::Waiter;
                    }
                    Err(returned) => response = returned,
                }
            }
            state.waiters.remove(&sequence);
        }

        state.parked.insert(sequence, response);
        Delivery::Parked
    }

    /// Stop accepting responses and wake every waiter.
    pub fn close(&self) {
        let mut state = self.lock();
        state.closed = true;
        state.waiters.clear();
        state.parked.clear();
    }

    pub fn is_closed(&self) -> bool {
        self.lock().closed
    }

    /// Number of parked responses, stale ones included.
    pub fn parked_len(&self) -> usize {
        self.lock().parked.len()
    }

    fn release(&self, sequence: u8) {
        let mut state = self.lock();
        if let Some(queue) = state.waiters.get_mut(&sequence) {
            queue.retain(|tx| !tx.is_closed());
            if queue.is_empty() {
                state.waiters.remove(&sequence);
            }
        }
    }

    fn is_fresh(&self, response: &Response, now: Instant) -> bool {
        now.saturating_duration_since(response.received_at) < self.expiry
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // State stays consistent across a panicking holder; keep serving.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A registered interest in one sequence number.
///
/// Dropping the waiter unregisters it.
#[derive(Debug)]
pub struct Waiter {
    sequence: u8,
    rx: Option<oneshot::Receiver<Response>>,
    mailbox: Arc<Mailbox>,
}

impl Waiter {
    pub fn sequence(&self) -> u8 {
        self.sequence
    }

    /// Wait for the matching response. `None` once the mailbox is closed.
    pub async fn recv(&mut self) -> Option<Response> {
        self.rx.as_mut()?.await.ok()
    }
}

impl Drop for Waiter {
    fn drop(&mut self) {
        drop(self.rx.take());
        self.mailbox.release(self.sequence);
    }
}

#[cfg(test)]
mod tests {
    use lanlight_frame::ResponsePayload;

    use super::*;

    const EXPIRY: Duration = Duration::from_secs(5);

    fn ack(sequence: u8, received_at: Instant) -> Response {
        Response {
            sequence,
            payload: ResponsePayload::Empty,
            received_at,
        }
    }

    fn expect_waiting(registration: Registration) -> Waiter {
        match registration {
            Registration::Waiting(waiter) => waiter,
            other => panic!("expected waiter, got {other:?}"),
        }
    }

    #[test]
    fn unclaimed_response_is_parked_and_claimed_once() {
        let mailbox = Mailbox::new(EXPIRY);
        let now = Instant::now();

        assert_eq!(mailbox.deliver(ack(4, now)), Delivery::Parked);
        assert!(matches!(
            mailbox.register(4, now),
            Registration::Ready(r) if r.sequence == 4
        ));
        // Consumed on claim.
        let _waiter = expect_waiting(mailbox.register(4, now));
        assert_eq!(mailbox.parked_len(), 0);
    }

    #[test]
    fn stale_parked_response_is_ignored() {
        let mailbox = Mailbox::new(Duration::from_millis(100));
        let received = Instant::now();
        mailbox.deliver(ack(8, received));

        let later = received + Duration::from_millis(100);
        let _waiter = expect_waiting(mailbox.register(8, later));
        assert_eq!(mailbox.parked_len(), 0);
    }

    #[test]
    fn parked_response_just_inside_window_is_returned() {
        let mailbox = Mailbox::new(Duration::from_millis(100));
        let received = Instant::now();
        mailbox.deliver(ack(8, received));

        let later = received + Duration::from_millis(99);
        assert!(matches!(mailbox.register(8, later), Registration::Ready(_)));
    }

    #[test]
    fn newer_response_replaces_parked_one() {
        let mailbox = Mailbox::new(EXPIRY);
        let first = Instant::now();
        let second = first + Duration::from_millis(10);
        mailbox.deliver(ack(1, first));
        mailbox.deliver(ack(1, second));

        match mailbox.register(1, second) {
            Registration::Ready(r) => assert_eq!(r.received_at, second),
            other => panic!("expected ready, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn registered_waiter_receives_delivery() {
        let mailbox = Mailbox::new(EXPIRY);
        let mut waiter = expect_waiting(mailbox.register(12, Instant::now()));

        assert_eq!(mailbox.deliver(ack(12, Instant::now())), Delivery::Waiter);
        let response = waiter.recv().await.unwrap();
        assert_eq!(response.sequence, 12);
        assert_eq!(mailbox.parked_len(), 0);
    }

    #[tokio::test]
    async fn other_sequences_are_parked_not_misdelivered() {
        let mailbox = Mailbox::new(EXPIRY);
        let mut waiter = expect_waiting(mailbox.register(1, Instant::now()));

        assert_eq!(mailbox.deliver(ack(2, Instant::now())), Delivery::Parked);
        assert_eq!(mailbox.deliver(ack(1, Instant::now())), Delivery::Waiter);
        assert_eq!(waiter.recv().await.unwrap().sequence, 1);
        assert!(matches!(
            mailbox.register(2, Instant::now()),
            Registration::Ready(r) if r.sequence == 2
        ));
    }

    #[tokio::test]
    async fn dropped_waiter_unregisters() {
        let mailbox = Mailbox::new(EXPIRY);
        let waiter = expect_waiting(mailbox.register(3, Instant::now()));
        drop(waiter);

        assert_eq!(mailbox.deliver(ack(3, Instant::now())), Delivery::Parked);
    }

    #[tokio::test]
    async fn reused_sequence_serves_oldest_waiter_first() {
        let mailbox = Mailbox::new(EXPIRY);
        let mut first = expect_waiting(mailbox.register(9, Instant::now()));
        let mut second = expect_waiting(mailbox.register(9, Instant::now()));

        let t1 = Instant::now();
        let t2 = t1 + Duration::from_millis(1);
        mailbox.deliver(ack(9, t1));
        mailbox.deliver(ack(9, t2));

        assert_eq!(first.recv().await.unwrap().received_at, t1);
        assert_eq!(second.recv().await.unwrap().received_at, t2);
    }

    #[tokio::test]
    async fn close_wakes_waiters() {
        let mailbox = Mailbox::new(EXPIRY);
        let mut waiter = expect_waiting(mailbox.register(5, Instant::now()));

        mailbox.close();
        assert!(waiter.recv().await.is_none());
        assert!(matches!(
            mailbox.register(5, Instant::now()),
            Registration::Closed
        ));
        assert_eq!(mailbox.deliver(ack(5, Instant::now())), Delivery::Dropped);
    }
}
