use std::time::Duration;

/// A single pending deadline driven by frame time.
///
/// The walk only ever waits on one thing at a time, so one slot is enough,
/// and cancelling the walk is cancelling the slot.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    remaining: Duration,
    payload: T,
}

/// A deadline that came due during `advance`
#[derive(Debug, Clone, PartialEq)]
pub struct Fired<T> {
    pub payload: T,
    /// Part of the advanced time left over after the deadline
    pub overshoot: Duration,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Arm the slot, replacing anything already pending
    pub fn schedule(&mut self, after: Duration, payload: T) {
        self.pending = Some(Pending {
            remaining: after,
            payload,
        });
    }

    /// Drop whatever is pending and return it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.payload)
    }

    /// Let `dt` pass. Fires at most once; the caller re-arms and advances
    /// by the overshoot to chain deadlines within one frame.
    pub fn advance(&mut self, dt: Duration) -> Option<Fired<T>> {
        let pending = self.pending.as_mut()?;

        if dt < pending.remaining {
            pending.remaining -= dt;
            return None;
        }

        let overshoot = dt - pending.remaining;
        self.pending.take().map(|p| Fired {
            payload: p.payload,
            overshoot,
        })
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
