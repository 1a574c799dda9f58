//! Count-down completion barrier.
//!
//! N tick animations finish independently; the caller wants to hear about
//! it once.  The barrier hands its payload out on the N-th arrival and never
//! again.

#[derive(Debug)]
pub struct CompletionBarrier<T> {
    remaining: usize,
    payload: Option<T>,
}

impl<T> CompletionBarrier<T> {
    /// Barrier released after `count` arrivals (at least one).
    pub fn new(count: usize, payload: T) -> Self {
        Self {
            remaining: count.max(1),
            payload: Some(payload),
        }
    }

    /// Record one arrival.  Returns the payload on the last one.
    pub fn arrive(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        if self.remaining == 0 {
            self.payload.take()
        } else {
            None
        }
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn releases_exactly_once_on_the_last_arrival() {
        let mut barrier = CompletionBarrier::new(3, "done");
        assert_eq!(barrier.arrive(), None);
        assert_eq!(barrier.arrive(), None);
        assert_eq!(barrier.remaining(), 1);
        assert_eq!(barrier.arrive(), Some("done"));
        assert_eq!(barrier.arrive(), None);
        assert_eq!(barrier.remaining(), 0);
    }

    #[test]
    fn zero_count_behaves_like_one() {
        let mut barrier = CompletionBarrier::new(0, 7);
        assert_eq!(barrier.arrive(), Some(7));
    }
}
