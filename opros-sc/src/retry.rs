//! Submission retry policy
//!
//! An explicit state machine: state is the attempt counter plus the active
//! strategy, transitions happen on failure, terminal states are success
//! and exhausted. The delay between attempts is fixed; there is no backoff
//! growth.

use std::time::Duration;

/// Default total delivery attempts across both strategies
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default delay between attempts in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

/// Wire strategy for one delivery attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// multipart/form-data POST with the JSON document in a `data` field
    Primary,
    /// Raw JSON text body; the POST call completing counts as success
    Alternate,
}

/// Retry tuning, read-only after construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts across both strategies
    pub max_retries: u32,
    /// Fixed wait between consecutive attempts
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// Strategy for a 1-indexed attempt.
    ///
    /// The primary encoding is tried first and retried once when further
    /// attempts remain after it; every later attempt switches to the
    /// alternate encoding. With `max_retries >= 2` the alternate is
    /// therefore always reached before exhaustion.
    pub fn strategy_for(&self, attempt: u32) -> Strategy {
        if attempt <= 1 {
            Strategy::Primary
        } else if attempt == 2 && self.max_retries > 2 {
            Strategy::Primary
        } else {
            Strategy::Alternate
        }
    }

    /// The full attempt schedule, in order
    pub fn schedule(&self) -> Vec<Strategy> {
        (1..=self.max_retries).map(|a| self.strategy_for(a)).collect()
    }
}

/// Progress of one submission through the policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryState {
    policy: RetryPolicy,
    attempt: u32,
}

/// Next transition of the retry machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStep {
    /// Run another attempt with this strategy, waiting `delay_before` first
    Attempt {
        number: u32,
        strategy: Strategy,
        delay_before: Duration,
    },
    /// All attempts used; fail permanently
    Exhausted,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        Self { policy, attempt: 0 }
    }

    /// Advance to the next attempt, or report exhaustion
    pub fn next(&mut self) -> RetryStep {
        if self.attempt >= self.policy.max_retries {
            return RetryStep::Exhausted;
        }
        self.attempt += 1;
        RetryStep::Attempt {
            number: self.attempt,
            strategy: self.policy.strategy_for(self.attempt),
            delay_before: if self.attempt == 1 {
                Duration::ZERO
            } else {
                self.policy.retry_delay
            },
        }
    }

    /// Attempts consumed so far
    pub fn attempts_made(&self) -> u32 {
        self.attempt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Strategy::{Alternate, Primary};

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new(max_retries, Duration::from_millis(10))
    }

    #[test]
    fn test_default_schedule_retries_primary_once_then_switches() {
        assert_eq!(policy(3).schedule(), vec![Primary, Primary, Alternate]);
    }

    #[test]
    fn test_schedule_with_two_attempts_reaches_alternate() {
        assert_eq!(policy(2).schedule(), vec![Primary, Alternate]);
    }

    #[test]
    fn test_schedule_with_single_attempt_never_switches() {
        assert_eq!(policy(1).schedule(), vec![Primary]);
    }

    #[test]
    fn test_longer_schedules_stay_on_alternate() {
        assert_eq!(
            policy(5).schedule(),
            vec![Primary, Primary, Alternate, Alternate, Alternate]
        );
    }

    #[test]
    fn test_state_machine_bounds_attempts() {
        let mut state = RetryState::new(policy(3));
        let mut attempts = 0;
        while let RetryStep::Attempt { .. } = state.next() {
            attempts += 1;
            assert!(attempts <= 3, "state machine must stop at max_retries");
        }
        assert_eq!(attempts, 3);
        assert_eq!(state.attempts_made(), 3);
        // Further polling stays exhausted
        assert_eq!(state.next(), RetryStep::Exhausted);
    }

    #[test]
    fn test_first_attempt_has_no_delay() {
        let mut state = RetryState::new(policy(3));
        match state.next() {
            RetryStep::Attempt {
                number,
                delay_before,
                ..
            } => {
                assert_eq!(number, 1);
                assert_eq!(delay_before, Duration::ZERO);
            }
            RetryStep::Exhausted => panic!("first step must be an attempt"),
        }
        match state.next() {
            RetryStep::Attempt { delay_before, .. } => {
                assert_eq!(delay_before, Duration::from_millis(10));
            }
            RetryStep::Exhausted => panic!("second step must be an attempt"),
        }
    }

    #[test]
    fn test_zero_retries_exhausts_immediately() {
        let mut state = RetryState::new(policy(0));
        assert_eq!(state.next(), RetryStep::Exhausted);
        assert_eq!(state.attempts_made(), 0);
    }
}
