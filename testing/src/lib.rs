//! # Todo Board Testing
//!
//! Testing utilities for reducers and stores:
//! - [`ReducerTest`]: Given-When-Then harness for reducers
//! - [`mocks`]: deterministic environment implementations
//! - [`properties`]: reusable property checks for proptest suites
//!
//! ## Example
//!
//! ```ignore
//! use todo_board_testing::{test_clock, ReducerTest};
//!
//! ReducerTest::new(TodoReducer::new())
//!     .with_env(TodoEnvironment::new(Arc::new(test_clock())))
//!     .given_state(TodoState::new())
//!     .when_action(TodoAction::DeleteTodo { id: TodoId::new(9) })
//!     .then_state(|state| assert!(state.last_error.is_some()))
//!     .run();
//! ```


pub use reducer_test::ReducerTest;

use chrono::{DateTime, Utc};
use todo_board_core::environment::Clock;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// ```
    /// use todo_board_testing::mocks::FixedClock;
    /// use todo_board_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::days(20_089))
    }
}

/// Property checks shared by proptest suites
pub mod properties {
    /// Returns true if `output` is a stable partition of `input` by `class`
    ///
    /// `output` must hold exactly the elements of `input`, grouped so that
    /// classes appear in non-decreasing order, with each class keeping its
    /// relative input order.
    pub fn is_stable_partition<T, K, F>(input: &[T], output: &[T], class: F) -> bool
    where
        T: PartialEq,
        K: Ord,
        F: Fn(&T) -> K,
    {
        if input.len() != output.len() {
            return false;
        }

        let classes_sorted = output.windows(2).all(|w| class(&w[0]) <= class(&w[1]));
        if !classes_sorted {
            return false;
        }

        // Each class, read in output order, must equal the same class read in
        // input order.
        output.iter().all(|item| {
            let key = class(item);
            let from_input = input.iter().filter(|t| class(t) == key);
            let from_output = output.iter().filter(|t| class(t) == key);
            from_input.eq(from_output)
        })
    }
}

/// Install a `tracing` subscriber that writes through the test harness
///
/// Safe to call from every test; only the first call installs.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub use mocks::{FixedClock, test_clock};
