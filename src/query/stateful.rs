//! Column queries that remember earlier evaluations.
//!
//! Both keep their state in a `Cell`, so they are not `Sync`: one instance
//! cannot be shared by reports running on different threads. State is carried
//! across every report the instance takes part in until `reset` is called.

use super::{ColumnQuery, Content};
use crate::error::QueryError;
use crate::types::Endpoint;
use std::cell::Cell;
use std::fmt::Display;

/// Emits `origin`, `origin + 1`, ... one number per evaluation.
///
/// The sequence depends only on how many times this instance was evaluated,
/// in evaluation order. Reusing the instance in a second report continues
/// the sequence. Once `i64::MAX` has been emitted, further evaluations fail.
pub struct Counter {
    label: String,
    origin: i64,
    /// `None` once the sequence has run past `i64::MAX`
    next: Cell<Option<i64>>,
}

impl Counter {
    pub fn new(origin: i64) -> Self {
        Self { label: "counter".to_string(), origin, next: Cell::new(Some(origin)) }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// The value the next evaluation will emit, if any
    pub fn peek(&self) -> Option<i64> {
        self.next.get()
    }

    pub fn reset(&self) {
        self.next.set(Some(self.origin));
    }
}

impl Default for Counter {
    fn default() -> Self {
        Counter::new(1)
    }
}

impl<S> ColumnQuery<S> for Counter {
    fn content(&self, _source: &S) -> Result<Content<'_, S>, QueryError> {
        let current = self
            .next
            .get()
            .ok_or_else(|| QueryError::new(format!("{} overflowed after {}", self.label, i64::MAX)))?;
        self.next.set(current.checked_add(1));
        Ok(Content::Literal(Endpoint::new(current)))
    }

    fn label(&self) -> &str {
        &self.label
    }
}

/// Difference of two readings that reports overflow instead of panicking
pub trait CheckedDelta: Sized {
    fn checked_delta(self, previous: Self) -> Option<Self>;
}

macro_rules! checked_delta_int {
    ($($t:ty),*) => {
        $(impl CheckedDelta for $t {
            fn checked_delta(self, previous: Self) -> Option<Self> {
                self.checked_sub(previous)
            }
        })*
    };
}

macro_rules! checked_delta_float {
    ($($t:ty),*) => {
        $(impl CheckedDelta for $t {
            fn checked_delta(self, previous: Self) -> Option<Self> {
                Some(self - previous)
            }
        })*
    };
}

checked_delta_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
checked_delta_float!(f32, f64);

type Reading<S, T> = Box<dyn Fn(&S) -> Result<T, QueryError>>;

/// Emits the change of a numeric reading since the previous evaluation.
///
/// The first evaluation (or the first after `reset`) has no prior reading and
/// emits `T::default()` (zero). Every evaluation stores the current reading,
/// so the register carries over into later reports.
pub struct RunningDifference<S, T> {
    label: String,
    read: Reading<S, T>,
    previous: Cell<Option<T>>,
    precision: Option<usize>,
}

impl<S: 'static, T> RunningDifference<S, T>
where
    T: Copy + Default + Display + CheckedDelta + 'static,
{
    pub fn new(read: impl Fn(&S) -> T + 'static) -> Self {
        Self::try_new(move |s| Ok(read(s)))
    }

    pub fn try_new(read: impl Fn(&S) -> Result<T, QueryError> + 'static) -> Self {
        Self { label: "running difference".to_string(), read: Box::new(read), previous: Cell::new(None), precision: None }
    }

    /// Print deltas with a fixed number of decimals (floating point readings)
    pub fn with_precision(mut self, decimals: usize) -> Self {
        self.precision = Some(decimals);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Last reading seen, if any
    pub fn previous(&self) -> Option<T> {
        self.previous.get()
    }

    pub fn reset(&self) {
        self.previous.set(None);
    }
}

impl<S, T> ColumnQuery<S> for RunningDifference<S, T>
where
    T: Copy + Default + Display + CheckedDelta,
{
    fn content(&self, source: &S) -> Result<Content<'_, S>, QueryError> {
        let current = (self.read)(source)?;
        let delta = match self.previous.replace(Some(current)) {
            Some(previous) => current.checked_delta(previous).ok_or_else(|| {
                QueryError::new(format!("{} overflowed: {} - {}", self.label, current, previous))
            })?,
            None => T::default(),
        };
        let text = match self.precision {
            Some(decimals) => format!("{:.*}", decimals, delta),
            None => delta.to_string(),
        };
        Ok(Content::Literal(Endpoint::from(text)))
    }

    fn label(&self) -> &str {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal<S>(content: Content<'_, S>) -> String {
        match content {
            Content::Literal(e) => e.into_string(),
            Content::Nested(_) => panic!("expected a literal"),
        }
    }

    #[test]
    fn test_counter_starts_at_origin() {
        let counter = Counter::new(5);
        let values: Vec<String> = (0..3).map(|_| literal(counter.content(&()).unwrap())).collect();
        assert_eq!(values, vec!["5", "6", "7"]);
        assert_eq!(counter.peek(), Some(8));
    }

    #[test]
    fn test_counter_reset() {
        let counter = Counter::default();
        literal(counter.content(&()).unwrap());
        literal(counter.content(&()).unwrap());
        counter.reset();
        assert_eq!(literal(counter.content(&()).unwrap()), "1");
    }

    #[test]
    fn test_counter_emits_max_then_fails() {
        let counter = Counter::new(i64::MAX - 1);
        assert_eq!(literal(counter.content(&()).unwrap()), (i64::MAX - 1).to_string());
        assert_eq!(literal(counter.content(&()).unwrap()), i64::MAX.to_string());
        assert_eq!(counter.peek(), None);
        assert!(counter.content(&()).is_err());
        counter.reset();
        assert_eq!(counter.peek(), Some(i64::MAX - 1));
    }

    #[test]
    fn test_counter_starting_at_max() {
        let counter = Counter::new(i64::MAX);
        assert_eq!(literal(counter.content(&()).unwrap()), i64::MAX.to_string());
        assert!(counter.content(&()).is_err());
    }

    #[test]
    fn test_running_difference_overflow_is_an_error() {
        let diff = RunningDifference::new(|v: &i64| *v).with_label("swing");
        assert_eq!(literal(diff.content(&i64::MIN).unwrap()), "0");
        let err = match diff.content(&i64::MAX) {
            Err(err) => err,
            Ok(_) => panic!("expected an overflow error"),
        };
        assert!(err.message.starts_with("swing overflowed"), "{}", err);
        // The register still moves on, so the next small step works
        assert_eq!(literal(diff.content(&(i64::MAX - 2)).unwrap()), "-2");
    }

    #[test]
    fn test_running_difference_baseline_then_deltas() {
        let diff = RunningDifference::new(|v: &i64| *v);
        assert_eq!(literal(diff.content(&10).unwrap()), "0");
        assert_eq!(diff.previous(), Some(10));
        assert_eq!(literal(diff.content(&14).unwrap()), "4");
        assert_eq!(literal(diff.content(&9).unwrap()), "-5");
        assert_eq!(diff.previous(), Some(9));
    }

    #[test]
    fn test_running_difference_precision() {
        let diff = RunningDifference::new(|v: &f64| *v).with_precision(2);
        assert_eq!(literal(diff.content(&0.2).unwrap()), "0.00");
        assert_eq!(literal(diff.content(&0.5).unwrap()), "0.30");
    }

    #[test]
    fn test_running_difference_failed_read_keeps_register() {
        let diff = RunningDifference::try_new(|v: &i64| {
            if *v < 0 { Err(QueryError::new("negative reading")) } else { Ok(*v) }
        });
        literal(diff.content(&3).unwrap());
        assert!(diff.content(&-1).is_err());
        assert_eq!(diff.previous(), Some(3));
        diff.reset();
        assert_eq!(diff.previous(), None);
    }
}
