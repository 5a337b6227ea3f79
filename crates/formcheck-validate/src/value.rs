//! The closed set of value shapes a check can evaluate.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};

/// A borrowed view of the value under validation.
///
/// Callers convert their data with `From` (`&str`, numbers, `bool`,
/// slices and collections, `Option<T>`, date pairs) instead of handing the
/// engine an untyped value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value<'a> {
    /// No value (`None`)
    Absent,
    /// A boolean
    Bool(bool),
    /// Any numeric value, widened to `f64`
    Number(f64),
    /// A string
    Text(&'a str),
    /// A collection, represented by its element count
    Collection(usize),
    /// A start/end instant pair
    Period {
        /// Start of the period
        start: DateTime<Utc>,
        /// End of the period
        end: DateTime<Utc>,
    },
}

impl<'a> Value<'a> {
    /// Build a date pair from two instants in any time zone.
    pub fn period<Tz: TimeZone>(start: &DateTime<Tz>, end: &DateTime<Tz>) -> Self {
        Value::Period {
            start: start.with_timezone(&Utc),
            end: end.with_timezone(&Utc),
        }
    }

    /// Short name of the value's shape, used in misuse reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Absent => "absent",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Collection(_) => "collection",
            Value::Period { .. } => "period",
        }
    }

    /// Length of a text (Unicode scalar values) or collection (elements).
    pub fn size(&self) -> Option<usize> {
        match self {
            Value::Text(s) => Some(s.chars().count()),
            Value::Collection(n) => Some(*n),
            _ => None,
        }
    }

    /// Whether this is [`Value::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::Text(s)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(s: &'a String) -> Self {
        Value::Text(s.as_str())
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value<'_> {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl<'a, T> From<&'a [T]> for Value<'a> {
    fn from(items: &'a [T]) -> Self {
        Value::Collection(items.len())
    }
}

impl<'a, T, const N: usize> From<&'a [T; N]> for Value<'a> {
    fn from(_: &'a [T; N]) -> Self {
        Value::Collection(N)
    }
}

impl<'a, T> From<&'a Vec<T>> for Value<'a> {
    fn from(items: &'a Vec<T>) -> Self {
        Value::Collection(items.len())
    }
}

impl<'a, T> From<&'a VecDeque<T>> for Value<'a> {
    fn from(items: &'a VecDeque<T>) -> Self {
        Value::Collection(items.len())
    }
}

impl<'a, K, V, S> From<&'a HashMap<K, V, S>> for Value<'a> {
    fn from(items: &'a HashMap<K, V, S>) -> Self {
        Value::Collection(items.len())
    }
}

impl<'a, T, S> From<&'a HashSet<T, S>> for Value<'a> {
    fn from(items: &'a HashSet<T, S>) -> Self {
        Value::Collection(items.len())
    }
}

impl<'a, K, V> From<&'a BTreeMap<K, V>> for Value<'a> {
    fn from(items: &'a BTreeMap<K, V>) -> Self {
        Value::Collection(items.len())
    }
}

impl<'a, T> From<&'a BTreeSet<T>> for Value<'a> {
    fn from(items: &'a BTreeSet<T>) -> Self {
        Value::Collection(items.len())
    }
}

impl<'a, T> From<Option<T>> for Value<'a>
where
    T: Into<Value<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Absent, Into::into)
    }
}

impl<Tz: TimeZone> From<(DateTime<Tz>, DateTime<Tz>)> for Value<'_> {
    fn from((start, end): (DateTime<Tz>, DateTime<Tz>)) -> Self {
        Value::period(&start, &end)
    }
}

impl From<(NaiveDateTime, NaiveDateTime)> for Value<'_> {
    fn from((start, end): (NaiveDateTime, NaiveDateTime)) -> Self {
        Value::Period {
            start: start.and_utc(),
            end: end.and_utc(),
        }
    }
}

impl From<(NaiveDate, NaiveDate)> for Value<'_> {
    fn from((start, end): (NaiveDate, NaiveDate)) -> Self {
        Value::Period {
            start: start.and_time(chrono::NaiveTime::MIN).and_utc(),
            end: end.and_time(chrono::NaiveTime::MIN).and_utc(),
        }
    }
}
