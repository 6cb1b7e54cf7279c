//! Property values and the property caster
//!
//! Values arrive as a [`Candidate`], which covers every kind a caller might try
//! to store, and leave as a canonical [`PropertyValue`]. Only the canonical set
//! is ever stored on an entity:
//!
//! | Candidate                         | Canonical                        |
//! |-----------------------------------|----------------------------------|
//! | boolean, float                    | unchanged                        |
//! | integer in `[-2^63, 2^63 - 1]`    | `Integer`                        |
//! | string                            | `String`                         |
//! | list, set, tuple                  | homogeneous `List`, no nesting   |
//! | date, time, date-time             | ISO-8601 `String`                |
//! | decimal                           | `Float` (precision may be lost)  |
//! | complex                           | `List` of `[real, imaginary]`    |
//! | anything else                     | rejected                         |

use super::error::{GraphError, GraphResult};
use crate::config::CastConfig;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use num_complex::Complex64;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace};

/// Canonical property value
///
/// Lists are homogeneous and never contain other lists. Values can only be
/// built through the caster (or the scalar `From` impls), so that invariant
/// holds for every stored value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "serde_json::Value")]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    /// Get string value if this is a string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get float value if this is a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            PropertyValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get list items if this is a list
    pub fn as_list(&self) -> Option<&[PropertyValue]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, PropertyValue::List(_))
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Float(_) => "Float",
            PropertyValue::String(_) => "String",
            PropertyValue::List(_) => "List",
        }
    }
}

// Lists hash like tuples of their items. Floats hash by bit pattern with the
// two zeroes folded together, since 0.0 == -0.0.
impl Hash for PropertyValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            PropertyValue::Boolean(b) => b.hash(state),
            PropertyValue::Integer(i) => i.hash(state),
            PropertyValue::Float(f) => {
                let bits = if *f == 0.0 { 0u64 } else { f.to_bits() };
                bits.hash(state)
            }
            PropertyValue::String(s) => s.hash(state),
            PropertyValue::List(items) => {
                items.len().hash(state);
                for item in items {
                    item.hash(state);
                }
            }
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Boolean(b) => write!(f, "{}", b),
            PropertyValue::Integer(i) => write!(f, "{}", i),
            PropertyValue::Float(fl) => write!(f, "{:?}", fl),
            PropertyValue::String(s) => write!(f, "\"{}\"", s),
            PropertyValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl TryFrom<serde_json::Value> for PropertyValue {
    type Error = GraphError;

    fn try_from(value: serde_json::Value) -> GraphResult<Self> {
        cast(value)
    }
}

// Convenience conversions for values that are canonical as-is
impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

/// A value offered for storage as a property, before casting
///
/// `Null` is the absent marker: property sets treat it as "remove this key",
/// while the caster itself rejects it.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
    Null,
    Boolean(bool),
    Float(f64),
    /// Integers are carried wider than the storable range so that
    /// out-of-range inputs can be reported rather than truncated.
    Integer(i128),
    String(String),
    List(Vec<Candidate>),
    Set(Vec<Candidate>),
    Tuple(Vec<Candidate>),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeOffset(DateTime<FixedOffset>),
    Decimal(Decimal),
    Complex(Complex64),
    Bytes(Vec<u8>),
    Map(Vec<(String, Candidate)>),
    /// Any other kind, named for error reporting
    Unsupported(String),
}

impl Candidate {
    pub fn is_null(&self) -> bool {
        matches!(self, Candidate::Null)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Candidate::List(_) | Candidate::Set(_) | Candidate::Tuple(_))
    }

    /// Name of the candidate's kind
    pub fn kind_name(&self) -> &str {
        match self {
            Candidate::Null => "null",
            Candidate::Boolean(_) => "bool",
            Candidate::Float(_) => "float",
            Candidate::Integer(_) => "integer",
            Candidate::String(_) => "string",
            Candidate::List(_) => "list",
            Candidate::Set(_) => "set",
            Candidate::Tuple(_) => "tuple",
            Candidate::Date(_) => "date",
            Candidate::Time(_) => "time",
            Candidate::DateTime(_) | Candidate::DateTimeOffset(_) => "datetime",
            Candidate::Decimal(_) => "decimal",
            Candidate::Complex(_) => "complex",
            Candidate::Bytes(_) => "bytes",
            Candidate::Map(_) => "map",
            Candidate::Unsupported(name) => name,
        }
    }
}

/// Cast a candidate with the default configuration
pub fn cast(value: impl Into<Candidate>) -> GraphResult<PropertyValue> {
    cast_with(&CastConfig::default(), value)
}

/// Cast a candidate to a canonical property value
pub fn cast_with(config: &CastConfig, value: impl Into<Candidate>) -> GraphResult<PropertyValue> {
    let candidate = value.into();
    trace!("Casting {} property value", candidate.kind_name());
    cast_candidate(config, candidate).map_err(|err| {
        debug!("Rejected property value: {}", err);
        err
    })
}

fn cast_candidate(config: &CastConfig, candidate: Candidate) -> GraphResult<PropertyValue> {
    match candidate {
        Candidate::Boolean(b) => Ok(PropertyValue::Boolean(b)),
        Candidate::Float(f) => Ok(PropertyValue::Float(f)),
        Candidate::Integer(i) => {
            if !config.accepts_integer(i) {
                return Err(GraphError::OutOfRange(i.to_string()));
            }
            i64::try_from(i)
                .map(PropertyValue::Integer)
                .map_err(|_| GraphError::OutOfRange(i.to_string()))
        }
        Candidate::String(s) => Ok(PropertyValue::String(s)),
        Candidate::List(items) | Candidate::Set(items) | Candidate::Tuple(items) => {
            cast_sequence(config, items)
        }
        Candidate::Date(d) => Ok(PropertyValue::String(iso_date(&d))),
        Candidate::Time(t) => Ok(PropertyValue::String(iso_time(&t))),
        Candidate::DateTime(dt) => Ok(PropertyValue::String(iso_datetime(&dt))),
        Candidate::DateTimeOffset(dt) => Ok(PropertyValue::String(format!(
            "{}{}",
            iso_datetime(&dt.naive_local()),
            dt.format("%:z")
        ))),
        Candidate::Decimal(d) => d
            .to_f64()
            .map(PropertyValue::Float)
            .ok_or_else(|| GraphError::OutOfRange(d.to_string())),
        Candidate::Complex(c) => Ok(PropertyValue::List(vec![
            PropertyValue::Float(c.re),
            PropertyValue::Float(c.im),
        ])),
        other => Err(GraphError::InvalidPropertyType(other.kind_name().to_string())),
    }
}

// The first item fixes the list type; every later item must match it.
fn cast_sequence(config: &CastConfig, items: Vec<Candidate>) -> GraphResult<PropertyValue> {
    let mut values = Vec::with_capacity(items.len());
    let mut list_type: Option<&'static str> = None;

    for item in items {
        if item.is_sequence() {
            return Err(GraphError::NestedListNotAllowed);
        }
        let value = cast_candidate(config, item)?;
        if value.is_list() {
            return Err(GraphError::NestedListNotAllowed);
        }
        match list_type {
            None => list_type = Some(value.type_name()),
            Some(expected) if expected != value.type_name() => {
                return Err(GraphError::MixedListType {
                    expected,
                    found: value.type_name(),
                });
            }
            Some(_) => {}
        }
        values.push(value);
    }

    Ok(PropertyValue::List(values))
}

fn iso_date(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

fn iso_time(t: &NaiveTime) -> String {
    let micros = t.nanosecond() / 1_000;
    if micros == 0 {
        t.format("%H:%M:%S").to_string()
    } else {
        format!("{}.{:06}", t.format("%H:%M:%S"), micros)
    }
}

fn iso_datetime(dt: &NaiveDateTime) -> String {
    format!("{}T{}", iso_date(&dt.date()), iso_time(&dt.time()))
}

macro_rules! candidate_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Candidate {
                fn from(i: $t) -> Self {
                    Candidate::Integer(i as i128)
                }
            }
        )*
    };
}

candidate_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<bool> for Candidate {
    fn from(b: bool) -> Self {
        Candidate::Boolean(b)
    }
}

impl From<f64> for Candidate {
    fn from(f: f64) -> Self {
        Candidate::Float(f)
    }
}

impl From<f32> for Candidate {
    fn from(f: f32) -> Self {
        Candidate::Float(f as f64)
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Candidate::String(s.to_string())
    }
}

impl From<String> for Candidate {
    fn from(s: String) -> Self {
        Candidate::String(s)
    }
}

impl From<&String> for Candidate {
    fn from(s: &String) -> Self {
        Candidate::String(s.clone())
    }
}

impl From<char> for Candidate {
    fn from(c: char) -> Self {
        Candidate::String(c.to_string())
    }
}

impl<T: Into<Candidate>> From<Option<T>> for Candidate {
    fn from(value: Option<T>) -> Self {
        value.map_or(Candidate::Null, Into::into)
    }
}

impl<T: Into<Candidate>> From<Vec<T>> for Candidate {
    fn from(items: Vec<T>) -> Self {
        Candidate::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Candidate>, const N: usize> From<[T; N]> for Candidate {
    fn from(items: [T; N]) -> Self {
        Candidate::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Candidate>> From<HashSet<T>> for Candidate {
    fn from(items: HashSet<T>) -> Self {
        Candidate::Set(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Candidate>> From<BTreeSet<T>> for Candidate {
    fn from(items: BTreeSet<T>) -> Self {
        Candidate::Set(items.into_iter().map(Into::into).collect())
    }
}

impl<A: Into<Candidate>, B: Into<Candidate>> From<(A, B)> for Candidate {
    fn from((a, b): (A, B)) -> Self {
        Candidate::Tuple(vec![a.into(), b.into()])
    }
}

impl<A: Into<Candidate>, B: Into<Candidate>, C: Into<Candidate>> From<(A, B, C)> for Candidate {
    fn from((a, b, c): (A, B, C)) -> Self {
        Candidate::Tuple(vec![a.into(), b.into(), c.into()])
    }
}

impl<T: Into<Candidate>> From<HashMap<String, T>> for Candidate {
    fn from(map: HashMap<String, T>) -> Self {
        Candidate::Map(map.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<NaiveDate> for Candidate {
    fn from(d: NaiveDate) -> Self {
        Candidate::Date(d)
    }
}

impl From<NaiveTime> for Candidate {
    fn from(t: NaiveTime) -> Self {
        Candidate::Time(t)
    }
}

impl From<NaiveDateTime> for Candidate {
    fn from(dt: NaiveDateTime) -> Self {
        Candidate::DateTime(dt)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Candidate {
    fn from(dt: DateTime<Tz>) -> Self {
        Candidate::DateTimeOffset(dt.fixed_offset())
    }
}

impl From<Decimal> for Candidate {
    fn from(d: Decimal) -> Self {
        Candidate::Decimal(d)
    }
}

impl From<Complex64> for Candidate {
    fn from(c: Complex64) -> Self {
        Candidate::Complex(c)
    }
}

impl From<PropertyValue> for Candidate {
    fn from(value: PropertyValue) -> Self {
        match value {
            PropertyValue::Boolean(b) => Candidate::Boolean(b),
            PropertyValue::Integer(i) => Candidate::Integer(i as i128),
            PropertyValue::Float(f) => Candidate::Float(f),
            PropertyValue::String(s) => Candidate::String(s),
            PropertyValue::List(items) => {
                Candidate::List(items.into_iter().map(Candidate::from).collect())
            }
        }
    }
}

impl From<&PropertyValue> for Candidate {
    fn from(value: &PropertyValue) -> Self {
        Candidate::from(value.clone())
    }
}

impl From<serde_json::Value> for Candidate {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Candidate::Null,
            Value::Bool(b) => Candidate::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Candidate::Integer(i as i128)
                } else if let Some(u) = n.as_u64() {
                    Candidate::Integer(u as i128)
                } else {
                    Candidate::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Candidate::String(s),
            Value::Array(items) => Candidate::List(items.into_iter().map(Candidate::from).collect()),
            Value::Object(map) => {
                Candidate::Map(map.into_iter().map(|(k, v)| (k, Candidate::from(v))).collect())
            }
        }
    }
}
