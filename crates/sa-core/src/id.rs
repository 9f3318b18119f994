use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A JSON scalar: an integer, another number, or a piece of text.
///
/// Story documents are edited by hand and by tools that do not agree on
/// whether `7` and `"7"` are different things, so equality, hashing and
/// ordering all go through the canonical text form. The integer or text
/// flavour is still remembered and written back out unchanged.
#[derive(Debug, Clone)]
pub enum Scalar {
    /// An integer value.
    Int(i64),
    /// A number that does not fit [`Scalar::Int`], such as `1.5`.
    Number(f64),
    /// A text value.
    Text(String),
}

impl Scalar {
    /// The canonical text form.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Int(n) => Cow::Owned(n.to_string()),
            Scalar::Number(n) => Cow::Owned(format_number(*n)),
            Scalar::Text(s) => Cow::Borrowed(s),
        }
    }

    /// The integer value, if this is an integer or integer-like text.
    ///
    /// Text only counts as integer-like when it is the canonical spelling of
    /// the number (`"12"` is, `"012"` and `"+12"` are not).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Scalar::Int(n) => Some(*n),
            Scalar::Number(n) => canonical_int(&format_number(*n)),
            Scalar::Text(s) => canonical_int(s),
        }
    }

    /// Consume the scalar and return its canonical text.
    pub fn into_text(self) -> String {
        match self {
            Scalar::Int(n) => n.to_string(),
            Scalar::Number(n) => format_number(n),
            Scalar::Text(s) => s,
        }
    }
}

/// Write a number as text.
///
/// Whole numbers have no fractional part, and NaN and the infinities are
/// spelled `NaN`, `Infinity` and `-Infinity`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return format!("{n}");
    }
    let sci = format!("{n:e}");
    match sci.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{mantissa}e+{exp}"),
        _ => sci,
    }
}

fn canonical_int(s: &str) -> Option<i64> {
    let n: i64 = s.parse().ok()?;
    (n.to_string() == s).then_some(n)
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            _ => self.as_text() == other.as_text(),
        }
    }
}

impl Eq for Scalar {}

impl Hash for Scalar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_text().hash(state);
    }
}

impl Ord for Scalar {
    /// Integer-like values first in numeric order, then everything else in
    /// lexicographic order.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.as_int(), other.as_int()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.as_text().cmp(&other.as_text()),
        }
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Number(n) => f.write_str(&format_number(*n)),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Int(i64::from(n))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::Text(s)
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Int(n) => serializer.serialize_i64(*n),
            Scalar::Number(n) => serializer.serialize_f64(*n),
            Scalar::Text(s) => serializer.serialize_str(s),
        }
    }
}

struct ScalarVisitor;

impl Visitor<'_> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(i64::try_from(v).map_or(Scalar::Number(v as f64), Scalar::Int))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Ok(Scalar::Number(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar::Text(v))
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// Identifier of a section: the key it is stored under in the story.
///
/// Only integers and text name sections; other numbers are rejected when
/// reading a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SectionId(Scalar);

impl<'de> Deserialize<'de> for SectionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Scalar::deserialize(deserializer)? {
            Scalar::Number(n) => Err(de::Error::invalid_type(
                de::Unexpected::Float(n),
                &"an integer or a string",
            )),
            scalar => Ok(Self(scalar)),
        }
    }
}

impl SectionId {
    /// The canonical text form of the identifier.
    pub fn as_text(&self) -> Cow<'_, str> {
        self.0.as_text()
    }

    /// The integer value, if the identifier is numeric.
    pub fn as_int(&self) -> Option<i64> {
        self.0.as_int()
    }

    /// The underlying scalar.
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<Scalar> for SectionId {
    fn from(s: Scalar) -> Self {
        Self(s)
    }
}

impl From<&Scalar> for SectionId {
    fn from(s: &Scalar) -> Self {
        Self(s.clone())
    }
}

impl From<i64> for SectionId {
    fn from(n: i64) -> Self {
        Self(Scalar::Int(n))
    }
}

impl From<i32> for SectionId {
    fn from(n: i32) -> Self {
        Self(Scalar::from(n))
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(Scalar::from(s))
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        Self(Scalar::Text(s))
    }
}
