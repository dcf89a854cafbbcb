//! Modification values.
//!
//! A [`Value`] is anything that can stand on the right of a modification or
//! annotation entry. Values nest: a [`Modification`] maps names to values and
//! is itself a value.

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::flags::{AssignFlag, FlagSet};

/// A primitive literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Boolean literal.
    Bool(bool),
    /// Integer literal.
    Integer(i64),
    /// Real literal.
    Real(f64),
    /// Already formatted text, written verbatim (expressions, quoted strings, enum literals).
    String(String),
}

impl Scalar {
    /// Create a quoted string literal, escaping `"` and `\`.
    pub fn quoted(s: &str) -> Self {
        Self::String(quote(s))
    }

    /// A number that is written without a fractional part when it is integral.
    pub fn number(v: f64) -> Self {
        if v.fract() == 0.0 && v.abs() < 1e15 {
            Self::Integer(v as i64)
        } else {
            Self::Real(v)
        }
    }
}

/// Wrap `s` in double quotes, escaping `"` and `\`.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

impl From<bool> for Scalar {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Scalar {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<i32> for Scalar {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<&str> for Scalar {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Scalar {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// A modification or annotation value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    /// A primitive literal: `key=value`.
    Scalar(Scalar),
    /// A fixed sequence: `key={e0, e1}`.
    Tuple(Vec<Scalar>),
    /// A nested modification: `key(a=1, b=2)`.
    Map(Modification),
    /// A modification carrying flags, a nested map and a literal.
    Assign(Box<Assign>),
    /// An array of values as used by graphical annotations: a list of
    /// single-entry maps, a list of lists, or a list of scalars.
    List(Vec<Value>),
}

impl Value {
    /// Create a quoted string value.
    pub fn quoted(s: &str) -> Self {
        Self::Scalar(Scalar::quoted(s))
    }

    /// Create an expression value written verbatim.
    pub fn expr(s: impl Into<String>) -> Self {
        Self::Scalar(Scalar::String(s.into()))
    }

    /// Create a tuple value.
    pub fn tuple<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Scalar>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Create a list value.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Create a two dimensional point `{x,y}` as used by graphical annotations.
    pub fn point(x: impl Into<Scalar>, y: impl Into<Scalar>) -> Self {
        Self::List(vec![Self::Scalar(x.into()), Self::Scalar(y.into())])
    }

    /// Get the nested map if this value is one.
    pub fn as_map(&self) -> Option<&Modification> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get the nested map mutably if this value is one.
    pub fn as_map_mut(&mut self) -> Option<&mut Modification> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Short name of the value shape, used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Tuple(_) => "tuple",
            Self::Map(_) => "map",
            Self::Assign(_) => "assign",
            Self::List(_) => "list",
        }
    }
}

impl<T: Into<Scalar>> From<T> for Value {
    fn from(v: T) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<Modification> for Value {
    fn from(m: Modification) -> Self {
        Self::Map(m)
    }
}

impl From<Assign> for Value {
    fn from(a: Assign) -> Self {
        Self::Assign(Box::new(a))
    }
}

/// An ordered mapping from field name to [`Value`].
///
/// Used for declaration modifications, nested modifications and annotation
/// trees alike. Insertion order is preserved and is the rendering order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Modification {
    entries: IndexMap<String, Value>,
}

/// Annotation trees share the modification representation.
pub type Annotation = Modification;

impl Modification {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Insert or replace an entry. Replacing keeps the entry's position.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    /// Look up an entry.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Look up an entry mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        self.entries.get_mut(name)
    }

    /// Check whether an entry exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Walk `path` from this map, creating empty nested maps where missing,
    /// and return the innermost map.
    ///
    /// Fails if an existing entry along the path is not a map.
    pub fn path_mut(&mut self, path: &[&str]) -> Result<&mut Modification> {
        let mut node = self;
        for (depth, name) in path.iter().enumerate() {
            let entry = node
                .entries
                .entry((*name).to_string())
                .or_insert_with(|| Value::Map(Modification::new()));
            node = match entry {
                Value::Map(m) => m,
                other => {
                    return Err(Error::invariant(format!(
                        "entry at '{}' already exists and is a {}, not a map",
                        path[..=depth].join("."),
                        other.kind()
                    )));
                }
            };
        }
        Ok(node)
    }

    /// Walk `path` from this map and return the innermost map if every
    /// element exists.
    ///
    /// Fails if an existing entry along the path is not a map.
    pub fn get_path(&self, path: &[&str]) -> Result<Option<&Modification>> {
        let mut node = self;
        for (depth, name) in path.iter().enumerate() {
            node = match node.entries.get(*name) {
                None => return Ok(None),
                Some(Value::Map(m)) => m,
                Some(other) => {
                    return Err(Error::invariant(format!(
                        "entry at '{}' is a {}, not a map",
                        path[..=depth].join("."),
                        other.kind()
                    )));
                }
            };
        }
        Ok(Some(node))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Modification {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Modification {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A modification entry with flags, a nested map and an optional literal.
///
/// Renders as `[flags] [type] key[(map)][=value] ["description"] [annotation]`.
///
/// ```
/// use modelwright_model::{Assign, AssignFlag};
///
/// let start = Assign::new(1).with_flag(AssignFlag::Each);
/// assert!(start.flags().contains(AssignFlag::Each));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Assign {
    value: Option<Scalar>,
    modifications: Modification,
    flags: FlagSet<AssignFlag>,
    description: Option<String>,
    annotation: Annotation,
    type_name: Option<String>,
    precision: Option<usize>,
}

impl Assign {
    /// Create an assignment of a literal.
    pub fn new(value: impl Into<Scalar>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Create an assignment without a literal, carrying only a nested map.
    pub fn modification(modifications: Modification) -> Self {
        Self {
            modifications,
            ..Self::default()
        }
    }

    /// Create a `redeclare` of `type_name`.
    pub fn redeclare(type_name: impl Into<String>) -> Self {
        Self {
            flags: FlagSet::from(AssignFlag::Redeclare),
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Add an entry to the nested map.
    pub fn with_modification(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.modifications.set(name, value);
        self
    }

    /// Add a flag.
    pub fn with_flag(mut self, flag: AssignFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Set the description string.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the annotation.
    pub fn with_annotation(mut self, annotation: Annotation) -> Self {
        self.annotation = annotation;
        self
    }

    /// Set the literal type name. Only valid together with `redeclare`.
    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Write a real literal with this many significant digits (`%g` style).
    pub fn with_precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }

    /// The literal, if any.
    pub fn value(&self) -> Option<&Scalar> {
        self.value.as_ref()
    }

    /// The nested map.
    pub fn modifications(&self) -> &Modification {
        &self.modifications
    }

    /// The flags.
    pub fn flags(&self) -> &FlagSet<AssignFlag> {
        &self.flags
    }

    /// The description.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The annotation.
    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    /// The literal type name.
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Significant digits for real literals.
    pub fn precision(&self) -> Option<usize> {
        self.precision
    }

    /// Check that a literal type name only appears on a redeclaration.
    pub fn validate(&self) -> Result<()> {
        if let Some(ty) = &self.type_name
            && !self.flags.contains(AssignFlag::Redeclare)
        {
            return Err(Error::invariant(format!(
                "type '{ty}' given without the redeclare flag"
            )));
        }
        Ok(())
    }
}

/// Format `v` with `digits` significant digits the way C's `%g` does:
/// trailing zeros are dropped and the exponent form is used for very small
/// or very large magnitudes.
pub fn format_significant(v: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if v == 0.0 || !v.is_finite() {
        return format!("{v}");
    }

    // Rounding may carry into the next power of ten, so read the exponent
    // from the rounded scientific form.
    let sci = format!("{:.*e}", digits - 1, v);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    let digits = i32::try_from(digits).unwrap_or(i32::MAX);
    if exp < -4 || exp >= digits {
        let mantissa = trim_fraction(mantissa);
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else {
        let decimals = usize::try_from(digits - 1 - exp).unwrap_or(0);
        trim_fraction(&format!("{v:.decimals$}")).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modification_preserves_insertion_order() {
        let m = Modification::new().with("z", 1).with("a", 2).with("m", 3);
        let keys: Vec<_> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn test_replacing_keeps_position() {
        let mut m = Modification::new().with("a", 1).with("b", 2);
        m.set("a", 10);
        let entries: Vec<_> = m.iter().collect();
        assert_eq!(entries[0], ("a", &Value::from(10)));
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_path_mut_creates_nested_maps() {
        let mut root = Modification::new();
        root.path_mut(&["Diagram", "coordinateSystem"])
            .unwrap()
            .set("preserveAspectRatio", false);

        let inner = root
            .get_path(&["Diagram", "coordinateSystem"])
            .unwrap()
            .unwrap();
        assert_eq!(inner.get("preserveAspectRatio"), Some(&Value::from(false)));
    }

    #[test]
    fn test_path_mut_rejects_scalar_on_path() {
        let mut root = Modification::new().with("Diagram", 1);
        let err = root.path_mut(&["Diagram", "coordinateSystem"]).unwrap_err();
        assert!(matches!(*err, Error::InvariantViolation { .. }));
    }

    #[test]
    fn test_get_path_missing() {
        let root = Modification::new().with("Layer", Modification::new());
        assert!(root.get_path(&["Diagram"]).unwrap().is_none());
        assert!(root.get_path(&["Layer"]).unwrap().is_some());
    }

    #[test]
    fn test_number_drops_integral_fraction() {
        assert_eq!(Scalar::number(-40.0), Scalar::Integer(-40));
        assert_eq!(Scalar::number(2.5), Scalar::Real(2.5));
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("kV"), "\"kV\"");
        assert_eq!(quote(r#"a "b" \c"#), r#""a \"b\" \\c""#);
    }

    #[test]
    fn test_assign_type_requires_redeclare() {
        let plain = Assign::new(1).with_type("Medium");
        assert!(plain.validate().is_err());

        let redeclared = Assign::redeclare("Medium");
        assert!(redeclared.validate().is_ok());
    }

    #[test]
    fn test_format_significant() {
        assert_eq!(format_significant(1000.0, 9), "1000");
        assert_eq!(format_significant(0.5, 9), "0.5");
        assert_eq!(format_significant(1.0 / 3.0, 3), "0.333");
        assert_eq!(format_significant(123_456_789_012.0, 9), "1.23456789e+11");
        assert_eq!(format_significant(0.000_012_3, 3), "1.23e-05");
        assert_eq!(format_significant(-2500.0, 2), "-2.5e+03");
        assert_eq!(format_significant(0.0, 9), "0");
    }

    #[test]
    fn test_format_significant_rounding_carries() {
        assert_eq!(format_significant(9.9999, 3), "10");
        assert_eq!(format_significant(999_999.7, 6), "1e+06");
    }
}
