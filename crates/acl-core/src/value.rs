//! Field values and declared type tags.

use std::fmt;

use crate::reference::Reference;

/// The declared type of a typed field (`int x = 1;`).
///
/// Inferred fields (`x = 1;`) carry no tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Int,
    Float,
    Bool,
    String,
}

impl TypeTag {
    /// Returns the keyword spelling of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Int => "int",
            TypeTag::Float => "float",
            TypeTag::Bool => "bool",
            TypeTag::String => "string",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A field value.
///
/// Arrays and references are the only non-leaf cases. An array may hold
/// reference elements at any depth; these are resolved one by one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Bool(bool),
    String(String),
    Char(char),
    Array(Vec<Value>),
    /// An unresolved path to another field's value.
    Reference(Reference),
}

impl Value {
    /// Returns `true` if this value is itself a reference.
    pub fn is_reference(&self) -> bool {
        matches!(self, Value::Reference(_))
    }

    /// Returns `true` if this value is a reference or an array holding one.
    pub fn contains_reference(&self) -> bool {
        match self {
            Value::Reference(_) => true,
            Value::Array(elements) => elements.iter().any(Value::contains_reference),
            _ => false,
        }
    }

    /// Collects every reference in this value, in element order.
    pub fn references(&self) -> Vec<&Reference> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<&'a Reference>) {
        match self {
            Value::Reference(reference) => out.push(reference),
            Value::Array(elements) => {
                for element in elements {
                    element.collect_references(out);
                }
            }
            _ => {}
        }
    }

    /// Short name of the value kind, used in log output.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::String(_) => "string",
            Value::Char(_) => "char",
            Value::Array(_) => "array",
            Value::Reference(_) => "reference",
        }
    }
}

/// Renders the value the way the printer shows it.
///
/// Strings are shown with their raw contents; chars escape `\n`, `\t`, `\r`,
/// `\\` and `\'`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Char(c) => match c {
                '\n' => f.write_str("'\\n'"),
                '\t' => f.write_str("'\\t'"),
                '\r' => f.write_str("'\\r'"),
                '\\' => f.write_str("'\\\\'"),
                '\'' => f.write_str("'\\''"),
                other => write!(f, "'{other}'"),
            },
            Value::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Value::Reference(reference) => write!(f, "{reference}"),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Char(c)
    }
}
