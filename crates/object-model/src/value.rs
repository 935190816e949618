use core::fmt;
use serde::{Deserialize, Serialize};

/// Semantic type tag for a property slot.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Datatype {
    Real,
    Unsigned,
    Boolean,
    CharacterString,
    Array(Box<Datatype>),
}

impl Datatype {
    pub fn is_array(&self) -> bool {
        matches!(self, Datatype::Array(_))
    }

    pub fn element(&self) -> Option<&Datatype> {
        match self {
            Datatype::Array(elem) => Some(elem),
            _ => None,
        }
    }

    /// The value a required property holds before anything is written to it.
    pub fn zero_value(&self) -> Value {
        match self {
            Datatype::Real => Value::Real(0.0),
            Datatype::Unsigned => Value::Unsigned(0),
            Datatype::Boolean => Value::Boolean(false),
            Datatype::CharacterString => Value::CharacterString(String::new()),
            Datatype::Array(_) => Value::Array(Vec::new()),
        }
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datatype::Real => f.write_str("real"),
            Datatype::Unsigned => f.write_str("unsigned"),
            Datatype::Boolean => f.write_str("boolean"),
            Datatype::CharacterString => f.write_str("characterString"),
            Datatype::Array(elem) => write!(f, "arrayOf({elem})"),
        }
    }
}

/// A property value as carried in requests, results, and object state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    Real(f64),
    Unsigned(u64),
    Boolean(bool),
    CharacterString(String),
    Array(Vec<Value>),
}

impl Value {
    pub fn conforms_to(&self, datatype: &Datatype) -> bool {
        match (self, datatype) {
            (Value::Real(_), Datatype::Real) => true,
            (Value::Unsigned(_), Datatype::Unsigned) => true,
            (Value::Boolean(_), Datatype::Boolean) => true,
            (Value::CharacterString(_), Datatype::CharacterString) => true,
            (Value::Array(items), Datatype::Array(elem)) => {
                items.iter().all(|item| item.conforms_to(elem))
            }
            _ => false,
        }
    }

    pub fn character_string(text: impl Into<String>) -> Self {
        Value::CharacterString(text.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_conformance() {
        assert!(Value::Real(12.3).conforms_to(&Datatype::Real));
        assert!(!Value::Real(12.3).conforms_to(&Datatype::Unsigned));
        assert!(Value::Boolean(true).conforms_to(&Datatype::Boolean));
        assert!(!Value::character_string("x").conforms_to(&Datatype::Boolean));
    }

    #[test]
    fn array_conformance_checks_every_element() {
        let strings = Datatype::Array(Box::new(Datatype::CharacterString));
        let good = Value::Array(vec![
            Value::character_string("a"),
            Value::character_string("b"),
        ]);
        let mixed = Value::Array(vec![Value::character_string("a"), Value::Real(1.0)]);
        assert!(good.conforms_to(&strings));
        assert!(!mixed.conforms_to(&strings));
        // an empty array conforms to any array type
        assert!(Value::Array(vec![]).conforms_to(&strings));
    }

    #[test]
    fn zero_values_conform_to_their_type() {
        for datatype in [
            Datatype::Real,
            Datatype::Unsigned,
            Datatype::Boolean,
            Datatype::CharacterString,
            Datatype::Array(Box::new(Datatype::Real)),
        ] {
            assert!(datatype.zero_value().conforms_to(&datatype));
        }
    }
}
