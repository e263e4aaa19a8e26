//! Value Objects for the board domain.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Card identifier value object.
///
/// Clients mint card ids themselves (typically millisecond timestamps, but
/// string ids exist in the wild), so the id must round-trip either JSON
/// representation without coercion. Two ids are equal only when both the
/// representation and the value match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Number(n) => write!(f, "{n}"),
            CardId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for CardId {
    fn from(value: i64) -> Self {
        CardId::Number(value)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId::Text(value.to_string())
    }
}

/// Column identifier value object.
///
/// Columns only ever come from the fixed board template, so the id space is
/// a plain integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(pub i64);

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ColumnId {
    fn from(value: i64) -> Self {
        ColumnId(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_numeric_round_trip() {
        // given: a numeric card id as clients produce them
        let json = "1717171717171";

        // when: deserialized and serialized back
        let id: CardId = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&id).unwrap();

        // then: the numeric representation survives untouched
        assert_eq!(id, CardId::Number(1717171717171));
        assert_eq!(out, json);
    }

    #[test]
    fn test_card_id_string_round_trip() {
        // given: a string card id
        let json = "\"card-42\"";

        // when:
        let id: CardId = serde_json::from_str(json).unwrap();
        let out = serde_json::to_string(&id).unwrap();

        // then:
        assert_eq!(id, CardId::Text("card-42".to_string()));
        assert_eq!(out, json);
    }

    #[test]
    fn test_card_id_representation_sensitive_equality() {
        // given: the same digits as number and as string
        let numeric = CardId::Number(7);
        let textual = CardId::Text("7".to_string());

        // then: they are distinct ids, like strict equality in JSON clients
        assert_ne!(numeric, textual);
    }

    #[test]
    fn test_column_id_transparent_serde() {
        // given:
        let id = ColumnId(21);

        // when:
        let out = serde_json::to_string(&id).unwrap();
        let back: ColumnId = serde_json::from_str(&out).unwrap();

        // then: serializes as a bare integer
        assert_eq!(out, "21");
        assert_eq!(back, id);
    }
}
