//! Error type shared by the generator, storage and settings layers

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors surfaced by the core crate
///
/// None of these reach the player: storage and serialization failures are
/// logged by the caller and gameplay continues with defaults.
#[derive(Debug, Error)]
pub enum GameError {
    /// A problem was requested for `Operation::Random` without resolving it first
    #[error("random operation must be resolved before generating a problem")]
    UnresolvedRandom,

    /// The key-value store rejected a read or write
    #[error("storage error: {0}")]
    Storage(String),

    /// A stored record was valid JSON but not an object
    #[error("expected a JSON object")]
    NotAnObject,

    /// Stored data could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Decode a stored record, accepting only a top-level JSON object
pub(crate) fn from_json_object<T: DeserializeOwned>(json: &str) -> Result<T, GameError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    if !value.is_object() {
        return Err(GameError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_json_object_rejects_other_shapes() {
        for json in ["[]", "[1, 2]", "3", "\"x\"", "null"] {
            let result = from_json_object::<HashMap<String, u32>>(json);
            assert!(matches!(result, Err(GameError::NotAnObject)), "{json}");
        }
        assert!(matches!(
            from_json_object::<HashMap<String, u32>>("{oops"),
            Err(GameError::Serialization(_))
        ));
        let map: HashMap<String, u32> = from_json_object(r#"{"a": 1}"#).unwrap();
        assert_eq!(map["a"], 1);
    }
}
