use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Quote object as returned by the provider.
///
/// Serializes back to exactly the object it was built from. The only field
/// this crate looks at is `symbol`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Quote(Map<String, Value>);

impl Quote {
    /// The quoted symbol, if present and non-empty.
    ///
    /// A quote without one is not usable.
    pub fn symbol(&self) -> Option<&str> {
        self.0
            .get("symbol")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl From<Map<String, Value>> for Quote {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
