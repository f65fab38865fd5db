use measura_core::Value;

/// Starting point of a conversion
#[derive(Debug, Clone, PartialEq)]
pub enum Origin {
    /// Nothing to convert; always `UndefinedOrigin`
    Missing,
    /// Free-form quantity such as "5 km" or "5' 2\""
    Text(String),
    Value(Value),
}

impl From<&str> for Origin {
    fn from(s: &str) -> Self {
        Origin::Text(s.to_string())
    }
}

impl From<String> for Origin {
    fn from(s: String) -> Self {
        Origin::Text(s)
    }
}

impl From<&String> for Origin {
    fn from(s: &String) -> Self {
        Origin::Text(s.clone())
    }
}

impl From<Value> for Origin {
    fn from(v: Value) -> Self {
        Origin::Value(v)
    }
}

impl From<&Value> for Origin {
    fn from(v: &Value) -> Self {
        Origin::Value(v.clone())
    }
}

impl From<Option<Value>> for Origin {
    fn from(o: Option<Value>) -> Self {
        o.map(Origin::Value).unwrap_or(Origin::Missing)
    }
}
