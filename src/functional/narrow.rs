use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use std::any::Any;
use std::fmt;

/// 能力檢查：若元素「是」一個 `U`，回傳其參照
pub trait Narrow<U> {
    fn narrow(&self) -> Option<&U>;
}

/// 以判別標籤區分變體的型別
pub trait Tagged {
    type Kind: PartialEq;

    fn kind(&self) -> Self::Kind;
}

impl<U: Any> Narrow<U> for Box<dyn Any> {
    fn narrow(&self) -> Option<&U> {
        (**self).downcast_ref::<U>()
    }
}

impl<U: Any> Narrow<U> for Box<dyn Any + Send + Sync> {
    fn narrow(&self) -> Option<&U> {
        (**self).downcast_ref::<U>()
    }
}

impl Narrow<String> for Value {
    fn narrow(&self) -> Option<&String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Narrow<bool> for Value {
    fn narrow(&self) -> Option<&bool> {
        match self {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl Narrow<Number> for Value {
    fn narrow(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl Narrow<Vec<Value>> for Value {
    fn narrow(&self) -> Option<&Vec<Value>> {
        self.as_array()
    }
}

impl Narrow<Map<String, Value>> for Value {
    fn narrow(&self) -> Option<&Map<String, Value>> {
        self.as_object()
    }
}

/// JSON 值的種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Tagged for Value {
    type Kind = ValueKind;

    fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }
}
