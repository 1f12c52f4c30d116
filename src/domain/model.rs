use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub data: HashMap<String, Value>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// 複製一份並設定欄位
    pub fn with_field(&self, field: &str, value: Value) -> Self {
        let mut data = self.data.clone();
        data.insert(field.to_string(), value);
        Self { data }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.data.into_iter().collect())
    }
}

impl From<Map<String, Value>> for Record {
    fn from(obj: Map<String, Value>) -> Self {
        Self {
            data: obj.into_iter().collect(),
        }
    }
}

/// 管線最終輸出
#[derive(Debug, Clone, PartialEq)]
pub enum FxOutput {
    Records(Vec<Record>),
    First(Option<Record>),
    Exists(bool),
    Index(HashMap<String, Record>),
}

impl FxOutput {
    pub fn into_value(self) -> Value {
        match self {
            FxOutput::Records(records) => {
                Value::Array(records.into_iter().map(Record::into_value).collect())
            }
            FxOutput::First(record) => record.map(Record::into_value).unwrap_or(Value::Null),
            FxOutput::Exists(found) => Value::Bool(found),
            FxOutput::Index(index) => Value::Object(
                index
                    .into_iter()
                    .map(|(key, record)| (key, record.into_value()))
                    .collect(),
            ),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            FxOutput::Records(records) => records.len(),
            FxOutput::First(record) => usize::from(record.is_some()),
            FxOutput::Exists(_) => 1,
            FxOutput::Index(index) => index.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
