use crate::config::toml_config::{OutputConfig, OutputMode};
use crate::core::pipeline::Condition;
use crate::core::{FxOutput, Record};
use crate::functional::SequenceExt;
use crate::utils::error::{FxError, Result};
use serde_json::Value;

/// 將轉換後的記錄整理成最終輸出
#[derive(Debug, Clone)]
pub enum OutputPlan {
    Records,
    First(Option<Condition>),
    Exists(Option<Condition>),
    Index { by: String },
}

impl OutputPlan {
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        let when = config.when.as_ref().map(Condition::from_config).transpose()?;

        let plan = match config.mode {
            OutputMode::Records => OutputPlan::Records,
            OutputMode::First => OutputPlan::First(when),
            OutputMode::Exists => OutputPlan::Exists(when),
            OutputMode::Index => OutputPlan::Index {
                by: config
                    .index_by
                    .clone()
                    .ok_or_else(|| FxError::MissingConfigError {
                        field: "output.index_by".to_string(),
                    })?,
            },
        };
        Ok(plan)
    }

    pub fn render(&self, records: Vec<Record>) -> FxOutput {
        match self {
            OutputPlan::Records => FxOutput::Records(records),
            OutputPlan::First(when) => FxOutput::First(
                records.first_matching(|record| accepts(when, record)).cloned(),
            ),
            OutputPlan::Exists(when) => {
                FxOutput::Exists(records.contains_matching(|record| accepts(when, record)))
            }
            OutputPlan::Index { by } => {
                // 同一個鍵出現多次時保留最後一筆
                let index = records.map_to_dictionary(|record| {
                    record
                        .get(by)
                        .and_then(index_key)
                        .map(|key| (key, record.clone()))
                });
                if index.len() < records.len() {
                    tracing::debug!(
                        "Indexed {} of {} records by '{}' (missing or duplicate keys)",
                        index.len(),
                        records.len(),
                        by
                    );
                }
                FxOutput::Index(index)
            }
        }
    }
}

fn accepts(when: &Option<Condition>, record: &Record) -> bool {
    when.as_ref().map_or(true, |condition| condition.matches(record))
}

/// 只有純量可以當索引鍵。
///
/// 數字與布林轉成字串，所以 `2` 和 `"2"`、`true` 和 `"true"` 是同一個鍵，
/// 後出現的記錄會覆蓋先前的記錄。
fn index_key(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
