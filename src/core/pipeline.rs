use crate::config::toml_config::{ConditionConfig, StepConfig};
use crate::core::Record;
use crate::functional::{SequenceExt, Tagged, ValueKind};
use crate::utils::error::{FxError, Result};
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Comparator {
    Equals(Value),
    Matches(Regex),
    Exists(bool),
}

/// 編譯後的欄位條件
#[derive(Debug, Clone)]
pub struct Condition {
    field: String,
    comparator: Comparator,
}

impl Condition {
    pub fn from_config(config: &ConditionConfig) -> Result<Self> {
        let comparator = match (&config.equals, &config.matches, config.exists) {
            (Some(value), None, None) => Comparator::Equals(value.clone()),
            (None, Some(pattern), None) => Comparator::Matches(Regex::new(pattern)?),
            (None, None, Some(exists)) => Comparator::Exists(exists),
            _ => {
                return Err(FxError::ConfigValidationError {
                    field: config.field.clone(),
                    message: "Condition needs exactly one of equals, matches, exists".to_string(),
                })
            }
        };

        Ok(Self {
            field: config.field.clone(),
            comparator,
        })
    }

    pub fn matches(&self, record: &Record) -> bool {
        let value = record.get(&self.field);
        match &self.comparator {
            Comparator::Equals(expected) => value == Some(expected),
            // 只比對字串值
            Comparator::Matches(re) => value
                .and_then(Value::as_str)
                .is_some_and(|s| re.is_match(s)),
            Comparator::Exists(exists) => value.is_some() == *exists,
        }
    }
}

#[derive(Debug, Clone)]
enum Step {
    Filter(Condition),
    Select { fields: Vec<String>, required: bool },
    Flatten {
        field: String,
        into: String,
        kind: Option<ValueKind>,
    },
    Kind { field: String, kind: ValueKind },
}

impl Step {
    fn name(&self) -> &'static str {
        match self {
            Step::Filter(_) => "filter",
            Step::Select { .. } => "select",
            Step::Flatten { .. } => "flatten",
            Step::Kind { .. } => "kind",
        }
    }

    fn compile(config: &StepConfig) -> Result<Self> {
        let step = match config {
            StepConfig::Filter { when } => {
                let when = when.as_ref().ok_or_else(|| FxError::MissingConfigError {
                    field: "filter.when".to_string(),
                })?;
                Step::Filter(Condition::from_config(when)?)
            }
            StepConfig::Select { fields, required } => Step::Select {
                fields: fields.clone(),
                required: *required,
            },
            StepConfig::Flatten { field, into, kind } => Step::Flatten {
                field: field.clone(),
                into: into.clone().unwrap_or_else(|| field.clone()),
                kind: *kind,
            },
            StepConfig::Kind { field, kind } => Step::Kind {
                field: field.clone(),
                kind: *kind,
            },
        };
        Ok(step)
    }

    fn apply(&self, records: &[Record]) -> Result<Vec<Record>> {
        match self {
            Step::Filter(condition) => {
                Ok(records.filter_with(|record| condition.matches(record)))
            }
            Step::Select { fields, required } => {
                records.try_map_with(|record| select_fields(record, fields, *required))
            }
            Step::Flatten { field, into, kind } => Ok(records.flatten_with(|record| {
                let Some(items) = record.get(field).and_then(Value::as_array) else {
                    return Vec::new();
                };
                let items = match kind {
                    Some(kind) => items.objects_of_kind(*kind),
                    None => items.clone(),
                };
                items.map_with(|item| record.with_field(into, item.clone()))
            })),
            Step::Kind { field, kind } => Ok(records.filter_with(|record| {
                record.get(field).map(Tagged::kind) == Some(*kind)
            })),
        }
    }
}

fn select_fields(record: &Record, fields: &[String], required: bool) -> Result<Record> {
    let mut data = HashMap::with_capacity(fields.len());
    for field in fields {
        match record.get(field) {
            Some(value) => {
                data.insert(field.clone(), value.clone());
            }
            None if required => {
                return Err(FxError::processing(format!(
                    "required field '{}' missing from record",
                    field
                )));
            }
            None => {}
        }
    }
    Ok(Record { data })
}

/// 依序套用的一組記錄轉換步驟
#[derive(Debug, Clone, Default)]
pub struct RecordPipeline {
    steps: Vec<Step>,
}

impl RecordPipeline {
    pub fn from_steps(configs: &[StepConfig]) -> Result<Self> {
        let steps = configs.try_map_with(Step::compile)?;
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// 任一步驟失敗就中止，不回傳部分結果
    pub fn apply(&self, records: Vec<Record>) -> Result<Vec<Record>> {
        let mut current = records;
        for (i, step) in self.steps.iter().enumerate() {
            let before = current.len();
            current = step.apply(&current)?;
            tracing::debug!(
                "Step {} ({}): {} -> {} records",
                i + 1,
                step.name(),
                before,
                current.len()
            );
        }
        Ok(current)
    }
}
