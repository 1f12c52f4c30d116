use crate::config::toml_config::FxConfig;
use crate::core::output::OutputPlan;
use crate::core::pipeline::RecordPipeline;
use crate::core::{FxOutput, Record, Storage};
use crate::functional::SequenceExt;
use crate::utils::error::{FxError, Result};
use crate::utils::validation::Validate;
use serde_json::{Map, Value};

pub struct FxEngine<S: Storage> {
    storage: S,
    config: FxConfig,
    pipeline: RecordPipeline,
    output: OutputPlan,
}

impl<S: Storage> FxEngine<S> {
    /// 驗證配置並編譯管線；配置錯誤會在讀取任何記錄前回報
    pub fn new(storage: S, config: FxConfig) -> Result<Self> {
        config.validate()?;
        let pipeline = RecordPipeline::from_steps(&config.steps)?;
        let output = OutputPlan::from_config(&config.output)?;

        Ok(Self {
            storage,
            config,
            pipeline,
            output,
        })
    }

    pub fn config(&self) -> &FxConfig {
        &self.config
    }

    pub fn extract(&self) -> Result<Vec<Record>> {
        tracing::debug!("Reading records from: {}", self.config.input.path);
        let raw = self.storage.read_file(&self.config.input.path)?;
        let json_data: Value = serde_json::from_slice(&raw)?;

        extract_records(json_data, self.config.input.records_field.as_deref())
    }

    pub fn transform(&self, records: Vec<Record>) -> Result<FxOutput> {
        let records = self.pipeline.apply(records)?;
        Ok(self.output.render(records))
    }

    pub fn load(&self, output: FxOutput) -> Result<String> {
        let body = serde_json::to_string_pretty(&output.into_value())?;

        tracing::debug!("Writing {} bytes to: {}", body.len(), self.config.output.path);
        self.storage.write_file(&self.config.output.path, body.as_bytes())?;

        Ok(self.config.output.path.clone())
    }

    pub fn run(&self) -> Result<String> {
        tracing::info!("Starting pipeline '{}'", self.config.pipeline.name);

        let records = self.extract()?;
        tracing::info!("Extracted {} records", records.len());

        let output = self.transform(records)?;
        tracing::info!(
            "Transformed with {} steps into {} output entries",
            self.pipeline.len(),
            output.len()
        );

        let output_path = self.load(output)?;
        tracing::info!("Output saved to: {}", output_path);

        Ok(output_path)
    }
}

/// 從輸入 JSON 取出物件記錄；陣列中的非物件元素會被略過
pub fn extract_records(json_data: Value, records_field: Option<&str>) -> Result<Vec<Record>> {
    let json_data = match (json_data, records_field) {
        (Value::Object(mut obj), Some(field)) => obj.remove(field).ok_or_else(|| {
            FxError::processing(format!("records field '{}' not found in input", field))
        })?,
        (_, Some(field)) => {
            return Err(FxError::processing(format!(
                "records field '{}' requires an object at the top level",
                field
            )))
        }
        (value, None) => value,
    };

    match json_data {
        Value::Array(items) => {
            let objects: Vec<Map<String, Value>> = items.objects_of_type();
            if objects.len() < items.len() {
                tracing::warn!(
                    "Skipped {} non-object items in input",
                    items.len() - objects.len()
                );
            }
            Ok(objects.into_iter().map(Record::from).collect())
        }
        // 單一物件視為一筆記錄
        Value::Object(obj) => Ok(vec![Record::from(obj)]),
        other => Err(FxError::processing(format!(
            "expected an array or object of records, found {}",
            crate::functional::Tagged::kind(&other)
        ))),
    }
}
