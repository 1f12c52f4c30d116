use crate::functional::ValueKind;
use crate::utils::error::{FxError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxConfig {
    pub pipeline: PipelineInfo,
    pub input: InputConfig,
    #[serde(default)]
    pub steps: Vec<StepConfig>,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineInfo {
    pub name: String,
    pub description: Option<String>,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub records_field: Option<String>, // 記錄陣列所在的欄位
}

/// 對單一欄位的判斷條件；`equals`、`matches`、`exists` 恰好設定一個
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionConfig {
    pub field: String,
    pub equals: Option<serde_json::Value>,
    pub matches: Option<String>,
    pub exists: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StepConfig {
    Filter {
        when: Option<ConditionConfig>,
    },
    Select {
        fields: Vec<String>,
        #[serde(default)]
        required: bool,
    },
    Flatten {
        field: String,
        into: Option<String>,
        kind: Option<ValueKind>,
    },
    Kind {
        field: String,
        kind: ValueKind,
    },
}

impl StepConfig {
    pub fn op(&self) -> &'static str {
        match self {
            StepConfig::Filter { .. } => "filter",
            StepConfig::Select { .. } => "select",
            StepConfig::Flatten { .. } => "flatten",
            StepConfig::Kind { .. } => "kind",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    #[default]
    Records,
    First,
    Exists,
    Index,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    #[serde(default)]
    pub mode: OutputMode,
    pub when: Option<ConditionConfig>,
    pub index_by: Option<String>,
}

impl FxConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| FxError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INPUT_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 命令列覆蓋輸入與輸出路徑
    pub fn apply_overrides(&mut self, input: Option<String>, output: Option<String>) {
        if let Some(path) = input {
            self.input.path = path;
        }
        if let Some(path) = output {
            self.output.path = path;
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.path", &self.output.path)?;

        for (i, step) in self.steps.iter().enumerate() {
            let prefix = format!("steps[{}]", i);
            match step {
                StepConfig::Filter { when } => {
                    let field_name = format!("{}.when", prefix);
                    let when = validation::validate_required_field(&field_name, when)?;
                    when.validate_at(&field_name)?;
                }
                StepConfig::Select { fields, .. } => {
                    validation::validate_non_empty_list(&format!("{}.fields", prefix), fields)?;
                }
                StepConfig::Flatten { field, into, .. } => {
                    validation::validate_non_empty_string(&format!("{}.field", prefix), field)?;
                    if let Some(into) = into {
                        validation::validate_non_empty_string(&format!("{}.into", prefix), into)?;
                    }
                }
                StepConfig::Kind { field, .. } => {
                    validation::validate_non_empty_string(&format!("{}.field", prefix), field)?;
                }
            }
        }

        if let Some(when) = &self.output.when {
            if !matches!(self.output.mode, OutputMode::First | OutputMode::Exists) {
                return Err(FxError::ConfigValidationError {
                    field: "output.when".to_string(),
                    message: "Only used by the 'first' and 'exists' modes".to_string(),
                });
            }
            when.validate_at("output.when")?;
        }

        if self.output.mode == OutputMode::Index {
            let index_by =
                validation::validate_required_field("output.index_by", &self.output.index_by)?;
            validation::validate_non_empty_string("output.index_by", index_by)?;
        }

        Ok(())
    }
}

impl ConditionConfig {
    fn validate_at(&self, field_name: &str) -> Result<()> {
        validation::validate_non_empty_string(&format!("{}.field", field_name), &self.field)?;
        validation::validate_exactly_one(
            field_name,
            &[
                ("equals", self.equals.is_some()),
                ("matches", self.matches.is_some()),
                ("exists", self.exists.is_some()),
            ],
        )?;

        if let Some(pattern) = &self.matches {
            Regex::new(pattern)?;
        }
        Ok(())
    }
}

impl Validate for FxConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
