use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Invalid pattern: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

impl FxError {
    pub fn processing(message: impl Into<String>) -> Self {
        FxError::ProcessingError {
            message: message.into(),
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            FxError::IoError(e) => format!("無法讀寫檔案: {}", e),
            FxError::SerializationError(e) => format!("JSON 格式錯誤: {}", e),
            FxError::PatternError(_) => "正規表達式無法編譯".to_string(),
            FxError::ConfigValidationError { field, .. }
            | FxError::InvalidConfigValueError { field, .. } => {
                format!("配置欄位 '{}' 不正確", field)
            }
            FxError::MissingConfigError { field } => format!("缺少必要配置 '{}'", field),
            FxError::ProcessingError { message } => format!("資料處理失敗: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FxError::IoError(_) => {
                "Check that the input file exists and the output directory is writable"
            }
            FxError::SerializationError(_) => "Make sure the input file contains valid JSON",
            FxError::PatternError(_) => "Fix the 'matches' expression in the config file",
            FxError::ConfigValidationError { .. }
            | FxError::InvalidConfigValueError { .. }
            | FxError::MissingConfigError { .. } => "Review the TOML configuration file",
            FxError::ProcessingError { .. } => "Inspect the input records with --verbose",
        }
    }
}

pub type Result<T> = std::result::Result<T, FxError>;
