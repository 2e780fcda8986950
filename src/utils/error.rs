use thiserror::Error;

#[derive(Error, Debug)]
pub enum FactoryError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

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

    #[error("Invalid input '{value}' for {field}: {reason}")]
    InputError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown menu option: '{input}'")]
    InvalidCommand { input: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FactoryError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            FactoryError::ConfigError { .. }
            | FactoryError::ConfigValidationError { .. }
            | FactoryError::InvalidConfigValueError { .. }
            | FactoryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            FactoryError::InputError { .. } | FactoryError::InvalidCommand { .. } => {
                ErrorCategory::Input
            }
            FactoryError::IoError(_) | FactoryError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => match self {
                FactoryError::SerializationError(_) => ErrorSeverity::Medium,
                _ => ErrorSeverity::Critical,
            },
        }
    }

    /// Short message meant for the operator at the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            FactoryError::IoError(e) => format!("Falha de entrada/saída: {}", e),
            FactoryError::SerializationError(e) => {
                format!("Falha ao serializar os dados do relatório: {}", e)
            }
            FactoryError::ConfigError { message } => format!("Configuração inválida: {}", message),
            FactoryError::ConfigValidationError { field, message } => {
                format!("Configuração inválida em '{}': {}", field, message)
            }
            FactoryError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Valor '{}' inválido para '{}': {}", value, field, reason),
            FactoryError::MissingConfigError { field } => {
                format!("Configuração obrigatória ausente: {}", field)
            }
            FactoryError::InputError { reason, .. } => format!("Valor inválido: {}", reason),
            FactoryError::InvalidCommand { .. } => {
                "Opção inválida. Escolha um número entre 0 e 9.".to_string()
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FactoryError::IoError(_) => "Verifique permissões e o caminho do arquivo",
            FactoryError::SerializationError(_) => "Tente exportar novamente",
            FactoryError::ConfigError { .. }
            | FactoryError::ConfigValidationError { .. }
            | FactoryError::InvalidConfigValueError { .. } => {
                "Revise o arquivo de configuração TOML e os argumentos da linha de comando"
            }
            FactoryError::MissingConfigError { .. } => {
                "Informe o valor no arquivo de configuração ou por argumento"
            }
            FactoryError::InputError { .. } => "Digite o valor novamente",
            FactoryError::InvalidCommand { .. } => "Consulte o menu e escolha uma opção listada",
        }
    }
}

pub type Result<T> = std::result::Result<T, FactoryError>;
