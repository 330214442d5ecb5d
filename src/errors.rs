use actix_web::http::StatusCode;
use std::fmt;

#[derive(Debug, Clone)]
pub enum ImsakiaError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Serialization(String),
    PayloadDecode(String),
}

impl ImsakiaError {
    pub fn code(&self) -> &'static str {
        match self {
            ImsakiaError::DatabaseConfig(_) => "E001",
            ImsakiaError::DatabaseConnection(_) => "E002",
            ImsakiaError::DatabaseOperation(_) => "E003",
            ImsakiaError::FileOperation(_) => "E004",
            ImsakiaError::Validation(_) => "E005",
            ImsakiaError::NotFound(_) => "E006",
            ImsakiaError::Serialization(_) => "E007",
            ImsakiaError::PayloadDecode(_) => "E008",
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ImsakiaError::DatabaseConfig(_) => "Database Configuration Error",
            ImsakiaError::DatabaseConnection(_) => "Database Connection Error",
            ImsakiaError::DatabaseOperation(_) => "Database Operation Error",
            ImsakiaError::FileOperation(_) => "File Operation Error",
            ImsakiaError::Validation(_) => "Validation Error",
            ImsakiaError::NotFound(_) => "Resource Not Found",
            ImsakiaError::Serialization(_) => "Serialization Error",
            ImsakiaError::PayloadDecode(_) => "Payload Decode Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ImsakiaError::DatabaseConfig(msg) => msg,
            ImsakiaError::DatabaseConnection(msg) => msg,
            ImsakiaError::DatabaseOperation(msg) => msg,
            ImsakiaError::FileOperation(msg) => msg,
            ImsakiaError::Validation(msg) => msg,
            ImsakiaError::NotFound(msg) => msg,
            ImsakiaError::Serialization(msg) => msg,
            ImsakiaError::PayloadDecode(msg) => msg,
        }
    }

    /// HTTP status this error maps to on the operator-facing API.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ImsakiaError::Validation(_) => StatusCode::BAD_REQUEST,
            ImsakiaError::NotFound(_) => StatusCode::NOT_FOUND,
            ImsakiaError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            ImsakiaError::DatabaseConfig(_)
            | ImsakiaError::DatabaseOperation(_)
            | ImsakiaError::FileOperation(_)
            | ImsakiaError::Serialization(_)
            | ImsakiaError::PayloadDecode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Colored output for interactive CLI use.
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ImsakiaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ImsakiaError {}

impl ImsakiaError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::NotFound(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::Serialization(msg.into())
    }

    pub fn payload_decode<T: Into<String>>(msg: T) -> Self {
        ImsakiaError::PayloadDecode(msg.into())
    }
}

impl From<sea_orm::DbErr> for ImsakiaError {
    fn from(err: sea_orm::DbErr) -> Self {
        ImsakiaError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for ImsakiaError {
    fn from(err: std::io::Error) -> Self {
        ImsakiaError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ImsakiaError {
    fn from(err: serde_json::Error) -> Self {
        ImsakiaError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImsakiaError>;
