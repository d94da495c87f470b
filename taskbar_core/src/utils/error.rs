//! Error handling for the taskbar

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Process error: {message}")]
    Process { message: String },

    #[error("System information error: {message}")]
    Monitor { message: String },

    #[error("Command channel error: {message}")]
    Channel { message: String },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: toml::de::Error,
    },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Helper functions for creating specific error types
impl AppError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn process<S: Into<String>>(message: S) -> Self {
        Self::Process {
            message: message.into(),
        }
    }

    pub fn monitor<S: Into<String>>(message: S) -> Self {
        Self::Monitor {
            message: message.into(),
        }
    }

    pub fn channel<S: Into<String>>(message: S) -> Self {
        Self::Channel {
            message: message.into(),
        }
    }
}
