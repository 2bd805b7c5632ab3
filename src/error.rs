// SPDX-License-Identifier: MPL-2.0
use crate::application::port::CameraError;
use crate::infrastructure::http::ApiError;
use crate::media::capture::CaptureError;
use crate::media::validation::ValidationError;
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Image(String),
    Camera(CameraError),
    Validation(ValidationError),
    Capture(CaptureError),
    Api(ApiError),
    /// The booth refused an action; the message is meant for the user.
    Rejected(String),
    /// Bad command-line arguments.
    Usage(String),
    /// A gesture script line could not be parsed (1-based line number).
    Script { line: usize, message: String },
}

impl Error {
    /// Whether the failure calls for a fresh login rather than a retry.
    #[must_use]
    pub fn is_auth_required(&self) -> bool {
        matches!(self, Error::Api(ApiError::AuthRequired))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Image(e) => write!(f, "Image Error: {}", e),
            Error::Camera(e) => write!(f, "Camera Error: {}", e),
            Error::Validation(e) => write!(f, "Validation Error: {}", e),
            Error::Capture(e) => write!(f, "Capture Error: {}", e),
            Error::Api(e) => write!(f, "API Error: {}", e),
            Error::Rejected(e) => write!(f, "{}", e),
            Error::Usage(e) => write!(f, "Usage Error: {}", e),
            Error::Script { line, message } => {
                write!(f, "Script Error: line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<pico_args::Error> for Error {
    fn from(err: pico_args::Error) -> Self {
        Error::Usage(err.to_string())
    }
}

impl From<CameraError> for Error {
    fn from(err: CameraError) -> Self {
        Error::Camera(err)
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Error::Validation(err)
    }
}

impl From<CaptureError> for Error {
    fn from(err: CaptureError) -> Self {
        Error::Capture(err)
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn auth_required_is_detected() {
        let err: Error = ApiError::AuthRequired.into();
        assert!(err.is_auth_required());

        let other: Error = ApiError::Server("Upload failed".into()).into();
        assert!(!other.is_auth_required());
    }

    #[test]
    fn script_error_names_the_line() {
        let err = Error::Script {
            line: 3,
            message: "unknown gesture 'jump'".into(),
        };
        assert_eq!(
            format!("{}", err),
            "Script Error: line 3: unknown gesture 'jump'"
        );
    }

    #[test]
    fn validation_error_wraps_message() {
        let err: Error = ValidationError::InvalidFilename("bad name.png".into()).into();
        assert!(format!("{}", err).starts_with("Validation Error:"));
    }
}
