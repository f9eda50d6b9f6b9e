use anyhow::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorType {
    ConnectionRefused,
    Timeout,
    Unauthorized, // HTTP 401
    Forbidden,    // HTTP 403, folder belongs to someone else
    NotFound,     // HTTP 404
    ServerError,  // HTTP 500+
    NetworkError, // DNS, routing, etc.
    Other,
}

impl ErrorType {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorType::ConnectionRefused => "connection refused",
            ErrorType::Timeout => "timed out",
            ErrorType::Unauthorized => "not logged in",
            ErrorType::Forbidden => "permission denied",
            ErrorType::NotFound => "not found",
            ErrorType::ServerError => "server error",
            ErrorType::NetworkError => "network error",
            ErrorType::Other => "error",
        }
    }
}

/// Classify an error by walking its chain
pub fn classify_error(error: &Error) -> ErrorType {
    // HTTP status wins over message sniffing
    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            if reqwest_err.is_timeout() {
                return ErrorType::Timeout;
            }
            if let Some(status) = reqwest_err.status() {
                return match status.as_u16() {
                    401 => ErrorType::Unauthorized,
                    403 => ErrorType::Forbidden,
                    404 => ErrorType::NotFound,
                    500..=599 => ErrorType::ServerError,
                    _ => ErrorType::Other,
                };
            }
        }
    }

    let error_msg = format!("{:#}", error).to_lowercase();

    if error_msg.contains("connection refused") {
        return ErrorType::ConnectionRefused;
    }
    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        return ErrorType::Timeout;
    }
    if error_msg.contains("dns") || error_msg.contains("network") {
        return ErrorType::NetworkError;
    }

    ErrorType::Other
}

/// Root cause of an error, for alerts and logs
pub fn format_error_message(error: &Error) -> String {
    for cause in error.chain() {
        if let Some(reqwest_err) = cause.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
    }

    error
        .chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| error.to_string())
}
