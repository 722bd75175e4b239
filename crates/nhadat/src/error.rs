/// Failure kinds surfaced by the listing query engine. None of these are
/// retried automatically; each fetch reports a single user-facing failure and
/// leaves previously displayed state untouched.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// The request never reached the server (connectivity, timeout).
    #[error("Network error: {0}. Please check your connection.")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("Server error [{status}]: {message}")]
    Server { status: u16, message: String },

    /// The response body did not match the expected envelope shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),
}

impl Error {
    /// Classify a reqwest transport error. Everything that failed before a
    /// status line arrived counts as a network error.
    pub fn from_transport(err: reqwest::Error) -> Self {
        Error::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::Network("connection refused".to_string());
        assert!(err.to_string().contains("check your connection"));

        let err = Error::Server {
            status: 503,
            message: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "Server error [503]: maintenance");

        let err = Error::Decode("missing field `data`".to_string());
        assert!(err.to_string().contains("missing field `data`"));
    }
}
