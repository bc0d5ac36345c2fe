use std::fmt;

/// Failure taxonomy for the ingestion pipeline.
///
/// `MissingCredentials` and `AuthenticationFailed` are fatal for a run and
/// surface to the caller. `Connectivity` means the retry budget was spent
/// without ever receiving a response; a response that carries an error
/// status is *not* an `Error` - the retry client hands it back for the
/// caller to inspect. The remaining variants wrap local I/O, JSON and
/// SQLite failures.
#[derive(Debug)]
pub enum PipelineError {
    MissingCredentials,
    AuthenticationFailed(String),
    ClientBuild(reqwest::Error),
    Connectivity(reqwest::Error),
    Io(std::io::Error),
    Serde(serde_json::Error),
    Store(rusqlite::Error),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::MissingCredentials => write!(
                f,
                "SPOTIFY_CLIENT_ID and SPOTIFY_CLIENT_SECRET must be set"
            ),
            PipelineError::AuthenticationFailed(body) => {
                write!(f, "Spotify authentication failed: {}", body)
            }
            PipelineError::ClientBuild(err) => {
                write!(f, "cannot build http client: {}", err)
            }
            PipelineError::Connectivity(err) => {
                write!(f, "no response from upstream after retries: {}", err)
            }
            PipelineError::Io(err) => write!(f, "io error: {}", err),
            PipelineError::Serde(err) => write!(f, "serialization error: {}", err),
            PipelineError::Store(err) => write!(f, "track store error: {}", err),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::ClientBuild(err) => Some(err),
            PipelineError::Connectivity(err) => Some(err),
            PipelineError::Io(err) => Some(err),
            PipelineError::Serde(err) => Some(err),
            PipelineError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Io(err)
    }
}

impl From<serde_json::Error> for PipelineError {
    fn from(err: serde_json::Error) -> Self {
        PipelineError::Serde(err)
    }
}

impl From<rusqlite::Error> for PipelineError {
    fn from(err: rusqlite::Error) -> Self {
        PipelineError::Store(err)
    }
}
