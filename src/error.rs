use thiserror::Error;

/// Problems with the process environment. Never retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Input rejected before any work is attempted. Shown inline to the user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name to start the quiz.")]
    EmptyName,
    #[error("A quiz session is already in progress.")]
    SessionActive,
    #[error("There are no questions to ask.")]
    NoQuestions,
    #[error("Please upload an image and provide an editing prompt.")]
    MissingImage,
    #[error("Please upload an image and provide an editing prompt.")]
    EmptyInstruction,
    #[error("An edit is already being generated, please wait.")]
    EditInProgress,
}

/// Failures of the image generation call.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),
    #[error("request to the image service failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("image service answered with HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("image service returned no candidates")]
    NoCandidate,
    #[error("could not edit image or no image was returned")]
    NoImage,
    #[error("image payload is not valid base64: {0}")]
    Decode(#[from] base64::DecodeError),
}

impl GatewayError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, GatewayError::Configuration(_))
    }
}
