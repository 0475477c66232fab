use std::fmt;

/// A lifecycle hook was called out of order.
///
/// The generator relies on the driver calling `begin_file`, then
/// `begin_feature` / `gen_cmd`* / `end_feature` per feature, then
/// `end_file`. Any deviation aborts the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolViolation {
    /// `begin_feature` while another feature is still open.
    FeatureAlreadyOpen {
        /// The feature that is open
        open: String,
        /// The feature the driver tried to start
        requested: String,
    },
    /// `gen_cmd` or `end_feature` with no open feature.
    NoOpenFeature {
        /// Hook that was called
        operation: &'static str,
    },
    /// A hook was called before `begin_file`.
    RunNotStarted {
        /// Hook that was called
        operation: &'static str,
    },
    /// `begin_file` while the run is already under way.
    RunAlreadyStarted,
    /// A hook was called after `end_file`.
    RunAlreadyFinished {
        /// Hook that was called
        operation: &'static str,
    },
    /// `end_file` while a feature is still open.
    UnclosedFeature {
        /// The feature left open
        name: String,
    },
    /// A feature name was completed twice in one run.
    DuplicateFeature {
        /// The repeated name
        name: String,
    },
}

impl fmt::Display for ProtocolViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolViolation::FeatureAlreadyOpen { open, requested } => write!(
                f,
                "Protocol violation: cannot begin feature '{requested}' while '{open}' is still open"
            ),
            ProtocolViolation::NoOpenFeature { operation } => {
                write!(f, "Protocol violation: {operation} called with no open feature")
            }
            ProtocolViolation::RunNotStarted { operation } => {
                write!(f, "Protocol violation: {operation} called before begin_file")
            }
            ProtocolViolation::RunAlreadyStarted => {
                write!(f, "Protocol violation: begin_file called while the run is in progress")
            }
            ProtocolViolation::RunAlreadyFinished { operation } => {
                write!(f, "Protocol violation: {operation} called after end_file")
            }
            ProtocolViolation::UnclosedFeature { name } => write!(
                f,
                "Protocol violation: end_file called while feature '{name}' is still open"
            ),
            ProtocolViolation::DuplicateFeature { name } => {
                write!(f, "Protocol violation: feature '{name}' emitted twice")
            }
        }
    }
}

impl std::error::Error for ProtocolViolation {}

/// Error returned by the [`OutputGenerator`](super::OutputGenerator) hooks.
#[derive(Debug)]
pub enum GeneratorError {
    /// The driver broke the lifecycle contract
    Protocol(ProtocolViolation),
    /// Writing to the output sink failed
    Io(std::io::Error),
    /// A fixed template failed to render
    Render(askama::Error),
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::Protocol(v) => write!(f, "{v}"),
            GeneratorError::Io(e) => write!(f, "failed to write generated output: {e}"),
            GeneratorError::Render(e) => write!(f, "failed to render template: {e}"),
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeneratorError::Protocol(v) => Some(v),
            GeneratorError::Io(e) => Some(e),
            GeneratorError::Render(e) => Some(e),
        }
    }
}

impl From<ProtocolViolation> for GeneratorError {
    fn from(v: ProtocolViolation) -> Self {
        GeneratorError::Protocol(v)
    }
}

impl From<std::io::Error> for GeneratorError {
    fn from(e: std::io::Error) -> Self {
        GeneratorError::Io(e)
    }
}

impl From<askama::Error> for GeneratorError {
    fn from(e: askama::Error) -> Self {
        GeneratorError::Render(e)
    }
}

impl GeneratorError {
    /// The protocol violation behind this error, if any.
    pub fn as_protocol(&self) -> Option<&ProtocolViolation> {
        match self {
            GeneratorError::Protocol(v) => Some(v),
            _ => None,
        }
    }
}
