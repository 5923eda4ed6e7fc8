use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown reaction: {name}")]
    UnknownReaction { name: String },

    #[error("unknown mascot: {name}")]
    UnknownMascot { name: String },

    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    #[cfg(feature = "json")]
    #[error("failed to parse page JSON: {message}")]
    JsonParse { message: String },

    #[cfg(feature = "json")]
    #[error("unknown greeting reaction '{reaction}' for mascot '{mascot}'")]
    JsonUnknownGreeting { mascot: String, reaction: String },

    #[cfg(feature = "json")]
    #[error("unsupported reaction trigger '{value}' for reaction '{reaction}'")]
    JsonUnsupportedTrigger { reaction: String, value: String },

    #[cfg(feature = "json")]
    #[error("unsupported retrigger policy '{value}' for mascot '{mascot}'")]
    JsonUnsupportedRetrigger { mascot: String, value: String },

    #[cfg(feature = "json")]
    #[error("invalid scroll band for mascot '{mascot}': {message}")]
    JsonInvalidScrollBand { mascot: String, message: String },

    #[cfg(feature = "json")]
    #[error("invalid duration for {context}: {message}")]
    JsonInvalidDuration { context: String, message: String },

    #[cfg(feature = "json")]
    #[error("reaction '{reaction}' for mascot '{mascot}' has no selectors")]
    JsonEmptySelectors { mascot: String, reaction: String },
}
