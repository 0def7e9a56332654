/// Core error type for the bot.
///
/// Adapter crates map their specific failures into this type so the poll
/// loop can tell fatal startup problems (configuration only) from
/// iteration-level failures it reports to the chat and survives.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("required environment variable {0} is missing or empty")]
    MissingConfiguration(&'static str),

    #[error("config error: {0}")]
    Config(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected api status {status} {reason}: {body}")]
    UnexpectedStatus {
        status: u16,
        reason: String,
        body: String,
    },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("unrecognized homework status: {0}")]
    UnrecognizedStatus(String),

    #[error("delivery failure: {0}")]
    Delivery(String),
}

pub type Result<T> = std::result::Result<T, Error>;
