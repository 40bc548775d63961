use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("session has already been destroyed")]
    SessionDestroyed,
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
    #[error("hit tester: {0}")]
    HitTester(String),
    #[error("renderer: {0}")]
    Renderer(String),
}
