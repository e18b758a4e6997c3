use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Bad {role} address '{address}': {source}")]
    Address {
        role: &'static str,
        address: String,
        #[source]
        source: lettre::address::AddressError,
    },

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("Sendmail failed: {0}")]
    Sendmail(#[from] lettre::transport::sendmail::Error),
}

pub type Result<T> = std::result::Result<T, MailError>;
