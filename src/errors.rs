use thiserror::Error;

/// Errors raised at the fallible edges of discovery: configuration,
/// interface selection and client setup. Probing itself never fails.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Invalid Configuration: {0}")]
    InvalidConfig(String),

    #[error("HTTP Client Error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Network Interface Error: {0}")]
    NetworkInterfaceWrapped(#[from] network_interface::Error),

    #[error("Network Interface Error: {0}")]
    NetworkInterfaceCustom(String),

    #[error("Serialization Error: {0}")]
    Serialization(#[from] serde_json::Error),
}
