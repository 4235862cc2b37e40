use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored configuration object does not match its expected shape.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to decode configuration '{name}': {source}")]
    ConfigDecode {
        /// Name of the configuration object
        name: String,
        /// The underlying deserialization error
        #[source]
        source: serde_json::Error,
    },

    /// A configuration object could not be serialized for storage.
    #[error("Failed to encode configuration '{name}': {source}")]
    ConfigEncode {
        /// Name of the configuration object
        name: String,
        /// The underlying serialization error
        #[source]
        source: serde_json::Error,
    },
}
