//! Byte codecs for payloads that leave the process.
//!
//! Homestead itself never touches a socket. The only bytes it produces are
//! the payloads handed to the cross-server dispatcher (see
//! [`RemoteCommand`](crate::RemoteCommand)), which a proxy plugin channel
//! forwards to the target server. Keeping the format behind a trait lets a
//! deployment swap JSON for something denser without touching callers.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes values to bytes and back.
///
/// `Send + Sync + 'static` because the codec is stored inside the shared
/// server state, which is handed to Tokio tasks.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if the value cannot be represented.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` on malformed or mismatched input.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// A [`Codec`] backed by `serde_json`.
///
/// Human-readable, so a proxy operator can tail the plugin channel and see
/// exactly which command was forwarded where.
///
/// ```rust
/// use homestead_protocol::{Codec, JsonCodec, PlayerId, RemoteCommand};
///
/// let cmd = RemoteCommand::new(PlayerId::nil(), "home base", "creative");
/// let bytes = JsonCodec.encode(&cmd).unwrap();
/// let back: RemoteCommand = JsonCodec.decode(&bytes).unwrap();
/// assert_eq!(cmd, back);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
