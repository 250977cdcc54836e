use anyhow::{Result, bail};

#[cfg(feature = "json")]
use serde::{Serialize, de::DeserializeOwned};

#[cfg(feature = "bincode")]
use bincode::{Decode, Encode};

// ============================================================================
// Descriptor Encoding
// ============================================================================

// Largest payload accepted by the decoders
pub const MAX_ENCODED_SIZE: usize = 1024 * 1024; // 1MB

fn check_size(data: &[u8]) -> Result<()> {
    if data.len() > MAX_ENCODED_SIZE {
        bail!("payload of {} bytes exceeds the {MAX_ENCODED_SIZE} byte limit", data.len());
    }
    Ok(())
}

#[cfg(feature = "json")]
pub fn encode_json<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(value)?)
}

#[cfg(feature = "json")]
pub fn decode_json<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    check_size(data)?;
    Ok(serde_json::from_slice(data)?)
}

#[cfg(feature = "bincode")]
pub fn encode_bincode<T: Encode>(value: &T) -> Result<Vec<u8>> {
    Ok(bincode::encode_to_vec(value, bincode::config::standard())?)
}

#[cfg(feature = "bincode")]
pub fn decode_bincode<T: Decode<()>>(data: &[u8]) -> Result<T> {
    check_size(data)?;
    Ok(bincode::decode_from_slice(data, bincode::config::standard())?.0)
}
