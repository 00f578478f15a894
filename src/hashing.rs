//! Hashing - Render Fingerprints
//!
//! A fingerprint names one (symbology, value, configuration, engine version)
//! render. Hosts key their render caches on it: equal fingerprints mean
//! byte-identical output.

use sha2::{Digest, Sha256};

use crate::config::Configuration;
use crate::ENGINE_VERSION;

/// Compute SHA-256 hash of bytes, return hex string
pub fn sha256_hex(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

/// fingerprint = sha256(symbology:value:configuration json:engine version)
///
/// `Configuration` serializes its fields in declaration order, so the JSON
/// is stable for equal configurations.
pub fn render_fingerprint(config: &Configuration, value: &str) -> Result<String, serde_json::Error> {
    let config_json = serde_json::to_string(config)?;
    let combined = format!(
        "{}:{}:{}:{}",
        config.symbology().name(),
        value,
        config_json,
        ENGINE_VERSION
    );
    Ok(sha256_hex(combined.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{keys, Settings};

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_fingerprint_depends_on_value_and_configuration() {
        let config = Configuration::default();
        let a = render_fingerprint(&config, "one").unwrap();
        assert_eq!(a.len(), 64);
        assert_eq!(a, render_fingerprint(&config, "one").unwrap());
        assert_ne!(a, render_fingerprint(&config, "two").unwrap());

        let padded = Configuration::validate(&Settings::new().with(keys::PADDING_LEFT, 3u32)).unwrap();
        assert_ne!(a, render_fingerprint(&padded, "one").unwrap());
    }
}
