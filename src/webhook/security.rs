//! Security utilities for GitHub webhook verification
//!
//! GitHub signs every webhook delivery with HMAC-SHA1 using the shared
//! secret configured on the repository. The signature is included in the
//! `x-hub-signature` header with the format `sha1=<hex_signature>`.
//!
//! To verify authenticity:
//! 1. Extract the signature from the x-hub-signature header
//! 2. Compute HMAC-SHA1 of the decoded request body using the shared secret
//! 3. Compare the computed signature with the received signature
//! 4. Only process the request if signatures match
//!
//! The comparison must be constant-time to prevent timing attacks, and the
//! MAC must be computed on the decoded body bytes, not the parsed JSON.

use hmac::{Hmac, Mac};
use lambda_runtime::tracing;
use sha1::Sha1;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;

/// Verifies the x-hub-signature header against the request payload.
///
/// Returns `true` only when the header has the `sha1=<hex>` format and the
/// hex digest matches the HMAC-SHA1 of `payload` keyed with `secret`. The
/// digest comparison is constant-time.
pub fn verify_signature(signature_header: &str, payload: &[u8], secret: &str) -> bool {
    let signature_hex = match signature_header.strip_prefix("sha1=") {
        Some(sig) => sig,
        None => {
            tracing::warn!("invalid signature header format: expected 'sha1=' prefix");
            return false;
        }
    };

    let expected_signature = match hex::decode(signature_hex) {
        Ok(sig) => sig,
        Err(err) => {
            tracing::warn!(error = %err, "failed to decode signature hex");
            return false;
        }
    };

    let mut mac = match HmacSha1::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(err) => {
            tracing::error!(error = %err, "failed to create HMAC instance");
            return false;
        }
    };

    mac.update(payload);
    let computed_signature = mac.finalize().into_bytes();

    let is_valid: bool = computed_signature.ct_eq(&expected_signature[..]).into();

    if !is_valid {
        tracing::warn!("webhook signature verification failed");
    }

    is_valid
}
