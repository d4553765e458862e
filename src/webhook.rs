//! Content webhook signature verification
//!
//! The CMS signs each delivery with a header of the form
//! `t=<unix millis>,v1=<base64url(HMAC-SHA256(secret, "<t>.<body>"))>`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const SIGNATURE_HEADER: &str = "sanity-webhook-signature";

type HmacSha256 = Hmac<Sha256>;

/// Parsed `t=...,v1=...` header
#[derive(Debug, PartialEq, Eq)]
struct SignatureHeader<'a> {
    timestamp: &'a str,
    signature: &'a str,
}

fn parse_header(header: &str) -> Option<SignatureHeader<'_>> {
    let mut timestamp = None;
    let mut signature = None;
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = Some(v),
            Some(("v1", v)) => signature = Some(v),
            _ => {}
        }
    }
    Some(SignatureHeader {
        timestamp: timestamp.filter(|t| !t.is_empty())?,
        signature: signature.filter(|s| !s.is_empty())?,
    })
}

fn mac_for(secret: &str, timestamp: &str, body: &[u8]) -> Option<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    Some(mac)
}

/// Constant-time check of a delivery. An empty secret never validates.
pub fn is_valid_signature(secret: &str, header: Option<&str>, body: &[u8]) -> bool {
    if secret.is_empty() {
        return false;
    }
    let Some(parsed) = header.and_then(parse_header) else {
        return false;
    };
    let Ok(expected) = URL_SAFE_NO_PAD.decode(parsed.signature.trim_end_matches('=')) else {
        return false;
    };
    match mac_for(secret, parsed.timestamp, body) {
        Some(mac) => mac.verify_slice(&expected).is_ok(),
        None => false,
    }
}

/// Header value for `body`, as the CMS would send it
#[cfg(test)]
pub fn sign(secret: &str, timestamp: i64, body: &[u8]) -> String {
    let ts = timestamp.to_string();
    let digest = mac_for(secret, &ts, body)
        .map(|mac| URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
        .unwrap_or_default();
    format!("t={},v1={}", ts, digest)
}
