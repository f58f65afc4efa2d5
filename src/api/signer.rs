use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use base64::{Engine, engine::general_purpose::STANDARD};
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha1::Sha1;

pub const SIGNATURE_ALGORITHM: &str = "HMAC-SHA1";
pub const SIGNATURE_VERSION: &str = "1.0";

/// Everything except RFC 3986 unreserved characters is escaped.
const SIGN_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Joins the sorted sign parameters onto the request path, appending the
/// upper-case MD5 of the body when there is one.
pub fn string_to_sign(path: &str, params: &BTreeMap<String, String>, body: Option<&str>) -> String {
    let joined = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&");

    let mut result = format!("{}&{}", path, joined);
    if let Some(body) = body.filter(|body| !body.is_empty()) {
        result.push('&');
        result.push_str(&hex::encode_upper(Md5::digest(body.as_bytes())));
    }

    result
}

pub fn sign(app_secret: &str, string_to_sign: &str) -> Result<String> {
    let encoded = utf8_percent_encode(string_to_sign, SIGN_ENCODE_SET).to_string();
    hmac_sha1_base64(&format!("{}&", app_secret), &encoded)
}

pub fn hmac_sha1_base64(key: &str, message: &str) -> Result<String> {
    let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
        .map_err(|err| anyhow!("Invalid signing key: {}", err))?;
    mac.update(message.as_bytes());
    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}

pub fn nonce() -> String {
    format!("{:032x}", rand::random::<u128>())
}
