use sha1::{Digest, Sha1};

/// Request signature: lowercase hex SHA-1 of `api_key + path + body + api_secret`.
///
/// `body` is the empty string for requests without a payload.
pub fn sign(api_key: &str, path: &str, body: &str, api_secret: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(api_key.as_bytes());
    hasher.update(path.as_bytes());
    hasher.update(body.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
