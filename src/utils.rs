use base64::{engine::general_purpose::STANDARD, Engine};

// ###################################
// ->   Base64 utils
// ###################################
pub fn b64_encode(v: impl AsRef<[u8]>) -> String {
    STANDARD.encode(v)
}
