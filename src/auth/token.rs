use rand::{rngs::OsRng, RngCore};

/// 256 bits of entropy per token, rendered as 64 hex characters.
const TOKEN_BYTES: usize = 32;

/// Issue an opaque access token from OS randomness. The token carries
/// no structure and is meaningful only via store lookup; it is never
/// derived from user-supplied input.
pub fn issue_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
