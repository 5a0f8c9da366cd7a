use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

fn argon2_config<'a>() -> argon2::Config<'a> {
    argon2::Config {
        variant: argon2::Variant::Argon2id,
        version: argon2::Version::Version13,
        mem_cost: 4096,
        time_cost: 1,
        lanes: 2,
        hash_length: 32,
        ..argon2::Config::default()
    }
}

fn generate_salt() -> [u8; 16] {
    rand::thread_rng().gen()
}

/// Hashes a plaintext password into an encoded argon2id string, salt included.
pub fn hash(plaintext: &str) -> Result<String, argon2::Error> {
    let salt = generate_salt();
    argon2::hash_encoded(plaintext.as_bytes(), &salt, &argon2_config())
}

/// Checks a plaintext password against an encoded hash.
/// A malformed hash never verifies.
pub fn verify(plaintext: &str, hash: &str) -> bool {
    argon2::verify_encoded(hash, plaintext.as_bytes()).unwrap_or(false)
}

type HmacSha256 = Hmac<Sha256>;

pub fn generate_token_sig_key() -> [u8; 32] {
    rand::thread_rng().gen()
}

pub fn sign(key: &[u8; 32], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take a key of any size");
    mac.update(data);

    mac.finalize().into_bytes().to_vec()
}

pub fn verify_signature(key: &[u8; 32], data: &[u8], signature: &[u8]) -> bool {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC can take a key of any size");
    mac.update(data);

    mac.verify_slice(signature).is_ok()
}
