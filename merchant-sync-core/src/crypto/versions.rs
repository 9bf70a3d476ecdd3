//! Sealing format versions
//!
//! Every sealed setting records the version it was written with, so the key
//! derivation parameters can be raised without breaking stored values.
//! - Version 1: PBKDF2-HMAC-SHA256, 100,000 iterations
//! - Version 2: PBKDF2-HMAC-SHA256, 600,000 iterations (OWASP 2023)

const VERSION_1_ITERATIONS: u32 = 100_000;

const VERSION_2_ITERATIONS: u32 = 600_000;

/// Version used for every new seal
pub const CURRENT_SEAL_VERSION: i32 = 2;

/// PBKDF2 iteration count for a seal version, `None` if unknown
pub const fn pbkdf2_iterations(version: i32) -> Option<u32> {
    match version {
        1 => Some(VERSION_1_ITERATIONS),
        2 => Some(VERSION_2_ITERATIONS),
        _ => None,
    }
}
