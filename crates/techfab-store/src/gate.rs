//! # Admin Gate
//!
//! Confirmation gate for irreversible operations (permanent delete, factory
//! reset), and the deterministic device key the admin password derives from.
//!
//! This is an access convenience, NOT a security control: the key is a plain
//! checksum of the device identifier and the check is string equality. It
//! exists so a second, deliberate step stands between the user and data
//! loss.

use crate::error::{StoreError, StoreResult};

/// Proof that the caller passed the admin check.
///
/// The only way to obtain one is [`AdminGate::unlock`]; store methods that
/// destroy data take `&AdminGate` so the type system enforces the gate.
pub struct AdminGate {
    _private: (),
}

impl AdminGate {
    /// Unlocks the gate if `input` matches the expected admin password.
    ///
    /// ## Example
    /// ```rust
    /// use techfab_store::gate::AdminGate;
    ///
    /// assert!(AdminGate::unlock("1776", "1776").is_ok());
    /// assert!(AdminGate::unlock("wrong", "1776").is_err());
    /// ```
    pub fn unlock(input: &str, expected: &str) -> StoreResult<AdminGate> {
        if !expected.is_empty() && input == expected {
            Ok(AdminGate { _private: () })
        } else {
            Err(StoreError::AccessDenied)
        }
    }
}

/// Derives the device-bound access key from a system identifier.
///
/// The key is the sum of the identifier's numeric digits multiplied by 888,
/// rendered as a decimal string. Deterministic per device, trivially
/// reproducible on purpose - support staff can read the key to a user over
/// the phone from the device id alone.
///
/// ## Example
/// ```rust
/// use techfab_store::gate::access_key;
///
/// // digits 1+2+3 = 6, × 888 = 5328
/// assert_eq!(access_key("a1b2c3"), "5328");
/// ```
pub fn access_key(system_id: &str) -> String {
    let digit_sum: u64 = system_id.chars().filter_map(|c| c.to_digit(10)).map(u64::from).sum();
    (digit_sum * 888).to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
