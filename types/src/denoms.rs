//! Allowed-denom policy validation.

use crate::TypesError;

/// Sentinel meaning "every denom is allowed". Only valid as the sole entry.
pub const WILDCARD: &str = "*";

/// Check a proposed allowed-denom list.
///
/// The wildcard must stand alone, and no entry may be blank.
pub fn validate_allowed_denoms(denoms: &[String]) -> Result<(), TypesError> {
    if denoms.iter().any(|d| d == WILDCARD) && denoms.len() > 1 {
        return Err(TypesError::WildcardNotAlone);
    }

    if denoms.iter().any(|d| d.trim().is_empty()) {
        return Err(TypesError::EmptyDenom);
    }

    Ok(())
}
