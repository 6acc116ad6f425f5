//! Principal fixtures.

use facetfetch_core::principal::Principal;

/// Parses a principal fixture.
///
/// # Panics
///
/// Panics if `raw` is not a well-formed principal.
#[must_use]
pub fn principal(raw: &str) -> Principal {
    Principal::parse(raw).expect("test principal must be well-formed")
}
