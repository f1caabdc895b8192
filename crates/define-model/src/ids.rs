//! OID derivation.
//!
//! Every metadata entity is identified by an OID derived from its semantic
//! coordinates (entity-type prefix plus one or more names). The derivation is
//! deterministic so that independently processed input sections re-derive the
//! same reference OID without shared state.

/// Generate an OID from an ordered list of descriptors.
///
/// Descriptors are joined with `"."`, upper-cased, and spaces are replaced
/// with hyphens: `["IT", "DM", "USUBJID"]` becomes `"IT.DM.USUBJID"`. When
/// the second descriptor is already qualified with the first (for example
/// `["CL", "CL.SEX"]`) the leading prefix is dropped rather than doubled.
///
/// An empty descriptor list yields the empty string.
pub fn generate_oid(descriptors: &[&str]) -> String {
    let joined = if descriptors.len() > 1
        && descriptors[1].starts_with(&format!("{}.", descriptors[0]))
    {
        descriptors[1..].join(".")
    } else {
        descriptors.join(".")
    };
    joined.to_uppercase().replace(' ', "-")
}
