//! Logical route path composition.
//!
//! # Responsibilities
//! - Compute the effective full path of a route for the registration log
//!
//! # Design Decisions
//! - Logging only: actual dispatch always delegates to the router's own
//!   prefix composition, so this can never change what a request matches

/// Compose `base` and `sub` into the logical full path.
///
/// Rules: a non-empty `sub` without a leading `/` gets one prepended; a root
/// base with an empty `sub` is the root; a root base with a slashed `sub` is
/// the `sub` unchanged; a non-empty base with an empty `sub` is the base.
pub fn full_path(base: &str, sub: &str) -> String {
    let sub = if !sub.is_empty() && !sub.starts_with('/') {
        format!("/{sub}")
    } else {
        sub.to_string()
    };

    if base == "/" && sub.is_empty() {
        "/".to_string()
    } else if base == "/" && sub.starts_with('/') {
        sub
    } else if !base.is_empty() && sub.is_empty() {
        base.to_string()
    } else {
        format!("{base}{sub}")
    }
}
