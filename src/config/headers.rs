//! HTTP header name constants.
//!
//! Defines the fixed set of security-relevant headers every scan reports on.

/// Content Security Policy header
pub const HEADER_CONTENT_SECURITY_POLICY: &str = "Content-Security-Policy";
/// X-XSS-Protection header
pub const HEADER_X_XSS_PROTECTION: &str = "X-XSS-Protection";
/// X-Content-Type-Options header
pub const HEADER_X_CONTENT_TYPE_OPTIONS: &str = "X-Content-Type-Options";
/// X-Frame-Options header
pub const HEADER_X_FRAME_OPTIONS: &str = "X-Frame-Options";
/// HTTP Strict Transport Security header
pub const HEADER_STRICT_TRANSPORT_SECURITY: &str = "Strict-Transport-Security";
/// Referrer-Policy header
pub const HEADER_REFERRER_POLICY: &str = "Referrer-Policy";
/// Feature-Policy header (superseded by Permissions-Policy, still seen)
pub const HEADER_FEATURE_POLICY: &str = "Feature-Policy";
/// Permissions-Policy header
pub const HEADER_PERMISSIONS_POLICY: &str = "Permissions-Policy";

/// The fixed set of security headers captured for every target.
///
/// Every one of these names appears in every result's security-header map,
/// either with the value the server sent or with [`HEADER_NOT_SET`].
pub const SECURITY_HEADERS: &[&str] = &[
    HEADER_CONTENT_SECURITY_POLICY,
    HEADER_X_XSS_PROTECTION,
    HEADER_X_CONTENT_TYPE_OPTIONS,
    HEADER_X_FRAME_OPTIONS,
    HEADER_STRICT_TRANSPORT_SECURITY,
    HEADER_REFERRER_POLICY,
    HEADER_FEATURE_POLICY,
    HEADER_PERMISSIONS_POLICY,
];

/// Sentinel recorded for a tracked security header the server did not send.
pub const HEADER_NOT_SET: &str = "Not set";
