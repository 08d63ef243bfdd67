//! JSON envelope applied to every outgoing log message.
//!
//! The wire format is a fixed template, one datagram per message:
//!
//! ```text
//! {"@timestamp":"...", "@version":"2", "message":"...", "host":"..."}\n
//! ```
//!
//! The `message` field is interpolated verbatim, with no JSON escaping.
//! Callers must keep quotes, backslashes, and control characters out of
//! their messages or the emitted JSON will be malformed. Collectors that
//! tolerated the upstream format rely on this exact byte layout, so the
//! template is reproduced rather than delegated to a serialiser.

use chrono::Local;

/// Value of the `@version` field on every envelope.
pub const ENVELOPE_VERSION: &str = "2";

/// Render the envelope for `message` using the supplied timestamp and host.
pub fn format_envelope(timestamp: &str, message: &str, host: &str) -> String {
    format!(
        "{{\"@timestamp\":\"{timestamp}\", \"@version\":\"{ENVELOPE_VERSION}\", \"message\":\"{message}\", \"host\":\"{host}\"}}\n"
    )
}

/// Rendering used by [`timestamp_now`]: date, time with trailing
/// fractional zeros trimmed, numeric zone offset.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z";

/// Current local time rendered as a human-readable timestamp.
///
/// Fractional seconds are printed only when non-zero, trimmed to
/// millisecond, microsecond, or nanosecond width.
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Best-effort local hostname lookup.
///
/// Returns an empty string when the lookup fails or the name is not valid
/// Unicode. The fallback is deliberate: a missing host field must never
/// stop a log message from being sent.
pub fn local_hostname() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_default()
}
