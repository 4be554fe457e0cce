//! HTTP transport for the xAI REST API.

mod rest;
mod retry;

pub use rest::{RestClient, MAX_RESPONSE_SIZE};
pub use retry::{with_retry, RetryPolicy};

/// Percent-encode a single URL path segment (RFC 3986 unreserved characters pass through).
pub fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_segment() {
        assert_eq!(encode_path_segment("grok-2-1212"), "grok-2-1212");
        assert_eq!(encode_path_segment("a/b c"), "a%2Fb%20c");
    }
}
