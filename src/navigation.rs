//! Where the browser goes next after a page action.

use serde::Serialize;

pub const SIGN_IN_PATH: &str = "/signin";
pub const SIGN_UP_PATH: &str = "/signin/signup";
pub const ACCOUNT_PATH: &str = "/account";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Navigation {
    /// Stay on the current page.
    Stay,
    /// Client-side redirect to a path of this site.
    Redirect(String),
    /// Hand the session to the processor's hosted checkout.
    Checkout { session_id: String },
    /// Leave the site for an external URL.
    External(String),
}

/// Builds `<path>?error=<name>&error_description=<description>`.
pub fn error_redirect(path: &str, name: &str, description: &str) -> String {
    let separator = if path.contains('?') { '&' } else { '?' };
    format!(
        "{path}{separator}error={}&error_description={}",
        encode_component(name),
        encode_component(description)
    )
}

fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_redirect_encodes_message() {
        assert_eq!(
            error_redirect("/pricing", "An unknown error occurred.", "Try again"),
            "/pricing?error=An%20unknown%20error%20occurred.&error_description=Try%20again"
        );
        assert!(
            error_redirect("/account?tab=plan", "x", "y").starts_with("/account?tab=plan&error=")
        );
    }
}
