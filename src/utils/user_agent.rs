//! User-Agent classification into device type, OS and browser families.
//!
//! Checks run in a fixed order and the first hit wins. Order matters: Chrome and
//! Edge user agents also carry a `Safari` token, Android user agents carry `Linux`.

use regex::Regex;
use std::sync::LazyLock;

static MOBILE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)mobile|android|iphone|ipod|blackberry|iemobile|opera[ -]mini")
        .expect("valid mobile pattern")
});
static TABLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tablet|ipad").expect("valid tablet pattern"));

static WINDOWS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)windows nt").expect("valid windows pattern"));
static MAC_OS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mac os x").expect("valid macos pattern"));
static LINUX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)linux").expect("valid linux pattern"));
static ANDROID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)android").expect("valid android pattern"));
static IOS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)iphone|ipad|ipod").expect("valid ios pattern"));

static FIREFOX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)firefox").expect("valid firefox pattern"));
static EDGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)edg").expect("valid edge pattern"));
static OPERA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)opr|opera").expect("valid opera pattern"));
static CHROME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)chrome").expect("valid chrome pattern"));
static SAFARI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)safari").expect("valid safari pattern"));

/// Returns `"mobile"`, `"tablet"` or `"desktop"`.
pub fn device_type(user_agent: &str) -> &'static str {
    if MOBILE.is_match(user_agent) {
        "mobile"
    } else if TABLET.is_match(user_agent) {
        "tablet"
    } else {
        "desktop"
    }
}

/// Returns the operating system family, `"Other"` when unrecognised.
pub fn operating_system(user_agent: &str) -> &'static str {
    if WINDOWS.is_match(user_agent) {
        "Windows"
    } else if MAC_OS.is_match(user_agent) {
        "macOS"
    } else if LINUX.is_match(user_agent) && !ANDROID.is_match(user_agent) {
        "Linux"
    } else if ANDROID.is_match(user_agent) {
        "Android"
    } else if IOS.is_match(user_agent) {
        "iOS"
    } else {
        "Other"
    }
}

/// Returns the browser family, `"Other"` when unrecognised.
pub fn browser(user_agent: &str) -> &'static str {
    if FIREFOX.is_match(user_agent) {
        "Firefox"
    } else if EDGE.is_match(user_agent) {
        "Edge"
    } else if OPERA.is_match(user_agent) {
        "Opera"
    } else if CHROME.is_match(user_agent) {
        "Chrome"
    } else if SAFARI.is_match(user_agent) {
        "Safari"
    } else {
        "Other"
    }
}
