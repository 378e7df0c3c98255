#![allow(dead_code)]

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use chrono::{FixedOffset, TimeZone};
use link_router::prelude::*;
use std::collections::HashMap;

pub const LINK_ID: &str = "lnk_1";

pub const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1";
pub const WINDOWS_CHROME_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const MAC_SAFARI_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15";

/// A condition shorthand.
pub fn cond(variable: &str, operator: ConditionOperator, value: &str) -> RuleCondition {
    RuleCondition::new(variable, operator, value)
}

/// An enabled rule for [`LINK_ID`] whose destination is derived from its id.
pub fn rule(id: &str, priority: i32, conditions: Vec<RuleCondition>) -> RoutingRule {
    let mut rule = RoutingRule::new(
        id,
        LINK_ID,
        format!("Rule {}", id),
        format!("https://{}.example.com", id),
        priority,
    );
    rule.conditions = conditions;
    rule
}

/// A rule matching every desktop/mobile/tablet request.
pub fn catch_all(id: &str, priority: i32) -> RoutingRule {
    rule(
        id,
        priority,
        vec![cond("device.type", ConditionOperator::NotEquals, "none")],
    )
}

pub fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in pairs {
        headers.append(
            HeaderName::from_bytes(name.as_bytes()).unwrap(),
            HeaderValue::from_str(value).unwrap(),
        );
    }
    headers
}

/// Builds a context for Sunday 2024-03-17 08:30 at UTC+1.
pub fn context_with(
    user_agent: &str,
    header_pairs: &[(&str, &str)],
    query: &[(&str, &str)],
    percent: f64,
) -> RequestContext {
    let offset = FixedOffset::east_opt(3600).unwrap();
    let now = offset.with_ymd_and_hms(2024, 3, 17, 8, 30, 0).unwrap();
    let query: HashMap<String, String> = query
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    ContextBuilder::default().build_at(user_agent, &headers(header_pairs), &query, &now, percent)
}

pub fn context(user_agent: &str, percent: f64) -> RequestContext {
    context_with(user_agent, &[], &[], percent)
}

pub fn test_link() -> ShortLink {
    ShortLink::new(LINK_ID, "promo2025", "https://example.com/landing").with_utm(UtmParams {
        source: Some("newsletter".to_string()),
        campaign: Some("spring".to_string()),
        ..UtmParams::default()
    })
}
