mod common;

use common::{IPHONE_UA, MAC_SAFARI_UA, WINDOWS_CHROME_UA, catch_all, cond, context, context_with, rule};
use link_router::prelude::*;

#[test]
fn test_no_rules_no_match() {
    let result = evaluate(&[], &context(WINDOWS_CHROME_UA, 50.0));

    assert_eq!(result, EvaluationResult::no_match());
    assert!(!result.matched);
    assert!(result.destination_url.is_none());
}

#[test]
fn test_disabled_rule_never_selected() {
    let rules = vec![catch_all("off", 0).disabled()];

    for percent in [0.0, 25.0, 50.0, 99.9] {
        assert!(!evaluate(&rules, &context(WINDOWS_CHROME_UA, percent)).matched);
    }
}

#[test]
fn test_condition_less_rule_never_selected() {
    let rules = vec![rule("bare", 0, vec![]), rule("weighted", 0, vec![]).with_weight(100)];

    assert!(!evaluate(&rules, &context(IPHONE_UA, 10.0)).matched);
}

#[test]
fn test_evaluation_is_idempotent() {
    let rules = vec![
        catch_all("a", 0).with_weight(30),
        catch_all("b", 0).with_weight(70),
        catch_all("c", 1),
    ];
    let ctx = context(IPHONE_UA, 42.0);

    let first = evaluate(&rules, &ctx);
    for _ in 0..10 {
        assert_eq!(evaluate(&rules, &ctx), first);
    }
}

#[test]
fn test_lower_priority_number_wins() {
    let rules = vec![catch_all("late", 5), catch_all("early", 1), catch_all("mid", 3)];

    let result = evaluate(&rules, &context(WINDOWS_CHROME_UA, 0.0));

    assert_eq!(result.rule_id.as_deref(), Some("early"));
    assert_eq!(result.rule_name.as_deref(), Some("Rule early"));
    assert_eq!(
        result.destination_url.as_deref(),
        Some("https://early.example.com")
    );
}

#[test]
fn test_first_plain_match_in_tier_wins() {
    let rules = vec![catch_all("first", 0), catch_all("second", 0)];

    let result = evaluate(&rules, &context(WINDOWS_CHROME_UA, 0.0));
    assert_eq!(result.rule_id.as_deref(), Some("first"));
}

#[test]
fn test_conditions_are_anded() {
    let spanish_mobile = rule(
        "es_mobile",
        0,
        vec![
            cond("geo.country", ConditionOperator::Equals, "ES"),
            cond("device.type", ConditionOperator::Equals, "mobile"),
        ],
    );
    let rules = vec![spanish_mobile];

    let both = context_with(IPHONE_UA, &[("x-vercel-ip-country", "ES")], &[], 0.0);
    let wrong_country = context_with(IPHONE_UA, &[("x-vercel-ip-country", "FR")], &[], 0.0);
    let wrong_device = context_with(WINDOWS_CHROME_UA, &[("x-vercel-ip-country", "ES")], &[], 0.0);

    assert!(evaluate(&rules, &both).matched);
    assert!(!evaluate(&rules, &wrong_country).matched);
    assert!(!evaluate(&rules, &wrong_device).matched);
}

#[test]
fn test_equals_is_case_insensitive() {
    let rules = vec![rule(
        "mobile",
        0,
        vec![cond("device.type", ConditionOperator::Equals, "Mobile")],
    )];

    assert!(evaluate(&rules, &context(IPHONE_UA, 0.0)).matched);
}

#[test]
fn test_missing_geo_never_matches() {
    let rules = vec![
        rule("us", 0, vec![cond("geo.country", ConditionOperator::Equals, "US")]),
        rule(
            "not_us",
            1,
            vec![cond("geo.country", ConditionOperator::NotEquals, "US")],
        ),
    ];

    assert!(!evaluate(&rules, &context(IPHONE_UA, 0.0)).matched);
}

#[test]
fn test_list_and_contains_operators() {
    let rules = vec![
        rule(
            "latam",
            0,
            vec![cond("geo.country", ConditionOperator::In, "mx, AR ,co")],
        ),
        rule(
            "search",
            1,
            vec![cond("http.referrer", ConditionOperator::Contains, "GOOGLE")],
        ),
    ];

    let mexico = context_with(WINDOWS_CHROME_UA, &[("cf-ipcountry", "MX")], &[], 0.0);
    let from_google = context_with(
        WINDOWS_CHROME_UA,
        &[("referer", "https://www.google.com/search?q=x")],
        &[],
        0.0,
    );

    assert_eq!(evaluate(&rules, &mexico).rule_id.as_deref(), Some("latam"));
    assert_eq!(
        evaluate(&rules, &from_google).rule_id.as_deref(),
        Some("search")
    );
}

#[test]
fn test_numeric_time_operators() {
    // Context time is Sunday 08:30 in March.
    let morning = rule(
        "morning",
        0,
        vec![cond("time.hour", ConditionOperator::Between, "6-11")],
    );
    let weekend = rule(
        "weekend",
        0,
        vec![cond("time.day", ConditionOperator::Gte, "6")],
    );
    let spring = rule(
        "spring",
        0,
        vec![
            cond("time.month", ConditionOperator::Gt, "2"),
            cond("time.month", ConditionOperator::Lte, "5"),
        ],
    );
    let ctx = context(WINDOWS_CHROME_UA, 0.0);

    assert!(evaluate(&[morning], &ctx).matched);
    assert!(evaluate(&[weekend], &ctx).matched);
    assert!(evaluate(&[spring], &ctx).matched);
}

#[test]
fn test_numeric_operator_with_garbage_value_never_matches() {
    let rules = vec![
        rule("gt", 0, vec![cond("time.hour", ConditionOperator::Gt, "noon")]),
        rule("lt", 0, vec![cond("time.hour", ConditionOperator::Lt, "")]),
        rule(
            "range",
            0,
            vec![cond("time.hour", ConditionOperator::Between, "6")],
        ),
    ];

    assert!(!evaluate(&rules, &context(WINDOWS_CHROME_UA, 0.0)).matched);
}

#[test]
fn test_query_variable_and_language() {
    let rules = vec![
        rule(
            "instagram",
            0,
            vec![cond("query.utm_source", ConditionOperator::Equals, "ig")],
        ),
        rule(
            "spanish",
            1,
            vec![cond("http.language", ConditionOperator::Equals, "es")],
        ),
    ];

    let from_ig = context_with(IPHONE_UA, &[], &[("utm_source", "IG")], 0.0);
    let spanish = context_with(
        IPHONE_UA,
        &[("accept-language", "es-ES,es;q=0.9,en;q=0.8")],
        &[],
        0.0,
    );

    assert_eq!(
        evaluate(&rules, &from_ig).rule_id.as_deref(),
        Some("instagram")
    );
    assert_eq!(evaluate(&rules, &spanish).rule_id.as_deref(), Some("spanish"));
}

#[test]
fn test_ab_split_thirty_seventy() {
    let rules = vec![
        catch_all("a", 0).with_weight(30),
        catch_all("b", 0).with_weight(70),
    ];

    assert_eq!(
        evaluate(&rules, &context(IPHONE_UA, 10.0)).rule_id.as_deref(),
        Some("a")
    );
    assert_eq!(
        evaluate(&rules, &context(IPHONE_UA, 95.0)).rule_id.as_deref(),
        Some("b")
    );
    assert_eq!(
        evaluate(&rules, &context(IPHONE_UA, 30.0)).rule_id.as_deref(),
        Some("b")
    );
}

#[test]
fn test_weighted_rules_outrank_plain_in_same_tier() {
    let rules = vec![
        catch_all("plain", 0),
        catch_all("variant_a", 0).with_weight(50),
        catch_all("variant_b", 0).with_weight(50),
    ];

    for (percent, expected) in [(0.0, "variant_a"), (49.9, "variant_a"), (50.0, "variant_b")] {
        let result = evaluate(&rules, &context(IPHONE_UA, percent));
        assert_eq!(result.rule_id.as_deref(), Some(expected));
    }
}

#[test]
fn test_weighted_miss_skips_plain_rules_of_same_tier() {
    let rules = vec![
        catch_all("weighted", 0).with_weight(100),
        catch_all("plain", 0),
        catch_all("next_tier", 1),
    ];
    let ctx = context(IPHONE_UA, f64::NAN);

    assert_eq!(
        evaluate(&rules, &ctx).rule_id.as_deref(),
        Some("next_tier")
    );

    let fallback = RoutingEngine::new().with_plain_fallback(true);
    assert_eq!(
        fallback.evaluate(&rules, &ctx).rule_id.as_deref(),
        Some("plain")
    );
}

#[test]
fn test_unmatched_weighted_rules_fall_through_to_next_tier() {
    let rules = vec![
        rule(
            "es_variant",
            0,
            vec![cond("geo.country", ConditionOperator::Equals, "ES")],
        )
        .with_weight(100),
        catch_all("everyone", 1),
    ];

    let result = evaluate(&rules, &context(IPHONE_UA, 10.0));
    assert_eq!(result.rule_id.as_deref(), Some("everyone"));
}

#[test]
fn test_lone_windows_rule() {
    let windows = RoutingRule::new("win", common::LINK_ID, "Windows", "https://a", 0)
        .with_condition(cond("device.os", ConditionOperator::Equals, "Windows"));
    let rules = vec![windows];

    let on_windows = evaluate(&rules, &context(WINDOWS_CHROME_UA, 0.0));
    assert!(on_windows.matched);
    assert_eq!(on_windows.destination_url.as_deref(), Some("https://a"));
    assert_eq!(on_windows.rule_name.as_deref(), Some("Windows"));

    let on_mac = evaluate(&rules, &context(MAC_SAFARI_UA, 0.0));
    assert_eq!(on_mac, EvaluationResult::no_match());
}

#[test]
fn test_windows_visitor_skips_macos_rule() {
    let rules = vec![
        rule(
            "mac",
            0,
            vec![cond("device.os", ConditionOperator::Equals, "macOS")],
        ),
        rule(
            "windows",
            1,
            vec![cond("device.os", ConditionOperator::Equals, "Windows")],
        ),
    ];

    let windows = evaluate(&rules, &context(WINDOWS_CHROME_UA, 0.0));
    let mac = evaluate(&rules, &context(MAC_SAFARI_UA, 0.0));

    assert_eq!(windows.rule_id.as_deref(), Some("windows"));
    assert_eq!(mac.rule_id.as_deref(), Some("mac"));
}

#[test]
fn test_unsupported_variable_and_operator_never_match() {
    let rules: Vec<RoutingRule> = serde_json::from_value(serde_json::json!([
        {
            "id": "model",
            "linkId": "lnk_1",
            "name": "Device model",
            "destinationUrl": "https://model.example.com",
            "conditions": [{ "variable": "device.model", "operator": "equals", "value": "x" }]
        },
        {
            "id": "regex",
            "linkId": "lnk_1",
            "name": "Regex",
            "destinationUrl": "https://regex.example.com",
            "conditions": [{ "variable": "device.type", "operator": "matches", "value": ".*" }]
        }
    ]))
    .unwrap();

    assert_eq!(rules[1].conditions[0].operator, ConditionOperator::Unsupported);
    assert!(!evaluate(&rules, &context(IPHONE_UA, 0.0)).matched);
}
