//! CLI tool for dry-running routing rules.
//!
//! Evaluates a rule file against a synthesized request, or prints the priority
//! tiers of a rule file together with static diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Which destination would a Spanish iPhone visitor get?
//! cargo run --bin routectl -- evaluate --rules rules.json --link lnk_1 \
//!     --user-agent "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2)" \
//!     --header "x-vercel-ip-country: ES" --header "accept-language: es-ES" \
//!     --query utm_source=ig --percent 42 --at 2024-03-17T08:30:00+01:00
//!
//! # Resolve the final redirect, falling back to the link's default destination
//! cargo run --bin routectl -- evaluate --rules rules.json --link lnk_1 \
//!     --default-url https://example.com
//!
//! # Show tiers and diagnostics
//! cargo run --bin routectl -- inspect --rules rules.json
//! ```
//!
//! # Environment Variables
//!
//! See [`link_router::config`]; a `.env` file is honoured.

use link_router::application::services::{RedirectSource, RoutingService};
use link_router::config;
use link_router::domain::entities::{RoutingRule, ShortLink};
use link_router::domain::repositories::RoutingRuleRepository;
use link_router::domain::routing::{analyze_rules, priority_tiers};
use link_router::infrastructure::memory::InMemoryRuleRepository;
use link_router::telemetry;

use anyhow::{Context, Result};
use axum::http::{HeaderMap, HeaderName, HeaderValue};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use colored::*;
use rand::Rng;
use serde_json::json;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for dry-running link routing rules.
#[derive(Parser)]
#[command(name = "routectl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Evaluate a link's rules against a synthesized request
    Evaluate {
        /// JSON rule file (array of routing rules)
        #[arg(short, long)]
        rules: PathBuf,

        /// Link id whose rules are evaluated
        #[arg(short, long)]
        link: String,

        /// Default destination; when set, the full redirect target is resolved
        #[arg(short, long)]
        default_url: Option<String>,

        /// User-Agent of the simulated visitor
        #[arg(short = 'A', long, default_value = "")]
        user_agent: String,

        /// Request header as "name: value" (repeatable)
        #[arg(short = 'H', long = "header")]
        headers: Vec<String>,

        /// Query parameter as "key=value" (repeatable)
        #[arg(short, long = "query")]
        query: Vec<String>,

        /// Random sample in [0, 100); drawn randomly when omitted
        #[arg(short, long, value_parser = parse_percent)]
        percent: Option<f64>,

        /// Evaluation instant (RFC 3339); local time now when omitted
        #[arg(long)]
        at: Option<String>,

        /// Print JSON instead of a human-readable report
        #[arg(long)]
        json: bool,
    },

    /// Show priority tiers and diagnostics of a rule file
    Inspect {
        /// JSON rule file (array of routing rules)
        #[arg(short, long)]
        rules: PathBuf,

        /// Restrict output to one link
        #[arg(short, long)]
        link: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Invalid configuration")?;
    telemetry::init(&config);
    config.print_summary();

    match cli.command {
        Commands::Evaluate {
            rules,
            link,
            default_url,
            user_agent,
            headers,
            query,
            percent,
            at,
            json,
        } => {
            let request = SimulatedRequest {
                user_agent,
                headers: parse_headers(&headers)?,
                query: parse_query(&query)?,
                percent,
                at: at.as_deref().map(parse_instant).transpose()?,
            };
            evaluate(&config, rules, link, default_url, request, json).await?
        }
        Commands::Inspect { rules, link } => inspect(rules, link)?,
    }

    Ok(())
}

/// Request signals given on the command line.
struct SimulatedRequest {
    user_agent: String,
    headers: HeaderMap,
    query: HashMap<String, String>,
    percent: Option<f64>,
    at: Option<DateTime<chrono::FixedOffset>>,
}

/// Evaluates (or fully resolves) one link's rules and prints the decision.
async fn evaluate(
    config: &config::Config,
    rules_path: PathBuf,
    link_id: String,
    default_url: Option<String>,
    request: SimulatedRequest,
    as_json: bool,
) -> Result<()> {
    let repo = Arc::new(
        InMemoryRuleRepository::from_file(&rules_path)
            .with_context(|| format!("Failed to load rules from {}", rules_path.display()))?,
    );

    let builder = config.context_builder();
    let percent = request
        .percent
        .unwrap_or_else(|| rand::rng().random_range(0.0..100.0));
    let context = match &request.at {
        Some(at) => builder.build_at(
            &request.user_agent,
            &request.headers,
            &request.query,
            at,
            percent,
        ),
        None => builder.build_at(
            &request.user_agent,
            &request.headers,
            &request.query,
            &Local::now(),
            percent,
        ),
    };

    let engine = config.routing_engine();
    let enabled = repo
        .rules_for(&link_id)
        .iter()
        .filter(|rule| rule.enabled)
        .count();

    // With a default destination the service does the fetch and evaluation itself.
    let (result, target) = match default_url {
        Some(url) => {
            let service = RoutingService::with_engine(repo.clone(), engine);
            let link = ShortLink::new(link_id.clone(), link_id.clone(), url);
            (None, Some(service.resolve(&link, &context).await))
        }
        None => {
            let rules = repo
                .find_enabled_by_link(&link_id)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to fetch rules: {}", e))?;
            (Some(engine.evaluate(&rules, &context)), None)
        }
    };

    if as_json {
        let output = json!({
            "context": context,
            "result": result,
            "target": target,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", "🔀 Routing Decision".bright_blue().bold());
    println!();
    println!("  Link:     {}", link_id.cyan());
    println!(
        "  Rules:    {} enabled",
        enabled.to_string().bright_white()
    );
    println!(
        "  Device:   {} / {} / {}",
        context.device.device_type, context.device.os, context.device.browser
    );
    println!(
        "  Geo:      {} / {} / {}",
        context.geo.country.as_deref().unwrap_or("-"),
        context.geo.region.as_deref().unwrap_or("-"),
        context.geo.city.as_deref().unwrap_or("-")
    );
    println!(
        "  Time:     hour {} / day {} / month {}",
        context.time.hour, context.time.day, context.time.month
    );
    println!("  Language: {}", context.http.language);
    println!(
        "  Random:   {}",
        format!("{:.3}", context.random.percent).bright_black()
    );
    println!();

    if let Some(result) = result {
        if result.matched {
            println!(
                "  {} {} → {}",
                "MATCHED".green().bold(),
                result.rule_name.as_deref().unwrap_or_default().cyan(),
                result
                    .destination_url
                    .as_deref()
                    .unwrap_or_default()
                    .bright_white()
            );
        } else {
            println!("  {}", "NO MATCH".yellow().bold());
        }
    }

    if let Some(target) = target {
        let source = match &target.source {
            RedirectSource::Rule { name, .. } => format!("{} rule '{}'", "MATCHED".green().bold(), name),
            RedirectSource::Default => format!("{} default destination", "NO MATCH".yellow().bold()),
            RedirectSource::Degraded => "default destination (rules unavailable)".to_string(),
        };
        println!("  {}", source);
        println!("  Redirect: {}", target.url.bright_white().bold());
    }
    println!();

    Ok(())
}

/// Prints priority tiers and diagnostics for every link in a rule file.
///
/// # Output Format
///
/// ```text
/// 📋 lnk_1
///
///   Priority 0
///     r1  Spanish A           w=50   geo.country equals ES
///     r2  Spanish B           w=50   geo.country equals ES
///   Priority 1
///     r3  Mobile                     device.type equals mobile
/// ```
fn inspect(rules_path: PathBuf, link: Option<String>) -> Result<()> {
    let repo = InMemoryRuleRepository::from_file(&rules_path)
        .with_context(|| format!("Failed to load rules from {}", rules_path.display()))?;

    let link_ids: Vec<String> = match link {
        Some(id) => vec![id],
        None => repo.link_ids().into_iter().map(str::to_string).collect(),
    };

    if link_ids.is_empty() {
        println!("{}", "  No rules found".yellow());
        return Ok(());
    }

    for link_id in &link_ids {
        let rules = repo.rules_for(link_id);
        println!("{}", format!("📋 {}", link_id).bright_blue().bold());
        println!();

        if rules.is_empty() {
            println!("{}", "  No rules for this link".yellow());
            println!();
            continue;
        }

        for (priority, tier) in priority_tiers(rules) {
            println!("  {}", format!("Priority {}", priority).bright_white().bold());
            for rule in tier {
                print_rule(rule);
            }
        }
        println!();

        let issues = analyze_rules(rules);
        if issues.is_empty() {
            println!("  {}", "✅ No issues".green());
        } else {
            for issue in &issues {
                println!("  {} {}", "⚠️ ".yellow(), issue);
            }
        }
        println!();
    }

    Ok(())
}

fn print_rule(rule: &RoutingRule) {
    let weight = rule
        .weight
        .map(|w| format!("w={}", w))
        .unwrap_or_default();
    let conditions = rule
        .conditions
        .iter()
        .map(|c| format!("{} {} {}", c.variable, c.operator.as_str(), c.value))
        .collect::<Vec<_>>()
        .join(" AND ");
    let line = format!(
        "    {:<6} {:<20} {:<6} {}",
        rule.id, rule.name, weight, conditions
    );

    if rule.enabled {
        println!("{}", line);
    } else {
        println!("{} {}", line.bright_black(), "(disabled)".bright_black());
    }
}

fn parse_percent(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if (0.0..100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is outside [0, 100)", value))
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<chrono::FixedOffset>> {
    DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("'{}' is not an RFC 3339 timestamp", raw))
}

fn parse_headers(raw: &[String]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for entry in raw {
        let (name, value) = entry
            .split_once(':')
            .with_context(|| format!("Header '{}' must look like 'name: value'", entry))?;
        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .with_context(|| format!("Invalid header name in '{}'", entry))?;
        let value = HeaderValue::from_str(value.trim())
            .with_context(|| format!("Invalid header value in '{}'", entry))?;
        headers.append(name, value);
    }
    Ok(headers)
}

fn parse_query(raw: &[String]) -> Result<HashMap<String, String>> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("Query parameter '{}' must look like 'key=value'", entry))
        })
        .collect()
}
