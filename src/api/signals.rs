//! Raw request signals extracted from an incoming redirect request.

use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use std::collections::HashMap;
use std::convert::Infallible;

use crate::domain::context::{ContextBuilder, RequestContext};

/// User agent, headers and query parameters of a redirect request.
///
/// Extraction never rejects: a missing or non-UTF-8 `User-Agent` becomes an empty
/// string and an absent query string an empty map.
///
/// # Integration
///
/// ```rust,ignore
/// async fn redirect(
///     Path(code): Path<String>,
///     State(state): State<AppState>,
///     signals: RequestSignals,
/// ) -> Result<Redirect, AppError> {
///     let link = state.links.find(&code).await?;
///     let context = signals.to_context(&state.context_builder);
///     let target = state.routing.resolve(&link, &context).await;
///     Ok(Redirect::temporary(&target.url))
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestSignals {
    pub user_agent: String,
    pub headers: HeaderMap,
    pub query: HashMap<String, String>,
}

impl RequestSignals {
    pub fn from_parts(parts: &Parts) -> Self {
        let user_agent = parts
            .headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Self {
            user_agent,
            headers: parts.headers.clone(),
            query: parse_query(parts.uri.query()),
        }
    }

    /// Builds the request context, drawing the request's random sample.
    pub fn to_context(&self, builder: &ContextBuilder) -> RequestContext {
        builder.build(&self.user_agent, &self.headers, &self.query)
    }
}

impl<S> FromRequestParts<S> for RequestSignals
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

/// Decodes an `application/x-www-form-urlencoded` query; later duplicates win.
fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
