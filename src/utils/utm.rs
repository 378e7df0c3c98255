//! UTM decoration of default destinations.

use url::Url;

use crate::domain::entities::UtmParams;

/// Appends the link's UTM parameters to `destination`.
///
/// Keys already present in the destination's query string are left untouched.
/// Destinations that do not parse as absolute URLs are returned unchanged.
///
/// # Examples
///
/// ```ignore
/// let utm = UtmParams { source: Some("newsletter".into()), ..Default::default() };
/// assert_eq!(
///     append_utm_params("https://example.com/p", &utm),
///     "https://example.com/p?utm_source=newsletter"
/// );
/// ```
pub fn append_utm_params(destination: &str, utm: &UtmParams) -> String {
    let pairs = utm.pairs();
    if pairs.is_empty() {
        return destination.to_string();
    }

    let Ok(mut url) = Url::parse(destination) else {
        return destination.to_string();
    };

    let existing: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
    let missing: Vec<(&str, &str)> = pairs
        .into_iter()
        .filter(|(key, _)| !existing.iter().any(|k| k == key))
        .collect();

    if missing.is_empty() {
        return destination.to_string();
    }

    url.query_pairs_mut().extend_pairs(missing);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utm(source: &str, campaign: &str) -> UtmParams {
        UtmParams {
            source: Some(source.to_string()),
            campaign: Some(campaign.to_string()),
            ..UtmParams::default()
        }
    }

    #[test]
    fn test_appends_to_bare_url() {
        assert_eq!(
            append_utm_params("https://example.com/landing", &utm("mail", "spring")),
            "https://example.com/landing?utm_source=mail&utm_campaign=spring"
        );
    }

    #[test]
    fn test_keeps_existing_query() {
        assert_eq!(
            append_utm_params("https://example.com/?id=7", &utm("mail", "spring")),
            "https://example.com/?id=7&utm_source=mail&utm_campaign=spring"
        );
    }

    #[test]
    fn test_does_not_override_existing_keys() {
        assert_eq!(
            append_utm_params(
                "https://example.com/?utm_source=ads",
                &utm("mail", "spring")
            ),
            "https://example.com/?utm_source=ads&utm_campaign=spring"
        );
    }

    #[test]
    fn test_encodes_values() {
        assert_eq!(
            append_utm_params("https://example.com/", &utm("news letter", "a&b")),
            "https://example.com/?utm_source=news+letter&utm_campaign=a%26b"
        );
    }

    #[test]
    fn test_no_params_returns_input() {
        assert_eq!(
            append_utm_params("https://example.com/x", &UtmParams::default()),
            "https://example.com/x"
        );
    }

    #[test]
    fn test_unparsable_destination_passes_through() {
        assert_eq!(
            append_utm_params("/relative/path", &utm("mail", "spring")),
            "/relative/path"
        );
    }
}
