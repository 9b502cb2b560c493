//! Typeahead search request payload.
//!
//! The endpoint takes a JSON array of GraphQL operations. Only one operation
//! is ever sent: the pre-registered typeahead query, identified by its query
//! id rather than by query text.

use std::collections::BTreeMap;

use attractions_config::SearchConfig;
use attractions_models::LocationType;
use serde::Serialize;

/// One GraphQL operation in the request array.
#[derive(Debug, Serialize)]
pub struct SearchOperation<'a> {
    /// Operation variables.
    pub variables: SearchVariables<'a>,
    /// Pre-registered query id.
    pub query: &'a str,
    /// Extensions naming the pre-registered query.
    pub extensions: SearchExtensions<'a>,
}

/// Variables wrapper.
#[derive(Debug, Serialize)]
pub struct SearchVariables<'a> {
    /// The typeahead request itself.
    pub request: SearchRequest<'a>,
}

/// Typeahead search parameters.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub limit: u32,
    pub scope: &'a str,
    pub locale: &'a str,
    pub scope_geo_id: u64,
    /// Always `null`; the scope geo id centres the search.
    pub search_center: Option<&'a str>,
    pub types: &'a [String],
    pub location_types: &'a [LocationType],
    /// Always `null`; requests are anonymous.
    pub user_id: Option<&'a str>,
    /// Always an empty object.
    pub context: BTreeMap<&'a str, &'a str>,
    pub enabled_features: &'a [String],
    pub include_recent: bool,
}

/// Extensions block.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchExtensions<'a> {
    pub pre_registered_query_id: &'a str,
}

/// Builds the single-element operation array for `query`.
#[must_use]
pub fn build_payload<'a>(config: &'a SearchConfig, query: &'a str) -> [SearchOperation<'a>; 1] {
    [SearchOperation {
        variables: SearchVariables {
            request: SearchRequest {
                query,
                limit: config.limit,
                scope: &config.scope,
                locale: &config.locale,
                scope_geo_id: config.scope_geo_id,
                search_center: None,
                types: &config.result_types,
                location_types: &config.location_types,
                user_id: None,
                context: BTreeMap::new(),
                enabled_features: &config.enabled_features,
                include_recent: config.include_recent,
            },
        },
        query: &config.query_id,
        extensions: SearchExtensions {
            pre_registered_query_id: &config.query_id,
        },
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_matches_expected_shape() {
        let config = attractions_config::AppConfig::embedded().search;
        let value = serde_json::to_value(build_payload(&config, "Hue")).unwrap();

        let ops = value.as_array().unwrap();
        assert_eq!(ops.len(), 1);

        let op = &ops[0];
        assert_eq!(op["query"], "84b17ed122fbdbd4");
        assert_eq!(op["extensions"]["preRegisteredQueryId"], "84b17ed122fbdbd4");

        let request = &op["variables"]["request"];
        assert_eq!(request["query"], "Hue");
        assert_eq!(request["limit"], 10);
        assert_eq!(request["scope"], "WORLDWIDE");
        assert_eq!(request["locale"], "en-US");
        assert_eq!(request["scopeGeoId"], 1);
        assert!(request["searchCenter"].is_null());
        assert!(request["userId"].is_null());
        assert_eq!(request["context"], serde_json::json!({}));
        assert_eq!(request["types"], serde_json::json!(["LOCATION"]));
        assert_eq!(request["enabledFeatures"], serde_json::json!(["articles"]));
        assert_eq!(request["includeRecent"], true);

        let location_types = request["locationTypes"].as_array().unwrap();
        assert_eq!(location_types.len(), 18);
        assert_eq!(location_types[0], "GEO");
        assert_eq!(location_types[17], "CAR_RENTAL_OFFICE");
    }
}
