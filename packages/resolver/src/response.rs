//! Typed decoding of the typeahead search response.
//!
//! The response is a JSON array with one element per operation sent. The
//! candidates live at `[0].data.Typeahead_autocomplete.results[*].details`.
//! Every level on that path is checked explicitly so that an unexpected
//! shape reports which key was absent.

use attractions_models::LocationCandidate;
use serde::Deserialize;

use crate::ResolveError;

#[derive(Debug, Deserialize)]
struct OperationResult {
    data: Option<OperationData>,
}

#[derive(Debug, Deserialize)]
struct OperationData {
    #[serde(rename = "Typeahead_autocomplete")]
    typeahead: Option<Typeahead>,
}

#[derive(Debug, Deserialize)]
struct Typeahead {
    results: Option<Vec<TypeaheadResult>>,
}

#[derive(Debug, Deserialize)]
struct TypeaheadResult {
    details: Option<LocationCandidate>,
}

fn missing(path: &str) -> ResolveError {
    ResolveError::MissingField {
        path: path.to_owned(),
    }
}

/// Decodes a search response body into location candidates.
///
/// Results without `details` are metadata rows and are skipped. Order is
/// preserved.
///
/// # Errors
///
/// Returns [`ResolveError::Json`] if the body is not JSON or a candidate is
/// malformed, and [`ResolveError::MissingField`] if any level of the
/// expected path is absent.
pub fn parse_candidates(body: &str) -> Result<Vec<LocationCandidate>, ResolveError> {
    let operations: Vec<OperationResult> = serde_json::from_str(body)?;

    let results = operations
        .into_iter()
        .next()
        .ok_or_else(|| missing("[0]"))?
        .data
        .ok_or_else(|| missing("[0].data"))?
        .typeahead
        .ok_or_else(|| missing("[0].data.Typeahead_autocomplete"))?
        .results
        .ok_or_else(|| missing("[0].data.Typeahead_autocomplete.results"))?;

    Ok(results.into_iter().filter_map(|r| r.details).collect())
}
