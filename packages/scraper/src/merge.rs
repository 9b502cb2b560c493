//! Positional join of the listing and image passes.
//!
//! Row `i` gets image `i`. Nothing ties a listing card to its image card
//! other than their order on the page, so both passes must find the same
//! number of elements or the whole page is rejected.

use attractions_models::ListingRecord;

use crate::ScrapeError;
use crate::extract::NameRating;

/// Pairs `listings[i]` with `image_urls[i]` for every `i`.
///
/// # Errors
///
/// Returns [`ScrapeError::CountMismatch`] if the lengths differ. No rows are
/// returned in that case.
pub fn merge_positional(
    listings: Vec<NameRating>,
    image_urls: Vec<String>,
) -> Result<Vec<ListingRecord>, ScrapeError> {
    if listings.len() != image_urls.len() {
        return Err(ScrapeError::CountMismatch {
            records: listings.len(),
            images: image_urls.len(),
        });
    }

    Ok(listings
        .into_iter()
        .zip(image_urls)
        .map(|(listing, image_url)| ListingRecord {
            name: listing.name,
            rating: listing.rating,
            image_url,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(name: &str) -> NameRating {
        NameRating {
            name: Some(name.to_owned()),
            rating: "4.0 of 5 bubbles".to_owned(),
        }
    }

    #[test]
    fn pairs_by_index() {
        let records = merge_positional(
            vec![listing("a"), listing("b")],
            vec!["img-a".to_owned(), "img-b".to_owned()],
        )
        .unwrap();

        assert_eq!(records[0].name.as_deref(), Some("a"));
        assert_eq!(records[0].image_url, "img-a");
        assert_eq!(records[1].name.as_deref(), Some("b"));
        assert_eq!(records[1].image_url, "img-b");
    }

    #[test]
    fn more_images_than_listings_fails() {
        let err = merge_positional(
            vec![listing("a")],
            vec!["img-a".to_owned(), "img-b".to_owned()],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ScrapeError::CountMismatch {
                records: 1,
                images: 2
            }
        ));
    }

    #[test]
    fn empty_inputs_merge_to_nothing() {
        assert!(merge_positional(Vec::new(), Vec::new()).unwrap().is_empty());
    }
}
