//! Flattening of paginated list responses
//!
//! ARM list operations return pages with an opaque `nextLink` continuation
//! token. [`list_all`] drains every page into one ordered `Vec`, fetching
//! strictly sequentially — page N's token is required to fetch page N+1.

use std::future::Future;

use azure_arm::Page;

/// Collect every item from a paginated listing into a single ordered `Vec`.
///
/// `first` is the already-initiated first-page fetch; `next` fetches the
/// page behind a continuation token.
///
/// Fetching continues while the current page has items or carries a token,
/// and stops at the first page that is both empty and token-less. A
/// non-empty final page without a token therefore terminates right after
/// being appended, while an empty page that still carries a token triggers
/// one more fetch.
///
/// Any fetch error propagates immediately; items accumulated so far are
/// discarded. There is no retry and no caching across calls.
pub async fn list_all<T, E, FirstFut, NextFn, NextFut>(
    first: FirstFut,
    mut next: NextFn,
) -> std::result::Result<Vec<T>, E>
where
    FirstFut: Future<Output = std::result::Result<Page<T>, E>>,
    NextFn: FnMut(String) -> NextFut,
    NextFut: Future<Output = std::result::Result<Page<T>, E>>,
{
    let mut all = Vec::new();
    let mut page = first.await?;

    loop {
        let Page { value, next_link } = page;
        if value.is_empty() && next_link.is_none() {
            break;
        }
        all.extend(value);
        page = match next_link {
            Some(link) => next(link).await?,
            None => Page::default(),
        };
    }

    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, PartialEq)]
    struct FetchError(&'static str);

    fn page(items: &[i32], next: Option<&str>) -> Result<Page<i32>, FetchError> {
        Ok(Page {
            value: items.to_vec(),
            next_link: next.map(String::from),
        })
    }

    #[tokio::test]
    async fn concatenates_pages_in_order() {
        let fetches = Cell::new(1);
        let result = list_all(async { page(&[1, 2], Some("p2")) }, |link| {
            fetches.set(fetches.get() + 1);
            async move {
                match link.as_str() {
                    "p2" => page(&[3], Some("p3")),
                    "p3" => page(&[4, 5], None),
                    other => panic!("unexpected link {other}"),
                }
            }
        })
        .await
        .unwrap();

        assert_eq!(result, vec![1, 2, 3, 4, 5]);
        assert_eq!(fetches.get(), 3);
    }

    #[tokio::test]
    async fn single_empty_page_means_exactly_one_fetch() {
        let next_fetches = Cell::new(0);
        let result = list_all(async { page(&[], None) }, |_link: String| {
            next_fetches.set(next_fetches.get() + 1);
            async { page(&[], None) }
        })
        .await
        .unwrap();

        assert!(result.is_empty());
        assert_eq!(next_fetches.get(), 0);
    }

    #[tokio::test]
    async fn non_empty_final_page_does_not_trigger_extra_fetch() {
        let next_fetches = Cell::new(0);
        let result = list_all(async { page(&[1], None) }, |_link: String| {
            next_fetches.set(next_fetches.get() + 1);
            async { page(&[], None) }
        })
        .await
        .unwrap();

        assert_eq!(result, vec![1]);
        assert_eq!(next_fetches.get(), 0);
    }

    #[tokio::test]
    async fn empty_page_with_token_fetches_once_more() {
        let result = list_all(async { page(&[], Some("p2")) }, |link| async move {
            assert_eq!(link, "p2");
            page(&[7], None)
        })
        .await
        .unwrap();

        assert_eq!(result, vec![7]);
    }

    #[tokio::test]
    async fn error_on_third_page_discards_items_and_stops() {
        let next_fetches = Cell::new(0);
        let result = list_all(async { page(&[1], Some("p2")) }, |link| {
            next_fetches.set(next_fetches.get() + 1);
            async move {
                match link.as_str() {
                    "p2" => page(&[2], Some("p3")),
                    "p3" => Err(FetchError("boom")),
                    other => panic!("fetch past the failing page: {other}"),
                }
            }
        })
        .await;

        assert_eq!(result.unwrap_err(), FetchError("boom"));
        // p2 and p3 only; the failure must not be followed by a 4th fetch
        assert_eq!(next_fetches.get(), 2);
    }

    #[tokio::test]
    async fn first_fetch_error_propagates() {
        let next_fetches = Cell::new(0);
        let result = list_all(
            async { Err::<Page<i32>, _>(FetchError("down")) },
            |_: String| {
                next_fetches.set(next_fetches.get() + 1);
                async { page(&[], None) }
            },
        )
        .await;
        assert_eq!(result.unwrap_err(), FetchError("down"));
        assert_eq!(next_fetches.get(), 0);
    }
}
