//! Drives a cursor-paginated list call to completion.
//!
//! The pager is shared by every query facade: it is parameterised over a
//! closure fetching one [`Page`] and knows nothing about resource kinds.

use std::time::Duration;

use snafu::{ResultExt, Snafu};

use crate::transport::{self, Page, PageRequest};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("page {page} could not be fetched, error: {source}"))]
    Fetch { page: usize, source: transport::Error },

    #[snafu(display("Timed out fetching page {page} after {timeout:?}"))]
    Timeout { page: usize, timeout: Duration },
}

/// Fetches pages until the server stops returning a continue token.
///
/// `request` is issued first without a token; every following request
/// carries the token of the previous page. Each page is bounded by
/// `page_timeout`, the timeout is not a deadline for the whole listing.
///
/// Items are returned in the order the pages were received. Nothing is
/// returned when any page fails.
///
/// # Errors
///
/// Returns [`Error::Fetch`] when `fetch` fails and [`Error::Timeout`] when a
/// page takes longer than `page_timeout`.
pub async fn collect_pages<K, F, Fut>(
    mut request: PageRequest,
    page_timeout: Duration,
    mut fetch: F,
) -> Result<Vec<K>, Error>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<Page<K>, transport::Error>>,
{
    request.continue_token = None;

    let mut items = Vec::new();
    let mut page: usize = 0;
    loop {
        page += 1;
        let Page { items: page_items, continue_token } =
            tokio::time::timeout(page_timeout, fetch(request.clone()))
                .await
                .map_err(|_| TimeoutSnafu { page, timeout: page_timeout }.build())?
                .context(FetchSnafu { page })?;

        tracing::debug!(
            page,
            items = page_items.len(),
            has_more = continue_token.is_some(),
            "Fetched list page"
        );
        items.extend(page_items);

        match continue_token {
            Some(token) => request.continue_token = Some(token),
            None => return Ok(items),
        }
    }
}
