//! Cursor pagination for Google list APIs
//!
//! Google list endpoints return a `nextPageToken` while more results remain.
//! The next request repeats the previous one with `pageToken` set to that
//! value; a response without a token is the final page.

use crate::error::{ApiError, Result};

/// Maximum page size accepted by the Directory API `users.list`.
pub const MAX_PAGE_SIZE: u32 = 500;

/// One page of results with its continuation cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page
    pub items: Vec<T>,

    /// Cursor for the next page, if any
    pub next_page_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<String>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CursorState {
    Start,
    Next(String),
    Done,
}

/// Tracks the continuation cursor across the requests of one listing.
///
/// ```ignore
/// let mut cursor = Cursor::new();
/// while !cursor.is_done() {
///     let page = fetch(cursor.token()).await?;
///     cursor.advance(page.next_page_token)?;
///     items.extend(page.items);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Cursor {
    state: CursorState,
    pages: usize,
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

impl Cursor {
    pub fn new() -> Self {
        Self {
            state: CursorState::Start,
            pages: 0,
        }
    }

    /// True once a page without a continuation token has been seen.
    pub fn is_done(&self) -> bool {
        self.state == CursorState::Done
    }

    /// Token to send with the next request (`None` for the first page).
    pub fn token(&self) -> Option<&str> {
        match &self.state {
            CursorState::Next(token) => Some(token),
            _ => None,
        }
    }

    /// Number of pages consumed so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Record the cursor returned by the latest response.
    ///
    /// An absent or empty token ends the listing. A token equal to the one
    /// just sent would loop forever and is rejected.
    pub fn advance(&mut self, next: Option<String>) -> Result<()> {
        self.pages += 1;

        let next = next.filter(|t| !t.is_empty());
        match next {
            None => self.state = CursorState::Done,
            Some(token) => {
                if self.token() == Some(token.as_str()) {
                    return Err(ApiError::InvalidResponse(format!(
                        "pagination cursor repeated after page {}",
                        self.pages
                    ))
                    .into());
                }
                self.state = CursorState::Next(token);
            }
        }

        Ok(())
    }
}
