//! Cursor pagination state for GraphQL connections.
//!
//! GitHub's GraphQL API pages connections with opaque cursors rather than page
//! numbers. [`PageRequest`] describes which page to ask for and
//! [`CursorPage`] captures what the server reported about the page it
//! returned.

/// Number of project items requested per page.
pub const ITEMS_PAGE_SIZE: u8 = 100;

/// Parameters for requesting one page of a connection.
///
/// # Example
///
/// ```
/// use project_triage::github::pagination::PageRequest;
///
/// let first = PageRequest::first_page();
/// assert_eq!(first.after(), None);
///
/// let next = first.next("Y3Vyc29yOjEwMA==");
/// assert_eq!(next.after(), Some("Y3Vyc29yOjEwMA=="));
/// assert_eq!(next.first(), 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    first: u8,
    after: Option<String>,
}

impl PageRequest {
    /// Requests the first page using the default page size.
    #[must_use]
    pub const fn first_page() -> Self {
        Self {
            first: ITEMS_PAGE_SIZE,
            after: None,
        }
    }

    /// Requests the page following `cursor` with the same page size.
    #[must_use]
    pub fn next(&self, cursor: &str) -> Self {
        Self {
            first: self.first,
            after: Some(cursor.to_owned()),
        }
    }

    /// Maximum number of items on the requested page.
    #[must_use]
    pub const fn first(&self) -> u8 {
        self.first
    }

    /// Cursor after which the page starts, if any.
    #[must_use]
    pub fn after(&self) -> Option<&str> {
        self.after.as_deref()
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first_page()
    }
}

/// Page state reported by a GraphQL connection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CursorPage {
    total_count: u64,
    has_next_page: bool,
    end_cursor: Option<String>,
}

impl CursorPage {
    /// Creates page state for a connection holding `total_count` nodes.
    #[must_use]
    pub const fn new(total_count: u64) -> Self {
        Self {
            total_count,
            has_next_page: false,
            end_cursor: None,
        }
    }

    /// Sets whether more pages follow.
    #[must_use]
    pub const fn with_has_next_page(mut self, has_next_page: bool) -> Self {
        self.has_next_page = has_next_page;
        self
    }

    /// Sets the cursor of the last node on the page.
    #[must_use]
    pub fn with_end_cursor(mut self, end_cursor: Option<String>) -> Self {
        self.end_cursor = end_cursor;
        self
    }

    /// Total number of nodes in the connection.
    #[must_use]
    pub const fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns true if more pages exist after this one.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Cursor of the last node on this page.
    #[must_use]
    pub fn end_cursor(&self) -> Option<&str> {
        self.end_cursor.as_deref()
    }

    /// Upper bound on the number of pages needed to walk the connection.
    ///
    /// Always at least one so an empty connection is still requested once.
    #[must_use]
    pub fn page_budget(&self, page_size: u8) -> u64 {
        self.total_count
            .div_ceil(u64::from(page_size.max(1)))
            .max(1)
    }
}
