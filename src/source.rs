//! Document collaborator contract.
//!
//! The TOC core never touches a document format directly. Everything it
//! needs (per-page outgoing link annotations and per-page plain text) comes
//! through the [`DocumentSource`] trait, so the tree-building pipeline can be
//! driven by a real PDF backend or by plain in-memory fixtures alike.
//!
//! Calls are expected to be synchronous and idempotent: repeated calls for
//! the same page index return identical content.

/// A raw outgoing link annotation on a page, before normalization.
#[derive(Debug, Clone)]
pub struct RawLink {
    /// Zero-based index of the page the link points at
    pub target_page: usize,

    /// Plain text found inside the link's bounding region
    pub text: String,
}

impl RawLink {
    /// Create a raw link from a target page and its bounding text.
    pub fn new(target_page: usize, text: impl Into<String>) -> Self {
        Self {
            target_page,
            text: text.into(),
        }
    }
}

/// Ordered-page access to a document's link annotations and plain text.
///
/// Implementations back the TOC pipeline with whatever actually holds the
/// document: a PDF parser, a pre-extracted dump, or a test fixture.
pub trait DocumentSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> usize;

    /// Plain text of one page. Out-of-range indices return an empty string.
    fn page_text(&self, page: usize) -> String;

    /// Outgoing link annotations of one page, in on-page encounter order.
    fn outgoing_links(&self, page: usize) -> Vec<RawLink>;
}

/// A [`DocumentSource`] over pre-extracted pages, used by tests and by
/// callers that already pulled links and text out of the document elsewhere.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocument {
    pages: Vec<PageData>,
}

#[derive(Debug, Clone, Default)]
struct PageData {
    text: String,
    links: Vec<RawLink>,
}

impl InMemoryDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page with its plain text and outgoing links.
    pub fn push_page(&mut self, text: impl Into<String>, links: Vec<RawLink>) {
        self.pages.push(PageData {
            text: text.into(),
            links,
        });
    }

    /// Append a page that carries text but no link annotations.
    pub fn push_text_page(&mut self, text: impl Into<String>) {
        self.push_page(text, Vec::new());
    }
}

impl DocumentSource for InMemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, page: usize) -> String {
        self.pages.get(page).map(|p| p.text.clone()).unwrap_or_default()
    }

    fn outgoing_links(&self, page: usize) -> Vec<RawLink> {
        self.pages.get(page).map(|p| p.links.clone()).unwrap_or_default()
    }
}
