// src/crawl/report.rs
// =============================================================================
// Counters collected during one crawl, printed at the end as a table or
// as JSON (--json).
// =============================================================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlReport {
    /// Fetches attempted (root page included)
    pub requests: usize,
    /// Responses that were HTML
    pub html_pages: usize,
    /// Non-HTML responses written to disk
    pub files_saved: usize,
    /// Total bytes written
    pub bytes_saved: u64,
    /// <img> elements skipped because the file already existed
    pub redundant: usize,
    /// <img> elements without a usable src
    pub missing_src: usize,
    /// HTML pages not searched for images because of the depth limit
    pub skipped_depth: usize,
    /// Fetch, URL or disk errors (logged, crawl continued)
    pub failures: usize,
}
