// src/crawl/mod.rs
// =============================================================================
// This module handles crawling a website for images.
//
// Features:
// - Starts from a single root URL
// - Follows <img src> references on HTML pages
// - Saves every non-HTML response under the output directory
// - Skips images that are already on disk
// - One request at a time, in a predictable order
//
// Submodules:
// - queue: the explicit work queue (what runs next)
// - driver: the Crawler and its two event handlers
// - report: counters printed at the end of a run
// =============================================================================

mod driver;
mod queue;
mod report;

pub use driver::Crawler;
pub use report::CrawlReport;
