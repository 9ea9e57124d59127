// src/crawl/driver.rs
// =============================================================================
// This module drives the crawl.
//
// The Crawler owns three things:
// - the root URL (where the crawl starts, and whose host every image is
//   fetched from)
// - a Fetcher (real HTTP in the binary, in-memory in tests)
// - the OutputRoot (where files are mirrored)
//
// It reacts to two events:
// - on_image_found: an <img> element was found on an HTML page
// - on_response_received: a fetch completed (HTML or not)
//
// Every failure after startup is logged and counted, never propagated:
// one broken image must not stop the rest of the crawl.
// =============================================================================

use tracing::{debug, error, info, warn};
use url::Url;

use super::queue::{CrawlQueue, Job};
use super::report::CrawlReport;
use crate::fetch::{extract_images, Fetcher, ImageElement, Response};
use crate::mirror::{fingerprint, OutputRoot};

pub struct Crawler<F> {
    root: Url,
    fetcher: F,
    output: OutputRoot,
    max_depth: usize,
}

impl<F: Fetcher> Crawler<F> {
    // Parameters:
    //   root: the page the crawl starts from
    //   fetcher: how URLs get fetched
    //   output: where files get written (must already exist)
    //   max_depth: pages at this depth are not searched for images
    //              (1 = only save the root, 2 = root page + its images)
    pub fn new(root: Url, fetcher: F, output: OutputRoot, max_depth: usize) -> Self {
        Self {
            root,
            fetcher,
            output,
            max_depth,
        }
    }

    // Runs the crawl until the work queue is empty
    pub async fn run(&self) -> CrawlReport {
        let mut report = CrawlReport::default();
        let mut queue = CrawlQueue::new(self.root.clone());

        while let Some(job) = queue.pop() {
            match job {
                Job::Visit { url, depth } => {
                    self.visit(&url, depth, &mut queue, &mut report).await;
                }
                Job::Image {
                    element,
                    page,
                    depth,
                } => {
                    if let Some(url) = self.on_image_found(&element, &page, &mut report) {
                        queue.push_next(Job::Visit { url, depth });
                    }
                }
            }
        }

        info!(
            requests = report.requests,
            saved = report.files_saved,
            redundant = report.redundant,
            failures = report.failures,
            "crawl finished"
        );

        report
    }

    // Fetches one URL, saves it if it isn't HTML, and queues the images of
    // HTML pages that are still within the depth limit
    async fn visit(&self, url: &Url, depth: usize, queue: &mut CrawlQueue, report: &mut CrawlReport) {
        debug!(%url, depth, "visiting");
        report.requests += 1;

        let response = match self.fetcher.fetch(url).await {
            Ok(response) => response,
            Err(e) => {
                warn!(%url, error = %e, "fetch failed");
                report.failures += 1;
                return;
            }
        };
        debug!(%url, status = response.status, bytes = response.body.len(), "fetched");

        self.on_response_received(&response, report);

        if !response.is_html() {
            return;
        }
        report.html_pages += 1;

        if depth >= self.max_depth {
            debug!(%url, depth, "max depth reached, not looking for images");
            report.skipped_depth += 1;
            return;
        }

        let html = String::from_utf8_lossy(&response.body);
        let images = extract_images(&html);
        debug!(%url, count = images.len(), "found <img> elements");

        queue.push_page_images(images, url, depth + 1);
    }

    /// Decides whether an `<img>` found on `page` should be fetched.
    ///
    /// Returns the URL to visit, or `None` when the element has no `src`,
    /// the reference is malformed, or the file is already on disk.
    pub fn on_image_found(
        &self,
        element: &ImageElement,
        page: &Url,
        report: &mut CrawlReport,
    ) -> Option<Url> {
        let src = element.src();
        if src.is_empty() {
            warn!("no src attribute on <img>");
            report.missing_src += 1;
            return None;
        }

        let target = match self.resolve(page, src) {
            Ok(url) => url,
            Err(e) => {
                warn!(src, error = %e, "malformed image url");
                report.failures += 1;
                return None;
            }
        };

        match self.output.is_downloaded(target.path()) {
            Ok(true) => {
                info!(path = target.path(), "redundant download");
                report.redundant += 1;
                None
            }
            Ok(false) => Some(target),
            Err(e) => {
                warn!(path = target.path(), error = %e, "cannot map image to a local path");
                report.failures += 1;
                None
            }
        }
    }

    /// Persists every non-HTML response under its mirrored path.
    pub fn on_response_received(&self, response: &Response, report: &mut CrawlReport) {
        // HTML pages are only mined for <img> tags, never stored
        if response.is_html() {
            return;
        }

        let path = response.url.path();
        let len = response.body.len();
        info!(
            fingerprint = %fingerprint(&response.body),
            bytes = len,
            path,
            "save"
        );

        match self.output.save(path, &response.body) {
            Ok(local) => {
                debug!(local = %local.display(), "written");
                report.files_saved += 1;
                report.bytes_saved += len as u64;
            }
            Err(e) => {
                error!(path, bytes = len, error = %e, "failed to save");
                report.failures += 1;
            }
        }
    }

    // Turns an <img src> value into the URL we fetch: the src is resolved
    // against the page it was found on, then its path (and query) is put on
    // the root's scheme and host
    //
    // Examples (root = https://site.example/):
    //   page /,                   "/static/a.png"  -> https://site.example/static/a.png
    //   page /,                   "img/b.png"      -> https://site.example/img/b.png
    //   page /pages/gallery.html, "b.png"          -> https://site.example/pages/b.png
    //   page /, "https://cdn.example/c.png?v=2"    -> https://site.example/c.png?v=2
    fn resolve(&self, page: &Url, src: &str) -> Result<Url, url::ParseError> {
        let resolved = page.join(src)?;

        let mut target = self.root.clone();
        target.set_path(resolved.path());
        target.set_query(resolved.query());
        target.set_fragment(None);

        Ok(target)
    }
}
