// src/crawl/queue.rs
// =============================================================================
// This module holds the crawl's work queue.
//
// How it works:
// 1. The queue starts with a single job: visit the root URL
// 2. Visiting an HTML page turns every <img> on it into an Image job
// 3. An Image job may turn into a Visit job for the image URL
// 4. Repeat until the queue is empty
//
// Ordering:
// - New jobs are pushed to the FRONT of the queue, so the crawl is
//   depth-first: an image found on a page is fully downloaded and saved
//   before the next <img> on that page is even looked at
// - Images from one page keep their document order
//
// That ordering matters for dedup: if a page references the same image
// twice, the first reference has already written the file by the time the
// second one checks the disk.
//
// Rust concepts:
// - VecDeque: Double-ended queue, cheap push/pop at both ends
// - Enums with data: each Job variant carries its own fields
// =============================================================================

use std::collections::VecDeque;
use url::Url;

use crate::fetch::ImageElement;

// One unit of crawl work
#[derive(Debug, Clone)]
pub enum Job {
    /// Fetch a URL and hand the response to the handlers
    Visit { url: Url, depth: usize },
    /// Decide whether an <img> element should be fetched
    ///
    /// `page` is the page the element was found on (relative src values
    /// resolve against it); `depth` is the depth the resulting visit would have.
    Image {
        element: ImageElement,
        page: Url,
        depth: usize,
    },
}

#[derive(Debug)]
pub struct CrawlQueue {
    jobs: VecDeque<Job>,
}

impl CrawlQueue {
    // Creates a queue seeded with the root page at depth 1
    pub fn new(root: Url) -> Self {
        let mut jobs = VecDeque::new();
        jobs.push_back(Job::Visit { url: root, depth: 1 });
        Self { jobs }
    }

    pub fn pop(&mut self) -> Option<Job> {
        self.jobs.pop_front()
    }

    // Schedules a job to run before anything already queued
    pub fn push_next(&mut self, job: Job) {
        self.jobs.push_front(job);
    }

    // Schedules all images of one page ahead of the rest of the queue,
    // keeping their document order
    pub fn push_page_images(&mut self, images: Vec<ImageElement>, page: &Url, depth: usize) {
        for element in images.into_iter().rev() {
            self.jobs.push_front(Job::Image {
                element,
                page: page.clone(),
                depth,
            });
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a queue instead of recursion?
//    - A recursive "visit calls visit" design hides the order of work in
//      the call stack
//    - With an explicit queue we can see, test, and bound what runs next
//
// 2. Why push_front and .rev()?
//    - push_front puts a job at the head of the line
//    - Pushing [a, b, c] reversed (c, then b, then a) leaves a at the head,
//      so a, b, c still come out in order
//
// 3. What is `depth`?
//    - The root page is depth 1, images found on it are depth 2, ...
//    - The crawler stops reading pages for more images at its max depth
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn image(src: &str) -> ImageElement {
        ImageElement::from_attrs([("src", src)])
    }

    fn src_of(job: &Job) -> String {
        match job {
            Job::Image { element, .. } => element.src().to_string(),
            Job::Visit { url, .. } => url.path().to_string(),
        }
    }

    #[test]
    fn test_seeded_with_root_visit() {
        let root = Url::parse("https://example.com/").unwrap();
        let mut queue = CrawlQueue::new(root.clone());

        match queue.pop() {
            Some(Job::Visit { url, depth }) => {
                assert_eq!(url, root);
                assert_eq!(depth, 1);
            }
            other => panic!("unexpected job: {:?}", other),
        }
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_page_images_keep_document_order() {
        let mut queue = CrawlQueue::new(Url::parse("https://example.com/").unwrap());
        queue.pop();

        let page = Url::parse("https://example.com/").unwrap();
        queue.push_page_images(vec![image("/a.png"), image("/b.png"), image("/c.png")], &page, 2);

        let order: Vec<String> = std::iter::from_fn(|| queue.pop()).map(|j| src_of(&j)).collect();
        assert_eq!(order, vec!["/a.png", "/b.png", "/c.png"]);
    }

    #[test]
    fn test_push_next_runs_before_remaining_images() {
        let mut queue = CrawlQueue::new(Url::parse("https://example.com/").unwrap());
        queue.pop();
        let page = Url::parse("https://example.com/").unwrap();
        queue.push_page_images(vec![image("/a.png"), image("/b.png")], &page, 2);

        let first = queue.pop().unwrap();
        assert_eq!(src_of(&first), "/a.png");

        queue.push_next(Job::Visit {
            url: Url::parse("https://example.com/a.png").unwrap(),
            depth: 2,
        });

        assert_eq!(queue.len(), 2);
        assert!(matches!(queue.pop(), Some(Job::Visit { .. })));
        assert_eq!(src_of(&queue.pop().unwrap()), "/b.png");
    }

    #[test]
    fn test_image_jobs_remember_their_page() {
        let mut queue = CrawlQueue::new(Url::parse("https://example.com/").unwrap());
        queue.pop();

        let gallery = Url::parse("https://example.com/pages/gallery.html").unwrap();
        queue.push_page_images(vec![image("b.png")], &gallery, 3);

        match queue.pop() {
            Some(Job::Image { page, depth, .. }) => {
                assert_eq!(page, gallery);
                assert_eq!(depth, 3);
            }
            other => panic!("unexpected job: {:?}", other),
        }
    }
}
