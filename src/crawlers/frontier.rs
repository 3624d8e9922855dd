use std::collections::{HashSet, VecDeque};
use url::Url;

/// FIFO queue of discovered-but-unvisited URLs
///
/// A mirror set keeps "already queued" checks O(1) no matter how large the
/// queue grows. A URL is never present twice.
#[derive(Debug, Default, Clone)]
pub struct Frontier {
    queue: VecDeque<Url>,
    queued: HashSet<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `url` unless it is already waiting; returns whether it was added
    pub fn push(&mut self, url: Url) -> bool {
        if self.queued.contains(&url) {
            return false;
        }
        self.queued.insert(url.clone());
        self.queue.push_back(url);
        true
    }

    /// Remove and return the oldest URL
    pub fn pop(&mut self) -> Option<Url> {
        let url = self.queue.pop_front()?;
        self.queued.remove(&url);
        Some(url)
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.queued.contains(url)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued URLs, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Url> {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.push(url("https://example.com/a"));
        frontier.push(url("https://example.com/b"));
        frontier.push(url("https://example.com/c"));

        assert_eq!(frontier.pop().unwrap().path(), "/a");
        assert_eq!(frontier.pop().unwrap().path(), "/b");
        assert_eq!(frontier.pop().unwrap().path(), "/c");
        assert!(frontier.pop().is_none());
    }

    #[test]
    fn test_no_duplicates_while_queued() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(url("https://example.com/a")));
        assert!(!frontier.push(url("https://example.com/a")));
        assert_eq!(frontier.len(), 1);

        // Once popped it is no longer "in the frontier"
        let popped = frontier.pop().unwrap();
        assert!(!frontier.contains(&popped));
        assert!(frontier.push(popped));
    }

    #[test]
    fn test_trailing_slash_is_distinct() {
        let mut frontier = Frontier::new();
        assert!(frontier.push(url("https://example.com/a")));
        assert!(frontier.push(url("https://example.com/a/")));
        assert_eq!(frontier.len(), 2);
    }
}
