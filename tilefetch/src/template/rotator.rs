//! Round-robin subdomain selection shared by concurrent fetch workers.

use std::sync::atomic::{AtomicUsize, Ordering};

use super::parser::ParsedTemplate;

/// Hands out subdomains in declaration order, wrapping at the end.
///
/// The cursor advances once per call regardless of what the caller does
/// with the result, so a failed fetch still consumes its slot.
#[derive(Debug)]
pub struct SubdomainRotator {
    subdomains: Vec<String>,
    mask: String,
    cursor: AtomicUsize,
}

impl SubdomainRotator {
    /// Creates a rotator positioned at the first subdomain.
    pub fn new(parsed: ParsedTemplate) -> Self {
        Self {
            subdomains: parsed.subdomains,
            mask: parsed.mask,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Returns the next subdomain, or `None` when the template has no
    /// subdomain block (the literal template is used unchanged).
    pub fn next_subdomain(&self) -> Option<&str> {
        let len = self.subdomains.len();
        if len == 0 || self.mask.is_empty() {
            return None;
        }

        let index = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                Some((current + 1) % len)
            })
            .unwrap_or_else(|current| current);

        self.subdomains.get(index).map(String::as_str)
    }

    /// Subdomain tokens in declaration order.
    pub fn subdomains(&self) -> &[String] {
        &self.subdomains
    }

    /// The template substring replaced by a subdomain.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Number of subdomains available for rotation.
    pub fn len(&self) -> usize {
        self.subdomains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subdomains.is_empty()
    }
}
