//! Candidate base URLs for a stack.
//!
//! A stack may be served by several equivalent mirrors. Requests for the same
//! path always go to the same mirror so that HTTP caches along the way stay
//! warm; different paths spread across mirrors.

/// Non-empty set of equivalent base URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardedUrls {
    urls: Vec<String>,
}

impl ShardedUrls {
    /// Creates a set holding a single base URL.
    pub fn single(url: impl Into<String>) -> Self {
        Self {
            urls: vec![normalize(url.into())],
        }
    }

    /// Adds an equivalent mirror. Duplicates are ignored.
    pub fn with_mirror(mut self, url: impl Into<String>) -> Self {
        let url = normalize(url.into());
        if !self.urls.contains(&url) {
            self.urls.push(url);
        }
        self
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// Picks the mirror serving `path` and joins the two.
    pub fn url_for(&self, path: &str) -> String {
        let index = (fnv1a(path) % self.urls.len() as u32) as usize;
        format!("{}{}", self.urls[index], path)
    }
}

fn normalize(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// 32-bit FNV-1a; stable across runs and platforms.
fn fnv1a(s: &str) -> u32 {
    s.bytes().fold(0x811c_9dc5, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(0x0100_0193)
    })
}
