//! Suffix array with LCP
//!
//! The textbook construction: collect every suffix start, sort the
//! starts by byte-wise suffix comparison, then derive the longest common
//! prefix array from adjacent sorted suffixes. O(n^2 log n) worst case:
//! this is the naive reference structure, not a linear-time builder.
//!
//! Both arrays are computed on first access and cached, so construction
//! is free until a query arrives.
//!
//! # Example
//!
//! ```rust
//! use classic_collections::SuffixArray;
//!
//! let sa = SuffixArray::new("hello");
//! assert_eq!(sa.suffix_array(), &[1, 0, 2, 3, 4]);
//! assert_eq!(sa.lcp_array(), &[0, 0, 0, 1, 0]);
//! assert_eq!(sa.unique_substrings(), 14);
//! ```

use std::cell::OnceCell;

/// A lazily built suffix array over a text
#[derive(Debug)]
pub struct SuffixArray {
    text: String,
    suffixes: OnceCell<Vec<usize>>,
    lcp: OnceCell<Vec<usize>>,
}

impl SuffixArray {
    /// Wraps `text` without computing anything yet
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            suffixes: OnceCell::new(),
            lcp: OnceCell::new(),
        }
    }

    /// Returns the text the array was built over
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the text length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Returns true if the text is empty
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Returns the suffix array: suffix start positions ordered by the
    /// byte-wise rank of their suffixes
    pub fn suffix_array(&self) -> &[usize] {
        self.suffixes.get_or_init(|| {
            let bytes = self.text.as_bytes();
            let mut starts: Vec<usize> = (0..bytes.len()).collect();
            starts.sort_by(|&a, &b| bytes[a..].cmp(&bytes[b..]));
            starts
        })
    }

    /// Returns the LCP array: `lcp[0]` is 0 and `lcp[i]` is the longest
    /// common prefix length of the suffixes ranked `i - 1` and `i`
    pub fn lcp_array(&self) -> &[usize] {
        self.lcp.get_or_init(|| {
            let order = self.suffix_array();
            let bytes = self.text.as_bytes();
            if order.is_empty() {
                return Vec::new();
            }
            let mut lcp = Vec::with_capacity(order.len());
            lcp.push(0);
            for pair in order.windows(2) {
                lcp.push(common_prefix(&bytes[pair[0]..], &bytes[pair[1]..]));
            }
            lcp
        })
    }

    /// Counts the distinct non-empty substrings of the text
    ///
    /// Every suffix of rank `i` contributes its length minus `lcp[i]`
    /// new substrings, which telescopes to `n(n+1)/2 - sum(lcp)`.
    pub fn unique_substrings(&self) -> usize {
        let n = self.text.len();
        let shared: usize = self.lcp_array().iter().sum();
        n * (n + 1) / 2 - shared
    }
}

fn common_prefix(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
