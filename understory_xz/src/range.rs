// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Range decomposition: query window to a covering set of address ranges.
//!
//! The decomposer walks the quadtree breadth first from the root:
//!
//! - a cell whose coverage lies entirely inside the window yields a
//!   [`Range::Prefix`] and its subtree is not visited;
//! - a cell whose coverage touches the window yields a [`Range::Exact`] and,
//!   above the configured depth, its four children are queued;
//! - any other cell is dropped with its subtree, since child coverage always
//!   nests inside parent coverage.
//!
//! Every address whose coverage intersects the window is captured by exactly one
//! emitted range. The set is complete, not minimal: windows whose edges cross
//! many fine cells produce many exact ranges.

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::ops::Bound;

use crate::address::Address;
use crate::cell::Cell;
use crate::config::{MAX_SUPPORTED_DEPTH, XzConfig};
use crate::error::{Result, XzError};
use crate::types::BoundingBox;

/// Reserved suffix marking a prefix range on the wire.
pub const PREFIX_MARKER: char = '*';

/// A set of addresses to scan.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Range {
    /// Only this address.
    Exact(Address),
    /// This address and every address below it.
    Prefix(Address),
}

impl Range {
    /// The address the range starts at.
    pub fn address(&self) -> &Address {
        match self {
            Self::Exact(a) | Self::Prefix(a) => a,
        }
    }

    /// Whether this is a prefix range.
    pub fn is_prefix(&self) -> bool {
        matches!(self, Self::Prefix(_))
    }

    /// Whether `address` falls in this range.
    pub fn contains(&self, address: &Address) -> bool {
        match self {
            Self::Exact(a) => a == address,
            Self::Prefix(a) => a.is_prefix_of(address),
        }
    }

    /// Key bounds for a scan over a lexicographically ordered store.
    ///
    /// An exact range is the single key; a prefix range runs from its address up
    /// to, not including, the address' [successor](Address::successor).
    pub fn scan_bounds(&self) -> (Bound<String>, Bound<String>) {
        match self {
            Self::Exact(a) => (Bound::Included(a.to_string()), Bound::Included(a.to_string())),
            Self::Prefix(a) => (
                Bound::Included(a.to_string()),
                a.successor()
                    .map_or(Bound::Unbounded, |s| Bound::Excluded(s.into())),
            ),
        }
    }

    /// The `{start, end}` wire form.
    pub fn to_key_range(&self) -> KeyRange {
        let start = String::from(self.address().as_str());
        let mut end = start.clone();
        if self.is_prefix() {
            end.push(PREFIX_MARKER);
        }
        KeyRange { start, end }
    }
}

impl From<Range> for KeyRange {
    fn from(range: Range) -> Self {
        range.to_key_range()
    }
}

/// Wire form of a [`Range`].
///
/// An exact range has `start == end`. A prefix range has `end` equal to
/// `start` followed by [`PREFIX_MARKER`], which never occurs in an address.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyRange {
    /// First address in the range.
    pub start: String,
    /// `start`, or `start` plus the prefix marker.
    pub end: String,
}

impl KeyRange {
    /// Parse the wire form back into a [`Range`].
    ///
    /// # Errors
    ///
    /// [`XzError::MalformedRange`] when `end` is neither `start` nor `start`
    /// plus the marker; address errors when `start` is not a valid address.
    pub fn to_range(&self) -> Result<Range> {
        let address = Address::parse_with_depth(&self.start, MAX_SUPPORTED_DEPTH)?;
        match self.end.strip_prefix(self.start.as_str()) {
            Some("") => Ok(Range::Exact(address)),
            Some(rest) if rest.len() == 1 && rest.starts_with(PREFIX_MARKER) => {
                Ok(Range::Prefix(address))
            }
            _ => Err(XzError::MalformedRange {
                start: self.start.clone(),
                end: self.end.clone(),
            }),
        }
    }
}

impl TryFrom<KeyRange> for Range {
    type Error = XzError;

    fn try_from(range: KeyRange) -> Result<Self> {
        range.to_range()
    }
}

/// Lazy breadth-first range decomposition of a query window.
///
/// Created by [`ranges`]. Yields ranges in traversal order: shallower cells
/// first, siblings in digit order.
#[derive(Clone, Debug)]
pub struct RangeIter {
    window: BoundingBox,
    max_depth: usize,
    queue: VecDeque<Cell>,
}

impl RangeIter {
    fn new(window: BoundingBox, max_depth: u8) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back(Cell::root());
        Self {
            window,
            max_depth: usize::from(max_depth),
            queue,
        }
    }
}

impl Iterator for RangeIter {
    type Item = Range;

    fn next(&mut self) -> Option<Range> {
        while let Some(cell) = self.queue.pop_front() {
            let coverage = cell.coverage();
            if self.window.contains(&coverage) {
                return Some(Range::Prefix(cell.into_address()));
            }
            if coverage.intersects(&self.window) {
                if cell.depth() < self.max_depth {
                    self.queue.extend(cell.children());
                }
                return Some(Range::Exact(cell.into_address()));
            }
        }
        None
    }
}

impl FusedIterator for RangeIter {}

/// Start a lazy range decomposition of a normalized query window.
///
/// Does not apply `config.range_limit`; use [`decompose`] for a capped,
/// collected result.
///
/// # Errors
///
/// [`XzError::OutOfDomain`] or [`XzError::InvertedBox`] for an invalid
/// window, [`XzError::InvalidConfig`] for a bad `config`.
pub fn ranges(window: &BoundingBox, config: &XzConfig) -> Result<RangeIter> {
    config.validate()?;
    let window = window.in_domain()?;
    Ok(RangeIter::new(window, config.max_depth))
}

/// Decompose a normalized query window into a covering set of ranges.
///
/// # Errors
///
/// As [`ranges`], plus [`XzError::RangeLimitExceeded`] when the window needs
/// more than `config.range_limit` ranges.
pub fn decompose(window: &BoundingBox, config: &XzConfig) -> Result<Vec<Range>> {
    let iter = ranges(window, config)?;
    let out: Vec<Range> = match config.range_limit {
        Some(limit) => {
            let out: Vec<Range> = iter.take(limit.saturating_add(1)).collect();
            if out.len() > limit {
                tracing::debug!(?window, limit, "range limit exceeded");
                return Err(XzError::RangeLimitExceeded { limit });
            }
            out
        }
        None => iter.collect(),
    };
    tracing::trace!(
        ?window,
        ranges = out.len(),
        prefixes = out.iter().filter(|r| r.is_prefix()).count(),
        "decomposed query window"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode;
    use crate::types::DOMAIN;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn full_domain_starts_with_root_then_children() {
        let head: Vec<_> = ranges(&DOMAIN, &XzConfig::default())
            .unwrap()
            .take(6)
            .collect();
        assert_eq!(
            head,
            [
                Range::Exact(Address::root()),
                Range::Prefix(addr("0")),
                Range::Exact(addr("1")),
                Range::Exact(addr("2")),
                Range::Exact(addr("3")),
                Range::Prefix(addr("10")),
            ]
        );
    }

    #[test]
    fn emitted_ranges_touch_the_window() {
        let window = BoundingBox::new(0.2, 0.45, -0.3, 0.1);
        let config = XzConfig::new().with_max_depth(8);
        let out = decompose(&window, &config).unwrap();
        assert!(!out.is_empty());
        for range in &out {
            let coverage = decode(range.address());
            assert!(coverage.intersects(&window), "{range:?} does not touch the window");
            if range.is_prefix() {
                assert!(window.contains(&coverage), "{range:?} is not inside the window");
            }
            assert!(range.address().depth() <= 8);
        }
    }

    #[test]
    fn no_address_is_emitted_twice() {
        let window = BoundingBox::new(-0.6, 0.3, -0.2, 0.7);
        let out = decompose(&window, &XzConfig::new().with_max_depth(6)).unwrap();
        for (i, a) in out.iter().enumerate() {
            for b in &out[i + 1..] {
                assert_ne!(a.address(), b.address());
                if a.is_prefix() {
                    assert!(!a.contains(b.address()), "{b:?} lies under {a:?}");
                }
            }
        }
    }

    #[test]
    fn pruned_subtrees_are_absent() {
        // A window in the top-right corner. Cell 0 covers the whole domain, but
        // none of its children reach past x = 0.5.
        let window = BoundingBox::new(0.9, 1.0, 0.9, 1.0);
        let out = decompose(&window, &XzConfig::new().with_max_depth(10)).unwrap();
        assert!(out.contains(&Range::Exact(addr("0"))));
        assert!(
            out.iter()
                .all(|r| r.address().depth() <= 1 || !r.address().as_str().starts_with('0')),
            "the subtree under 0 must be pruned below its root"
        );
        assert!(out.iter().any(|r| r.address().as_str().starts_with("33")));
    }

    #[test]
    fn point_window_yields_only_exact_ranges() {
        let window = BoundingBox::point(0.25, 0.25);
        let out = decompose(&window, &XzConfig::new().with_max_depth(5)).unwrap();
        assert!(out.iter().all(|r| !r.is_prefix()));
        assert!(out.iter().any(|r| r.address().depth() == 5));
    }

    #[test]
    fn range_limit_fails_closed() {
        let window = BoundingBox::new(-0.5, 0.5, -0.5, 0.5);
        let config = XzConfig::new().with_max_depth(10).with_range_limit(8);
        assert_eq!(
            decompose(&window, &config),
            Err(XzError::RangeLimitExceeded { limit: 8 })
        );
        let small = BoundingBox::new(-1.0, 0.0, -1.0, 0.0);
        let roomy = XzConfig::new().with_max_depth(2).with_range_limit(1_000);
        assert!(decompose(&small, &roomy).is_ok());
    }

    #[test]
    fn rejects_out_of_domain_window() {
        let window = BoundingBox::new(-2.0, 0.0, 0.0, 0.5);
        assert!(matches!(
            decompose(&window, &XzConfig::default()),
            Err(XzError::OutOfDomain { .. })
        ));
    }

    #[test]
    fn range_membership_and_scan_bounds() {
        let exact = Range::Exact(addr("12"));
        let prefix = Range::Prefix(addr("12"));
        assert!(exact.contains(&addr("12")));
        assert!(!exact.contains(&addr("120")));
        assert!(prefix.contains(&addr("120")));
        assert!(!prefix.contains(&addr("13")));

        assert_eq!(
            exact.scan_bounds(),
            (Bound::Included("12".into()), Bound::Included("12".into()))
        );
        assert_eq!(
            prefix.scan_bounds(),
            (Bound::Included("12".into()), Bound::Excluded("13".into()))
        );
        assert_eq!(
            Range::Prefix(Address::root()).scan_bounds(),
            (Bound::Included(String::new()), Bound::Unbounded)
        );
    }

    #[test]
    fn wire_form_uses_the_marker() {
        let prefix = Range::Prefix(addr("03"));
        let wire = prefix.to_key_range();
        assert_eq!(wire.start, "03");
        assert_eq!(wire.end, "03*");
        assert_eq!(wire.to_range(), Ok(prefix));

        let exact = KeyRange::from(Range::Exact(Address::root()));
        assert_eq!(exact.start, "");
        assert_eq!(exact.end, "");

        let bad = KeyRange {
            start: "03".into(),
            end: "04".into(),
        };
        assert!(matches!(bad.to_range(), Err(XzError::MalformedRange { .. })));
        let doubled = KeyRange {
            start: "03".into(),
            end: "03**".into(),
        };
        assert!(doubled.to_range().is_err());
    }
}
