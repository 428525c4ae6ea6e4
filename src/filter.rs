//! Name based selection of discovered tests.
//!
//! Filtering happens after discovery and before anything is executed. Tests
//! that are filtered out never reach the engine and do not show up in the
//! report, only their count does.

use crate::test::TestId;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FilteredTests {
    /// The tests that are part of the run, in discovery order.
    pub tests: Vec<TestId>,

    /// The number of discovered tests that were filtered out.
    pub filtered_out: usize,
}

/// Substring filter with skip patterns, like the ones of `cargo test`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DefaultFilter {
    exact: bool,
    filter: Vec<String>,
    skip: Vec<String>,
}

impl DefaultFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare whole identifiers instead of substrings.
    pub fn with_exact(self, exact: bool) -> Self {
        Self { exact, ..self }
    }

    pub fn with_filter<I, S>(mut self, filter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter.extend(filter.into_iter().map(Into::into));
        self
    }

    pub fn with_skip<I, S>(mut self, skip: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skip.extend(skip.into_iter().map(Into::into));
        self
    }

    fn matches(&self, name: &str, pattern: &str) -> bool {
        match self.exact {
            true => name == pattern,
            false => name.contains(pattern),
        }
    }

    pub fn filter(&self, tests: Vec<TestId>) -> FilteredTests {
        if self.filter.is_empty() && self.skip.is_empty() {
            return FilteredTests {
                tests,
                filtered_out: 0,
            };
        }

        let mut remaining = Vec::new();
        let mut filtered_out = 0;
        for id in tests {
            let name = id.as_str();
            let in_filter =
                self.filter.is_empty() || self.filter.iter().any(|filter| self.matches(name, filter));
            let skipped = self.skip.iter().any(|skip| self.matches(name, skip));

            match in_filter && !skipped {
                true => remaining.push(id),
                false => filtered_out += 1,
            }
        }

        FilteredTests {
            tests: remaining,
            filtered_out,
        }
    }
}
