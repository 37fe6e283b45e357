//! Arena configuration parameters.

/// Configuration for the linear memory arena.
///
/// Controls page sizing, the growth ceiling, and the reclamation threshold.
/// Validated by [`Arena::new`](crate::Arena::new); all values are immutable
/// after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Growth unit of the backing region in bytes.
    ///
    /// Default: 65_536 (one wasm page). Must be non-zero.
    pub page_size: u32,

    /// Pages allocated when a region is created or replaced.
    ///
    /// Default: 1. Must be at least 1 and at most `max_pages`.
    pub initial_pages: u32,

    /// Capacity in bytes at or above which a `free` schedules the region
    /// for wholesale replacement.
    ///
    /// Default: 1_000_000.
    pub reclaim_threshold: usize,

    /// Largest page count the runtime will grant.
    ///
    /// Growth past this is refused with
    /// [`ArenaError::GrowthRefused`](crate::ArenaError::GrowthRefused).
    /// Default: 65_536 pages (4 GiB at the default page size).
    pub max_pages: u32,
}

impl ArenaConfig {
    /// Default page size: 64 KiB.
    pub const DEFAULT_PAGE_SIZE: u32 = 65_536;

    /// Default initial page count.
    pub const DEFAULT_INITIAL_PAGES: u32 = 1;

    /// Default reclamation threshold in bytes.
    pub const DEFAULT_RECLAIM_THRESHOLD: usize = 1_000_000;

    /// Default page ceiling, the wasm32 address space limit.
    pub const DEFAULT_MAX_PAGES: u32 = 65_536;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            page_size: Self::DEFAULT_PAGE_SIZE,
            initial_pages: Self::DEFAULT_INITIAL_PAGES,
            reclaim_threshold: Self::DEFAULT_RECLAIM_THRESHOLD,
            max_pages: Self::DEFAULT_MAX_PAGES,
        }
    }

    /// Override the reclamation threshold.
    pub fn with_reclaim_threshold(mut self, bytes: usize) -> Self {
        self.reclaim_threshold = bytes;
        self
    }

    /// Override the page ceiling.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = pages;
        self
    }

    /// Capacity of a freshly created region in bytes.
    pub fn initial_bytes(&self) -> usize {
        self.initial_pages as usize * self.page_size as usize
    }

    /// Check the invariants documented on each field.
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.page_size == 0 {
            return Err("page_size must be non-zero".into());
        }
        if self.initial_pages == 0 {
            return Err("initial_pages must be at least 1".into());
        }
        if self.initial_pages > self.max_pages {
            return Err(format!(
                "initial_pages ({}) exceeds max_pages ({})",
                self.initial_pages, self.max_pages
            ));
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
