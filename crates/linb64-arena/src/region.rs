//! Page-growable linear memory region.
//!
//! A [`LinearRegion`] is a contiguous zero-initialised `Vec<u8>` whose
//! length is always a whole number of pages. It only ever grows; shrinking
//! happens by replacing the whole region (see [`Arena`](crate::Arena)).

use crate::error::ArenaError;

/// A contiguous byte region that grows in whole pages.
///
/// Growth reallocates the backing storage, so every slice previously
/// borrowed from the region is invalid afterwards. Borrowing rules make that
/// a compile-time property: growing needs `&mut self`.
pub struct LinearRegion {
    /// Backing storage. `data.len()` is always `pages * page_size`.
    data: Vec<u8>,
    page_size: u32,
    max_pages: u32,
    /// Number of successful growth operations.
    grow_count: u64,
}

impl LinearRegion {
    /// Create a region of `initial_pages` zeroed pages.
    ///
    /// Returns `Err(ArenaError::GrowthRefused)` if the host cannot reserve
    /// the initial pages or `initial_pages` exceeds `max_pages`.
    pub fn new(page_size: u32, initial_pages: u32, max_pages: u32) -> Result<Self, ArenaError> {
        let mut region = Self {
            data: Vec::new(),
            page_size,
            max_pages,
            grow_count: 0,
        };
        region.grow(initial_pages)?;
        region.grow_count = 0;
        Ok(region)
    }

    /// Grow so that addresses below `end` are backed.
    ///
    /// Adds the minimum whole number of pages covering the shortfall and
    /// returns how many were added (0 if `end` already fits).
    pub fn ensure(&mut self, end: u64) -> Result<u32, ArenaError> {
        let capacity = self.data.len() as u64;
        if end <= capacity {
            return Ok(0);
        }
        let page = u64::from(self.page_size);
        let missing = (end - capacity).div_ceil(page);
        let requested_pages = u64::from(self.pages()) + missing;
        if requested_pages > u64::from(self.max_pages) {
            return Err(self.refused(requested_pages));
        }
        // requested_pages <= max_pages, so missing fits in u32.
        let missing = missing as u32;
        self.grow(missing)?;
        Ok(missing)
    }

    /// Append `pages` zeroed pages.
    pub fn grow(&mut self, pages: u32) -> Result<(), ArenaError> {
        let requested_pages = u64::from(self.pages()) + u64::from(pages);
        if requested_pages > u64::from(self.max_pages) {
            return Err(self.refused(requested_pages));
        }
        let additional = pages as usize * self.page_size as usize;
        self.data
            .try_reserve_exact(additional)
            .map_err(|_| self.refused(requested_pages))?;
        self.data.resize(self.data.len() + additional, 0);
        self.grow_count += 1;
        Ok(())
    }

    fn refused(&self, requested_pages: u64) -> ArenaError {
        ArenaError::GrowthRefused {
            requested_pages,
            current_pages: self.pages(),
            max_pages: self.max_pages,
        }
    }

    /// Get a shared slice at the given address and length.
    pub fn slice(&self, offset: u32, len: u32) -> Result<&[u8], ArenaError> {
        let capacity = self.data.len();
        let start = offset as usize;
        self.data
            .get(start..start + len as usize)
            .ok_or(ArenaError::OutOfBounds {
                offset,
                len,
                capacity,
            })
    }

    /// Get a mutable slice at the given address and length.
    pub fn slice_mut(&mut self, offset: u32, len: u32) -> Result<&mut [u8], ArenaError> {
        let capacity = self.data.len();
        let start = offset as usize;
        self.data
            .get_mut(start..start + len as usize)
            .ok_or(ArenaError::OutOfBounds {
                offset,
                len,
                capacity,
            })
    }

    /// The whole region.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// The whole region, mutably.
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Current size in pages.
    pub fn pages(&self) -> u32 {
        (self.data.len() / self.page_size as usize) as u32
    }

    /// Current size in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Number of growth operations since creation.
    pub fn grow_count(&self) -> u64 {
        self.grow_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: u32 = 65_536;

    #[test]
    fn new_region_is_zeroed() {
        let region = LinearRegion::new(PAGE, 1, 16).unwrap();
        assert_eq!(region.capacity(), 65_536);
        assert_eq!(region.pages(), 1);
        assert!(region.as_slice().iter().all(|&b| b == 0));
        assert_eq!(region.grow_count(), 0);
    }

    #[test]
    fn ensure_within_capacity_is_noop() {
        let mut region = LinearRegion::new(PAGE, 1, 16).unwrap();
        assert_eq!(region.ensure(65_536).unwrap(), 0);
        assert_eq!(region.pages(), 1);
    }

    #[test]
    fn ensure_adds_minimum_pages() {
        let mut region = LinearRegion::new(PAGE, 1, 16).unwrap();
        assert_eq!(region.ensure(65_537).unwrap(), 1);
        assert_eq!(region.pages(), 2);
        assert_eq!(region.ensure(4 * 65_536 + 1).unwrap(), 3);
        assert_eq!(region.pages(), 5);
        assert_eq!(region.grow_count(), 2);
    }

    #[test]
    fn growth_preserves_contents() {
        let mut region = LinearRegion::new(PAGE, 1, 16).unwrap();
        region.slice_mut(65_530, 6).unwrap().copy_from_slice(b"abcdef");
        region.ensure(200_000).unwrap();
        assert_eq!(region.slice(65_530, 6).unwrap(), b"abcdef");
        assert!(region.slice(65_536, 1000).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn growth_past_limit_refused() {
        let mut region = LinearRegion::new(PAGE, 1, 2).unwrap();
        let err = region.ensure(3 * 65_536).unwrap_err();
        assert_eq!(
            err,
            ArenaError::GrowthRefused {
                requested_pages: 3,
                current_pages: 1,
                max_pages: 2,
            }
        );
        assert_eq!(region.pages(), 1);
    }

    #[test]
    fn out_of_range_slice_is_error_not_panic() {
        let region = LinearRegion::new(16, 1, 4).unwrap();
        assert!(matches!(
            region.slice(10, 7),
            Err(ArenaError::OutOfBounds { capacity: 16, .. })
        ));
    }
}
