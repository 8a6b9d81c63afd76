//! Fixed-capacity input region a host writes descriptor bytes into.
//!
//! The region is allocated once and never resized, so its start address is
//! stable for as long as the owning `StagingArea` lives. Hosts that cannot
//! pass slices (script runtimes, foreign callers) write through the raw
//! address; Rust callers use `fill` or `as_mut_slice`.

use std::ptr::NonNull;

pub struct StagingArea {
    // Taken from `Box::into_raw` once; every view and every handed-out
    // address derives from this pointer, so earlier addresses stay valid.
    region: NonNull<[u8]>,
}

// The region is uniquely owned, like the `Box` it came from.
unsafe impl Send for StagingArea {}

impl StagingArea {
    pub fn new(capacity: usize) -> Self {
        let boxed = vec![0u8; capacity].into_boxed_slice();
        let region = NonNull::from(Box::leak(boxed));
        Self { region }
    }

    /// Start of the staging region.
    ///
    /// Valid for `capacity()` bytes of writes until the area is dropped,
    /// across any number of later `address` calls. Writes through it must
    /// not overlap a borrow of the area.
    pub fn address(&self) -> NonNull<u8> {
        self.region.cast()
    }

    pub fn capacity(&self) -> usize {
        self.region.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: `region` is a live allocation of `capacity()` initialised
        // bytes owned by `self`.
        unsafe { self.region.as_ref() }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above; `&mut self` excludes other views.
        unsafe { self.region.as_mut() }
    }

    /// Copy `data` to the front of the region, stopping at capacity.
    ///
    /// Returns the number of bytes copied. Bytes past that point keep
    /// whatever an earlier write left there.
    pub fn fill(&mut self, data: &[u8]) -> usize {
        let bytes = self.as_mut_slice();
        let n = data.len().min(bytes.len());
        bytes[..n].copy_from_slice(&data[..n]);
        n
    }

    pub fn clear(&mut self) {
        self.as_mut_slice().fill(0);
    }
}

impl Drop for StagingArea {
    fn drop(&mut self) {
        // SAFETY: `region` came from `Box::leak` in `new` and is freed once.
        drop(unsafe { Box::from_raw(self.region.as_ptr()) });
    }
}

impl std::fmt::Debug for StagingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StagingArea")
            .field("capacity", &self.capacity())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::StagingArea;

    #[test]
    fn address_is_stable_across_writes() {
        let mut staging = StagingArea::new(256);
        let before = staging.address();
        staging.fill(&[1, 2, 3]);
        staging.as_mut_slice()[255] = 9;
        assert_eq!(before, staging.address());
    }

    #[test]
    fn writes_through_address_are_visible() {
        let staging = StagingArea::new(16);
        let ptr = staging.address();
        unsafe {
            ptr.as_ptr().add(3).write(0x42);
        }
        assert_eq!(staging.as_slice()[3], 0x42);
    }

    #[test]
    fn earlier_address_stays_writable() {
        let mut staging = StagingArea::new(32);
        let cached = staging.address();
        let _again = staging.address();
        staging.fill(&[7; 4]);
        staging.clear();
        unsafe {
            cached.as_ptr().add(5).write(0x99);
        }
        assert_eq!(staging.as_slice()[5], 0x99);
        assert_eq!(staging.address(), cached);
    }

    #[test]
    fn fill_stops_at_capacity() {
        let mut staging = StagingArea::new(4);
        let copied = staging.fill(&[1, 2, 3, 4, 5, 6]);
        assert_eq!(copied, 4);
        assert_eq!(staging.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn clear_zeroes_region() {
        let mut staging = StagingArea::new(8);
        staging.fill(&[0xFF; 8]);
        staging.clear();
        assert!(staging.as_slice().iter().all(|b| *b == 0));
        assert_eq!(staging.capacity(), 8);
    }
}
