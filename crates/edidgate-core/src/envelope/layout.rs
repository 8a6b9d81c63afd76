/// Size of one EDID page (the base block and every extension block).
pub const EDID_PAGE_SIZE: usize = 128;
/// Maximum number of blocks a descriptor may span, base block included.
pub const EDID_MAX_BLOCKS: usize = 256;

pub const HEADER_RANGE: std::ops::Range<usize> = 0..8;
pub const EDID_HEADER: &[u8; 8] = &[0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x00];

/// Offset of the extension block count inside the base block.
pub const EXTENSION_COUNT_OFFSET: usize = 126;

/// Staging capacity for a given page size and block count.
pub const fn staging_capacity(page_size: usize, max_blocks: usize) -> usize {
    page_size * max_blocks
}
