use crate::Pagination;

// Test constants
const TOTAL: usize = 12;
const ITEMS_PER_PAGE: usize = 5;

/// WHAT: Twelve items at five per page make three pages
/// WHY: The page count is a ceiling division, not a truncation
#[test]
fn given_twelve_items_when_paging_by_five_then_three_pages() {
    // Given: 12 items, 5 per page
    let pages = Pagination::new(TOTAL, ITEMS_PER_PAGE);

    // When/Then: the partial last page still counts
    assert_eq!(pages.page_count(), 3);
}

/// WHAT: The last page carries exactly the remainder
/// WHY: Indices 10 and 11 must appear once, on page 3 only
#[test]
fn given_page_three_when_ranging_then_final_two_indices() {
    // Given: 12 items, 5 per page
    let pages = Pagination::new(TOTAL, ITEMS_PER_PAGE);

    // When: ranging the last page
    let range = pages.page_range(3);

    // Then: exactly indices 10 and 11
    assert_eq!(range, 10..12);
}

/// WHAT: Pages past the end are empty, not an error
/// WHY: Stale page numbers arrive from old links and manual edits
#[test]
fn given_page_past_end_when_ranging_then_empty() {
    // Given: 12 items, 5 per page
    let pages = Pagination::new(TOTAL, ITEMS_PER_PAGE);

    // When/Then: page 4 and page 0 both range empty
    assert!(pages.page_range(4).is_empty());
    assert!(pages.page_range(0).is_empty());
}

/// WHAT: Full pages range their exact five indices
/// WHY: Page arithmetic is 1-based on the outside, 0-based inside
#[test]
fn given_full_page_when_ranging_then_five_indices() {
    // Given: 12 items, 5 per page
    let pages = Pagination::new(TOTAL, ITEMS_PER_PAGE);

    // When/Then: pages 1 and 2 cover their blocks
    assert_eq!(pages.page_range(1), 0..5);
    assert_eq!(pages.page_range(2), 5..10);
}

/// WHAT: No items means no pages, and every page ranges empty
/// WHY: An empty form renders "no audio files" rather than failing
#[test]
fn given_no_items_then_zero_pages_and_empty_ranges() {
    // Given: an empty list
    let pages = Pagination::new(0, ITEMS_PER_PAGE);

    // When/Then: no pages, nothing to range
    assert_eq!(pages.page_count(), 0);
    assert!(pages.page_range(1).is_empty());
}

/// WHAT: A zero page size behaves as one per page
/// WHY: Keeps the arithmetic total even under a broken configuration
#[test]
fn given_zero_page_size_then_one_item_per_page() {
    // Given: a degenerate page size
    let pages = Pagination::new(3, 0);

    // When/Then: three pages of one
    assert_eq!(pages.page_count(), 3);
    assert_eq!(pages.page_range(2), 1..2);
}
