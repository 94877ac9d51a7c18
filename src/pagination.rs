//! Read-only windowed view over raw table rows.

use crate::types::{TripRecord, TripTable};

/// Rows shown per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Result of reading one page at a cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Page<'a> {
    /// Up to `page_size` rows starting at the cursor, and the cursor for the next read.
    Rows {
        rows: &'a [TripRecord],
        next_cursor: usize,
    },
    /// The cursor is at or past the end of the table.
    Exhausted,
}

/// Read the page starting at `cursor`.
///
/// # Panics
///
/// Panics if `page_size == 0`.
pub fn next_page(table: &TripTable, cursor: usize, page_size: usize) -> Page<'_> {
    assert!(page_size > 0, "page_size must be > 0");
    let rows = table.rows();
    if cursor >= rows.len() {
        return Page::Exhausted;
    }
    let end = cursor.saturating_add(page_size).min(rows.len());
    Page::Rows {
        rows: &rows[cursor..end],
        next_cursor: end,
    }
}

/// Iterator over successive pages of a table.
#[derive(Debug, Clone)]
pub struct RawPager<'a> {
    table: &'a TripTable,
    cursor: usize,
    page_size: usize,
}

impl<'a> RawPager<'a> {
    /// # Panics
    ///
    /// Panics if `page_size == 0`.
    pub fn new(table: &'a TripTable, page_size: usize) -> Self {
        assert!(page_size > 0, "page_size must be > 0");
        Self {
            table,
            cursor: 0,
            page_size,
        }
    }

    /// Index of the first row the next page will start at.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl<'a> Iterator for RawPager<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        match next_page(self.table, self.cursor, self.page_size) {
            Page::Rows { rows, next_cursor } => {
                self.cursor = next_cursor;
                Some(rows)
            }
            Page::Exhausted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn table(n: usize) -> TripTable {
        let at = NaiveDate::from_ymd_opt(2017, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        TripTable::from_rows(
            (0..n)
                .map(|i| TripRecord::new(at, i as f64, format!("S{i}"), "E"))
                .collect(),
        )
    }

    #[test]
    fn pages_advance_cursor_until_exhausted() {
        let t = table(7);
        let Page::Rows { rows, next_cursor } = next_page(&t, 0, 5) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 5);
        assert_eq!(next_cursor, 5);

        let Page::Rows { rows, next_cursor } = next_page(&t, next_cursor, 5) else {
            panic!("expected rows");
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].start_station, "S5");
        assert_eq!(next_cursor, 7);

        assert_eq!(next_page(&t, next_cursor, 5), Page::Exhausted);
        assert_eq!(next_page(&t, 100, 5), Page::Exhausted);
    }

    #[test]
    fn empty_table_is_immediately_exhausted() {
        assert_eq!(next_page(&table(0), 0, 5), Page::Exhausted);
    }

    #[test]
    fn pager_iterates_in_order() {
        let t = table(11);
        let sizes: Vec<usize> = RawPager::new(&t, DEFAULT_PAGE_SIZE).map(|p| p.len()).collect();
        assert_eq!(sizes, vec![5, 5, 1]);
    }

    #[test]
    #[should_panic(expected = "page_size must be > 0")]
    fn zero_page_size_panics() {
        let _ = next_page(&table(1), 0, 0);
    }
}
