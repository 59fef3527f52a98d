/// Error type for cursor access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("no tasks to show")]
    EmptyView,
    #[error("no task number {index}: choose 0 to {last}")]
    OutOfRange { index: usize, last: usize },
}

/// Position of the displayed record within the active view.
///
/// Movement never wraps: `next` stops at the last row and `previous` at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
}

impl Cursor {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// Move down one row. Returns false (and stays put) at the last row or on an empty view.
    pub fn next(&mut self, len: usize) -> bool {
        if self.index + 1 >= len {
            return false;
        }
        self.index += 1;
        true
    }

    /// Move up one row. Returns false at row 0.
    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Jump to row `index`; out-of-range leaves the cursor where it was.
    pub fn select(&mut self, index: usize, len: usize) -> Result<(), CursorError> {
        if len == 0 {
            return Err(CursorError::EmptyView);
        }
        if index >= len {
            return Err(CursorError::OutOfRange {
                index,
                last: len - 1,
            });
        }
        self.index = index;
        Ok(())
    }

    /// The cursor's row, or `EmptyView` when there are no rows
    pub fn current(&self, len: usize) -> Result<usize, CursorError> {
        if len == 0 {
            return Err(CursorError::EmptyView);
        }
        Ok(self.index.min(len - 1))
    }
}
