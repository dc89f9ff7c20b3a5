use crate::pagination::PageWindow;

/// One page of results together with the window that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub window: PageWindow,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self { items, window }
    }
}
