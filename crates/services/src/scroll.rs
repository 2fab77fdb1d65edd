//! Single-flight guard for infinite scroll.

/// Distance from the page bottom, in pixels, at which the next page starts
/// loading.
pub const NEAR_BOTTOM_PX: f64 = 1000.0;

/// Paging state for the timeline, one instance per page view.
///
/// Page 1 is the server-rendered timeline, so the first scroll-triggered
/// fetch asks for page 2. The counter advances when a fetch begins and is
/// never rolled back; a failed or empty page simply leaves the next fetch
/// pointing one page further. The guard has no timeout: a fetch that never
/// settles wedges scroll loading for the rest of the page view.
#[derive(Debug)]
pub struct ScrollController {
    loading: bool,
    page: u32,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self {
            loading: false,
            page: 1,
        }
    }
}

impl ScrollController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check-and-set: claims the guard and advances the page counter,
    /// returning the page to fetch, or `None` while a fetch is in flight.
    pub fn try_begin(&mut self) -> Option<u32> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.page += 1;
        Some(self.page)
    }

    /// Releases the guard once the in-flight fetch settles, successfully or
    /// not.
    pub fn finish(&mut self) {
        self.loading = false;
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_is_single_flight() {
        let mut scroll = ScrollController::new();
        assert_eq!(scroll.try_begin(), Some(2));
        assert_eq!(scroll.try_begin(), None);
        assert_eq!(scroll.try_begin(), None);
        scroll.finish();
        assert_eq!(scroll.try_begin(), Some(3));
    }

    #[test]
    fn page_counter_survives_a_failed_fetch() {
        let mut scroll = ScrollController::new();
        scroll.try_begin();
        scroll.finish(); // fetch failed, counter stays at 2
        assert_eq!(scroll.page(), 2);
        assert_eq!(scroll.try_begin(), Some(3));
    }
}
