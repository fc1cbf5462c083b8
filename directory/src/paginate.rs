/// Sliding window over the filtered records shown in the sidebar.
///
/// Starts at one page and grows by a page for every full scroll band, up to
/// the collection length. It never shrinks on scroll-up; only [`reset`]
/// brings it back to one page.
///
/// [`reset`]: SidebarWindow::reset
#[derive(Debug, Clone, PartialEq)]
pub struct SidebarWindow {
    page_size: usize,
    scroll_band: f64,
    total: usize,
    visible: usize,
}

impl SidebarWindow {
    pub fn new(page_size: usize, scroll_band: f64) -> Self {
        Self {
            page_size: page_size.max(1),
            scroll_band: if scroll_band > 0.0 { scroll_band } else { 1.0 },
            total: 0,
            visible: 0,
        }
    }

    pub fn reset(&mut self, total: usize) {
        self.total = total;
        self.visible = total.min(self.page_size);
    }

    /// Returns whether the window grew.
    pub fn on_scroll(&mut self, scroll_top: f64) -> bool {
        let bands = if scroll_top.is_finite() && scroll_top > 0.0 {
            (scroll_top / self.scroll_band).floor() as usize
        } else {
            0
        };
        let wanted = self
            .page_size
            .saturating_mul(bands.max(1))
            .min(self.total);
        if wanted > self.visible {
            self.visible = wanted;
            true
        } else {
            false
        }
    }

    pub fn visible(&self) -> usize {
        self.visible
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }
}

impl Default for SidebarWindow {
    fn default() -> Self {
        let config = crate::DirectoryConfig::default();
        Self::new(config.page_size, config.scroll_band)
    }
}
