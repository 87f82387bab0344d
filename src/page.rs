use raylib::prelude::*;
use crate::constants::*;

/// Screen geometry of the control strip.
#[derive(Debug, Clone)]
pub struct StripLayout {
    pub pill: Rectangle,
    pub markers: Vec<Rectangle>,
    pub button: Rectangle,
}

pub fn contains(rect: &Rectangle, x: f32, y: f32) -> bool {
    x >= rect.x && x <= rect.x + rect.width && y >= rect.y && y <= rect.y + rect.height
}

/// The scrollable page hosting the carousel: a hero band, the slide track,
/// then the control strip.
pub struct Page {
    scroll: f32,
    hero_height: i32,
    viewport_width: i32,
    viewport_height: i32,
}

impl Page {
    pub fn new(hero_height: i32, viewport_width: i32, viewport_height: i32) -> Self {
        Self {
            scroll: 0.0,
            hero_height: hero_height.max(0),
            viewport_width,
            viewport_height,
        }
    }

    pub fn set_viewport(&mut self, width: i32, height: i32) {
        self.viewport_width = width;
        self.viewport_height = height;
        self.scroll_by(0.0);
    }

    pub fn viewport_width(&self) -> i32 {
        self.viewport_width
    }

    pub fn hero_height(&self) -> i32 {
        self.hero_height
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn scroll_by(&mut self, delta: f32) {
        let max = (self.page_height() - self.viewport_height).max(0) as f32;
        self.scroll = (self.scroll + delta).clamp(0.0, max);
    }

    fn strip_top(&self) -> i32 {
        self.hero_height + SLIDE_HEIGHT + STRIP_MARGIN_TOP
    }

    pub fn page_height(&self) -> i32 {
        self.strip_top() + STRIP_HEIGHT.max(BUTTON_SIZE) + PAGE_TAIL
    }

    /// True once the track's top edge has crossed the viewport bottom.
    pub fn track_past_start(&self) -> bool {
        (self.hero_height as f32) < self.scroll + self.viewport_height as f32
    }

    pub fn slide_pitch(&self) -> f32 {
        (SLIDE_WIDTH + SLIDE_GAP) as f32
    }

    /// Screen rectangle of slide `index` for a given track offset.
    pub fn slide_rect(&self, index: usize, track_offset: f32) -> Rectangle {
        let left = (self.viewport_width - SLIDE_WIDTH) as f32 * 0.5;
        Rectangle::new(
            left + track_offset + index as f32 * self.slide_pitch(),
            self.hero_height as f32 - self.scroll,
            SLIDE_WIDTH as f32,
            SLIDE_HEIGHT as f32,
        )
    }

    /// Lay the control strip out for the current marker widths.
    pub fn strip_layout(&self, marker_widths: &[f32]) -> StripLayout {
        let spacing = MARKER_SPACING * marker_widths.len().saturating_sub(1) as f32;
        let pill_width = STRIP_PADDING * 2.0 + marker_widths.iter().sum::<f32>() + spacing;
        let total = pill_width + (BUTTON_GAP + BUTTON_SIZE) as f32;

        let top = self.strip_top() as f32 - self.scroll;
        let row_height = STRIP_HEIGHT.max(BUTTON_SIZE) as f32;
        let left = (self.viewport_width as f32 - total) * 0.5;

        let pill_y = top + (row_height - STRIP_HEIGHT as f32) * 0.5;
        let pill = Rectangle::new(left, pill_y, pill_width, STRIP_HEIGHT as f32);

        let marker_y = pill_y + (STRIP_HEIGHT as f32 - MARKER_SIZE) * 0.5;
        let mut x = left + STRIP_PADDING;
        let markers = marker_widths
            .iter()
            .map(|&width| {
                let rect = Rectangle::new(x, marker_y, width, MARKER_SIZE);
                x += width + MARKER_SPACING;
                rect
            })
            .collect();

        let button = Rectangle::new(
            left + pill_width + BUTTON_GAP as f32,
            top + (row_height - BUTTON_SIZE as f32) * 0.5,
            BUTTON_SIZE as f32,
            BUTTON_SIZE as f32,
        );

        StripLayout { pill, markers, button }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scroll_is_clamped_to_page() {
        let mut page = Page::new(HERO_HEIGHT, 1280, 800);
        page.scroll_by(-50.0);
        assert_eq!(page.scroll(), 0.0);
        page.scroll_by(1.0e6);
        assert_eq!(page.scroll(), (page.page_height() - 800) as f32);
    }

    #[test]
    fn track_enters_when_its_top_passes_viewport_bottom() {
        let mut page = Page::new(900, 1280, 800);
        assert!(!page.track_past_start());
        page.scroll_by(100.0);
        assert!(!page.track_past_start());
        page.scroll_by(1.0);
        assert!(page.track_past_start());
    }

    #[test]
    fn short_hero_starts_in_view() {
        let page = Page::new(0, 1280, 800);
        assert!(page.track_past_start());
    }

    #[test]
    fn slides_are_laid_out_one_pitch_apart() {
        let page = Page::new(0, 1280, 800);
        let first = page.slide_rect(0, 0.0);
        let second = page.slide_rect(1, 0.0);
        assert_eq!(second.x - first.x, page.slide_pitch());
        let shifted = page.slide_rect(1, -page.slide_pitch());
        assert_eq!(shifted.x, first.x);
    }

    #[test]
    fn strip_is_centered_and_button_follows_pill() {
        let page = Page::new(0, 1280, 800);
        let layout = page.strip_layout(&[60.0, MARKER_SIZE, MARKER_SIZE]);
        assert_eq!(layout.markers.len(), 3);
        assert_eq!(layout.markers[1].x, layout.markers[0].x + 60.0 + MARKER_SPACING);

        let right = layout.button.x + layout.button.width;
        assert!((layout.pill.x - (1280.0 - right)).abs() < 1e-3);
        assert!(layout.button.x > layout.pill.x + layout.pill.width);

        let center_x = layout.button.x + layout.button.width * 0.5;
        let center_y = layout.button.y + layout.button.height * 0.5;
        assert!(contains(&layout.button, center_x, center_y));
        assert!(!contains(&layout.button, layout.pill.x, center_y));
    }
}
