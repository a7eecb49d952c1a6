//! Horizontal scroll mirroring between the sheet and the sticky scrollbar.
//!
//! The sheet's content pane and the fixed-position scrollbar track scroll
//! independently; whichever one the user moves, the other follows. A write
//! only happens when the offsets differ, so the scroll event the write
//! triggers on the other region finds them equal and stops there.

use std::rc::Rc;

use tracing::debug;

/// A horizontally scrollable region
pub trait ScrollHandle {
    /// Current horizontal scroll offset in pixels
    fn scroll_offset(&self) -> f64;
    /// Move the region to `offset`
    fn set_scroll_offset(&self, offset: f64);
}

impl<T: ScrollHandle + ?Sized> ScrollHandle for Rc<T> {
    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&self, offset: f64) {
        (**self).set_scroll_offset(offset);
    }
}

impl<T: ScrollHandle + ?Sized> ScrollHandle for &T {
    fn scroll_offset(&self) -> f64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&self, offset: f64) {
        (**self).set_scroll_offset(offset);
    }
}

/// Which region a scroll event came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollSource {
    /// The sheet's content pane
    Content,
    /// The sticky scrollbar track
    Track,
}

/// Keeps two regions at the same horizontal offset.
///
/// Either region may be absent while the UI mounts or unmounts; events are
/// ignored until both are attached.
#[derive(Debug)]
pub struct ScrollSync<H> {
    content: Option<H>,
    track: Option<H>,
}

impl<H> Default for ScrollSync<H> {
    fn default() -> Self {
        Self {
            content: None,
            track: None,
        }
    }
}

impl<H: ScrollHandle> ScrollSync<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with both regions already attached
    pub fn with_regions(content: H, track: H) -> Self {
        Self {
            content: Some(content),
            track: Some(track),
        }
    }

    pub fn attach_content(&mut self, content: H) {
        self.content = Some(content);
    }

    pub fn attach_track(&mut self, track: H) {
        self.track = Some(track);
    }

    pub fn detach_content(&mut self) -> Option<H> {
        self.content.take()
    }

    pub fn detach_track(&mut self) -> Option<H> {
        self.track.take()
    }

    pub fn content(&self) -> Option<&H> {
        self.content.as_ref()
    }

    pub fn track(&self) -> Option<&H> {
        self.track.as_ref()
    }

    /// Handle a scroll event on the content pane. Returns true if the track
    /// was moved.
    pub fn on_content_scroll(&self) -> bool {
        self.on_scroll(ScrollSource::Content)
    }

    /// Handle a scroll event on the sticky track. Returns true if the content
    /// pane was moved.
    pub fn on_track_scroll(&self) -> bool {
        self.on_scroll(ScrollSource::Track)
    }

    /// Mirror the offset of `source` onto the other region
    pub fn on_scroll(&self, source: ScrollSource) -> bool {
        let (from, to) = match source {
            ScrollSource::Content => (self.content.as_ref(), self.track.as_ref()),
            ScrollSource::Track => (self.track.as_ref(), self.content.as_ref()),
        };
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };

        let offset = from.scroll_offset();
        if (to.scroll_offset() - offset).abs() <= f64::EPSILON {
            return false;
        }
        debug!(?source, offset, "mirroring horizontal scroll");
        to.set_scroll_offset(offset);
        true
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    struct Region {
        offset: Cell<f64>,
        writes: Cell<u32>,
    }

    impl ScrollHandle for Region {
        fn scroll_offset(&self) -> f64 {
            self.offset.get()
        }

        fn set_scroll_offset(&self, offset: f64) {
            self.writes.set(self.writes.get() + 1);
            self.offset.set(offset);
        }
    }

    #[test]
    fn test_track_follows_content() {
        let content = Region::default();
        let track = Region::default();
        let sync = ScrollSync::with_regions(&content, &track);

        content.offset.set(75.0);
        assert!(sync.on_content_scroll());
        assert_eq!(track.offset.get(), 75.0);

        // The write fires a scroll event on the track; it must not echo back.
        assert!(!sync.on_track_scroll());
        assert_eq!(content.writes.get(), 0);
    }

    #[test]
    fn test_content_follows_track() {
        let content = Region::default();
        let track = Region::default();
        let sync = ScrollSync::with_regions(&content, &track);

        track.offset.set(12.5);
        assert!(sync.on_track_scroll());
        assert_eq!(content.offset.get(), 12.5);
        assert_eq!(track.writes.get(), 0);
    }

    #[test]
    fn test_missing_region_is_noop() {
        let content = Region::default();
        let mut sync = ScrollSync::new();
        sync.attach_content(&content);
        content.offset.set(40.0);

        assert!(!sync.on_content_scroll());
        assert!(!sync.on_track_scroll());

        let empty: ScrollSync<&Region> = ScrollSync::new();
        assert!(!empty.on_content_scroll());
    }

    #[test]
    fn test_detach_stops_mirroring() {
        let content = Region::default();
        let track = Region::default();
        let mut sync = ScrollSync::with_regions(&content, &track);
        assert!(sync.detach_track().is_some());

        content.offset.set(30.0);
        assert!(!sync.on_content_scroll());
        assert_eq!(track.offset.get(), 0.0);
    }
}
