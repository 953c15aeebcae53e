// RingWatch - UI Page Selection
//
// The watch face cycles through a fixed set of pages. The selector keeps the
// current page inside `[Page::FIRST, last]` and tells the renderer when the
// whole screen has to be wiped instead of patched.

/// Screens the display can show, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Page {
    BlueRing = 0,
    GreenRing = 1,
    Green = 2,
    EyePulse = 3,
    OrbitPulse = 4,
    EyePulsePause = 5,
}

impl Page {
    pub const FIRST: Page = Page::BlueRing;
    pub const LAST: Page = Page::EyePulsePause;

    const ALL: [Page; 6] = [
        Page::BlueRing,
        Page::GreenRing,
        Page::Green,
        Page::EyePulse,
        Page::OrbitPulse,
        Page::EyePulsePause,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Human-readable label for logs.
    pub fn name(self) -> &'static str {
        match self {
            Self::BlueRing => "blue ring",
            Self::GreenRing => "green ring",
            Self::Green => "green",
            Self::EyePulse => "eye pulse",
            Self::OrbitPulse => "orbit pulse",
            Self::EyePulsePause => "eye pulse (paused)",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageSelector {
    current: Page,
    last: Page,
    needs_full_redraw: bool,
}

impl PageSelector {
    /// `initial` is clamped to `last`. The first frame is always a full draw.
    pub fn new(initial: Page, last: Page) -> Self {
        Self {
            current: initial.min(last),
            last,
            needs_full_redraw: true,
        }
    }

    pub fn current(&self) -> Page {
        self.current
    }

    /// Step to the next page, wrapping back to the first after `last`.
    pub fn advance(&mut self) -> Page {
        let next = if self.current >= self.last {
            Page::FIRST
        } else {
            Page::from_index(self.current.index() + 1).unwrap_or(Page::FIRST)
        };
        self.set(next);
        self.current
    }

    /// Jump straight to `page`. Returns `false` and leaves the selection
    /// untouched when `page` lies past the last selectable page.
    pub fn select(&mut self, page: Page) -> bool {
        if page > self.last {
            return false;
        }
        self.set(page);
        true
    }

    pub fn needs_full_redraw(&self) -> bool {
        self.needs_full_redraw
    }

    pub fn request_full_redraw(&mut self) {
        self.needs_full_redraw = true;
    }

    /// Called by the draw pass once the whole screen has been repainted.
    pub fn mark_drawn(&mut self) {
        self.needs_full_redraw = false;
    }

    fn set(&mut self, page: Page) {
        if page != self.current {
            self.current = page;
            self.needs_full_redraw = true;
        }
    }
}
