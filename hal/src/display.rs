//! Status display abstraction
//!
//! A page-addressed monochrome panel: 8 pages of 8 pixel rows, 128 columns.
//! Text is drawn with a proportional font, roughly 5 pixel columns per glyph
//! including spacing, starting at a pixel column on one page.

use crate::error::HalResult;

/// Number of 8-pixel pages on the panel
pub const PAGE_COUNT: u8 = 8;

/// Panel width in pixel columns
pub const SCREEN_WIDTH: u8 = 128;

/// Display used by the main loop only; implementations need not be reentrant
pub trait StatusDisplay {
    /// Fill every page with the alternating column pattern `even`, `odd`
    fn clear(&mut self, even: u8, odd: u8) -> HalResult<()>;

    /// Render `text` on `page` starting at pixel column `x`
    fn draw_text(&mut self, page: u8, x: u8, text: &str) -> HalResult<()>;

    /// Fill a `width` x `height` block (pixels x pages) with `color`
    fn fill_rect(&mut self, x: u8, page: u8, width: u8, height: u8, color: u8) -> HalResult<()>;
}
