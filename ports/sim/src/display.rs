//! Character framebuffer standing in for the page-addressed panel

use std::fmt;

use ignition_hal::display::{PAGE_COUNT, SCREEN_WIDTH};
use ignition_hal::{HalError, HalResult, StatusDisplay};

/// Pixel columns per glyph cell, spacing included
pub const GLYPH_WIDTH: u8 = 5;

/// Glyph cells per page
pub const COLUMNS: usize = SCREEN_WIDTH as usize / GLYPH_WIDTH as usize;

const PAGES: usize = PAGE_COUNT as usize;

const BLANK: char = ' ';
const INK: char = '#';

/// Text panel model: one character per glyph cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDisplay {
    cells: [[char; COLUMNS]; PAGES],
    writes: usize,
}

impl Default for TextDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[BLANK; COLUMNS]; PAGES],
            writes: 0,
        }
    }

    /// Whole page with trailing blanks removed
    pub fn page_text(&self, page: u8) -> String {
        self.cells
            .get(usize::from(page))
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// `len` cells starting at pixel column `x`, trailing blanks removed
    pub fn text_at(&self, page: u8, x: u8, len: usize) -> String {
        let start = usize::from(x / GLYPH_WIDTH);
        self.cells
            .get(usize::from(page))
            .map(|row| {
                row.iter()
                    .skip(start)
                    .take(len)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .unwrap_or_default()
    }

    /// Number of draw, fill and clear calls accepted so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn check_page(page: u8) -> HalResult<usize> {
        if page < PAGE_COUNT {
            Ok(usize::from(page))
        } else {
            Err(HalError::InvalidParameter)
        }
    }
}

impl StatusDisplay for TextDisplay {
    fn clear(&mut self, even: u8, odd: u8) -> HalResult<()> {
        let fill = if even == 0 && odd == 0 { BLANK } else { INK };
        self.cells = [[fill; COLUMNS]; PAGES];
        self.writes += 1;
        Ok(())
    }

    fn draw_text(&mut self, page: u8, x: u8, text: &str) -> HalResult<()> {
        let row = Self::check_page(page)?;
        if x >= SCREEN_WIDTH {
            return Err(HalError::InvalidParameter);
        }

        let start = usize::from(x / GLYPH_WIDTH);
        for (cell, ch) in self.cells[row].iter_mut().skip(start).zip(text.chars()) {
            *cell = ch;
        }
        self.writes += 1;
        Ok(())
    }

    fn fill_rect(&mut self, x: u8, page: u8, width: u8, height: u8, color: u8) -> HalResult<()> {
        let first = Self::check_page(page)?;
        let last = (first + usize::from(height)).min(PAGES);
        let fill = if color == 0 { BLANK } else { INK };

        let glyph = usize::from(GLYPH_WIDTH);
        let start = usize::from(x) / glyph;
        let end = ((usize::from(x) + usize::from(width)).div_ceil(glyph)).min(COLUMNS);

        for row in &mut self.cells[first..last] {
            for cell in row.iter_mut().take(end).skip(start) {
                *cell = fill;
            }
        }
        self.writes += 1;
        Ok(())
    }
}

impl fmt::Display for TextDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(COLUMNS);
        writeln!(f, "+{}+", border)?;
        for row in &self.cells {
            writeln!(f, "|{}|", row.iter().collect::<String>())?;
        }
        write!(f, "+{}+", border)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_lands_in_glyph_cells() {
        let mut display = TextDisplay::new();
        display.draw_text(6, 0, "RPM match: YES").unwrap();
        display.draw_text(6, 76, "State: OFF").unwrap();

        assert_eq!(display.page_text(6), "RPM match: YES State: OFF");
        assert_eq!(display.text_at(6, 76, 10), "State: OFF");
    }

    #[test]
    fn rectangles_wipe_longer_text() {
        let mut display = TextDisplay::new();
        display.draw_text(6, 0, "RPM match: YES").unwrap();
        display.draw_text(6, 76, "State: OFF").unwrap();

        display.fill_rect(56, 6, 16, 1, 0).unwrap();
        display.draw_text(6, 0, "RPM match: NO").unwrap();
        display.fill_rect(117, 6, 10, 1, 0).unwrap();
        display.draw_text(6, 76, "State: ON").unwrap();

        assert_eq!(display.text_at(6, 0, 14), "RPM match: NO");
        assert_eq!(display.text_at(6, 76, 10), "State: ON");
    }

    #[test]
    fn text_is_clipped_at_right_edge() {
        let mut display = TextDisplay::new();
        display.draw_text(0, 120, "ABCDEF").unwrap();
        assert_eq!(display.page_text(0).trim_start(), "A");
    }

    #[test]
    fn out_of_range_page_rejected() {
        let mut display = TextDisplay::new();
        assert_eq!(display.draw_text(8, 0, "x"), Err(HalError::InvalidParameter));
        assert_eq!(display.writes(), 0);
    }
}
