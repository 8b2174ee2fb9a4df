//! Display sink trait for small monochrome panels

/// Errors that can occur while drawing or flushing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with the panel
    Communication,
}

/// Monochrome pixel colour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Color {
    /// Pixel off
    Background,
    /// Pixel on
    Foreground,
}

/// Discrete text sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextScale {
    /// Smallest font, 8 lines on a 64 pixel panel
    #[default]
    Small,
    /// 13 pixel line height
    Medium,
    /// 18 pixel line height
    Large,
    /// Largest font, 3 lines on a 64 pixel panel
    XLarge,
}

/// Pixel-addressed text and graphics surface
///
/// Drawing happens into a buffer; nothing reaches the panel until
/// [`flush`](DisplaySink::flush) is called.
pub trait DisplaySink {
    /// Clear the entire surface to the background colour
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the text cursor to a pixel position (top-left of the next glyph)
    fn set_cursor(&mut self, x: i32, y: i32);

    /// Current text cursor position
    fn cursor(&self) -> (i32, i32);

    /// Select the text scale used by subsequent `draw_text` calls
    fn set_text_scale(&mut self, scale: TextScale);

    /// Draw text at the cursor
    ///
    /// Each `\n` moves the cursor to the start of the next line. No wrapping
    /// is attempted for long lines.
    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Fill a rectangle
    fn fill_rect(
        &mut self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        color: Color,
    ) -> Result<(), DisplayError>;

    /// Send buffered content to the panel
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Surface size in pixels (width, height)
    fn size(&self) -> (u32, u32);
}

/// Helper trait for drawing formatted lines
pub trait DisplaySinkExt: DisplaySink {
    /// Draw a line of text followed by a line advance
    fn draw_line(&mut self, text: &str) -> Result<(), DisplayError> {
        self.draw_text(text)?;
        self.draw_text("\n")
    }
}

// Blanket implementation for all DisplaySink types
impl<T: DisplaySink + ?Sized> DisplaySinkExt for T {}
