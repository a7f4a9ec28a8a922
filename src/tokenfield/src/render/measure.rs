//! Terminal cell width measurement.

use unicode_width::UnicodeWidthStr;

use crate::collaborator::TextMeasure;

/// Measures text in terminal columns using Unicode East Asian Width rules.
///
/// Wide characters (CJK, most emoji) count as two columns, combining marks
/// as zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeMeasure;

impl TextMeasure for UnicodeMeasure {
    fn measure_text_width(&self, text: &str) -> usize {
        UnicodeWidthStr::width(text)
    }
}
