//! Fixed bars around the chat panel.

pub mod header;
pub mod status_bar;

use unicode_width::UnicodeWidthStr;

pub(crate) fn cell_width(text: &str) -> u16 {
    UnicodeWidthStr::width(text).min(u16::MAX as usize) as u16
}
