// Cell formats for the report sheet

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder};
use smilefetch_core::LookupStatus;

/// Status cell background colors (0xRRGGBB).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub compound_found: u32,
    pub substance_found: u32,
    pub not_found: u32,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            compound_found: 0x92D050, // green
            substance_found: 0xFFC000, // amber
            not_found: 0xFF3300,      // red
        }
    }
}

impl Palette {
    pub fn color_for(&self, status: LookupStatus) -> u32 {
        match status {
            LookupStatus::CompoundFound => self.compound_found,
            LookupStatus::SubstanceFound => self.substance_found,
            LookupStatus::NotFound => self.not_found,
        }
    }

    /// Solid fill for a Status cell.
    pub fn status_format(&self, status: LookupStatus) -> Format {
        Format::new().set_background_color(Color::RGB(self.color_for(status)))
    }
}

/// Header row format: bold, centered, thin border.
pub fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border(FormatBorder::Thin)
}

/// Summary label format.
pub fn summary_label_format() -> Format {
    Format::new().set_bold()
}
