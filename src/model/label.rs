//! Label data model for the label registry.

use crate::color_utils::{Rgb, label_color};
use crate::constants::INDEX_WIDTH;

/// One row of the label registry.
///
/// The color is fixed when the label is created. Only the registry moves
/// `index` when rows above it are removed, so after a removal the color may
/// no longer match `label_color(index)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEntry {
    index: usize,
    name: String,
    color: Rgb,
}

impl LabelEntry {
    /// Create a label at `index`, deriving its color from that index.
    pub fn new(index: usize, name: &str) -> Self {
        Self {
            index,
            name: name.to_string(),
            color: label_color(index),
        }
    }

    /// Zero-based position in the registry.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index as shown in the table, e.g. `007`.
    pub fn index_text(&self) -> String {
        format!("{:0width$}", self.index, width = INDEX_WIDTH)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Swatch color assigned at creation.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Text color drawn on top of the swatch.
    pub fn text_color(&self) -> Rgb {
        self.color.contrasting()
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_new() {
        let label = LabelEntry::new(1, "cat");
        assert_eq!(label.index(), 1);
        assert_eq!(label.name(), "cat");
        assert_eq!(label.color(), Rgb::new(44, 164, 104));
        assert_eq!(label.text_color(), Rgb::new(211, 91, 151));
    }

    #[test]
    fn test_index_text_padding() {
        assert_eq!(LabelEntry::new(7, "a").index_text(), "007");
        assert_eq!(LabelEntry::new(42, "a").index_text(), "042");
        assert_eq!(LabelEntry::new(1234, "a").index_text(), "1234");
    }

    #[test]
    fn test_set_index_keeps_color() {
        let mut label = LabelEntry::new(3, "dog");
        let color = label.color();
        label.set_index(2);
        assert_eq!(label.index(), 2);
        assert_eq!(label.index_text(), "002");
        assert_eq!(label.color(), color);
        assert_ne!(label.color(), label_color(2));
    }
}
