//! Label registry: the ordered list of labels available for tagging.

use thiserror::Error;

use crate::constants::{AUTO_LABEL_PREFIX, INDEX_WIDTH};
use crate::model::LabelEntry;

/// Errors reported by the label registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LabelError {
    /// No row is selected
    #[error("No label selected")]
    NoSelection,

    /// The row does not exist
    #[error("Label row {position} out of range ({count} labels)")]
    OutOfRange {
        /// Requested row
        position: usize,
        /// Number of labels in the registry
        count: usize,
    },
}

/// Ordered label registry.
///
/// Indices always run `0..len()` in list order. Colors are assigned once at
/// creation and survive renumbering.
#[derive(Debug, Clone, Default)]
pub struct LabelRegistry {
    labels: Vec<LabelEntry>,
    /// Number of placeholder names handed out so far
    auto_name_count: usize,
}

impl LabelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a label named `requested_name`, or `Label_NNN` when it is empty.
    pub fn add_label(&mut self, requested_name: &str) -> &LabelEntry {
        let index = self.labels.len();
        let name = if requested_name.is_empty() {
            self.next_auto_name()
        } else {
            requested_name.to_string()
        };

        let label = LabelEntry::new(index, &name);
        log::debug!(
            "Added label {} '{}' with color {}",
            label.index_text(),
            label.name(),
            label.color()
        );
        self.labels.push(label);
        &self.labels[index]
    }

    /// Remove the label at `position` and renumber the rows after it.
    ///
    /// The shifted rows keep their colors.
    pub fn remove_label(&mut self, position: Option<usize>) -> Result<LabelEntry, LabelError> {
        let position = self.check_position(position)?;

        let removed = self.labels.remove(position);
        for (i, label) in self.labels.iter_mut().enumerate().skip(position) {
            label.set_index(i);
        }

        log::debug!(
            "Removed label '{}' at row {}, {} labels left",
            removed.name(),
            position,
            self.labels.len()
        );
        Ok(removed)
    }

    /// Change the name of the label at `position`. Index and color are unchanged.
    pub fn rename_label(&mut self, position: usize, name: &str) -> Result<&LabelEntry, LabelError> {
        let position = self.check_position(Some(position))?;
        self.labels[position].set_name(name);
        Ok(&self.labels[position])
    }

    pub fn get(&self, position: usize) -> Option<&LabelEntry> {
        self.labels.get(position)
    }

    pub fn labels(&self) -> &[LabelEntry] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelEntry> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn next_auto_name(&mut self) -> String {
        let name = format!(
            "{}{:0width$}",
            AUTO_LABEL_PREFIX,
            self.auto_name_count,
            width = INDEX_WIDTH
        );
        self.auto_name_count += 1;
        name
    }

    fn check_position(&self, position: Option<usize>) -> Result<usize, LabelError> {
        let position = position.ok_or(LabelError::NoSelection)?;
        if position >= self.labels.len() {
            return Err(LabelError::OutOfRange {
                position,
                count: self.labels.len(),
            });
        }
        Ok(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color_utils::{Rgb, label_color};

    fn registry_with(names: &[&str]) -> LabelRegistry {
        let mut registry = LabelRegistry::new();
        for name in names {
            registry.add_label(name);
        }
        registry
    }

    fn assert_consecutive(registry: &LabelRegistry) {
        for (i, label) in registry.iter().enumerate() {
            assert_eq!(label.index(), i);
            assert_eq!(label.index_text(), format!("{:03}", i));
        }
    }

    #[test]
    fn test_add_label_indices_are_consecutive() {
        let mut registry = LabelRegistry::new();
        for i in 0..12 {
            let label = registry.add_label("x");
            assert_eq!(label.index(), i);
            assert_consecutive(&registry);
        }
        assert_eq!(registry.len(), 12);
    }

    #[test]
    fn test_add_label_colors() {
        let registry = registry_with(&["a", "b"]);
        assert_eq!(registry.labels()[0].color(), Rgb::new(14, 104, 14));
        assert_eq!(registry.labels()[1].color(), Rgb::new(44, 164, 104));
    }

    #[test]
    fn test_auto_names_count_only_generated_names() {
        let mut registry = LabelRegistry::new();
        assert_eq!(registry.add_label("").name(), "Label_000");
        assert_eq!(registry.add_label("car").name(), "car");
        assert_eq!(registry.add_label("bus").name(), "bus");
        let label = registry.add_label("");
        assert_eq!(label.name(), "Label_001");
        assert_eq!(label.index(), 3);
    }

    #[test]
    fn test_auto_names_survive_removal() {
        let mut registry = LabelRegistry::new();
        registry.add_label("");
        registry.add_label("");
        registry.remove_label(Some(0)).unwrap();
        registry.remove_label(Some(0)).unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.add_label("").name(), "Label_002");
    }

    #[test]
    fn test_remove_label_renumbers_and_keeps_colors() {
        let mut registry = registry_with(&["a", "b", "c", "d", "e"]);
        let before = registry.labels().to_vec();

        let removed = registry.remove_label(Some(1)).unwrap();
        assert_eq!(removed.name(), "b");
        assert_eq!(registry.len(), 4);
        assert_consecutive(&registry);

        // Rows before the removed one are untouched
        assert_eq!(registry.labels()[0], before[0]);

        // Rows after move up one index but keep their original color
        for (new_pos, old) in before.iter().enumerate().skip(2).map(|(i, l)| (i - 1, l)) {
            let label = &registry.labels()[new_pos];
            assert_eq!(label.name(), old.name());
            assert_eq!(label.index(), old.index() - 1);
            assert_eq!(label.color(), old.color());
            assert_ne!(label.color(), label_color(label.index()));
        }
    }

    #[test]
    fn test_new_label_after_removal_reuses_color_of_position() {
        let mut registry = registry_with(&["a", "b", "c"]);
        registry.remove_label(Some(0)).unwrap();
        let label = registry.add_label("d");
        assert_eq!(label.index(), 2);
        // Same color as the shifted "c" which was created at index 2
        assert_eq!(label.color(), label_color(2));
        assert_eq!(registry.labels()[1].color(), label_color(2));
    }

    #[test]
    fn test_remove_last_label() {
        let mut registry = registry_with(&["a", "b"]);
        registry.remove_label(Some(1)).unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.labels()[0].name(), "a");
    }

    #[test]
    fn test_remove_without_selection_is_noop() {
        let mut registry = registry_with(&["a"]);
        assert_eq!(registry.remove_label(None), Err(LabelError::NoSelection));
        assert_eq!(
            registry.remove_label(Some(1)),
            Err(LabelError::OutOfRange { position: 1, count: 1 })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rename_label() {
        let mut registry = registry_with(&["a", "b"]);
        let color = registry.labels()[1].color();

        let label = registry.rename_label(1, "bicycle").unwrap();
        assert_eq!(label.name(), "bicycle");
        assert_eq!(label.index(), 1);
        assert_eq!(label.color(), color);

        assert!(registry.rename_label(5, "x").is_err());
        assert_eq!(registry.labels()[0].name(), "a");
    }
}
