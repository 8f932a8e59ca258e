use std::{collections::HashSet, mem};

use log::debug;

use treehouse_shared::{ChildrenDiff, Diff, LayoutModifiers, PropertyDiff, WidgetId};

/// Accumulates the diffs produced by one update pass.
///
/// [`take`](Self::take) swaps every buffer for a fresh one, so the returned
/// batch is never appended to again.
#[derive(Debug, Default)]
pub struct DiffBatch {
    children_diffs: Vec<ChildrenDiff>,
    layout_modifiers: Vec<LayoutModifiers>,
    property_diffs: Vec<PropertyDiff>,
}

impl DiffBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_children_diff(&mut self, diff: ChildrenDiff) {
        self.children_diffs.push(diff);
    }

    pub fn append_layout_modifiers(&mut self, layout_modifiers: LayoutModifiers) {
        self.layout_modifiers.push(layout_modifiers);
    }

    pub fn append_property_diff(&mut self, diff: PropertyDiff) {
        self.property_diffs.push(diff);
    }

    /// Drops pending property and layout modifier diffs targeting `released`.
    ///
    /// Children diffs are applied first, so these would otherwise reach the
    /// display after their widget was already removed.
    pub fn discard_released(&mut self, released: &[WidgetId]) {
        if released.is_empty() {
            return;
        }
        let released: HashSet<&WidgetId> = released.iter().collect();
        self.property_diffs
            .retain(|diff| !released.contains(&diff.id));
        self.layout_modifiers
            .retain(|layout_modifiers| !released.contains(&layout_modifiers.id));
    }

    pub fn is_empty(&self) -> bool {
        self.children_diffs.is_empty()
            && self.layout_modifiers.is_empty()
            && self.property_diffs.is_empty()
    }

    /// Returns everything appended since the last call, or `None` if nothing was.
    pub fn take(&mut self) -> Option<Diff> {
        if self.is_empty() {
            return None;
        }

        let diff = Diff {
            children_diffs: mem::take(&mut self.children_diffs),
            layout_modifiers: mem::take(&mut self.layout_modifiers),
            property_diffs: mem::take(&mut self.property_diffs),
        };
        debug!(
            "Flushing diff batch: {} children, {} layout modifiers, {} properties",
            diff.children_diffs.len(),
            diff.layout_modifiers.len(),
            diff.property_diffs.len()
        );
        Some(diff)
    }
}
