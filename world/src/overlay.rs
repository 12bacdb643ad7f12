//! In-memory highlight overlay owned by the world.

use harbor_core::{EntityId, HighlightColor, HighlightOverlay};

/// Single outlined entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Highlight {
    /// Entity being outlined.
    pub entity: EntityId,
    /// Outline colour.
    pub color: HighlightColor,
    /// Outline width in pixels.
    pub width: u32,
}

/// Ordered set of highlights that presentation adapters draw each frame.
#[derive(Clone, Debug, Default)]
pub struct HighlightSet {
    highlights: Vec<Highlight>,
}

impl HighlightSet {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Iterator over the highlights in the order they were added.
    pub fn iter(&self) -> impl Iterator<Item = &Highlight> {
        self.highlights.iter()
    }

    /// Returns the highlight applied to the entity, if any.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&Highlight> {
        self.highlights
            .iter()
            .find(|highlight| highlight.entity == entity)
    }

    /// Number of highlighted entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    /// Reports whether nothing is highlighted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }
}

impl HighlightOverlay for HighlightSet {
    fn clear_highlights(&mut self) {
        self.highlights.clear();
    }

    fn add_highlight(&mut self, entity: EntityId, color: HighlightColor, width: u32) {
        let highlight = Highlight {
            entity,
            color,
            width,
        };
        match self
            .highlights
            .iter_mut()
            .find(|existing| existing.entity == entity)
        {
            Some(existing) => *existing = highlight,
            None => self.highlights.push(highlight),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_adding_an_entity_replaces_its_outline() {
        let mut overlay = HighlightSet::new();
        overlay.add_highlight(EntityId::new(1), HighlightColor::BLACK, 2);
        overlay.add_highlight(EntityId::new(1), HighlightColor::WHITE, 1);

        assert_eq!(overlay.len(), 1);
        assert_eq!(
            overlay.get(EntityId::new(1)).map(|highlight| highlight.color),
            Some(HighlightColor::WHITE)
        );
    }
}
