//! Drawable elements, the registry that owns them, and the selection sets.

use std::collections::HashMap;
use std::fmt;

use plankit_core::{Action, EditorError, Feature, Point, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for a drawable element on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A live drag offset applied by the move tool before commit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveDelta {
    pub x: f64,
    pub y: f64,
}

/// A drawable polygon on the canvas. `move_delta` is a transient visual
/// offset; `None` means the element is not mid-move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: ElementId,
    pub points: Vec<Point>,
    pub move_delta: Option<MoveDelta>,
}

impl Element {
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            id: ElementId::new(),
            points,
            move_delta: None,
        }
    }
}

/// Identity-keyed store of drawable elements. Tools read and write through
/// the registry, never via copies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElementRegistry {
    elements: HashMap<ElementId, Element>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new polygon element and returns its id.
    pub fn insert_polygon(&mut self, points: Vec<Point>) -> ElementId {
        let element = Element::new(points);
        let id = element.id;
        self.elements.insert(id, element);
        id
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(&id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.values()
    }

    /// Sets or clears the live move offset of an element.
    pub fn set_move(&mut self, id: ElementId, delta: Option<MoveDelta>) -> Result<()> {
        let element = self.elements.get_mut(&id).ok_or_else(|| {
            EditorError::not_found(Feature::Shape, Action::Move, format!("no element {id}"))
        })?;
        element.move_delta = delta;
        Ok(())
    }

    /// Folds an element's move offset into its points and clears it.
    ///
    /// Atomic per element: the points are only rewritten after the element
    /// lookup succeeds, so a missing id leaves nothing half-shifted.
    pub fn commit_move(&mut self, id: ElementId) -> Result<()> {
        let element = self.elements.get_mut(&id).ok_or_else(|| {
            EditorError::not_found(Feature::Shape, Action::Move, format!("no element {id}"))
        })?;
        if let Some(delta) = element.move_delta.take() {
            for point in &mut element.points {
                *point = point.translated(delta.x, delta.y);
            }
        }
        Ok(())
    }
}

/// The current selection plus the transient marquee candidate set.
///
/// Candidates mean "would be selected if the drag released now"; they are
/// merged into the selection on accept and cleared when the drag ends.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    selected: Vec<ElementId>,
    candidates: Vec<ElementId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[ElementId] {
        &self.selected
    }

    pub fn candidates(&self) -> &[ElementId] {
        &self.candidates
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn select_only(&mut self, id: ElementId) {
        self.selected.clear();
        self.selected.push(id);
    }

    pub fn add(&mut self, id: ElementId) {
        if !self.selected.contains(&id) {
            self.selected.push(id);
        }
    }

    pub fn remove(&mut self, id: ElementId) {
        self.selected.retain(|s| *s != id);
    }

    /// Removes the id if selected, adds it otherwise.
    pub fn toggle(&mut self, id: ElementId) {
        if self.is_selected(id) {
            self.remove(id);
        } else {
            self.add(id);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
        self.candidates.clear();
    }

    pub fn set_candidates(&mut self, candidates: Vec<ElementId>) {
        self.candidates = candidates;
    }

    pub fn clear_candidates(&mut self) {
        self.candidates.clear();
    }

    /// Merges the candidate set into the selection and clears it.
    pub fn accept_candidates(&mut self) {
        let candidates = std::mem::take(&mut self.candidates);
        for id in candidates {
            self.add(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_move_folds_delta_into_points() {
        let mut registry = ElementRegistry::new();
        let id = registry.insert_polygon(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]);
        registry
            .set_move(id, Some(MoveDelta { x: 10.0, y: 5.0 }))
            .unwrap();
        registry.commit_move(id).unwrap();

        let element = registry.get(id).unwrap();
        assert_eq!(element.points, vec![Point::new(10.0, 5.0), Point::new(20.0, 5.0)]);
        assert!(element.move_delta.is_none());
    }

    #[test]
    fn commit_move_without_delta_is_a_no_op() {
        let mut registry = ElementRegistry::new();
        let id = registry.insert_polygon(vec![Point::new(1.0, 2.0)]);
        registry.commit_move(id).unwrap();
        assert_eq!(registry.get(id).unwrap().points, vec![Point::new(1.0, 2.0)]);
    }

    #[test]
    fn set_move_on_unknown_id_errors() {
        let mut registry = ElementRegistry::new();
        let err = registry
            .set_move(ElementId::new(), Some(MoveDelta { x: 1.0, y: 1.0 }))
            .unwrap_err();
        assert_eq!(err.code(), "shape:move:not-found");
    }

    #[test]
    fn toggle_flips_membership() {
        let mut selection = SelectionSet::new();
        let a = ElementId::new();
        let b = ElementId::new();
        selection.add(a);

        selection.toggle(a);
        assert!(selection.is_empty());

        selection.add(a);
        selection.toggle(b);
        assert_eq!(selection.selected(), &[a, b]);
    }

    #[test]
    fn accept_candidates_merges_without_duplicates() {
        let mut selection = SelectionSet::new();
        let a = ElementId::new();
        let b = ElementId::new();
        selection.add(a);
        selection.set_candidates(vec![a, b]);
        selection.accept_candidates();

        assert_eq!(selection.len(), 2);
        assert!(selection.candidates().is_empty());
    }
}
