//! The ordered, fixed set of banner elements a rotator cycles through.

use crate::host::{Document, Element, Selector};

/// Ordered sequence of element handles, established once and never resized.
#[derive(Debug, Clone)]
pub struct BannerSet<E> {
    elements: Vec<E>,
}

impl<E: Element> BannerSet<E> {
    pub fn new(elements: Vec<E>) -> Self {
        Self { elements }
    }

    /// Snapshot every element of `document` matching `selector`, in document order.
    pub fn query<D>(document: &D, selector: &Selector) -> Self
    where
        D: Document<Element = E>,
    {
        let elements = document.query_selector_all(selector);
        log::debug!(
            "selector '{}' matched {} banner(s)",
            selector,
            elements.len()
        );
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&E> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.elements.iter()
    }

    /// Indices of the elements currently carrying `marker`.
    pub fn marked_indices(&self, marker: &str) -> Vec<usize> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, element)| element.has_class(marker))
            .map(|(idx, _)| idx)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ElementRef, MemoryDocument};

    #[test]
    fn query_preserves_document_order() {
        let doc = MemoryDocument::image_slider(["one", "two", "three"], "active");
        let set = BannerSet::query(&doc, &Selector::parse(".image-slider img").unwrap());

        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        let srcs: Vec<_> = set.iter().filter_map(|el| el.attribute("src")).collect();
        assert_eq!(srcs, vec!["one", "two", "three"]);
        assert!(set.get(3).is_none());
    }

    #[test]
    fn marked_indices_reflects_current_classes() {
        let set = BannerSet::new(vec![
            ElementRef::new("img"),
            ElementRef::new("img").with_class("active"),
            ElementRef::new("img"),
        ]);
        assert_eq!(set.marked_indices("active"), vec![1]);

        if let Some(el) = set.get(2) {
            el.add_class("active");
        }
        assert_eq!(set.marked_indices("active"), vec![1, 2]);
        assert!(set.marked_indices("other").is_empty());
    }

    #[test]
    fn non_matching_selector_gives_empty_set() {
        let doc = MemoryDocument::image_slider(["one"], "active");
        let set = BannerSet::query(&doc, &Selector::parse(".carousel img").unwrap());
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
    }
}
