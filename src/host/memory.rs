//! In-process element tree.
//!
//! `ElementRef` handles share their element through `Arc<RwLock<..>>`, so the rotator can
//! mutate classes from the timer task while the UI reads them.

use crate::host::selector::{Selector, SelectorSubject};
use crate::host::{Document, Element};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Tag and class name of the container produced by [`MemoryDocument::image_slider`].
pub const SLIDER_CONTAINER_TAG: &str = "div";
pub const SLIDER_CONTAINER_CLASS: &str = "image-slider";
/// Tag of each banner produced by [`MemoryDocument::image_slider`].
pub const SLIDER_ITEM_TAG: &str = "img";

#[derive(Debug)]
struct ElementData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    children: Vec<ElementRef>,
}

/// Shared handle to an element of a [`MemoryDocument`].
#[derive(Debug, Clone)]
pub struct ElementRef(Arc<RwLock<ElementData>>);

impl ElementRef {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(ElementData {
            tag: tag.into().to_ascii_lowercase(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        })))
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attribute(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn tag_name(&self) -> String {
        self.0.read().tag.clone()
    }

    /// Classes in insertion order.
    pub fn classes(&self) -> Vec<String> {
        self.0.read().classes.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.read().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        self.0.write().attributes.insert(name.into(), value.into());
    }

    pub fn append_child(&self, child: ElementRef) {
        self.0.write().children.push(child);
    }

    pub fn children(&self) -> Vec<ElementRef> {
        self.0.read().children.clone()
    }

    /// True when both handles refer to the same element.
    pub fn ptr_eq(&self, other: &ElementRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn snapshot(&self) -> NodeSnapshot {
        let data = self.0.read();
        NodeSnapshot {
            tag: data.tag.clone(),
            classes: data.classes.clone(),
        }
    }
}

impl Element for ElementRef {
    fn add_class(&self, class: &str) {
        let mut data = self.0.write();
        if !data.classes.iter().any(|existing| existing == class) {
            data.classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.write().classes.retain(|existing| existing != class);
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.read().classes.iter().any(|existing| existing == class)
    }
}

/// Tag and classes captured while walking the tree, so matching never holds two locks.
struct NodeSnapshot {
    tag: String,
    classes: Vec<String>,
}

impl SelectorSubject for NodeSnapshot {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|existing| existing == class)
    }
}

/// A forest of elements queried in depth-first document order.
#[derive(Debug, Default, Clone)]
pub struct MemoryDocument {
    roots: Vec<ElementRef>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, root: ElementRef) {
        self.roots.push(root);
    }

    pub fn roots(&self) -> &[ElementRef] {
        &self.roots
    }

    /// Build the markup the rotator is usually pointed at:
    ///
    /// ```text
    /// <div class="image-slider">
    ///   <img src="first" class="active">
    ///   <img src="second">
    /// </div>
    /// ```
    ///
    /// The first image carries `active_class`, the rest none.
    pub fn image_slider<I, S>(sources: I, active_class: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let container =
            ElementRef::new(SLIDER_CONTAINER_TAG).with_class(SLIDER_CONTAINER_CLASS);
        for (idx, source) in sources.into_iter().enumerate() {
            let image = ElementRef::new(SLIDER_ITEM_TAG).with_attribute("src", source);
            if idx == 0 {
                image.add_class(active_class);
            }
            container.append_child(image);
        }

        let mut document = Self::new();
        document.append(container);
        document
    }

    fn collect(
        node: &ElementRef,
        ancestors: &mut Vec<NodeSnapshot>,
        selector: &Selector,
        found: &mut Vec<ElementRef>,
    ) {
        let snapshot = node.snapshot();
        if selector.matches(ancestors, &snapshot) {
            found.push(node.clone());
        }

        let children = node.children();
        ancestors.push(snapshot);
        for child in &children {
            Self::collect(child, ancestors, selector, found);
        }
        ancestors.pop();
    }
}

impl Document for MemoryDocument {
    type Element = ElementRef;

    fn query_selector_all(&self, selector: &Selector) -> Vec<ElementRef> {
        let mut found = Vec::new();
        let mut ancestors = Vec::new();
        for root in &self.roots {
            Self::collect(root, &mut ancestors, selector, &mut found);
        }
        found
    }
}
