mod node;

pub use node::Element;

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    for child in &root.children {
        if let Some(found) = find_element(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    for child in &mut root.children {
        if let Some(found) = find_element_mut(child, id) {
            return Some(found);
        }
    }

    None
}

/// Find the parent of an element together with the element's index among
/// the parent's children.
fn find_parent_mut<'a>(root: &'a mut Element, id: &str) -> Option<(&'a mut Element, usize)> {
    if let Some(index) = root.children.iter().position(|c| c.id == id) {
        return Some((root, index));
    }

    for child in &mut root.children {
        if let Some(found) = find_parent_mut(child, id) {
            return Some(found);
        }
    }

    None
}

/// The element immediately following `id` under the same parent.
pub fn next_sibling<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if let Some(index) = root.children.iter().position(|c| c.id == id) {
        return root.children.get(index + 1);
    }

    root.children.iter().find_map(|child| next_sibling(child, id))
}

/// Insert `element` directly after `id`. Returns false if `id` has no parent
/// in the tree.
pub fn insert_after(root: &mut Element, id: &str, element: Element) -> bool {
    match find_parent_mut(root, id) {
        Some((parent, index)) => {
            parent.children.insert(index + 1, element);
            true
        }
        None => false,
    }
}

/// Detach an element (and its subtree) from the tree.
pub fn remove_element(root: &mut Element, id: &str) -> Option<Element> {
    let (parent, index) = find_parent_mut(root, id)?;
    Some(parent.children.remove(index))
}

/// Collect every descendant of `root` (excluding `root` itself) that carries
/// `class`, in document order.
pub fn elements_by_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    collect_by_class(root, class, &mut found);
    found
}

fn collect_by_class<'a>(element: &'a Element, class: &str, found: &mut Vec<&'a Element>) {
    for child in &element.children {
        if child.has_class(class) {
            found.push(child);
        }
        collect_by_class(child, class, found);
    }
}

/// Collect every control in the subtree, in document order.
pub fn controls(root: &Element) -> Vec<&Element> {
    let mut found = Vec::new();
    collect_controls(root, &mut found);
    found
}

fn collect_controls<'a>(element: &'a Element, found: &mut Vec<&'a Element>) {
    if element.tag.is_control() {
        found.push(element);
    }
    for child in &element.children {
        collect_controls(child, found);
    }
}
