//! DOM neighbourhood search used by the heading and link strategies.

use scraper::{ElementRef, Selector};

pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

pub fn parent_element(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    element.parent().and_then(ElementRef::wrap)
}

/// Descendants of `element` matching `selector`, never the element itself.
pub fn find<'a>(
    element: ElementRef<'a>,
    selector: &Selector,
) -> impl Iterator<Item = ElementRef<'a>> {
    let id = element.id();
    element.select(selector).filter(move |found| found.id() != id)
}

/// Nearest anchor among the element and its ancestors.
pub fn closest_anchor(element: ElementRef<'_>) -> Option<ElementRef<'_>> {
    std::iter::once(element)
        .chain(element.ancestors().filter_map(ElementRef::wrap))
        .find(|candidate| candidate.value().name() == "a")
}

pub fn href(element: ElementRef<'_>) -> Option<String> {
    element
        .value()
        .attr("href")
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
}

/// True when `candidate` is `element` or one of its ancestors.
pub fn is_ancestor_or_self(candidate: ElementRef<'_>, element: ElementRef<'_>) -> bool {
    candidate.id() == element.id()
        || element
            .ancestors()
            .any(|ancestor| ancestor.id() == candidate.id())
}

/// A group of subtrees searched together.
#[derive(Debug, Clone)]
pub struct Area<'a> {
    roots: Vec<ElementRef<'a>>,
    include_roots: bool,
}

impl<'a> Area<'a> {
    fn inside(element: ElementRef<'a>) -> Self {
        Self {
            roots: vec![element],
            include_roots: false,
        }
    }

    fn around(roots: Vec<ElementRef<'a>>) -> Self {
        Self {
            roots,
            include_roots: true,
        }
    }

    pub fn text(&self) -> String {
        self.roots
            .iter()
            .map(|root| text_of(*root))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Matching elements in document order.
    pub fn select(&self, selector: &Selector) -> Vec<ElementRef<'a>> {
        let mut found = Vec::new();
        for root in &self.roots {
            if self.include_roots && selector.matches(root) {
                found.push(*root);
            }
            found.extend(find(*root, selector));
        }
        found
    }
}

/// Search areas around `element`, nearest first.
///
/// 1. the element's own subtree
/// 2. its parent; when the element is one of several same-tag siblings, only
///    its own section (the element up to the next same-tag sibling)
/// 3. the next sibling
/// 4. the previous sibling
/// 5. every sibling, following ones first
pub fn proximity_areas(element: ElementRef<'_>) -> Vec<Area<'_>> {
    let mut areas = vec![Area::inside(element)];

    if let Some(parent) = parent_element(element) {
        let roots = section(element, parent).unwrap_or_else(|| vec![parent]);
        areas.push(Area::around(roots));
    }

    let following: Vec<_> = element.next_siblings().filter_map(ElementRef::wrap).collect();
    let preceding: Vec<_> = element.prev_siblings().filter_map(ElementRef::wrap).collect();

    if let Some(next) = following.first() {
        areas.push(Area::around(vec![*next]));
    }
    if let Some(prev) = preceding.first() {
        areas.push(Area::around(vec![*prev]));
    }

    let siblings: Vec<_> = following.into_iter().chain(preceding).collect();
    if !siblings.is_empty() {
        areas.push(Area::around(siblings));
    }

    areas
}

fn section<'a>(element: ElementRef<'a>, parent: ElementRef<'a>) -> Option<Vec<ElementRef<'a>>> {
    let tag = element.value().name();
    let same_tag = parent
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == tag)
        .count();

    if same_tag < 2 {
        return None;
    }

    let mut roots = vec![element];
    roots.extend(
        element
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take_while(|sibling| sibling.value().name() != tag),
    );
    Some(roots)
}
