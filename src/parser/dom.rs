//! Named accessors over the parsed tree.
//!
//! The page markup is read mostly by position ("the third div", "the span
//! after the separator"). Everything positional goes through these helpers so
//! extractors name what they read instead of indexing raw child lists.

use scraper::{ElementRef, Selector};

use super::text;

pub fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap()
}

/// Direct element children, in document order.
pub fn child_elements<'a>(el: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    el.children().filter_map(ElementRef::wrap)
}

/// Direct children with the given tag name.
pub fn children_named<'a>(el: ElementRef<'a>, name: &str) -> Vec<ElementRef<'a>> {
    child_elements(el)
        .filter(|c| c.value().name() == name)
        .collect()
}

pub fn first_child_named<'a>(el: ElementRef<'a>, name: &str) -> Option<ElementRef<'a>> {
    child_elements(el).find(|c| c.value().name() == name)
}

/// First descendant (excluding `el`) satisfying `pred`, in document order.
pub fn find_descendant<'a, F>(el: ElementRef<'a>, pred: F) -> Option<ElementRef<'a>>
where
    F: Fn(ElementRef<'a>) -> bool,
{
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|d| pred(*d))
}

/// Class attribute has `token` as one of its whitespace-separated entries.
pub fn has_class(el: ElementRef, token: &str) -> bool {
    el.value().classes().any(|c| c == token)
}

/// Some class entry contains `needle` as a substring.
pub fn class_contains(el: ElementRef, needle: &str) -> bool {
    el.value().classes().any(|c| c.contains(needle))
}

pub fn class_contains_ignore_case(el: ElementRef, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    el.value()
        .attr("class")
        .is_some_and(|c| c.to_lowercase().contains(&needle))
}

/// The full class attribute contains every needle (possibly across entries).
pub fn class_contains_all(el: ElementRef, needles: &[&str]) -> bool {
    el.value()
        .attr("class")
        .is_some_and(|c| needles.iter().all(|n| c.contains(n)))
}

pub fn is_tag(el: ElementRef, name: &str) -> bool {
    el.value().name() == name
}

pub fn attr<'a>(el: ElementRef<'a>, name: &str) -> Option<&'a str> {
    el.value().attr(name)
}

/// Raw concatenated text of the subtree.
pub fn raw_text(el: ElementRef) -> String {
    el.text().collect()
}

/// Normalized text of the subtree.
pub fn clean_text(el: ElementRef) -> String {
    text::normalize(&raw_text(el))
}

pub fn clean_text_of(el: Option<ElementRef>) -> String {
    el.map(clean_text).unwrap_or_default()
}

/// `src` of the first descendant image, if non-empty.
pub fn first_image_src(el: ElementRef) -> Option<String> {
    find_descendant(el, |d| is_tag(d, "img"))
        .and_then(|img| attr(img, "src"))
        .filter(|src| !src.is_empty())
        .map(str::to_string)
}

/// Link target without its query string.
pub fn href_without_query(el: ElementRef) -> String {
    attr(el, "href")
        .map(|href| href.split('?').next().unwrap_or_default().to_string())
        .unwrap_or_default()
}

/// All descendant spans, in document order.
pub fn spans<'a>(el: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|d| is_tag(*d, "span"))
        .collect()
}

/// The decorative "·" span used to separate two fragments on one line.
pub fn is_separator(el: ElementRef) -> bool {
    is_tag(el, "span") && has_class(el, "dot-separator")
}
