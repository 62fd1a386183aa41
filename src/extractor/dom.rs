//! Helpers for pruning and reading a parsed `scraper::Html` tree.

use scraper::{ElementRef, Html, Selector};

/// Compile a list of selectors, keeping their order and skipping invalid ones.
pub fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .collect()
}

/// Detach every element matching any of `selectors` from the tree.
pub fn remove_matching(document: &mut Html, selectors: &[Selector]) -> usize {
    let mut removed = 0;
    for selector in selectors {
        let ids: Vec<_> = document.select(selector).map(|el| el.id()).collect();
        for id in ids {
            if let Some(mut node) = document.tree.get_mut(id) {
                node.detach();
                removed += 1;
            }
        }
    }
    removed
}

/// Text nodes of `element`, each trimmed, empty ones dropped, joined by `separator`.
pub fn stripped_text(element: ElementRef<'_>, separator: &str) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(separator)
}

/// Stripped text of the first element matched by the first selector that matches at all.
pub fn first_match_text(document: &Html, selectors: &[Selector]) -> Option<String> {
    selectors
        .iter()
        .find_map(|selector| document.select(selector).next())
        .map(|el| stripped_text(el, " "))
}

/// Stripped text of the whole document.
pub fn document_text(document: &Html) -> String {
    stripped_text(document.root_element(), " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_matching_detaches_subtrees() {
        let mut doc = Html::parse_document(
            "<html><body><nav><p>menu</p></nav><p>story</p><script>x()</script></body></html>",
        );
        let removed = remove_matching(&mut doc, &compile(&["nav", "script"]));
        assert_eq!(removed, 2);
        assert_eq!(document_text(&doc), "story");
    }

    #[test]
    fn test_first_match_respects_selector_order() {
        let doc = Html::parse_document(
            r#"<body><div class="b">second</div><div class="a"> first  <span>part</span></div></body>"#,
        );
        let text = first_match_text(&doc, &compile(&[".a", ".b"]));
        assert_eq!(text.as_deref(), Some("first part"));
        assert_eq!(first_match_text(&doc, &compile(&[".missing"])), None);
    }

    #[test]
    fn test_invalid_selectors_are_skipped() {
        assert_eq!(compile(&["p", "[[", "div"]).len(), 2);
    }
}
