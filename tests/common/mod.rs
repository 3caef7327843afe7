#![allow(dead_code)]

use std::collections::HashMap;

use locator_forge::dom::document::{Document, SelectionStart, TargetHints};
use locator_forge::dom::snapshot::PageSnapshot;
use locator_forge::locator::config::Preset;
use locator_forge::locator::descriptor::{ElementDescriptor, describe_element};
use scraper::ElementRef;

pub const LOGIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Login</title></head>
<body>
  <section id="login">
    <form>
      <input name="email" placeholder="Email">
      <input type="password" placeholder="Password">
      <button id="submit" class="btn btn_primary" data-v-1f99f73c="" data-testid="sign-in" type="submit">Sign in</button>
    </form>
  </section>
  <ul class="menu">
    <li>Home</li>
    <li>Docs</li>
  </ul>
  <a href="/docs" data-test="docs-link" aria-label="Docs">Read the docs</a>
</body>
</html>"#;

/// First element matching `selector`; panics when absent.
pub fn el<'a>(doc: &'a Document, selector: &str) -> ElementRef<'a> {
    doc.find(selector)
        .unwrap_or_else(|| panic!("no element matches {}", selector))
}

pub fn index_of(doc: &Document, selector: &str) -> usize {
    doc.index_of(el(doc, selector)).expect("element belongs to document")
}

/// Document whose hover hint points at `selector`.
pub fn hovering(html: &str, selector: &str) -> Document {
    let probe = Document::parse(html);
    let index = index_of(&probe, selector);
    Document::parse(html).with_hints(TargetHints {
        hovered: Some(index),
        ..TargetHints::default()
    })
}

/// Snapshot whose text selection starts inside `selector`.
pub fn selecting(html: &str, selector: &str) -> PageSnapshot {
    let probe = Document::parse(html);
    PageSnapshot {
        selection: Some(SelectionStart {
            element: index_of(&probe, selector),
            text_node: true,
        }),
        ..PageSnapshot::from_html(html)
    }
}

/// Snapshot with `[x, y, w, h]` boxes for the given selectors.
pub fn laid_out(html: &str, boxes: &[(&str, [f64; 4])]) -> PageSnapshot {
    let probe = Document::parse(html);
    let layout: HashMap<usize, [f64; 4]> = boxes
        .iter()
        .map(|(selector, b)| (index_of(&probe, selector), *b))
        .collect();
    PageSnapshot {
        layout,
        ..PageSnapshot::from_html(html)
    }
}

/// Page Object descriptor of the first `selector` match on the login page.
pub fn login_descriptor(selector: &str) -> ElementDescriptor {
    let doc = Document::parse(LOGIN_PAGE);
    describe_element(&doc, el(&doc, selector), &Preset::PageObject.config())
}
