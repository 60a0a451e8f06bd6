//! Heading-scoped list extraction over the CommonMark event stream.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Collect the text of every list item appearing directly under a heading
/// whose text case-insensitively equals `heading_name`.
///
/// "Directly under" means the item's nearest preceding heading, at any
/// depth 1-6, is the named one, with no other heading of any depth in
/// between. Inline markup (links, code spans) contributes its text content.
/// Blank items are dropped.
pub fn extract_list_items(text: &str, heading_name: &str) -> Vec<String> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(text, options);
    let target = heading_name.trim();

    let mut items = Vec::new();
    let mut in_heading = false;
    let mut heading_text = String::new();
    let mut under_target = false;
    let mut item_stack: Vec<String> = Vec::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { .. }) => {
                in_heading = true;
                heading_text.clear();
                under_target = false;
            }
            Event::End(TagEnd::Heading(..)) => {
                in_heading = false;
                under_target = heading_text.trim().eq_ignore_ascii_case(target);
            }
            Event::Start(Tag::Item) => {
                item_stack.push(String::new());
            }
            Event::End(TagEnd::Item) => {
                if let Some(item) = item_stack.pop() {
                    let item = item.trim();
                    if under_target && !item.is_empty() {
                        items.push(item.to_string());
                    }
                }
            }
            Event::Text(chunk) | Event::Code(chunk) => {
                if in_heading {
                    heading_text.push_str(&chunk);
                } else if let Some(buffer) = item_stack.last_mut() {
                    buffer.push_str(&chunk);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some(buffer) = item_stack.last_mut() {
                    buffer.push(' ');
                }
            }
            _ => {}
        }
    }

    items
}
