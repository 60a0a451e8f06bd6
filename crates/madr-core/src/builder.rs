//! Fold from the tagged parse tree into a [`DecisionRecord`].

use crate::casing::title_case;
use crate::grammar::{self, OptionSectionNode, OutcomeNode, ParseTree, SectionNode};
use crate::matching::{matches_exact, matches_relaxed};
use crate::model::DecisionRecord;

/// Parse document text into a structured record. Never fails: input that
/// does not match the grammar yields a best-effort record with
/// `conforming = false`.
pub fn parse_document(text: &str) -> DecisionRecord {
    build(grammar::parse(text))
}

pub(crate) fn build(tree: ParseTree) -> DecisionRecord {
    let mut record = DecisionRecord::new();
    record.conforming = tree.conforming;

    for section in tree.sections {
        match section {
            SectionNode::Title(title) => record.title = title_case(&title),
            SectionNode::Status(status) => record.status = status,
            SectionNode::Deciders(deciders) => record.deciders = deciders,
            SectionNode::Date(date) => record.date = date,
            SectionNode::TechnicalStory(story) => record.technical_story = story,
            SectionNode::Context(text) => record.context_and_problem_statement = text,
            SectionNode::DecisionDrivers(items) => {
                record.decision_drivers = clean_items(items);
            }
            SectionNode::ConsideredOptions(items) => {
                for item in clean_items(items) {
                    record.add_option(title_case(&item), String::new(), vec![], vec![]);
                }
            }
            SectionNode::DecisionOutcome(outcome) => apply_outcome(&mut record, outcome),
            SectionNode::OptionSections(options) => {
                for option in options {
                    apply_option_section(&mut record, option);
                }
            }
            SectionNode::Links(items) => record.links = clean_items(items),
        }
    }

    record.normalize();
    record
}

/// Split the decision-outcome text into chosen option and explanation.
///
/// The first line after the `Chosen option: ` prefix carries the quoted
/// option and, after `", because"`, the inline explanation; later lines are
/// the serializer's block-form explanation. Without the prefix the whole
/// block is kept as the explanation.
fn apply_outcome(record: &mut DecisionRecord, outcome: OutcomeNode) {
    if let Some(rest) = outcome.text.strip_prefix(grammar::CHOSEN_OPTION_PREFIX) {
        let (first_line, trailing) = rest.split_once('\n').unwrap_or((rest, ""));
        let mut segments = first_line.split(", because");
        let chosen = segments.next().unwrap_or("").trim();
        record.decision_outcome.chosen_option = strip_delimiter_pair(chosen).to_string();

        let inline = segments.collect::<Vec<_>>().join(",");
        let inline = inline.trim();
        let trailing = trailing.trim();
        record.decision_outcome.explanation = match (inline.is_empty(), trailing.is_empty()) {
            (false, true) => inline.to_string(),
            (true, false) => trailing.to_string(),
            (false, false) => format!("{}\n{}", inline, trailing),
            (true, true) => String::new(),
        };
    } else {
        record.decision_outcome.explanation = outcome.text;
    }

    record.decision_outcome.positive_consequences = clean_items(outcome.positive);
    record.decision_outcome.negative_consequences = clean_items(outcome.negative);
}

/// Drop a surrounding delimiter pair when the first and last character are
/// the same single character, whatever it is. Anything else is returned
/// unchanged.
fn strip_delimiter_pair(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last => {
            &text[first.len_utf8()..text.len() - last.len_utf8()]
        }
        _ => text,
    }
}

/// Attach a pros/cons subsection to the option it names. Exact match is
/// tried before the relaxed one; a subsection naming no known option
/// synthesizes a new one so its content is never dropped.
fn apply_option_section(record: &mut DecisionRecord, section: OptionSectionNode) {
    let title = title_case(&section.title);
    let pros = clean_items(section.pros);
    let cons = clean_items(section.cons);

    let index = record
        .considered_options
        .iter()
        .position(|option| matches_exact(&option.title, &title))
        .or_else(|| {
            record
                .considered_options
                .iter()
                .position(|option| matches_relaxed(&option.title, &title))
        });

    match index {
        Some(index) => {
            let option = &mut record.considered_options[index];
            option.description = section.description;
            option.pros = pros;
            option.cons = cons;
        }
        None => {
            record.add_option(title, section.description, pros, cons);
        }
    }
}

/// Filter one raw list item: strip a leading list marker and a leading
/// `Good, because`/`Bad, because` prefix, then discard blanks.
fn clean_item(raw: &str) -> Option<String> {
    let mut item = raw.trim();
    for marker in ["*", "-", "+"] {
        if let Some(rest) = item.strip_prefix(marker) {
            if rest.is_empty() || rest.starts_with(' ') {
                item = rest.trim_start();
                break;
            }
        }
    }
    for prefix in [grammar::PRO_PREFIX, grammar::CON_PREFIX] {
        if let Some(rest) = item.strip_prefix(prefix) {
            item = rest.strip_prefix(' ').unwrap_or(rest);
            break;
        }
    }
    let item = item.trim();
    if item.is_empty() {
        None
    } else {
        Some(item.to_string())
    }
}

fn clean_items(items: Vec<String>) -> Vec<String> {
    items.iter().filter_map(|item| clean_item(item)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_fields() {
        let doc = "\
# use markdown for decision records

* Status: accepted
* Deciders: core team
* Date: 2024-05-01

Technical Story: tracking issue #42

## Context and Problem Statement

Which format should decision records use?
";
        let record = parse_document(doc);
        assert!(record.conforming);
        // The title is title-cased on ingestion.
        assert_eq!(record.title, "Use Markdown for Decision Records");
        assert_eq!(record.status, "accepted");
        assert_eq!(record.deciders, "core team");
        assert_eq!(record.date, "2024-05-01");
        assert_eq!(record.technical_story, "tracking issue #42");
        assert_eq!(
            record.context_and_problem_statement,
            "Which format should decision records use?"
        );
    }

    #[test]
    fn test_chosen_option_and_inline_explanation() {
        let doc = "# T\n\n## Decision Outcome\n\nChosen option: \"MADR\", because it is lightweight.\n";
        let record = parse_document(doc);
        assert_eq!(record.decision_outcome.chosen_option, "MADR");
        assert_eq!(record.decision_outcome.explanation, "it is lightweight.");
    }

    #[test]
    fn test_chosen_option_any_delimiter() {
        let doc = "# T\n\n## Decision Outcome\n\nChosen option: 'MADR', because reasons\n";
        let record = parse_document(doc);
        assert_eq!(record.decision_outcome.chosen_option, "MADR");

        // Mismatched ends leave the segment untouched.
        let doc = "# T\n\n## Decision Outcome\n\nChosen option: \"MADR, because reasons\n";
        let record = parse_document(doc);
        assert_eq!(record.decision_outcome.chosen_option, "\"MADR");
    }

    #[test]
    fn test_outcome_without_prefix_is_explanation() {
        let doc = "# T\n\n## Decision Outcome\n\nWe will revisit this next quarter.\n";
        let record = parse_document(doc);
        assert_eq!(record.decision_outcome.chosen_option, "");
        assert_eq!(
            record.decision_outcome.explanation,
            "We will revisit this next quarter."
        );
    }

    #[test]
    fn test_outcome_block_explanation() {
        let doc =
            "# T\n\n## Decision Outcome\n\nChosen option: \"A\"\n\n* it scales\n* it is simple\n";
        let record = parse_document(doc);
        assert_eq!(record.decision_outcome.chosen_option, "A");
        assert_eq!(
            record.decision_outcome.explanation,
            "* it scales\n* it is simple"
        );
    }

    #[test]
    fn test_explanation_rejoins_comma_delimited() {
        let doc = "# T\n\n## Decision Outcome\n\nChosen option: \"A\", because x, because y\n";
        let record = parse_document(doc);
        assert_eq!(record.decision_outcome.chosen_option, "A");
        assert_eq!(record.decision_outcome.explanation, "x, y");
    }

    #[test]
    fn test_option_section_matches_considered_option() {
        let doc = "\
# T

## Considered Options

* [MADR](https://adr.github.io/madr/) 2.1.2 \u{2013} The Markdown Architectural Decision Records
* Plain prose

## Pros and Cons of the Options

### MADR 2.1.2

Structured Markdown records.

* Good, because it is machine checkable
* Bad, because it needs a template
";
        let record = parse_document(doc);
        assert_eq!(record.considered_options.len(), 2);
        let option = &record.considered_options[0];
        assert_eq!(option.description, "Structured Markdown records.");
        assert_eq!(option.pros, vec!["it is machine checkable".to_string()]);
        assert_eq!(option.cons, vec!["it needs a template".to_string()]);
        // The second option picked up nothing.
        assert!(record.considered_options[1].pros.is_empty());
    }

    #[test]
    fn test_unmatched_option_section_is_synthesized() {
        let doc = "\
# T

## Considered Options

* Alpha

## Pros and Cons of the Options

### Omega

* Good, because why not
";
        let record = parse_document(doc);
        assert_eq!(record.considered_options.len(), 2);
        assert_eq!(record.considered_options[0].title, "Alpha");
        assert_eq!(record.considered_options[0].id, 0);
        assert_eq!(record.considered_options[1].title, "Omega");
        assert_eq!(record.considered_options[1].id, 1);
        assert_eq!(record.considered_options[1].pros, vec!["why not".to_string()]);
        assert_eq!(record.highest_option_id, 1);
    }

    #[test]
    fn test_blank_items_are_discarded() {
        let doc = "\
# T

## Decision Drivers

* keep this
*
*

## Pros and Cons of the Options

### Alpha

* Good, because
";
        let record = parse_document(doc);
        assert_eq!(record.decision_drivers, vec!["keep this".to_string()]);
        assert_eq!(record.considered_options.len(), 1);
        assert!(record.considered_options[0].pros.is_empty());
    }

    #[test]
    fn test_unparseable_input_yields_default_record() {
        let record = parse_document("completely unstructured\n\ntext here\n");
        assert!(!record.conforming);
        assert_eq!(record.title, "");
        assert!(record.considered_options.is_empty());
        assert_eq!(record.decision_outcome.chosen_option, "");
    }
}
