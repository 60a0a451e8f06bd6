//! Deterministic inverse transform: [`DecisionRecord`] to canonical
//! document text.
//!
//! Section order follows the grammar; a section is emitted only when its
//! fields carry content. Output normalizes whitespace, bullet markers and
//! the chosen-option quote character, so re-parsing yields a field-wise
//! equal record even when the bytes differ from the original source.

use crate::casing::short_title;
use crate::grammar::{
    CHOSEN_OPTION_PREFIX, CONTEXT_HEADING, CON_PREFIX, DRIVERS_HEADING, LINKS_HEADING,
    NEGATIVE_HEADING, OPTIONS_HEADING, OUTCOME_HEADING, POSITIVE_HEADING, PROS_AND_CONS_HEADING,
    PRO_PREFIX,
};
use crate::model::DecisionRecord;

pub fn serialize_record(record: &DecisionRecord) -> String {
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(format!("# {}", record.title).trim_end().to_string());

    let mut metadata = Vec::new();
    if !record.status.is_empty() {
        metadata.push(format!("* Status: {}", record.status));
    }
    if !record.deciders.is_empty() {
        metadata.push(format!("* Deciders: {}", record.deciders));
    }
    if !record.date.is_empty() {
        metadata.push(format!("* Date: {}", record.date));
    }
    if !metadata.is_empty() {
        blocks.push(metadata.join("\n"));
    }

    if !record.technical_story.is_empty() {
        blocks.push(format!("Technical Story: {}", record.technical_story));
    }

    if !record.context_and_problem_statement.is_empty() {
        blocks.push(format!(
            "## {}\n\n{}",
            CONTEXT_HEADING, record.context_and_problem_statement
        ));
    }

    if !record.decision_drivers.is_empty() {
        blocks.push(format!(
            "## {}\n\n{}",
            DRIVERS_HEADING,
            bullet_list(&record.decision_drivers)
        ));
    }

    if !record.considered_options.is_empty() {
        let titles: Vec<String> = record
            .considered_options
            .iter()
            .map(|option| option.title.clone())
            .collect();
        blocks.push(format!("## {}\n\n{}", OPTIONS_HEADING, bullet_list(&titles)));
    }

    if let Some(block) = outcome_block(record) {
        blocks.push(block);
    }

    if let Some(block) = pros_and_cons_block(record) {
        blocks.push(block);
    }

    if !record.links.is_empty() {
        blocks.push(format!("## {}\n\n{}", LINKS_HEADING, bullet_list(&record.links)));
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("* {}", item))
        .collect::<Vec<_>>()
        .join("\n")
}

fn outcome_block(record: &DecisionRecord) -> Option<String> {
    let outcome = &record.decision_outcome;
    if outcome.chosen_option.is_empty()
        && outcome.explanation.is_empty()
        && outcome.positive_consequences.is_empty()
        && outcome.negative_consequences.is_empty()
    {
        return None;
    }

    let mut block = format!("## {}", OUTCOME_HEADING);

    if !outcome.chosen_option.is_empty() || !outcome.explanation.is_empty() {
        // The chosen option is always re-quoted with double quotes.
        block.push_str(&format!("\n\n{}\"{}\"", CHOSEN_OPTION_PREFIX, outcome.chosen_option));
        if !outcome.explanation.is_empty() {
            if starts_with_list_marker(&outcome.explanation) {
                block.push_str(&format!("\n\n{}", outcome.explanation));
            } else {
                block.push_str(&format!(", because {}", outcome.explanation));
            }
        }
    }

    if !outcome.positive_consequences.is_empty() {
        block.push_str(&format!(
            "\n\n### {}\n\n{}",
            POSITIVE_HEADING,
            bullet_list(&outcome.positive_consequences)
        ));
    }
    if !outcome.negative_consequences.is_empty() {
        block.push_str(&format!(
            "\n\n### {}\n\n{}",
            NEGATIVE_HEADING,
            bullet_list(&outcome.negative_consequences)
        ));
    }

    Some(block)
}

fn starts_with_list_marker(text: &str) -> bool {
    text.starts_with('*') || text.starts_with('-') || text.starts_with('+')
}

fn pros_and_cons_block(record: &DecisionRecord) -> Option<String> {
    let documented: Vec<_> = record
        .considered_options
        .iter()
        .filter(|option| {
            !option.description.is_empty() || !option.pros.is_empty() || !option.cons.is_empty()
        })
        .collect();
    if documented.is_empty() {
        return None;
    }

    let mut block = format!("## {}", PROS_AND_CONS_HEADING);
    for option in documented {
        block.push_str(&format!("\n\n### {}", short_title(&option.title)));
        if !option.description.is_empty() {
            block.push_str(&format!("\n\n{}", option.description));
        }
        let mut items: Vec<String> = Vec::new();
        for pro in &option.pros {
            items.push(format!("{} {}", PRO_PREFIX, pro));
        }
        for con in &option.cons {
            items.push(format!("{} {}", CON_PREFIX, con));
        }
        if !items.is_empty() {
            block.push_str(&format!("\n\n{}", bullet_list(&items)));
        }
    }

    Some(block)
}
