//! Line tokenizer and recursive-descent parser for the decision-record
//! document grammar.
//!
//! The parser is total: it never fails on malformed input. Constructs that
//! do not fit the grammar are skipped and recorded by clearing the
//! `conforming` flag, so downstream consumers still receive every section
//! that did parse. A section header followed by no parsable body is treated
//! as absent in the tree.

pub const CONTEXT_HEADING: &str = "Context and Problem Statement";
pub const DRIVERS_HEADING: &str = "Decision Drivers";
pub const OPTIONS_HEADING: &str = "Considered Options";
pub const OUTCOME_HEADING: &str = "Decision Outcome";
pub const PROS_AND_CONS_HEADING: &str = "Pros and Cons of the Options";
pub const LINKS_HEADING: &str = "Links";
pub const POSITIVE_HEADING: &str = "Positive Consequences";
pub const NEGATIVE_HEADING: &str = "Negative Consequences";
pub const CHOSEN_OPTION_PREFIX: &str = "Chosen option: ";
pub const PRO_PREFIX: &str = "Good, because";
pub const CON_PREFIX: &str = "Bad, because";

/// Tagged parse tree, one node per matched grammar rule, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTree {
    pub sections: Vec<SectionNode>,
    pub conforming: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionNode {
    Title(String),
    Status(String),
    Deciders(String),
    Date(String),
    TechnicalStory(String),
    Context(String),
    DecisionDrivers(Vec<String>),
    ConsideredOptions(Vec<String>),
    DecisionOutcome(OutcomeNode),
    OptionSections(Vec<OptionSectionNode>),
    Links(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutcomeNode {
    pub text: String,
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptionSectionNode {
    pub title: String,
    pub description: String,
    /// Raw list items, marker stripped but `Good, because` prefix kept.
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Line<'a> {
    Heading { level: u8, text: &'a str },
    Bullet(&'a str),
    Blank,
    Text(&'a str),
}

/// Classify one raw line. Headings and bullets must start at column 0; the
/// builder tolerates `-`/`+` wherever the grammar writes `*`.
fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim_end();
    if line.trim().is_empty() {
        return Line::Blank;
    }
    let hashes = line.chars().take_while(|&c| c == '#').count();
    if (1..=6).contains(&hashes) {
        if let Some(rest) = line[hashes..].strip_prefix(' ') {
            return Line::Heading {
                level: hashes as u8,
                text: rest.trim(),
            };
        }
    }
    for marker in ['*', '-', '+'] {
        if let Some(rest) = line.strip_prefix(marker) {
            if rest.is_empty() {
                return Line::Bullet("");
            }
            if let Some(item) = rest.strip_prefix(' ') {
                return Line::Bullet(item.trim());
            }
        }
    }
    Line::Text(line)
}

struct Parser<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
    conforming: bool,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Line<'a>> {
        self.lines.get(self.pos).copied()
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn skip_blanks(&mut self) {
        while matches!(self.peek(), Some(Line::Blank)) {
            self.advance();
        }
    }
}

pub fn parse(text: &str) -> ParseTree {
    let mut parser = Parser {
        lines: text.lines().map(classify).collect(),
        pos: 0,
        conforming: true,
    };
    let mut sections = Vec::new();

    parser.skip_blanks();
    match parser.peek() {
        Some(Line::Heading { level: 1, text }) => {
            sections.push(SectionNode::Title(text.to_string()));
            parser.advance();
        }
        // The title line is the one mandatory part of the document rule.
        _ => parser.conforming = false,
    }

    parse_metadata(&mut parser, &mut sections);

    let checkpoint = parser.pos;
    parser.skip_blanks();
    match parser.peek() {
        Some(Line::Text(t)) if t.starts_with("Technical Story:") => {
            let value = t["Technical Story:".len()..].trim().to_string();
            sections.push(SectionNode::TechnicalStory(value));
            parser.advance();
        }
        _ => parser.pos = checkpoint,
    }

    parse_sections(&mut parser, &mut sections);

    ParseTree {
        sections,
        conforming: parser.conforming,
    }
}

fn match_metadata(item: &str) -> Option<(usize, String)> {
    for (rank, prefix) in [(1, "Status:"), (2, "Deciders:"), (3, "Date:")] {
        if let Some(rest) = item.strip_prefix(prefix) {
            return Some((rank, rest.trim().to_string()));
        }
    }
    None
}

/// Metadata bullets are accepted in any relative order, but anything out of
/// grammar order (or repeated) clears `conforming`. First occurrence wins.
fn parse_metadata(parser: &mut Parser, sections: &mut Vec<SectionNode>) {
    let mut last_rank = 0;
    let mut seen = [false; 4];
    loop {
        let checkpoint = parser.pos;
        parser.skip_blanks();
        let item = match parser.peek() {
            Some(Line::Bullet(item)) => item,
            _ => {
                parser.pos = checkpoint;
                return;
            }
        };
        let Some((rank, value)) = match_metadata(item) else {
            parser.pos = checkpoint;
            return;
        };
        parser.advance();
        if rank <= last_rank {
            parser.conforming = false;
        } else {
            last_rank = rank;
        }
        if seen[rank] {
            continue;
        }
        seen[rank] = true;
        sections.push(match rank {
            1 => SectionNode::Status(value),
            2 => SectionNode::Deciders(value),
            _ => SectionNode::Date(value),
        });
    }
}

fn section_rank(heading: &str) -> Option<usize> {
    match heading {
        CONTEXT_HEADING => Some(1),
        DRIVERS_HEADING => Some(2),
        OPTIONS_HEADING => Some(3),
        OUTCOME_HEADING => Some(4),
        PROS_AND_CONS_HEADING => Some(5),
        LINKS_HEADING => Some(6),
        _ => None,
    }
}

fn parse_sections(parser: &mut Parser, sections: &mut Vec<SectionNode>) {
    let mut last_rank = 0;
    let mut seen = [false; 7];
    loop {
        parser.skip_blanks();
        let Some(line) = parser.peek() else { break };
        let Line::Heading { level: 2, text } = line else {
            parser.conforming = false;
            parser.advance();
            continue;
        };
        let Some(rank) = section_rank(text) else {
            parser.conforming = false;
            parser.advance();
            continue;
        };
        parser.advance();
        if rank <= last_rank {
            parser.conforming = false;
        } else {
            last_rank = rank;
        }
        let duplicate = seen[rank];
        if duplicate {
            parser.conforming = false;
        }
        seen[rank] = true;

        let node = match rank {
            1 => {
                let text = parse_text_block(parser);
                if text.is_empty() {
                    parser.conforming = false;
                    None
                } else {
                    Some(SectionNode::Context(text))
                }
            }
            2 | 3 | 6 => {
                let items = parse_list(parser);
                if items.is_empty() {
                    parser.conforming = false;
                    None
                } else {
                    Some(match rank {
                        2 => SectionNode::DecisionDrivers(items),
                        3 => SectionNode::ConsideredOptions(items),
                        _ => SectionNode::Links(items),
                    })
                }
            }
            4 => {
                let outcome = parse_outcome(parser);
                if outcome.text.is_empty() {
                    parser.conforming = false;
                }
                if outcome.text.is_empty()
                    && outcome.positive.is_empty()
                    && outcome.negative.is_empty()
                {
                    None
                } else {
                    Some(SectionNode::DecisionOutcome(outcome))
                }
            }
            _ => {
                let options = parse_option_sections(parser);
                if options.is_empty() {
                    parser.conforming = false;
                    None
                } else {
                    Some(SectionNode::OptionSections(options))
                }
            }
        };
        if let Some(node) = node {
            if !duplicate {
                sections.push(node);
            }
        }
    }
}

fn parse_list(parser: &mut Parser) -> Vec<String> {
    let mut items = Vec::new();
    loop {
        let checkpoint = parser.pos;
        parser.skip_blanks();
        match parser.peek() {
            Some(Line::Bullet(item)) => {
                items.push(item.to_string());
                parser.advance();
            }
            _ => {
                parser.pos = checkpoint;
                return items;
            }
        }
    }
}

/// Free text running to the next heading line, outer whitespace trimmed,
/// interior blank lines preserved. Bullets are folded back into the text
/// with the canonical `*` marker.
fn parse_text_block(parser: &mut Parser) -> String {
    let mut lines: Vec<String> = Vec::new();
    loop {
        match parser.peek() {
            None | Some(Line::Heading { .. }) => break,
            Some(Line::Blank) => lines.push(String::new()),
            Some(Line::Text(t)) => lines.push(t.to_string()),
            Some(Line::Bullet(item)) => lines.push(reconstruct_bullet(item)),
        }
        parser.advance();
    }
    lines.join("\n").trim().to_string()
}

fn reconstruct_bullet(item: &str) -> String {
    if item.is_empty() {
        "*".to_string()
    } else {
        format!("* {}", item)
    }
}

fn parse_outcome(parser: &mut Parser) -> OutcomeNode {
    let mut node = OutcomeNode {
        text: parse_text_block(parser),
        ..OutcomeNode::default()
    };
    if let Some(Line::Heading { level: 3, text }) = parser.peek() {
        if text == POSITIVE_HEADING {
            parser.advance();
            node.positive = parse_list(parser);
            if node.positive.is_empty() {
                parser.conforming = false;
            }
        }
    }
    parser.skip_blanks();
    if let Some(Line::Heading { level: 3, text }) = parser.peek() {
        if text == NEGATIVE_HEADING {
            parser.advance();
            node.negative = parse_list(parser);
            if node.negative.is_empty() {
                parser.conforming = false;
            }
        }
    }
    node
}

fn parse_option_sections(parser: &mut Parser) -> Vec<OptionSectionNode> {
    let mut nodes = Vec::new();
    loop {
        let checkpoint = parser.pos;
        parser.skip_blanks();
        let Some(Line::Heading { level: 3, text }) = parser.peek() else {
            parser.pos = checkpoint;
            return nodes;
        };
        let title = text.to_string();
        parser.advance();
        nodes.push(parse_option_section(parser, title));
    }
}

fn parse_option_section(parser: &mut Parser, title: String) -> OptionSectionNode {
    let mut description_lines: Vec<String> = Vec::new();
    let mut pros = Vec::new();
    let mut cons = Vec::new();
    let mut seen_bullet = false;
    loop {
        match parser.peek() {
            None | Some(Line::Heading { .. }) => break,
            Some(Line::Blank) => {
                if !seen_bullet {
                    description_lines.push(String::new());
                }
            }
            Some(Line::Text(t)) => {
                if seen_bullet {
                    // Grammar puts the description before the pro/con lists.
                    parser.conforming = false;
                } else {
                    description_lines.push(t.to_string());
                }
            }
            Some(Line::Bullet(item)) => {
                seen_bullet = true;
                if item.starts_with(PRO_PREFIX) {
                    if !cons.is_empty() {
                        parser.conforming = false;
                    }
                    pros.push(item.to_string());
                } else if item.starts_with(CON_PREFIX) {
                    cons.push(item.to_string());
                } else {
                    parser.conforming = false;
                }
            }
        }
        parser.advance();
    }
    OptionSectionNode {
        title,
        description: description_lines.join("\n").trim().to_string(),
        pros,
        cons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DOC: &str = "\
# Use Markdown for Decision Records

* Status: accepted
* Deciders: core team
* Date: 2024-05-01

Technical Story: tracking issue #42

## Context and Problem Statement

We need to record architectural decisions.
Which format should the records use?

## Decision Drivers

* Easy to read
* Easy to diff

## Considered Options

* MADR
* Plain prose

## Decision Outcome

Chosen option: \"MADR\", because it is structured and lightweight.

### Positive Consequences

* Uniform documents

### Negative Consequences

* Some authoring overhead

## Pros and Cons of the Options

### MADR

Markdown with a fixed section grammar.

* Good, because the structure is machine checkable
* Bad, because authors must learn the template

### Plain Prose

* Good, because there is nothing to learn

## Links

* Refines the documentation guideline
";

    #[test]
    fn test_parse_full_document() {
        let tree = parse(FULL_DOC);
        assert!(tree.conforming, "full document should conform: {:#?}", tree);
        assert_eq!(tree.sections.len(), 11);
        assert_eq!(
            tree.sections[0],
            SectionNode::Title("Use Markdown for Decision Records".into())
        );
        assert_eq!(tree.sections[1], SectionNode::Status("accepted".into()));
        assert_eq!(
            tree.sections[5],
            SectionNode::Context(
                "We need to record architectural decisions.\nWhich format should the records use?"
                    .into()
            )
        );
        assert_eq!(
            tree.sections[7],
            SectionNode::ConsideredOptions(vec!["MADR".into(), "Plain prose".into()])
        );
        match &tree.sections[8] {
            SectionNode::DecisionOutcome(outcome) => {
                assert_eq!(
                    outcome.text,
                    "Chosen option: \"MADR\", because it is structured and lightweight."
                );
                assert_eq!(outcome.positive, vec!["Uniform documents".to_string()]);
                assert_eq!(outcome.negative, vec!["Some authoring overhead".to_string()]);
            }
            other => panic!("expected decision outcome, got {:?}", other),
        }
        match &tree.sections[9] {
            SectionNode::OptionSections(options) => {
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].title, "MADR");
                assert_eq!(
                    options[0].description,
                    "Markdown with a fixed section grammar."
                );
                assert_eq!(
                    options[0].pros,
                    vec!["Good, because the structure is machine checkable".to_string()]
                );
                assert_eq!(
                    options[0].cons,
                    vec!["Bad, because authors must learn the template".to_string()]
                );
                assert_eq!(options[1].description, "");
            }
            other => panic!("expected option sections, got {:?}", other),
        }
    }

    #[test]
    fn test_title_only_document_conforms() {
        let tree = parse("# Only a Title\n");
        assert!(tree.conforming);
        assert_eq!(tree.sections, vec![SectionNode::Title("Only a Title".into())]);
    }

    #[test]
    fn test_missing_title_is_nonconforming() {
        let tree = parse("## Context and Problem Statement\n\nSome context.\n");
        assert!(!tree.conforming);
        assert_eq!(
            tree.sections,
            vec![SectionNode::Context("Some context.".into())]
        );
    }

    #[test]
    fn test_empty_document_is_nonconforming() {
        let tree = parse("");
        assert!(!tree.conforming);
        assert!(tree.sections.is_empty());

        let tree = parse("just some prose\nwithout structure\n");
        assert!(!tree.conforming);
        assert!(tree.sections.is_empty());
    }

    #[test]
    fn test_list_header_without_items_is_absent() {
        let tree = parse("# T\n\n## Decision Drivers\n\n## Links\n\n* somewhere\n");
        assert!(!tree.conforming);
        assert_eq!(
            tree.sections,
            vec![
                SectionNode::Title("T".into()),
                SectionNode::Links(vec!["somewhere".into()])
            ]
        );
    }

    #[test]
    fn test_unknown_heading_is_skipped() {
        let tree = parse("# T\n\n## Unrelated Section\n\n## Links\n\n* somewhere\n");
        assert!(!tree.conforming);
        assert!(tree
            .sections
            .iter()
            .any(|s| matches!(s, SectionNode::Links(_))));
    }

    #[test]
    fn test_sections_out_of_order_still_parse() {
        let tree = parse("# T\n\n## Links\n\n* somewhere\n\n## Decision Drivers\n\n* speed\n");
        assert!(!tree.conforming);
        assert!(tree
            .sections
            .iter()
            .any(|s| matches!(s, SectionNode::DecisionDrivers(_))));
        assert!(tree
            .sections
            .iter()
            .any(|s| matches!(s, SectionNode::Links(_))));
    }

    #[test]
    fn test_alternative_bullet_markers() {
        let tree = parse("# T\n\n## Decision Drivers\n\n- speed\n+ cost\n* clarity\n");
        assert!(tree.conforming);
        assert_eq!(
            tree.sections[1],
            SectionNode::DecisionDrivers(vec!["speed".into(), "cost".into(), "clarity".into()])
        );
    }

    #[test]
    fn test_bare_marker_is_an_empty_item() {
        let tree = parse("# T\n\n## Decision Drivers\n\n*\n");
        assert!(tree.conforming);
        assert_eq!(tree.sections[1], SectionNode::DecisionDrivers(vec!["".into()]));
    }

    #[test]
    fn test_outcome_block_explanation() {
        let doc = "# T\n\n## Decision Outcome\n\nChosen option: \"A\"\n\n* because of this\n* and this\n";
        let tree = parse(doc);
        assert!(tree.conforming);
        match &tree.sections[1] {
            SectionNode::DecisionOutcome(outcome) => {
                assert_eq!(
                    outcome.text,
                    "Chosen option: \"A\"\n\n* because of this\n* and this"
                );
            }
            other => panic!("expected outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_out_of_order_is_flagged() {
        let tree = parse("# T\n\n* Date: 2024-05-01\n* Status: accepted\n");
        assert!(!tree.conforming);
        assert!(tree.sections.contains(&SectionNode::Status("accepted".into())));
        assert!(tree.sections.contains(&SectionNode::Date("2024-05-01".into())));
    }

    #[test]
    fn test_duplicate_section_keeps_first() {
        let doc = "# T\n\n## Decision Drivers\n\n* first\n\n## Decision Drivers\n\n* second\n";
        let tree = parse(doc);
        assert!(!tree.conforming);
        let drivers: Vec<_> = tree
            .sections
            .iter()
            .filter(|s| matches!(s, SectionNode::DecisionDrivers(_)))
            .collect();
        assert_eq!(drivers.len(), 1);
        assert_eq!(
            drivers[0],
            &SectionNode::DecisionDrivers(vec!["first".into()])
        );
    }
}
