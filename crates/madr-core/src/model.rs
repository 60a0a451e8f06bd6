use serde::{Deserialize, Serialize};

/// Core internal coordinate system (0-based; columns count UTF-16 code
/// units). Does not directly use LSP Position to avoid coupling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub line: u32,
    pub col: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: Point,
    pub end: Point,
}

/// Structured model of one decision-record document.
///
/// Empty strings mean "absent"; no field is optional at the type level.
/// `conforming` is false when the source text failed to match the document
/// grammar, marking the record as a best-effort partial reconstruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionRecord {
    pub title: String,
    pub status: String,
    pub deciders: String,
    pub date: String,
    pub technical_story: String,
    pub context_and_problem_statement: String,
    pub decision_drivers: Vec<String>,
    pub considered_options: Vec<ConsideredOption>,
    pub decision_outcome: DecisionOutcome,
    pub links: Vec<String>,
    pub conforming: bool,
    /// High-water mark for option ids; ids are never reused within one
    /// record's lifetime, even after an option is deleted.
    pub highest_option_id: i32,
}

/// One alternative evaluated in a decision record. The id is assigned at
/// creation time and is the option's stable identity for UI binding and
/// reordering; it is not derived from list position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsideredOption {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionOutcome {
    pub chosen_option: String,
    pub explanation: String,
    pub positive_consequences: Vec<String>,
    pub negative_consequences: Vec<String>,
}

/// Patch applied by [`DecisionRecord::update`]. Absent fields leave the
/// record untouched; supplied empty strings are also ignored so a partial
/// patch can never blank out a field by accident.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    pub title: Option<String>,
    pub status: Option<String>,
    pub deciders: Option<String>,
    pub date: Option<String>,
    pub technical_story: Option<String>,
    pub context_and_problem_statement: Option<String>,
    pub decision_drivers: Option<Vec<String>>,
    pub considered_options: Option<Vec<ConsideredOption>>,
    pub decision_outcome: Option<DecisionOutcome>,
    pub links: Option<Vec<String>>,
}

impl Default for DecisionRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl DecisionRecord {
    /// Empty record. Fresh records are conforming until a parse says
    /// otherwise.
    pub fn new() -> Self {
        DecisionRecord {
            title: String::new(),
            status: String::new(),
            deciders: String::new(),
            date: String::new(),
            technical_story: String::new(),
            context_and_problem_statement: String::new(),
            decision_drivers: Vec::new(),
            considered_options: Vec::new(),
            decision_outcome: DecisionOutcome::default(),
            links: Vec::new(),
            conforming: true,
            highest_option_id: -1,
        }
    }

    /// Append a considered option with a freshly assigned id and return the
    /// id.
    pub fn add_option(
        &mut self,
        title: String,
        description: String,
        pros: Vec<String>,
        cons: Vec<String>,
    ) -> i32 {
        self.highest_option_id += 1;
        let id = self.highest_option_id;
        self.considered_options.push(ConsideredOption {
            id,
            title,
            description,
            pros,
            cons,
        });
        id
    }

    /// Replace every field whose new value is supplied and non-empty.
    ///
    /// A supplied considered-options list always triggers full id
    /// reassignment from 0; the supplied ids are discarded.
    pub fn update(&mut self, patch: RecordUpdate) {
        replace_if_present(&mut self.title, patch.title);
        replace_if_present(&mut self.status, patch.status);
        replace_if_present(&mut self.deciders, patch.deciders);
        replace_if_present(&mut self.date, patch.date);
        replace_if_present(&mut self.technical_story, patch.technical_story);
        replace_if_present(
            &mut self.context_and_problem_statement,
            patch.context_and_problem_statement,
        );
        if let Some(drivers) = patch.decision_drivers {
            self.decision_drivers = drivers;
        }
        if let Some(mut options) = patch.considered_options {
            for (i, option) in options.iter_mut().enumerate() {
                option.id = i as i32;
            }
            self.highest_option_id = options.len() as i32 - 1;
            self.considered_options = options;
        }
        if let Some(outcome) = patch.decision_outcome {
            self.decision_outcome = outcome;
        }
        if let Some(links) = patch.links {
            self.links = links;
        }
        self.normalize();
    }

    /// Record-wide cleanup pass: trim every string field, drop blank list
    /// entries and lift the id high-water mark above every present id.
    pub fn normalize(&mut self) {
        trim_in_place(&mut self.title);
        trim_in_place(&mut self.status);
        trim_in_place(&mut self.deciders);
        trim_in_place(&mut self.date);
        trim_in_place(&mut self.technical_story);
        trim_in_place(&mut self.context_and_problem_statement);
        clean_list(&mut self.decision_drivers);
        clean_list(&mut self.links);

        for option in &mut self.considered_options {
            trim_in_place(&mut option.title);
            trim_in_place(&mut option.description);
            clean_list(&mut option.pros);
            clean_list(&mut option.cons);
        }

        trim_in_place(&mut self.decision_outcome.chosen_option);
        trim_in_place(&mut self.decision_outcome.explanation);
        clean_list(&mut self.decision_outcome.positive_consequences);
        clean_list(&mut self.decision_outcome.negative_consequences);

        let max_id = self
            .considered_options
            .iter()
            .map(|o| o.id)
            .max()
            .unwrap_or(-1);
        if self.highest_option_id < max_id {
            self.highest_option_id = max_id;
        }
    }
}

fn replace_if_present(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.is_empty() {
            *field = value;
        }
    }
}

fn trim_in_place(field: &mut String) {
    if field.trim().len() != field.len() {
        *field = field.trim().to_string();
    }
}

fn clean_list(list: &mut Vec<String>) {
    for entry in list.iter_mut() {
        trim_in_place(entry);
    }
    list.retain(|entry| !entry.is_empty());
}
