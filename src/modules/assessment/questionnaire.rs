use std::collections::{BTreeMap, HashMap};
use std::str::FromStr;

use crate::quiz::{Catalog, Category, QuizItem, QuizResponse};

/// Form field prefix carrying one answer, e.g. `answer.cca1=yes`
pub const ANSWER_PREFIX: &str = "answer.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepAction {
    Next,
    Previous,
    Goto(usize),
    Submit,
}

impl FromStr for StepAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(StepAction::Next),
            "previous" => Ok(StepAction::Previous),
            "submit" => Ok(StepAction::Submit),
            other => other
                .strip_prefix("goto:")
                .and_then(|index| index.parse().ok())
                .map(StepAction::Goto)
                .ok_or_else(|| format!("Unknown questionnaire action: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Blocked(String),
    ReadyToSubmit,
}

/// In-progress answers and the category currently on screen.
///
/// Holds UI state only; scoring happens after submission.
#[derive(Debug, Clone)]
pub struct Questionnaire<'a> {
    catalog: &'a Catalog,
    categories: Vec<Category>,
    current: usize,
    answers: BTreeMap<String, bool>,
}

impl<'a> Questionnaire<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            categories: catalog.categories(),
            current: 0,
            answers: BTreeMap::new(),
        }
    }

    /// Restores state from submitted form fields, dropping anything that
    /// does not name a catalog item or is not a yes/no value.
    pub fn from_form(catalog: &'a Catalog, form: &HashMap<String, String>) -> Self {
        let mut questionnaire = Self::new(catalog);

        for (key, value) in form {
            let Some(item_id) = key.strip_prefix(ANSWER_PREFIX) else {
                continue;
            };
            if !catalog.contains(item_id) {
                continue;
            }
            match value.as_str() {
                "yes" => questionnaire.set_answer(item_id, true),
                "no" => questionnaire.set_answer(item_id, false),
                _ => {}
            }
        }

        let step = form
            .get("step")
            .and_then(|step| step.parse::<usize>().ok())
            .unwrap_or(0);
        questionnaire.current = step.min(questionnaire.last_index());

        questionnaire
    }

    pub fn set_answer(&mut self, item_id: &str, deployed: bool) {
        self.answers.insert(item_id.to_string(), deployed);
    }

    pub fn answer(&self, item_id: &str) -> Option<bool> {
        self.answers.get(item_id).copied()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_category(&self) -> Category {
        self.categories
            .get(self.current)
            .copied()
            .unwrap_or(Category::CustomerCentricApproach)
    }

    pub fn current_items(&self) -> impl Iterator<Item = &'a QuizItem> + 'a {
        self.catalog.items_in(self.current_category())
    }

    pub fn is_first(&self) -> bool {
        self.current == 0
    }

    pub fn is_last(&self) -> bool {
        self.current == self.last_index()
    }

    fn last_index(&self) -> usize {
        self.categories.len().saturating_sub(1)
    }

    pub fn is_category_complete(&self, category: Category) -> bool {
        self.catalog
            .items_in(category)
            .all(|item| self.answers.contains_key(&item.id))
    }

    /// Every item of the current category has an answer
    pub fn can_advance(&self) -> bool {
        self.is_category_complete(self.current_category())
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.total_count()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn total_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn progress_percentage(&self) -> u32 {
        if self.total_count() == 0 {
            return 0;
        }
        ((self.answered_count() as f64 / self.total_count() as f64) * 100.0).round() as u32
    }

    pub fn apply(&mut self, action: StepAction) -> StepOutcome {
        match action {
            StepAction::Next => {
                if !self.can_advance() {
                    return StepOutcome::Blocked(format!(
                        "Answer every question in {} before moving on.",
                        self.current_category()
                    ));
                }
                if !self.is_last() {
                    self.current += 1;
                }
                StepOutcome::Moved
            }
            StepAction::Previous => {
                self.current = self.current.saturating_sub(1);
                StepOutcome::Moved
            }
            StepAction::Goto(index) => {
                self.current = index.min(self.last_index());
                StepOutcome::Moved
            }
            StepAction::Submit => {
                if self.is_complete() {
                    StepOutcome::ReadyToSubmit
                } else {
                    StepOutcome::Blocked(format!(
                        "{} questions still need an answer before you can see your results.",
                        self.total_count() - self.answered_count()
                    ))
                }
            }
        }
    }

    /// Answers in catalog order, ready for submission
    pub fn responses(&self) -> Vec<QuizResponse> {
        self.catalog
            .items()
            .iter()
            .filter_map(|item| {
                self.answer(&item.id)
                    .map(|deployed| QuizResponse::new(item.id.clone(), deployed))
            })
            .collect()
    }

    /// Answers outside the current category, carried as hidden fields
    pub fn carried_answers(&self) -> Vec<(String, &'static str)> {
        let current = self.current_category();
        self.catalog
            .items()
            .iter()
            .filter(|item| item.category != current)
            .filter_map(|item| {
                self.answer(&item.id).map(|deployed| {
                    (
                        format!("{}{}", ANSWER_PREFIX, item.id),
                        if deployed { "yes" } else { "no" },
                    )
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_category(q: &mut Questionnaire, category: Category, deployed: bool) {
        let ids: Vec<String> = q
            .catalog
            .items_in(category)
            .map(|item| item.id.clone())
            .collect();
        for id in ids {
            q.set_answer(&id, deployed);
        }
    }

    #[test]
    fn parses_actions() {
        assert_eq!("next".parse::<StepAction>().unwrap(), StepAction::Next);
        assert_eq!("goto:3".parse::<StepAction>().unwrap(), StepAction::Goto(3));
        assert!("goto:x".parse::<StepAction>().is_err());
        assert!("jump".parse::<StepAction>().is_err());
    }

    #[test]
    fn cannot_advance_until_category_is_answered() {
        let catalog = Catalog::builtin();
        let mut q = Questionnaire::new(&catalog);

        assert!(matches!(q.apply(StepAction::Next), StepOutcome::Blocked(_)));
        assert_eq!(q.current_index(), 0);

        answer_category(&mut q, Category::CustomerCentricApproach, true);
        assert_eq!(q.apply(StepAction::Next), StepOutcome::Moved);
        assert_eq!(q.current_category(), Category::EngagementAndCommunication);

        assert_eq!(q.apply(StepAction::Previous), StepOutcome::Moved);
        assert!(q.is_first());
    }

    #[test]
    fn submit_requires_every_answer() {
        let catalog = Catalog::builtin();
        let mut q = Questionnaire::new(&catalog);
        for category in Category::ALL {
            answer_category(&mut q, category, false);
        }
        q.answers.remove("mca2");

        assert!(matches!(q.apply(StepAction::Submit), StepOutcome::Blocked(msg) if msg.starts_with("1 ")));

        q.set_answer("mca2", true);
        assert_eq!(q.apply(StepAction::Submit), StepOutcome::ReadyToSubmit);
        assert_eq!(q.progress_percentage(), 100);

        let responses = q.responses();
        assert_eq!(responses.len(), 29);
        assert_eq!(responses.first().unwrap().item_id, "cca1");
        assert_eq!(responses.last().unwrap(), &QuizResponse::new("mca2", true));
    }

    #[test]
    fn restores_state_from_form_fields() {
        let catalog = Catalog::builtin();
        let form: HashMap<String, String> = [
            ("step", "2"),
            ("answer.cca1", "yes"),
            ("answer.ec1", "no"),
            ("answer.bogus", "yes"),
            ("answer.dua1", "maybe"),
            ("action", "next"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let q = Questionnaire::from_form(&catalog, &form);
        assert_eq!(q.current_index(), 2);
        assert_eq!(q.answer("cca1"), Some(true));
        assert_eq!(q.answer("ec1"), Some(false));
        assert_eq!(q.answer("dua1"), None);
        assert_eq!(q.answered_count(), 2);

        let carried = q.carried_answers();
        assert!(carried.contains(&("answer.cca1".to_string(), "yes")));
        assert!(carried.contains(&("answer.ec1".to_string(), "no")));
    }

    #[test]
    fn step_is_clamped_to_last_category() {
        let catalog = Catalog::builtin();
        let form: HashMap<String, String> =
            [("step".to_string(), "99".to_string())].into_iter().collect();
        let mut q = Questionnaire::from_form(&catalog, &form);
        assert!(q.is_last());

        q.apply(StepAction::Goto(42));
        assert_eq!(q.current_category(), Category::MultiChannelAccessibility);

        answer_category(&mut q, Category::MultiChannelAccessibility, true);
        assert_eq!(q.apply(StepAction::Next), StepOutcome::Moved);
        assert!(q.is_last());
    }
}
