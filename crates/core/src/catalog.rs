//! The fixed 20-question check-in catalog.
//!
//! Prompt and option texts resolve through a [`TextLookup`] so the same catalog can be
//! rendered in any language; keys that the lookup does not know fall back to the
//! built-in English defaults below.

use crate::model::{OptionLetter, Question, QuestionId};

/// Number of questions in the catalog.
pub const CATALOG_SIZE: usize = 20;

/// Resolves translation keys to display text.
pub trait TextLookup {
    /// Returns the text for `key`, or `None` to use the caller's default.
    fn lookup(&self, key: &str) -> Option<String>;

    /// Returns the text for `key`, falling back to `default`.
    fn text_or(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }
}

/// Lookup that never overrides anything; every key resolves to its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultText;

impl TextLookup for DefaultText {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Translation key for a question prompt, e.g. `survey.q7.text`.
#[must_use]
pub fn prompt_key(id: QuestionId) -> String {
    format!("survey.q{id}.text")
}

/// Translation key for an option, e.g. `survey.q7.C`.
#[must_use]
pub fn option_key(id: QuestionId, letter: OptionLetter) -> String {
    format!("survey.q{id}.{letter}")
}

/// Ordered, immutable set of catalog questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: Vec<Question>,
}

impl Catalog {
    /// Catalog with the built-in English texts.
    #[must_use]
    pub fn standard() -> Self {
        Self::localized(&DefaultText)
    }

    /// Catalog with texts resolved through `text`.
    ///
    /// Always yields all [`CATALOG_SIZE`] questions: a missing or blank translated prompt
    /// is replaced by its non-blank default.
    #[must_use]
    pub fn localized(text: &dyn TextLookup) -> Self {
        let questions = DEFAULTS
            .iter()
            .map(|(id, prompt, options)| {
                let id = QuestionId::new(*id);
                let localized = text.text_or(&prompt_key(id), prompt);
                // A translation that blanks a prompt falls back to the default text.
                let prompt = if localized.trim().is_empty() {
                    (*prompt).to_string()
                } else {
                    localized
                };
                let options = OptionLetter::ALL
                    .map(|letter| text.text_or(&option_key(id, letter), options[letter.index()]));
                Question::from_parts(id, prompt, options)
            })
            .collect();
        Self { questions }
    }

    /// Build a catalog from arbitrary questions (used by tests and custom surveys).
    #[must_use]
    pub fn from_questions(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

type Entry = (u32, &'static str, [&'static str; 5]);

const DEFAULTS: [Entry; CATALOG_SIZE] = [
    (
        1,
        "How often do you feel mentally or physically exhausted at work?",
        [
            "Never feel that way",
            "Occasionally (once or twice a month)",
            "Sometimes (about once a week)",
            "Often (2–3 times a week)",
            "Always (almost daily)",
        ],
    ),
    (
        2,
        "What is the biggest factor that makes you feel the most anxious?",
        [
            "Excessive workload or tight deadlines",
            "Lack of support or autonomy",
            "Long hours or weekend/overtime work",
            "Goal achievement and performance pressure",
            "Other (workplace relationships)",
        ],
    ),
    (
        3,
        "How often do you feel anxious or uncomfortable about achieving goals and KPIs?",
        ["Never", "Almost never", "Sometimes", "Often", "Always"],
    ),
    (
        4,
        "What do you usually tell yourself when you’re struggling at work?",
        [
            "No real worry here",
            "There’s worry but I can handle it",
            "Push through a bit more, then focus",
            "Hard to focus; I’m slipping",
            "It’s unavoidable; I’m overwhelmed",
        ],
    ),
    (
        5,
        "In the past month, have you felt sad or depressed while working?",
        ["Never", "Almost never", "Sometimes", "Often", "Always"],
    ),
    (
        6,
        "Which best describes your current overall mood?",
        [
            "Fulfilled and satisfied",
            "Down at times but bounce back quickly",
            "Down 2–3 times a week",
            "Often down or pressured",
            "Consistently down",
        ],
    ),
    (
        7,
        "How many nights per week do you have trouble falling or staying asleep?",
        ["0 days", "1–2 days", "3–4 days", "5–6 days", "Almost every day"],
    ),
    (
        8,
        "How energized are you when leading or collaborating with others?",
        [
            "Consistently energized and productive",
            "Somewhat tired but manageable",
            "Often tired; need breaks",
            "Usually tired; concentration is hard",
            "Burned out; can’t perform",
        ],
    ),
    (
        9,
        "How much pressure do you feel from Slack/email/pings during the day?",
        [
            "None",
            "Slight, sometimes",
            "Moderate, regular",
            "Stressful most of the day",
            "Overwhelming",
        ],
    ),
    (
        10,
        "When you clock out or take a break, how well can you switch off?",
        [
            "Easily switch off and relax",
            "Sometimes switch off; mostly rest",
            "Often keep thinking about work",
            "Immediately worry about work again",
            "Always “ON”; can’t escape",
        ],
    ),
    (
        11,
        "How often do you work after regular hours?",
        [
            "Never",
            "Rarely (1–2×/month)",
            "Sometimes (~1×/week)",
            "Often (2–3×/week)",
            "Always (most days)",
        ],
    ),
    (
        12,
        "How is your current work–life balance?",
        [
            "Good balance; plenty of personal time",
            "Recently busy; recovering personal time",
            "Manageable; some recovery",
            "Personal time is scarce",
            "No balance at all",
        ],
    ),
    (
        13,
        "How connected do you feel with your team/colleagues?",
        [
            "Always connected and supported",
            "Mostly connected; sometimes distant",
            "Neutral",
            "Often lonely or isolated",
            "Not connected at all",
        ],
    ),
    (
        14,
        "How comfortable are you discussing mental health at work?",
        [
            "Very comfortable; open dialogue",
            "Somewhat comfortable with close peers",
            "Neutral",
            "Uncomfortable",
            "Very uncomfortable; avoid it",
        ],
    ),
    (
        15,
        "In the past 6 months, how often did you face unfair pressure or mistreatment?",
        [
            "Never",
            "Rarely; isolated incidents",
            "Sometimes; intermittent",
            "Often; frequent",
            "Very often; consistent",
        ],
    ),
    (
        16,
        "When a difficult problem hits, what’s the immediate impact?",
        [
            "No real impact",
            "Slight stress or discomfort",
            "Moderate stress; focus/emotions affected",
            "Severe stress; sleep/appetite disturbed",
            "Very severe; need help or miss work",
        ],
    ),
    (
        17,
        "During conflicts or high-stress situations, how tense do you feel physically?",
        ["Never", "Rarely", "Sometimes", "Often", "Always"],
    ),
    (
        18,
        "How do you usually cope with work stress?",
        [
            "Talk with friends/family",
            "Relaxation or mindfulness",
            "Games/social media chats",
            "Just push through",
            "Seek professional help",
        ],
    ),
    (
        19,
        "Do you rely on alcohol, caffeine, or other substances to relieve stress?",
        [
            "Never",
            "Rarely (1–2×)",
            "Sometimes (~monthly)",
            "Often (weekly)",
            "Always (daily or almost daily)",
        ],
    ),
    (
        20,
        "How supported do you feel using Employee Assistance Programs (EAP, counseling)?",
        [
            "Very supported; easy and encouraged",
            "Somewhat supported; know how to access",
            "Neutral; aware but unclear",
            "Not supported; feels unavailable",
            "Not supported at all",
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    struct MapText(HashMap<String, String>);

    impl TextLookup for MapText {
        fn lookup(&self, key: &str) -> Option<String> {
            self.0.get(key).cloned()
        }
    }

    #[test]
    fn standard_catalog_has_twenty_distinct_questions() {
        let catalog = Catalog::standard();
        assert_eq!(catalog.len(), CATALOG_SIZE);

        let ids: HashSet<_> = catalog.questions().iter().map(Question::id).collect();
        assert_eq!(ids.len(), CATALOG_SIZE);
        assert!((1..=20).all(|raw| ids.contains(&QuestionId::new(raw))));
    }

    #[test]
    fn keys_follow_survey_namespace() {
        let id = QuestionId::new(7);
        assert_eq!(prompt_key(id), "survey.q7.text");
        assert_eq!(option_key(id, OptionLetter::C), "survey.q7.C");
    }

    #[test]
    fn lookup_overrides_only_known_keys() {
        let mut map = HashMap::new();
        map.insert("survey.q3.text".to_string(), "번역된 질문".to_string());
        map.insert("survey.q3.A".to_string(), "전혀".to_string());
        let catalog = Catalog::localized(&MapText(map));

        let q3 = catalog.get(QuestionId::new(3)).unwrap();
        assert_eq!(q3.text(), "번역된 질문");
        assert_eq!(q3.option(OptionLetter::A).text, "전혀");
        assert_eq!(q3.option(OptionLetter::B).text, "Almost never");

        let q4 = catalog.get(QuestionId::new(4)).unwrap();
        assert_eq!(
            q4.text(),
            "What do you usually tell yourself when you’re struggling at work?"
        );
    }

    #[test]
    fn blank_translation_falls_back_to_default_prompt() {
        let mut map = HashMap::new();
        map.insert("survey.q1.text".to_string(), "  ".to_string());
        let catalog = Catalog::localized(&MapText(map));

        assert_eq!(catalog.len(), CATALOG_SIZE);
        assert_eq!(
            catalog.get(QuestionId::new(1)).unwrap().text(),
            "How often do you feel mentally or physically exhausted at work?"
        );
    }

    #[test]
    fn blanking_every_prompt_keeps_all_twenty_questions() {
        let map = (1..=CATALOG_SIZE as u32)
            .map(|id| (format!("survey.q{id}.text"), String::new()))
            .collect();
        let catalog = Catalog::localized(&MapText(map));

        assert_eq!(catalog.len(), CATALOG_SIZE);
        for (question, (id, prompt, _)) in catalog.questions().iter().zip(DEFAULTS.iter()) {
            assert_eq!(question.id(), QuestionId::new(*id));
            assert_eq!(question.text(), *prompt);
        }
    }

    #[test]
    fn default_prompts_are_never_blank() {
        assert!(DEFAULTS.iter().all(|(_, prompt, _)| !prompt.trim().is_empty()));
    }
}
