//! Line-oriented stand-in for the mobile screens.

use std::cell::Cell;
use std::error::Error;
use std::io::{self, BufRead, Write};

use joi_core::catalog::TextLookup;
use joi_core::checkin::CheckinSession;
use joi_core::model::{Language, OnboardingStep, OptionLetter};
use services::i18n::header_subtitle;
use services::{
    CheckinService, CheckinStep, DashboardSnapshot, Navigator, OnboardingFlow, Route,
};

type AppResult<T> = Result<T, Box<dyn Error>>;

/// Remembers the last route a flow asked for.
#[derive(Debug, Default)]
pub struct TerminalNavigator {
    current: Cell<Option<Route>>,
}

impl TerminalNavigator {
    #[must_use]
    pub fn current(&self) -> Option<Route> {
        self.current.get()
    }
}

impl Navigator for TerminalNavigator {
    fn replace(&self, route: Route) {
        log::debug!("navigate to {route}");
        self.current.set(Some(route));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckinOutcome {
    Completed(CheckinStep),
    Abandoned,
}

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `label` and read one trimmed line. `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    pub fn show_dashboard(&mut self, snapshot: &DashboardSnapshot) -> io::Result<()> {
        writeln!(self.output, "1-minute periodic check-in")?;
        writeln!(
            self.output,
            "Last completed: {}",
            snapshot.last_checkin_label()
        )
    }

    fn render_question(
        &mut self,
        session: &CheckinSession,
        text: &dyn TextLookup,
    ) -> AppResult<()> {
        let question = session.current()?;
        let selected = session.selected();

        writeln!(self.output)?;
        writeln!(self.output, "Quick Check-in")?;
        writeln!(self.output, "{}", header_subtitle(text, session.progress()))?;
        writeln!(self.output, "Q{}", question.id())?;
        writeln!(self.output, "{}", question.text())?;
        for option in question.options() {
            let mark = if selected == Some(option.letter) { "(x)" } else { "( )" };
            writeln!(self.output, "  {mark} {}. {}", option.letter, option.text)?;
        }
        Ok(())
    }

    /// Drive one check-in session until it completes or the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error on terminal I/O failures.
    pub async fn run_checkin(
        &mut self,
        service: &CheckinService,
        mut session: CheckinSession,
        text: &dyn TextLookup,
        navigator: &dyn Navigator,
    ) -> AppResult<CheckinOutcome> {
        loop {
            self.render_question(&session, text)?;
            let next_label = if session.is_last() { "Finish" } else { "Next" };
            let prompt = format!("[A-E] answer  [n] {next_label}  [p] Back  [q] Quit > ");
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(CheckinOutcome::Abandoned);
            };

            match line.to_ascii_lowercase().as_str() {
                "q" | "quit" => return Ok(CheckinOutcome::Abandoned),
                "p" | "prev" | "back" => {
                    if !session.retreat() {
                        writeln!(self.output, "Already at the first question.")?;
                    }
                }
                "n" | "next" | "finish" | "" => {
                    if !session.can_advance() {
                        writeln!(self.output, "Pick an answer first.")?;
                        continue;
                    }
                    let step = service.advance(&mut session).await?;
                    if let CheckinStep::Completed { next, persisted, .. } = &step {
                        if !persisted {
                            writeln!(
                                self.output,
                                "Could not save the check-in time. Your answers still count."
                            )?;
                        }
                        navigator.replace(*next);
                        return Ok(CheckinOutcome::Completed(step));
                    }
                }
                other => match other.parse::<OptionLetter>() {
                    Ok(letter) => session.select(letter)?,
                    Err(_) => writeln!(self.output, "Unknown input: {other}")?,
                },
            }
        }
    }

    /// Walk through the onboarding screens. Returns `None` if input ends early.
    ///
    /// # Errors
    ///
    /// Returns an error on terminal I/O or storage failures.
    pub async fn run_onboarding(
        &mut self,
        mut flow: OnboardingFlow,
        navigator: &dyn Navigator,
    ) -> AppResult<Option<Route>> {
        loop {
            let step = flow.step();
            let copy = OnboardingCopy::for_step(step, flow.language());
            writeln!(self.output)?;
            writeln!(self.output, "[{:>3}%] {}", step.progress_percent(), copy.title)?;
            writeln!(self.output, "{}", copy.body)?;

            match step {
                OnboardingStep::Language => {
                    for (idx, lang) in Language::ALL.iter().enumerate() {
                        writeln!(self.output, "  {}) {}", idx + 1, lang.label())?;
                    }
                    let Some(line) = self.prompt("> ")? else {
                        return Ok(None);
                    };
                    match parse_language_choice(&line) {
                        Some(lang) => flow.choose_language(lang).await?,
                        None => writeln!(self.output, "Please pick 1 or 2.")?,
                    }
                }
                OnboardingStep::Intro => {
                    if self.prompt(&format!("[Enter] {} > ", copy.cta))?.is_none() {
                        return Ok(None);
                    }
                    flow.proceed();
                }
                OnboardingStep::InputSelection => {
                    if self.prompt(&format!("[Enter] {} > ", copy.cta))?.is_none() {
                        return Ok(None);
                    }
                    let route = flow.finish().await?;
                    navigator.replace(route);
                    return Ok(Some(route));
                }
            }
        }
    }
}

fn parse_language_choice(line: &str) -> Option<Language> {
    match line.trim() {
        "1" => Some(Language::English),
        "2" => Some(Language::Korean),
        other => other.parse().ok(),
    }
}

struct OnboardingCopy {
    title: &'static str,
    body: &'static str,
    cta: &'static str,
}

impl OnboardingCopy {
    fn for_step(step: OnboardingStep, lang: Language) -> Self {
        let ko = lang == Language::Korean;
        match step {
            OnboardingStep::Language => Self {
                title: if ko { "언어 선택" } else { "Choose Your Language" },
                body: if ko {
                    "언어를 선택하세요"
                } else {
                    "Select a language to continue"
                },
                cta: "",
            },
            OnboardingStep::Intro => Self {
                title: "Joi App",
                body: if ko {
                    "메타버스와 함께하는 AI 기반 감정 웰니스"
                } else {
                    "AI driven emotional wellness with Metaverse"
                },
                cta: if ko { "계속" } else { "Continue" },
            },
            OnboardingStep::InputSelection => Self {
                title: if ko {
                    "감정 입력 선택"
                } else {
                    "Emotion Input Selection"
                },
                body: if ko {
                    "현재 감정 상태를 기록할 방법을 선택하세요"
                } else {
                    "Choose how you want to log your current emotional state"
                },
                cta: if ko { "시작하기" } else { "Get Started" },
            },
        }
    }
}
