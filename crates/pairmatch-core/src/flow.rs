//! Quiz navigation as a state machine.
//!
//! Each front end owns a [`View`] and feeds it [`Event`]s through
//! [`transition`]. The function is pure: anything that needs the codec
//! (publishing a session, opening a link) happens outside, and its outcome
//! comes back in as an event. Events that make no sense for the current view
//! leave it unchanged.

use crate::error::INVALID_LINK_MESSAGE;
use crate::model::{Answers, Profile, Question, QuizSetup, ResultData, SessionData};
use crate::scoring::{score_result, CompatibilityScore};

/// Which half of the quiz is being filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// Creator answering a fresh setup.
    Creator(QuizSetup),
    /// Partner answering a session they were sent.
    Partner(Box<SessionData>),
}

impl Origin {
    fn questions(&self) -> &[Question] {
        match self {
            Origin::Creator(setup) => &setup.questions,
            Origin::Partner(session) => &session.questions,
        }
    }
}

/// An in-progress questionnaire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Questionnaire {
    pub origin: Origin,
    pub profile: Profile,
    pub answers: Answers,
    /// Position within the active questions.
    pub index: usize,
}

impl Questionnaire {
    fn new(origin: Origin, profile: Profile) -> Self {
        Self {
            origin,
            profile,
            answers: Answers::new(),
            index: 0,
        }
    }

    pub fn active_questions(&self) -> Vec<&Question> {
        self.origin.questions().iter().filter(|q| q.active).collect()
    }

    /// The question awaiting an answer, or `None` once all are answered.
    pub fn current(&self) -> Option<&Question> {
        self.active_questions().get(self.index).copied()
    }

    pub fn is_complete(&self) -> bool {
        self.index >= self.active_questions().len()
    }

    /// The creator's finished session, if this is a complete creator run.
    pub fn to_session(&self) -> Option<SessionData> {
        match &self.origin {
            Origin::Creator(setup) if self.is_complete() => Some(setup.clone().into_session(
                self.profile.clone(),
                self.answers.clone(),
                None,
            )),
            _ => None,
        }
    }
}

/// Everything a front end can display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home { notice: Option<String> },
    ProfileSetup(Origin),
    Questionnaire(Questionnaire),
    Share { code: String },
    Results {
        result: Box<ResultData>,
        score: CompatibilityScore,
    },
    Admin,
    StaticPage { slug: String },
}

impl Default for View {
    fn default() -> Self {
        View::Home { notice: None }
    }
}

/// Inputs that move the view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Creator starts a quiz with the given setup.
    StartQuiz(QuizSetup),
    /// A session link decoded successfully.
    SessionOpened(Box<SessionData>),
    /// A result link decoded successfully.
    ResultOpened(Box<ResultData>),
    /// A link could not be decoded or validated.
    DecodeFailed,
    ProfileSubmitted(Profile),
    /// An option was picked for the current question.
    Answered(String),
    Back,
    /// The creator's session has been encoded.
    SessionPublished { code: String },
    /// Partner confirms their answers.
    Submit,
    /// Admin gate result.
    AdminLogin { authorized: bool },
    OpenPage(String),
    GoHome,
}

/// Compute the next view.
pub fn transition(view: View, event: Event) -> View {
    match (view, event) {
        // Navigation that works from anywhere.
        (_, Event::GoHome) => View::default(),
        (_, Event::DecodeFailed) => View::Home {
            notice: Some(INVALID_LINK_MESSAGE.to_string()),
        },
        (_, Event::SessionOpened(session)) => View::ProfileSetup(Origin::Partner(session)),
        (_, Event::ResultOpened(result)) => {
            let score = score_result(&result);
            View::Results { result, score }
        }
        (_, Event::OpenPage(slug)) => View::StaticPage { slug },

        (View::Home { .. }, Event::StartQuiz(setup)) => View::ProfileSetup(Origin::Creator(setup)),
        (View::Home { .. }, Event::AdminLogin { authorized: true }) => View::Admin,

        (View::ProfileSetup(origin), Event::ProfileSubmitted(profile)) => {
            View::Questionnaire(Questionnaire::new(origin, profile))
        }
        (View::ProfileSetup(_), Event::Back) => View::default(),

        (View::Questionnaire(mut q), Event::Answered(option)) => {
            if let Some(question) = q.current() {
                if question.options.contains(&option) {
                    let id = question.id;
                    q.answers.insert(id, option);
                    q.index += 1;
                }
            }
            View::Questionnaire(q)
        }
        (View::Questionnaire(mut q), Event::Back) => {
            if q.index == 0 {
                View::ProfileSetup(q.origin)
            } else {
                q.index -= 1;
                View::Questionnaire(q)
            }
        }
        (View::Questionnaire(q), Event::SessionPublished { code })
            if matches!(q.origin, Origin::Creator(_)) && q.is_complete() =>
        {
            View::Share { code }
        }
        (View::Questionnaire(q), Event::Submit) if q.is_complete() => match q.origin {
            Origin::Partner(session) => {
                let result = Box::new(session.into_result(q.profile, q.answers));
                let score = score_result(&result);
                View::Results { result, score }
            }
            origin @ Origin::Creator(_) => View::Questionnaire(Questionnaire { origin, ..q }),
        },

        (view, _) => view,
    }
}
