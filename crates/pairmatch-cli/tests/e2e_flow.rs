//! End-to-end quiz flow through the library crates.
//!
//! A creator answers the saved quiz, the session travels as a share code,
//! the partner answers it, and the result code decodes to the same score on
//! the other side.

use pairmatch_core::codec::{decode_result, decode_session, encode_result, encode_session_compact};
use pairmatch_core::flow::{transition, Event, View};
use pairmatch_core::model::{Band, Profile, RelationshipType};
use pairmatch_core::route::Route;
use pairmatch_core::scoring::score_result;
use pairmatch_core::store::SettingsRepo;
use pairmatch_core::templates::{classic_template, StaticRegistry};
use pairmatch_storage::FileStore;

fn profile(name: &str) -> Profile {
    Profile {
        name: name.into(),
        age: Some(31),
        gender: String::new(),
        relationship_type: RelationshipType::Married,
        reflections: vec![],
    }
}

fn run(mut view: View, events: impl IntoIterator<Item = Event>) -> View {
    for e in events {
        view = transition(view, e);
    }
    view
}

#[tokio::test]
async fn saved_settings_to_shared_result() {
    let dir = tempfile::tempdir().unwrap();
    let registry = StaticRegistry::builtin();

    // Admin trims the quiz down to three questions.
    let store = FileStore::open(dir.path().join("store.json")).unwrap();
    let mut repo = SettingsRepo::new(store, classic_template());
    repo.set_quiz_title("Anniversary check-in").unwrap();
    for id in 4..=10 {
        repo.set_question_active(id, false).unwrap();
    }

    // Reopened from disk, the settings still apply.
    let store = FileStore::open(dir.path().join("store.json")).unwrap();
    let setup = SettingsRepo::new(store, classic_template()).quiz_setup();
    assert_eq!(setup.title, "Anniversary check-in");
    assert_eq!(setup.active_questions().count(), 3);

    // Creator.
    let view = run(
        View::default(),
        [
            Event::StartQuiz(setup),
            Event::ProfileSubmitted(profile("Ana")),
            Event::Answered("At home together".into()),
            Event::Answered("Night owl".into()),
            Event::Answered("Write it down".into()),
        ],
    );
    let View::Questionnaire(q) = &view else {
        panic!("expected questionnaire, got {view:?}");
    };
    let session = q.to_session().unwrap();
    assert!(session.template_id.is_none());

    let code = encode_session_compact(&session, &registry).await.unwrap();
    let view = transition(view, Event::SessionPublished { code: code.clone() });
    let link = format!("https://pairmatch.example/{}", Route::Session(code).to_fragment());
    assert!(matches!(view, View::Share { .. }));

    // Partner.
    let Route::Session(code) = Route::parse(&link) else {
        panic!("not a session link: {link}");
    };
    let opened = decode_session(&code, &registry).await.unwrap();
    assert_eq!(opened, session);

    let view = run(
        View::default(),
        [
            Event::SessionOpened(Box::new(opened)),
            Event::ProfileSubmitted(profile("Ben")),
            Event::Answered("At home together".into()),
            Event::Answered("Morning person".into()),
            Event::Answered("Write it down".into()),
            Event::Submit,
        ],
    );
    let View::Results { result, score } = view else {
        panic!("expected results");
    };
    assert_eq!((score.matches, score.total, score.percentage), (2, 3, 67));
    assert_eq!(score.band, Band::Range51To75);

    // Result link seen by the creator.
    let code = encode_result(&result).await.unwrap();
    let decoded = decode_result(&code, &registry).await.unwrap();
    assert_eq!(decoded, *result);
    assert_eq!(score_result(&decoded), score);
}

#[tokio::test]
async fn unmodified_template_travels_by_reference() {
    let registry = StaticRegistry::builtin();
    let setup = classic_template().setup();

    // "Both" is not an option for the first question, so it is ignored and
    // Back leaves the questionnaire.
    let view = run(
        View::default(),
        [
            Event::StartQuiz(setup),
            Event::ProfileSubmitted(profile("Ana")),
            Event::Answered("Both".into()),
            Event::Back,
        ],
    );
    let View::ProfileSetup(_) = view else {
        panic!("back from the first question returns to the profile");
    };

    let view = run(
        view,
        [Event::ProfileSubmitted(profile("Ana"))]
            .into_iter()
            .chain(classic_template().questions.iter().map(|q| Event::Answered(q.options[0].clone()))),
    );
    let View::Questionnaire(q) = &view else {
        panic!("expected questionnaire");
    };
    let session = q.to_session().unwrap();
    assert_eq!(session.template_id.as_deref(), Some("classic"));

    let compact = encode_session_compact(&session, &registry).await.unwrap();
    let full = pairmatch_core::codec::encode_session(&session).await.unwrap();
    assert!(compact.len() < full.len());

    let opened = decode_session(&compact, &registry).await.unwrap();
    assert_eq!(opened.questions, classic_template().questions);
    assert_eq!(opened.creator_answers, session.creator_answers);
}

#[tokio::test]
async fn broken_link_lands_home_with_notice() {
    let registry = StaticRegistry::builtin();
    let err = decode_session("definitely-not-gzip", &registry).await.unwrap_err();

    let view = transition(View::Admin, Event::DecodeFailed);
    let View::Home { notice: Some(notice) } = view else {
        panic!("expected a notice on the home view");
    };
    assert_eq!(notice, err.user_message());
}
