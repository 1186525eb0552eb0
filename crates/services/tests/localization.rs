use joi_core::catalog::Catalog;
use joi_core::checkin::ScriptedIndices;
use joi_core::model::{Language, OptionLetter};
use joi_core::time::fixed_clock;
use services::AppServices;
use services::i18n::header_subtitle;

const KO: &str = r#"{
    "survey": {
        "headerSubtitle": "질문 {{n}} / {{total}}",
        "q7": {
            "text": "일주일에 며칠 잠들기 어렵습니까?",
            "A": "0일",
            "B": "1–2일",
            "C": "3–4일",
            "D": "5–6일",
            "E": "매일"
        }
    }
}"#;

#[tokio::test]
async fn stored_korean_picks_korean_document_from_locale_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ko.json"), KO).unwrap();

    let app = AppServices::in_memory(fixed_clock(), Catalog::standard());
    app.preferences().set_language(Language::Korean).await.unwrap();

    let localization = app.localization(Some(dir.path())).await.unwrap();
    assert_eq!(localization.language(), Language::Korean);

    let checkin = app.checkin().with_catalog(localization.catalog());
    let session = checkin
        .start_session_with(&mut ScriptedIndices::new([6, 0, 12, 5]))
        .unwrap();
    let current = session.current().unwrap();

    assert_eq!(current.text(), "일주일에 며칠 잠들기 어렵습니까?");
    assert_eq!(current.option(OptionLetter::E).text, "매일");
    assert_eq!(
        header_subtitle(localization.text(), session.progress()),
        "질문 1 / 4"
    );
}

#[tokio::test]
async fn english_or_missing_file_uses_builtin_texts() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ko.json"), KO).unwrap();
    let app = AppServices::in_memory(fixed_clock(), Catalog::standard());

    // Nothing stored yet: English, and there is no en.json.
    let localization = app.localization(Some(dir.path())).await.unwrap();
    assert_eq!(localization.language(), Language::English);
    assert_eq!(localization.catalog(), Catalog::standard());

    // Korean stored but no directory given.
    app.preferences().set_language(Language::Korean).await.unwrap();
    let localization = app.localization(None).await.unwrap();
    assert_eq!(localization.language(), Language::Korean);
    assert_eq!(localization.catalog(), Catalog::standard());
}

#[tokio::test]
async fn broken_translation_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("ko.json"), "{ nope").unwrap();
    let app = AppServices::in_memory(fixed_clock(), Catalog::standard());
    app.preferences().set_language(Language::Korean).await.unwrap();

    assert!(app.localization(Some(dir.path())).await.is_err());
}
