use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;

use glossa_types::{AppEvent, PopupAnchor, StatusLevel, TranslationView};

use crate::events::handle_events;
use crate::popup::PopupPhase;

use super::{StubOutcome, StubTranslator, harness, record, session};

fn selection(text: &str) -> AppEvent {
    AppEvent::TextSelected {
        raw_text: text.to_string(),
        block_text: format!("The quick {text} jumps over the dog. It was brown."),
        anchor: PopupAnchor { x: 200, y: 150 },
    }
}

#[tokio::test]
async fn selection_opens_popup_then_resolution_lands() {
    let mut h = harness(
        Some(Arc::new(StubTranslator(StubOutcome::Ok(record("roobah"))))),
        Some(session()),
    );

    handle_events(&mut h.ctx, selection("fox")).await.unwrap();

    let opened = timeout(Duration::from_secs(2), h.app_to_ui_rx.recv())
        .await
        .expect("no PopupOpened")
        .unwrap();
    match opened {
        AppEvent::PopupOpened { word, origin } => {
            assert_eq!(word, "fox");
            assert_eq!(origin, (200, 160));
        }
        other => panic!("expected PopupOpened, got {:?}", other),
    }

    // The spawned fetch posts its completion back into the loop channel
    let completion = timeout(Duration::from_secs(2), h.ui_to_app_rx.recv())
        .await
        .expect("no completion")
        .unwrap();
    assert!(matches!(completion, AppEvent::TranslationResolved(_)));

    handle_events(&mut h.ctx, completion).await.unwrap();

    let resolved = timeout(Duration::from_secs(2), h.app_to_ui_rx.recv())
        .await
        .expect("no TranslationResolved")
        .unwrap();
    match resolved {
        AppEvent::TranslationResolved(view) => {
            assert_eq!(view.word, "fox");
            assert_eq!(view.word_translation, "roobah");
            assert_eq!(
                view.context_sentence.as_deref(),
                Some("The quick fox jumps over the dog")
            );
        }
        other => panic!("expected TranslationResolved, got {:?}", other),
    }

    let popup = h.ctx.popup.as_ref().expect("popup gone");
    assert!(matches!(popup.phase, PopupPhase::Ready(_)));
}

#[tokio::test]
async fn rate_limit_and_generic_failures_read_differently() {
    let mut limited = harness(
        Some(Arc::new(StubTranslator(StubOutcome::RateLimited))),
        Some(session()),
    );
    handle_events(&mut limited.ctx, selection("fox")).await.unwrap();
    let _opened = limited.app_to_ui_rx.recv().await.unwrap();

    let failure = timeout(Duration::from_secs(2), limited.ui_to_app_rx.recv())
        .await
        .expect("no completion")
        .unwrap();
    let rate_limit_message = match failure {
        AppEvent::TranslationFailed { message } => message,
        other => panic!("expected TranslationFailed, got {:?}", other),
    };
    assert!(rate_limit_message.contains("rate limit"));

    let mut generic = harness(
        Some(Arc::new(StubTranslator(StubOutcome::Fail("boom".to_string())))),
        Some(session()),
    );
    handle_events(&mut generic.ctx, selection("fox")).await.unwrap();
    let _opened = generic.app_to_ui_rx.recv().await.unwrap();

    let failure = timeout(Duration::from_secs(2), generic.ui_to_app_rx.recv())
        .await
        .expect("no completion")
        .unwrap();
    let generic_message = match failure {
        AppEvent::TranslationFailed { message } => message,
        other => panic!("expected TranslationFailed, got {:?}", other),
    };
    assert_eq!(generic_message, "Failed to translate. Please try again.");
    assert_ne!(rate_limit_message, generic_message);
}

#[tokio::test]
async fn quota_exhaustion_has_its_own_wording() {
    let mut h = harness(
        Some(Arc::new(StubTranslator(StubOutcome::Quota))),
        Some(session()),
    );
    handle_events(&mut h.ctx, selection("fox")).await.unwrap();
    let _opened = h.app_to_ui_rx.recv().await.unwrap();

    let failure = timeout(Duration::from_secs(2), h.ui_to_app_rx.recv())
        .await
        .expect("no completion")
        .unwrap();
    match failure {
        AppEvent::TranslationFailed { message } => {
            assert!(message.contains("quota"));
            assert!(!message.contains("rate limit"));
        }
        other => panic!("expected TranslationFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn late_response_after_close_is_dropped() {
    let mut h = harness(
        Some(Arc::new(StubTranslator(StubOutcome::Ok(record("roobah"))))),
        Some(session()),
    );

    handle_events(&mut h.ctx, selection("fox")).await.unwrap();
    let _opened = h.app_to_ui_rx.recv().await.unwrap();

    handle_events(&mut h.ctx, AppEvent::ClosePopup).await.unwrap();
    assert!(h.ctx.popup.is_none());

    let completion = timeout(Duration::from_secs(2), h.ui_to_app_rx.recv())
        .await
        .expect("no completion")
        .unwrap();
    handle_events(&mut h.ctx, completion).await.unwrap();

    assert!(h.ctx.popup.is_none());
    // Nothing is forwarded to the UI for a popup that no longer exists
    let extra = timeout(Duration::from_millis(100), h.app_to_ui_rx.recv()).await;
    assert!(extra.is_err());
}

#[tokio::test]
async fn last_resolving_response_wins_the_popup() {
    let mut h = harness(
        Some(Arc::new(StubTranslator(StubOutcome::Ok(record("roobah"))))),
        Some(session()),
    );

    handle_events(&mut h.ctx, selection("fox")).await.unwrap();
    let _opened = h.app_to_ui_rx.recv().await.unwrap();

    // A straggler from an earlier lookup lands while the fox popup is
    // open; it takes the popup over
    let stale = AppEvent::TranslationResolved(TranslationView {
        word: "cat".to_string(),
        word_translation: "gorbeh".to_string(),
        sentence_translation: None,
        pronunciation: None,
        part_of_speech: None,
        notes: None,
        context_sentence: None,
    });
    handle_events(&mut h.ctx, stale).await.unwrap();

    let popup = h.ctx.popup.as_ref().expect("popup gone");
    assert_eq!(popup.word, "fox");
    let view = popup.translation().expect("not resolved");
    assert_eq!(view.word, "cat");
    assert_eq!(view.word_translation, "gorbeh");
}

#[tokio::test]
async fn disabled_translator_rejects_the_lookup() {
    let mut h = harness(None, Some(session()));

    handle_events(&mut h.ctx, selection("fox")).await.unwrap();

    let event = timeout(Duration::from_secs(2), h.app_to_ui_rx.recv())
        .await
        .expect("no status")
        .unwrap();
    match event {
        AppEvent::StatusUpdate { message, level } => {
            assert_eq!(
                message,
                "Translation is disabled. Set GEMINI_API_KEY to enable it."
            );
            assert_eq!(level, StatusLevel::Error);
        }
        other => panic!("expected StatusUpdate, got {:?}", other),
    }
    assert!(h.ctx.popup.is_none());
}

#[tokio::test]
async fn empty_selection_opens_nothing() {
    let mut h = harness(
        Some(Arc::new(StubTranslator(StubOutcome::Ok(record("roobah"))))),
        Some(session()),
    );

    handle_events(
        &mut h.ctx,
        AppEvent::TextSelected {
            raw_text: "   ".to_string(),
            block_text: "Some block".to_string(),
            anchor: PopupAnchor { x: 0, y: 0 },
        },
    )
    .await
    .unwrap();

    assert!(h.ctx.popup.is_none());
    let nothing = timeout(Duration::from_millis(100), h.app_to_ui_rx.recv()).await;
    assert!(nothing.is_err());
}
