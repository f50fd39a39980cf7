use quizmaster::models::QuestionBank;
use quizmaster::navigation::{Navigator, Route, SessionContext};
use quizmaster::session::{ControllerUpdate, QuizController, SessionRules};
use quizmaster::store::{KeyValueStore, MemoryStore, FINAL_SCORE_KEY};
use std::time::Duration;

#[derive(Default)]
struct RecordingNavigator {
    calls: Vec<(Route, SessionContext)>,
}

impl Navigator for RecordingNavigator {
    fn go_to(&mut self, route: Route, context: SessionContext) {
        self.calls.push((route, context));
    }
}

fn controller() -> QuizController {
    QuizController::with_rules(
        QuestionBank::builtin(),
        SessionRules::default(),
        Duration::from_secs(1),
        Duration::from_secs(2),
        SessionContext::new("Zoe", "ROOM42"),
    )
}

/// Feed timer events into the controller until `stop` matches, returning
/// every update seen along the way
async fn drive_until(
    controller: &mut QuizController,
    store: &mut MemoryStore,
    nav: &mut RecordingNavigator,
    stop: impl Fn(ControllerUpdate) -> bool,
) -> Vec<ControllerUpdate> {
    let mut seen = Vec::new();
    loop {
        let event = controller
            .next_event()
            .await
            .expect("timer channel closed");
        let update = controller.handle_event(event, store, nav);
        seen.push(update);
        if stop(update) {
            return seen;
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_correct_wrong_timeout_scores_100() {
    let mut controller = controller();
    let mut store = MemoryStore::new();
    let mut nav = RecordingNavigator::default();

    // Paris
    controller.select(2);
    assert_eq!(controller.submit(), ControllerUpdate::Locked);
    assert_eq!(controller.session().score(), 100);
    drive_until(&mut controller, &mut store, &mut nav, |u| {
        u == ControllerUpdate::NextQuestion(1)
    })
    .await;

    // Wrong planet
    controller.select(0);
    assert_eq!(controller.submit(), ControllerUpdate::Locked);
    assert_eq!(controller.session().score(), 100);
    drive_until(&mut controller, &mut store, &mut nav, |u| {
        u == ControllerUpdate::NextQuestion(2)
    })
    .await;

    // Let the last question run out
    let updates = drive_until(&mut controller, &mut store, &mut nav, |u| {
        matches!(u, ControllerUpdate::Finished(_))
    })
    .await;
    assert_eq!(updates.last(), Some(&ControllerUpdate::Finished(100)));
    assert!(updates.contains(&ControllerUpdate::Locked));

    assert_eq!(store.get(FINAL_SCORE_KEY).as_deref(), Some("100"));
    assert_eq!(nav.calls.len(), 1);
    assert_eq!(nav.calls[0].0, Route::Leaderboard);
    assert_eq!(nav.calls[0].1.final_score, Some(100));

    // Nothing fires after the hand-off
    tokio::time::sleep(Duration::from_secs(30)).await;
    while let Some(event) = controller.try_next_event() {
        assert_eq!(
            controller.handle_event(event, &mut store, &mut nav),
            ControllerUpdate::Unchanged
        );
    }
    assert_eq!(nav.calls.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_no_interaction_times_out_every_question() {
    let mut controller = controller();
    let mut store = MemoryStore::new();
    let mut nav = RecordingNavigator::default();

    let updates = drive_until(&mut controller, &mut store, &mut nav, |u| {
        matches!(u, ControllerUpdate::Finished(_))
    })
    .await;

    let locks = updates
        .iter()
        .filter(|u| **u == ControllerUpdate::Locked)
        .count();
    let advances = updates
        .iter()
        .filter(|u| matches!(u, ControllerUpdate::NextQuestion(_)))
        .count();
    let ticks = updates
        .iter()
        .filter(|u| matches!(u, ControllerUpdate::Ticked(_)))
        .count();

    assert_eq!(locks, 3);
    assert_eq!(advances, 2);
    // Fourteen visible steps per question before the timeout
    assert_eq!(ticks, 3 * 14);
    assert_eq!(updates.last(), Some(&ControllerUpdate::Finished(0)));
    assert_eq!(store.get(FINAL_SCORE_KEY).as_deref(), Some("0"));
    assert_eq!(nav.calls.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_pending_correct_selection_scores_on_timeout() {
    let mut controller = controller();
    let mut store = MemoryStore::new();
    let mut nav = RecordingNavigator::default();

    controller.select(2);
    drive_until(&mut controller, &mut store, &mut nav, |u| {
        u == ControllerUpdate::Locked
    })
    .await;

    assert_eq!(controller.session().score(), 100);
    assert_eq!(controller.session().time_remaining(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_selection_ignored_once_locked() {
    let mut controller = controller();
    controller.select(1);
    controller.submit();
    assert_eq!(controller.select(2), ControllerUpdate::Unchanged);
    assert_eq!(controller.session().selected_option(), Some(1));
    assert_eq!(controller.session().score(), 0);
}
