use cuedrill::history::HistoryLog;
use cuedrill::scoring::{classify, MissPolicy, Outcome, Verdict};
use cuedrill::session::{Mode, Scope, Session};

/// End-to-end session workflows: dealing, recording attempts, card
/// completion, scope totals and score persistence.

#[test]
fn drill_session_five_point_card_three_makes() {
    let mut session = Session::with_deal(Mode::Solo, MissPolicy::Continue, Scope::Solo, vec![3]);

    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    assert!(!session.record(Scope::Solo, 3).done);
    assert_eq!(session.total_for(Scope::Solo), 5);

    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    assert!(!session.record(Scope::Solo, 3).done);
    assert_eq!(session.total_for(Scope::Solo), 10);

    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    let record = session.record(Scope::Solo, 3);
    assert!(record.done);
    assert_eq!(session.total_for(Scope::Solo), 15);
    assert!(session.is_complete(Scope::Solo));
}

#[test]
fn drill_session_special_card_single_verdict() {
    let mut session = Session::with_deal(Mode::Random, MissPolicy::Continue, Scope::Solo, vec![49]);

    session.record_attempt(Scope::Solo, 49, Outcome::OverFour);
    assert!(session.record(Scope::Solo, 49).done);
    assert_eq!(session.total_for(Scope::Solo), -10);

    // A second attempt is ignored wholesale
    session.record_attempt(Scope::Solo, 49, Outcome::ThreeShots);
    assert_eq!(session.record(Scope::Solo, 49).history.len(), 1);
    assert_eq!(session.total_for(Scope::Solo), -10);
}

#[test]
fn drill_session_twenty_point_miss_then_make() {
    let mut session = Session::with_deal(Mode::Solo, MissPolicy::Continue, Scope::Solo, vec![35]);

    session.record_attempt(Scope::Solo, 35, Outcome::Miss);
    assert!(!session.record(Scope::Solo, 35).done);

    session.record_attempt(Scope::Solo, 35, Outcome::Make);
    assert!(session.record(Scope::Solo, 35).done);
    assert_eq!(session.total_for(Scope::Solo), 20);
}

#[test]
fn drill_session_mixed_deal_totals_and_autosave() {
    let mut session =
        Session::with_deal(Mode::Quick, MissPolicy::Continue, Scope::Solo, vec![3, 35, 49]);
    let mut log = HistoryLog::new();

    // 5-pt card: two makes then a miss, -15
    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    session.record_attempt(Scope::Solo, 3, Outcome::Miss);
    assert!(!session.autosave_solo("Ross", &mut log));

    // 20-pt card: scratch, -20
    session.record_attempt(Scope::Solo, 35, Outcome::Scratch);
    assert!(!session.autosave_solo("Ross", &mut log));

    // Special card: four shots, +20
    session.record_attempt(Scope::Solo, 49, Outcome::FourShots);
    assert!(session.autosave_solo("Ross", &mut log));

    assert_eq!(session.total_for(Scope::Solo), -15);
    assert_eq!(log.len(), 1);
    assert_eq!(log.entries()[0].name, "Ross");
    assert_eq!(log.entries()[0].mode, "quick");
    assert_eq!(log.entries()[0].score, -15);

    // Completion keeps observing true, but never re-persists
    assert!(session.is_complete(Scope::Solo));
    assert!(!session.autosave_solo("Ross", &mut log));
    assert_eq!(log.len(), 1);
}

#[test]
fn drill_session_team_match_end_to_end() {
    let mut session =
        Session::with_deal(Mode::Team, MissPolicy::Continue, Scope::TeamA, vec![12, 44]);
    session.deal_to(Scope::TeamB, vec![23, 32]);
    let mut log = HistoryLog::new();

    // Team A: 10-pt double make (+20), 25-pt make then miss (-25)
    session.record_attempt(Scope::TeamA, 12, Outcome::Make);
    session.record_attempt(Scope::TeamA, 12, Outcome::Make);
    session.record_attempt(Scope::TeamA, 44, Outcome::Make);
    session.record_attempt(Scope::TeamA, 44, Outcome::Miss);

    // Team B: 15-pt abandoned (+0), 20-pt first-try make left open (+20)
    session.mark_done(Scope::TeamB, 23);
    session.record_attempt(Scope::TeamB, 32, Outcome::Make);
    session.mark_done(Scope::TeamB, 32);

    assert_eq!(session.total_for(Scope::TeamA), -5);
    assert_eq!(session.total_for(Scope::TeamB), 20);

    session.finish_team_match("Team A", "Team B", &mut log);
    assert_eq!(log.len(), 2);
    assert_eq!(log.entries()[0].score, -5);
    assert_eq!(log.entries()[1].score, 20);
}

#[test]
fn drill_session_new_deal_drops_attempts_not_history() {
    let mut log = HistoryLog::new();

    let mut session = Session::with_deal(Mode::Solo, MissPolicy::Continue, Scope::Solo, vec![3]);
    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    session.record_attempt(Scope::Solo, 3, Outcome::Make);
    session.autosave_solo("Ross", &mut log);
    assert_eq!(log.len(), 1);

    // Starting over replaces the session wholesale
    let session = Session::with_deal(Mode::Solo, MissPolicy::Continue, Scope::Solo, vec![3]);
    let record = session.record(Scope::Solo, 3);
    assert!(record.history.is_empty());
    assert!(!record.done);
    assert_eq!(session.total_for(Scope::Solo), 0);

    // The persisted log survives the re-deal
    assert_eq!(log.len(), 1);
    assert_eq!(log.entries()[0].score, 15);
}

#[test]
fn drill_session_classifier_agrees_with_session_state() {
    let mut session = Session::with_deal(Mode::Solo, MissPolicy::Continue, Scope::Solo, vec![15]);
    session.record_attempt(Scope::Solo, 15, Outcome::Make);
    session.record_attempt(Scope::Solo, 15, Outcome::Make);

    let record = session.record(Scope::Solo, 15);
    let verdict = classify(15, &record.history, session.policy());
    assert_eq!(verdict, Verdict { done: true, score: 20 });
    assert_eq!(record.done, verdict.done);
    assert_eq!(session.card_score(Scope::Solo, 15), verdict.score);
}
