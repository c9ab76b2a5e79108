use netguessr_core::{RoundPhase, Session};
use netguessr_types::{GuessResult, NetWorth, PartyInfo, StatCode, Subject};
use std::collections::BTreeMap;

/// Creates a test subject with a numeric net worth
pub fn create_test_subject(name: &str, networth: f64) -> Subject {
    Subject {
        name: name.to_string(),
        image: format!("/img/{}.png", name.to_lowercase().replace(' ', "-")),
        networth: NetWorth::Number(networth),
    }
}

/// Creates a verdict for the given subject
pub fn create_verdict(statcode: StatCode, message: &str, subject: &Subject, score: i32) -> GuessResult {
    GuessResult {
        statcode,
        message: message.to_string(),
        celeb_data: Some(subject.clone()),
        score: Some(score),
    }
}

/// Creates a party snapshot from (username, score) pairs
pub fn create_party_info(code: &str, current_user: &str, stats: &[(&str, i32)]) -> PartyInfo {
    PartyInfo {
        stats: stats
            .iter()
            .map(|(name, score)| (name.to_string(), *score))
            .collect::<BTreeMap<_, _>>(),
        current_user: current_user.to_string(),
        code: code.to_string(),
    }
}

/// Helper to advance a session's round to a specific phase
pub fn advance_to_phase(session: &mut Session, target_phase: RoundPhase) {
    let subject = create_test_subject("Jane Doe", 5_000_000.0);

    match target_phase {
        RoundPhase::Idle => {
            // Already idle by default
        }
        RoundPhase::AwaitingSubject => {
            session.round.begin_fetch();
        }
        RoundPhase::Ready => {
            session.round.begin_fetch();
            session.round.subject_loaded(subject).unwrap();
        }
        RoundPhase::Submitting => {
            advance_to_phase(session, RoundPhase::Ready);
            session.round.begin_submit().unwrap();
        }
        RoundPhase::Resolved => {
            advance_to_phase(session, RoundPhase::Submitting);
            let verdict = create_verdict(StatCode::CloseEnough, "So close!", &subject, 10);
            session.round.resolve(verdict).unwrap();
        }
    }
}
