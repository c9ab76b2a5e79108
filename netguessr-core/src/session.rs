use crate::{Feedback, Party, Round, RoundPhase, ScoreLine};

/// Everything the client knows about the current game, in one place.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub round: Round,
    pub party: Party,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> SessionView {
        SessionView::project(&self.round, &self.party)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub guess_input: bool,
    pub submit: bool,
    pub skip: bool,
    pub next: bool,
    pub join_visible: bool,
    pub leave_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectView {
    pub name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyView {
    pub code: Option<String>,
    pub scoreboard: Vec<ScoreLine>,
}

/// What the player should be shown. Derived from state on every call and
/// never mutated directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub phase: RoundPhase,
    pub subject: Option<SubjectView>,
    pub controls: Controls,
    pub result: Option<Feedback>,
    pub party: PartyView,
}

impl SessionView {
    pub fn project(round: &Round, party: &Party) -> Self {
        let phase = round.phase;
        let (guess_input, submit, skip_next) = match phase {
            RoundPhase::Idle => (false, false, true),
            RoundPhase::AwaitingSubject => (false, false, false),
            RoundPhase::Ready => (true, true, true),
            RoundPhase::Submitting => (false, false, false),
            RoundPhase::Resolved => (false, false, true),
        };

        let result = match phase {
            RoundPhase::Resolved => round.last_result.as_ref().map(Feedback::from),
            _ => None,
        };

        SessionView {
            phase,
            subject: round.subject.as_ref().map(|subject| SubjectView {
                name: subject.name.clone(),
                image: subject.image.clone(),
            }),
            controls: Controls {
                guess_input,
                submit,
                skip: skip_next,
                next: skip_next,
                join_visible: !party.is_member(),
                leave_visible: party.is_member(),
            },
            result,
            party: PartyView {
                code: party.code().map(str::to_string),
                scoreboard: party.scoreboard(),
            },
        }
    }
}
