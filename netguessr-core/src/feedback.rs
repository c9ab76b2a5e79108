use netguessr_types::{GuessResult, StatCode, Subject};

/// Background colour of the result panel for a verdict.
///
/// `Middle` and `Off` share a colour; the server never tells them apart in
/// its messaging either.
pub fn result_color(statcode: StatCode) -> &'static str {
    match statcode {
        StatCode::OnTheMoney => "#0d7306",
        StatCode::CloseEnough => "#31478f",
        StatCode::Middle | StatCode::Off => "#b09a2e",
        StatCode::WayOff => "#942319",
        StatCode::NoGame | StatCode::Unknown => "white",
    }
}

pub fn net_worth_line(subject: &Subject) -> String {
    format!("The net worth of {} is {}", subject.name, subject.networth)
}

pub fn score_line(score: i32) -> String {
    format!("Score: {}", score)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub background: &'static str,
    pub message: String,
    pub net_worth: Option<String>,
    pub score: Option<String>,
}

impl From<&GuessResult> for Feedback {
    fn from(result: &GuessResult) -> Self {
        Feedback {
            background: result_color(result.statcode),
            message: result.message.clone(),
            net_worth: result.celeb_data.as_ref().map(net_worth_line),
            score: result.score.map(score_line),
        }
    }
}
