use netguessr_types::PartyInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Membership {
    NotInParty,
    InParty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLine {
    pub username: String,
    pub score: i32,
    pub is_current_user: bool,
}

/// Client-side view of party membership.
///
/// The server owns the party. Membership is only ever asserted here after
/// the server confirmed it, either by a 200 on join/create or by a party
/// info response.
#[derive(Debug, Clone)]
pub struct Party {
    pub membership: Membership,
    pub snapshot: Option<PartyInfo>,
}

impl Party {
    pub fn new() -> Self {
        Self {
            membership: Membership::NotInParty,
            snapshot: None,
        }
    }

    pub fn is_member(&self) -> bool {
        self.membership == Membership::InParty
    }

    pub fn confirm_joined(&mut self) {
        self.membership = Membership::InParty;
    }

    pub fn confirm_left(&mut self) {
        self.membership = Membership::NotInParty;
        self.snapshot = None;
    }

    /// Apply a party info poll. `None` means the server answered non-200,
    /// which is read as "not in a party" rather than as a transient error.
    pub fn apply_info(&mut self, info: Option<PartyInfo>) {
        match info {
            Some(info) => {
                self.membership = Membership::InParty;
                self.snapshot = Some(info);
            }
            None => self.confirm_left(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.snapshot.as_ref().map(|info| info.code.as_str())
    }

    /// Members ordered by score (highest first), ties by username.
    pub fn scoreboard(&self) -> Vec<ScoreLine> {
        let Some(info) = &self.snapshot else {
            return Vec::new();
        };

        let mut lines: Vec<ScoreLine> = info
            .stats
            .iter()
            .map(|(username, score)| ScoreLine {
                username: username.clone(),
                score: *score,
                is_current_user: *username == info.current_user,
            })
            .collect();
        lines.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.username.cmp(&b.username)));
        lines
    }
}

impl Default for Party {
    fn default() -> Self {
        Self::new()
    }
}
