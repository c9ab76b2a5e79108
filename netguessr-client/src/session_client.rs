use std::sync::Arc;

use tracing::{debug, info, warn};

use netguessr_core::{
    Notice, RoundPhase, Session, SessionEvent, SessionEventBus, SessionEventHandler, SessionView,
};
use netguessr_types::{
    CreatePartyRequest, GuessResult, GuessSubmission, ImageErrorReport, PartyInfo, Subject,
};

use crate::api::{ApiError, GameApi};
use crate::input::{self, JoinRequest, Prompt, Prompter};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Guess submission is locked while the round is {phase}")]
    SubmitLocked { phase: RoundPhase },
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    State(#[from] anyhow::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created { room_code: String },
    Aborted,
    Failed { status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined { code: String },
    Aborted,
    RoomNotFound { code: String },
    Failed { status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    Left,
    Unchanged { status: u16 },
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Probe each new subject's image and report it when it cannot load.
    pub check_images: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { check_images: true }
    }
}

/// The player's side of a NetGuessr game.
///
/// Every network call is awaited before the next one starts, except image
/// telemetry, which runs detached. The client never asserts anything the
/// server has not confirmed; the only local rule it enforces on its own is
/// the one-guess-per-round submit lock.
pub struct SessionClient<A: GameApi> {
    api: Arc<A>,
    session: Session,
    events: SessionEventBus,
    options: SessionOptions,
}

impl<A: GameApi + 'static> SessionClient<A> {
    pub fn new(api: A, options: SessionOptions) -> Self {
        Self {
            api: Arc::new(api),
            session: Session::new(),
            events: SessionEventBus::new(),
            options,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn add_event_handler(&mut self, handler: Box<dyn SessionEventHandler>) {
        self.events.add_handler(handler);
    }

    /// Rebuild client state from the server, as on a page load: party
    /// membership first, then a new round. A failed party poll does not
    /// keep the round from starting.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.refresh_party_info().await {
            warn!("Failed to load party info: {}", e);
        }
        self.reset_round().await?;
        Ok(())
    }

    pub async fn fetch_random_subject(&mut self) -> Result<Subject, SessionError> {
        self.session.round.begin_fetch();

        let subject = match self.api.random_subject().await {
            Ok(subject) => subject,
            Err(e) => {
                self.session.round.fetch_failed();
                if let ApiError::Status(status) = &e {
                    self.events
                        .publish(SessionEvent::Notice(Notice::HttpError { status: *status }));
                }
                warn!("Failed to fetch a subject: {}", e);
                return Err(e.into());
            }
        };

        self.session.round.subject_loaded(subject.clone())?;
        info!("Loaded subject {}", subject.name);
        self.events.publish(SessionEvent::SubjectLoaded {
            subject: subject.clone(),
        });

        if self.options.check_images {
            self.spawn_image_check();
        }

        Ok(subject)
    }

    /// Start a new round. Safe to call repeatedly; each call is simply
    /// another subject fetch.
    pub async fn reset_round(&mut self) -> Result<Subject, SessionError> {
        debug!("Resetting round from {}", self.session.round.phase);
        self.fetch_random_subject().await
    }

    /// Submit the one guess this round allows. The lock is taken before
    /// the request goes out and only a new round releases it.
    pub async fn submit_guess(
        &mut self,
        guess: &str,
        guess_amt: Option<f64>,
    ) -> Result<GuessResult, SessionError> {
        let phase = self.session.round.phase;
        if self.session.round.begin_submit().is_err() {
            debug!("Ignoring guess while round is {}", phase);
            return Err(SessionError::SubmitLocked { phase });
        }

        self.events.publish(SessionEvent::GuessSubmitted {
            guess: guess.to_string(),
        });

        let submission = GuessSubmission {
            guess: guess.to_string(),
            guess_amt,
        };

        match self.api.submit_guess(&submission).await {
            Ok(result) => {
                self.session.round.resolve(result.clone())?;
                info!(
                    "Guess {} resolved as {:?} (score {:?})",
                    guess, result.statcode, result.score
                );
                self.events.publish(SessionEvent::GuessResolved {
                    result: result.clone(),
                });

                // Keep the scoreboard in step with the verdict's score
                if self.session.party.is_member() {
                    if let Err(e) = self.refresh_party_info().await {
                        warn!("Failed to refresh party info after guessing: {}", e);
                    }
                }
                Ok(result)
            }
            Err(e) => {
                self.session.round.abandon_submit();
                warn!("Guess submission failed: {}", e);
                Err(e.into())
            }
        }
    }

    /// Ask the server to forget the game, then reload from scratch.
    pub async fn restart_game(&mut self) -> Result<(), SessionError> {
        self.api.restart().await?;

        info!("Game restarted, reloading session");
        self.session = Session::new();
        self.events.publish(SessionEvent::GameRestarted);
        self.start().await
    }

    pub async fn lookup_subject(&self, name: &str) -> Result<Option<Subject>, SessionError> {
        Ok(self.api.lookup_subject(name).await?)
    }

    /// Fire-and-forget report that the current subject's image is broken.
    pub fn report_image_error(&mut self) {
        let Some(subject) = self.session.round.subject.as_ref() else {
            return;
        };

        let report = ImageErrorReport {
            image_url: subject.image.clone(),
            celeb: subject.name.clone(),
        };

        tokio::spawn(send_image_report(Arc::clone(&self.api), report.clone()));

        self.events.publish(SessionEvent::ImageErrorReported {
            image_url: report.image_url,
            celeb: report.celeb,
        });
    }

    /// Probe the current subject's image in the background and report it
    /// when it cannot be loaded.
    fn spawn_image_check(&self) {
        let Some(subject) = self.session.round.subject.clone() else {
            return;
        };
        let api = Arc::clone(&self.api);

        tokio::spawn(async move {
            match api.image_available(&subject.image).await {
                Ok(true) => return,
                Ok(false) => warn!("Image {:?} could not be loaded", subject.image),
                Err(e) => warn!("Image {:?} could not be loaded: {}", subject.image, e),
            }

            let report = ImageErrorReport {
                image_url: subject.image,
                celeb: subject.name,
            };
            send_image_report(api, report).await;
        });
    }

    pub async fn create_party(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<CreateOutcome, SessionError> {
        let Some(request) = input::collect_create_request(prompter).await else {
            return Ok(CreateOutcome::Aborted);
        };

        let body = CreatePartyRequest::from(request);
        match self.api.create_party(&body).await {
            Ok(created) => {
                info!("Created party {}", created.room_code);
                self.session.party.confirm_joined();
                self.events.publish(SessionEvent::PartyCreated {
                    room_code: created.room_code.clone(),
                });
                self.enter_party().await;
                Ok(CreateOutcome::Created {
                    room_code: created.room_code,
                })
            }
            Err(ApiError::Status(status)) => {
                warn!("Party creation refused with status {}", status);
                self.events
                    .publish(SessionEvent::Notice(Notice::CreateFailed { status }));
                Ok(CreateOutcome::Failed { status })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn join_party(
        &mut self,
        prompter: &mut dyn Prompter,
    ) -> Result<JoinOutcome, SessionError> {
        let Some(request) = input::collect_join_request(prompter).await else {
            return Ok(JoinOutcome::Aborted);
        };

        self.join_party_with(request, prompter).await
    }

    /// Join with an already collected code and username.
    ///
    /// The first attempt never carries a passcode. A 401 means the room is
    /// private: the player is asked once for the passcode and the join is
    /// retried exactly once with it.
    pub async fn join_party_with(
        &mut self,
        request: JoinRequest,
        prompter: &mut dyn Prompter,
    ) -> Result<JoinOutcome, SessionError> {
        if request.code.is_empty() || request.username.is_empty() {
            return Ok(JoinOutcome::Aborted);
        }

        let mut response = self.api.join_party(&request.to_query(None)).await;

        if let Err(ApiError::Status(401)) = response {
            self.events.publish(SessionEvent::Notice(Notice::PasscodeRequired {
                code: request.code.clone(),
            }));

            let Some(passcode) = prompter.prompt(Prompt::Passcode { creating: false }).await
            else {
                info!("Passcode prompt cancelled, not joining {}", request.code);
                return Ok(JoinOutcome::Aborted);
            };

            response = self
                .api
                .join_party(&request.to_query(Some(passcode)))
                .await;
        }

        match response {
            Ok(()) => {
                info!("Joined party {} as {}", request.code, request.username);
                self.session.party.confirm_joined();
                self.events.publish(SessionEvent::PartyJoined {
                    code: request.code.clone(),
                });
                self.enter_party().await;
                Ok(JoinOutcome::Joined { code: request.code })
            }
            Err(ApiError::Status(404)) => {
                warn!("Party {} does not exist", request.code);
                self.events.publish(SessionEvent::Notice(Notice::RoomNotFound {
                    code: request.code.clone(),
                }));
                Ok(JoinOutcome::RoomNotFound { code: request.code })
            }
            Err(ApiError::Status(status)) => {
                warn!("Joining party {} refused with status {}", request.code, status);
                self.events
                    .publish(SessionEvent::Notice(Notice::JoinFailed { status }));
                Ok(JoinOutcome::Failed { status })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn leave_party(&mut self) -> Result<LeaveOutcome, SessionError> {
        match self.api.leave_party().await {
            Ok(()) => {
                info!("Left party");
                self.session.party.confirm_left();
                self.events.publish(SessionEvent::PartyLeft);
                Ok(LeaveOutcome::Left)
            }
            Err(ApiError::Status(status)) => {
                warn!("Leaving party refused with status {}", status);
                self.events
                    .publish(SessionEvent::Notice(Notice::LeaveFailed { status }));
                Ok(LeaveOutcome::Unchanged { status })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Poll the party the server thinks this player is in. The answer is
    /// the source of truth for membership, including right after a reload.
    pub async fn refresh_party_info(&mut self) -> Result<Option<PartyInfo>, SessionError> {
        let info = self.api.party_info().await?;

        match &info {
            Some(info) => debug!("In party {} with {} members", info.code, info.stats.len()),
            None => debug!("Not in a party"),
        }

        self.session.party.apply_info(info.clone());
        self.events
            .publish(SessionEvent::PartyInfoRefreshed { info: info.clone() });
        Ok(info)
    }

    /// After a confirmed join or create: new scoreboard, new round. Failures
    /// here are already reported and do not undo the membership.
    async fn enter_party(&mut self) {
        if let Err(e) = self.refresh_party_info().await {
            warn!("Failed to refresh party info after joining: {}", e);
        }
        if let Err(e) = self.reset_round().await {
            warn!("Failed to start a round after joining: {}", e);
        }
    }
}

async fn send_image_report<A: GameApi>(api: Arc<A>, report: ImageErrorReport) {
    if let Err(e) = api.report_image_error(&report).await {
        debug!("Image error report not delivered: {}", e);
    }
}
