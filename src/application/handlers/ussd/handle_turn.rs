//! HandleUssdTurn - answers one gateway callback.
//!
//! Orchestration per turn: identity lookup selects the menu tree, the
//! trail is replayed to recover the current state, the newest input is
//! validated, guards are evaluated, the session position is advanced with
//! a compare-and-set, and a terminal state's single domain effect runs.
//!
//! The handler is infallible from the caller's view: every port failure is
//! logged and converted into a user-safe terminal reply, and the session
//! ends rather than inviting a retry loop at the same level.

use std::sync::Arc;

use crate::domain::claim::{storage_fee, NewClaim, Subject};
use crate::domain::foundation::{
    ClaimId, DomainError, ErrorCode, Msisdn, NationalId, SessionId, Timestamp,
};
use crate::domain::menu::{
    replay, texts, BookingInput, Guard, InputTrail, MenuReply, MenuState, MenuTree, PromptContext,
    RegistrationInput, RejectPolicy, ReplayError, StepDecision, TerminalAction,
};
use crate::domain::subscriber::{NewSubscriber, Subscriber, TemporaryPin};
use crate::ports::{
    ClaimReader, ClaimRepository, FacilityReader, SessionPosition, SubjectReader,
    SubscriberRepository,
};

/// Deployment-level menu settings.
#[derive(Debug, Clone)]
pub struct MenuSettings {
    /// Dial code that resets to the root menu from any level.
    pub reset_code: String,
    /// Daily storage rate in RWF.
    pub daily_storage_fee: i64,
    /// Rows shown by the history action.
    pub history_limit: u32,
}

/// Decoded gateway callback for one turn.
#[derive(Debug, Clone)]
pub struct UssdTurn {
    pub session_id: SessionId,
    pub msisdn: Msisdn,
    pub text: String,
}

/// Handler answering USSD turns.
pub struct HandleUssdTurn {
    position: Arc<dyn SessionPosition>,
    subscribers: Arc<dyn SubscriberRepository>,
    facilities: Arc<dyn FacilityReader>,
    subjects: Arc<dyn SubjectReader>,
    claims: Arc<dyn ClaimRepository>,
    claim_reader: Arc<dyn ClaimReader>,
    settings: MenuSettings,
}

impl HandleUssdTurn {
    pub fn new(
        position: Arc<dyn SessionPosition>,
        subscribers: Arc<dyn SubscriberRepository>,
        facilities: Arc<dyn FacilityReader>,
        subjects: Arc<dyn SubjectReader>,
        claims: Arc<dyn ClaimRepository>,
        claim_reader: Arc<dyn ClaimReader>,
        settings: MenuSettings,
    ) -> Self {
        Self {
            position,
            subscribers,
            facilities,
            subjects,
            claims,
            claim_reader,
            settings,
        }
    }

    /// Answers one turn. Never fails: port errors become a generic
    /// terminal reply.
    pub async fn handle(&self, turn: UssdTurn) -> MenuReply {
        match self.run(&turn).await {
            Ok(reply) => {
                tracing::info!(
                    session_id = %turn.session_id,
                    continues = reply.continues(),
                    "ussd turn answered"
                );
                reply
            }
            Err(err) => {
                tracing::error!(
                    session_id = %turn.session_id,
                    error = %err,
                    "ussd turn failed, ending session"
                );
                MenuReply::terminal(texts::service_unavailable())
            }
        }
    }

    async fn run(&self, turn: &UssdTurn) -> Result<MenuReply, DomainError> {
        let trail = InputTrail::parse(&turn.text, &self.settings.reset_code);
        let subscriber = self.subscribers.find_by_msisdn(&turn.msisdn).await?;
        let tree = match subscriber {
            Some(_) => MenuTree::Member,
            None => MenuTree::Visitor,
        };

        let level = self.position.current(&turn.session_id, &trail).await?;

        // Single entry point: fresh session, no level recorded, or the
        // reset code just dialed (parsing drops the code and everything
        // before it, so that turn's trail comes back empty).
        if trail.is_empty() || level == 0 {
            self.position.reset(&turn.session_id).await?;
            let text = match &subscriber {
                Some(s) => texts::member_root(s.full_name()),
                None => texts::visitor_root(),
            };
            return Ok(MenuReply::prompt(text));
        }

        let summary = match replay(tree, trail.history()) {
            Ok(summary) => summary,
            Err(ReplayError::SessionEnded) => {
                return Ok(MenuReply::terminal(texts::session_ended()));
            }
        };
        let expected = summary.accepted + 1;

        match summary.state.accept(trail.last()) {
            StepDecision::Reject {
                message,
                policy: RejectPolicy::Reprompt,
            } => Ok(MenuReply::prompt(message)),

            StepDecision::Reject {
                message,
                policy: RejectPolicy::End,
            } => Ok(MenuReply::terminal(message)),

            StepDecision::Next(next) => {
                if let Some(guard) = summary.state.guard() {
                    if let Some(stop) = self.check_guard(guard, &trail).await? {
                        return Ok(stop);
                    }
                }
                if !self.claim_turn(&turn.session_id, expected).await? {
                    return Ok(MenuReply::terminal(texts::already_processed()));
                }
                self.render_next(next, subscriber.as_ref()).await
            }

            StepDecision::Finish(action) => {
                if !self.claim_turn(&turn.session_id, expected).await? {
                    return Ok(MenuReply::terminal(texts::already_processed()));
                }
                self.execute(action, turn, &trail, subscriber).await
            }
        }
    }

    /// Claims this turn's advance; false means a duplicate delivery
    /// already processed it.
    async fn claim_turn(&self, session_id: &SessionId, expected: u32) -> Result<bool, DomainError> {
        self.position
            .try_advance(session_id, expected, expected + 1)
            .await
    }

    /// Evaluates a domain-read guard for the newest input.
    ///
    /// Guard failures end the session; a continuing reply here would leave
    /// the trail inconsistent with what replay reconstructs next turn.
    async fn check_guard(
        &self,
        guard: Guard,
        trail: &InputTrail,
    ) -> Result<Option<MenuReply>, DomainError> {
        match guard {
            Guard::FacilityChoice => {
                let facilities = self.facilities.list().await?;
                if facilities.is_empty() {
                    return Ok(Some(MenuReply::terminal(texts::no_facilities())));
                }
                let choice: usize = trail.last().trim().parse().unwrap_or(0);
                if choice == 0 || choice > facilities.len() {
                    return Ok(Some(MenuReply::terminal(texts::invalid_option())));
                }
                Ok(None)
            }
            Guard::SubjectAvailable => {
                let national_id = NationalId::parse(trail.last())?;
                match self.lookup_subject(&national_id).await? {
                    SubjectLookup::Available(_) => Ok(None),
                    SubjectLookup::Missing => {
                        Ok(Some(MenuReply::terminal(texts::subject_not_found())))
                    }
                    SubjectLookup::Claimed => {
                        Ok(Some(MenuReply::terminal(texts::subject_already_claimed())))
                    }
                }
            }
        }
    }

    async fn lookup_subject(&self, national_id: &NationalId) -> Result<SubjectLookup, DomainError> {
        match self.subjects.find_by_national_id(national_id).await? {
            None => Ok(SubjectLookup::Missing),
            Some(subject) if subject.is_unclaimed() => Ok(SubjectLookup::Available(subject)),
            Some(_) => Ok(SubjectLookup::Claimed),
        }
    }

    /// Renders the prompt for the state the session just advanced into.
    async fn render_next(
        &self,
        state: MenuState,
        subscriber: Option<&Subscriber>,
    ) -> Result<MenuReply, DomainError> {
        if state == MenuState::BookFacility {
            let facilities = self.facilities.list().await?;
            if facilities.is_empty() {
                return Ok(MenuReply::terminal(texts::no_facilities()));
            }
            let ctx = PromptContext {
                subscriber_name: subscriber.map(Subscriber::full_name),
                facilities: &facilities,
            };
            return Ok(MenuReply::prompt(state.prompt(&ctx)));
        }

        let ctx = PromptContext {
            subscriber_name: subscriber.map(Subscriber::full_name),
            facilities: &[],
        };
        Ok(MenuReply::prompt(state.prompt(&ctx)))
    }

    /// Runs the single domain effect of a terminal state.
    async fn execute(
        &self,
        action: TerminalAction,
        turn: &UssdTurn,
        trail: &InputTrail,
        subscriber: Option<Subscriber>,
    ) -> Result<MenuReply, DomainError> {
        match action {
            TerminalAction::Exit => Ok(MenuReply::terminal(texts::goodbye())),
            TerminalAction::Register => self.register(turn, trail, subscriber).await,
            action => {
                // Member-only actions; the tree selection guarantees the
                // subscriber unless the registration raced this turn.
                let Some(subscriber) = subscriber else {
                    return Ok(MenuReply::terminal(texts::session_ended()));
                };
                match action {
                    TerminalAction::Book => self.book(trail, &subscriber).await,
                    TerminalAction::Cancel => self.cancel(trail, &subscriber).await,
                    TerminalAction::Status => self.status(trail, &subscriber).await,
                    TerminalAction::History => self.history(&subscriber).await,
                    TerminalAction::Exit | TerminalAction::Register => unreachable!(),
                }
            }
        }
    }

    async fn register(
        &self,
        turn: &UssdTurn,
        trail: &InputTrail,
        subscriber: Option<Subscriber>,
    ) -> Result<MenuReply, DomainError> {
        if subscriber.is_some() {
            return Ok(MenuReply::terminal(texts::duplicate_registration()));
        }
        let input = RegistrationInput::from_trail(trail)?;
        let pin = TemporaryPin::generate();
        let new = NewSubscriber::new(
            turn.msisdn.clone(),
            input.full_name,
            input.email,
            input.national_id,
            input.city,
            input.language,
            pin.clone(),
        )?;

        match self.subscribers.create(&new).await {
            Ok(created) => {
                tracing::info!(subscriber_id = %created.id(), "subscriber registered");
                Ok(MenuReply::terminal(texts::registration_done(&pin)))
            }
            Err(err) if err.code == ErrorCode::DuplicateRegistration => {
                Ok(MenuReply::terminal(texts::duplicate_registration()))
            }
            Err(err) => Err(err),
        }
    }

    async fn book(
        &self,
        trail: &InputTrail,
        subscriber: &Subscriber,
    ) -> Result<MenuReply, DomainError> {
        let facilities = self.facilities.list().await?;
        let input = match BookingInput::from_trail(trail, &facilities) {
            Ok(input) => input,
            Err(err) if err.code == ErrorCode::FacilityNotFound => {
                return Ok(MenuReply::terminal(texts::invalid_option()));
            }
            Err(err) => return Err(err),
        };

        let subject = match self.lookup_subject(&input.subject_national_id).await? {
            SubjectLookup::Available(subject) => subject,
            SubjectLookup::Missing => {
                return Ok(MenuReply::terminal(texts::subject_not_found()));
            }
            SubjectLookup::Claimed => {
                return Ok(MenuReply::terminal(texts::subject_already_claimed()));
            }
        };

        let amount = storage_fee(
            subject.registered_on(),
            &Timestamp::now(),
            self.settings.daily_storage_fee,
        );
        let new = NewClaim {
            owner: subscriber.id(),
            subject_national_id: input.subject_national_id,
            facility_id: input.facility_id,
            relationship: input.relationship,
            payment_method: input.payment_method,
            pickup_at: input.pickup_at,
            amount,
        };

        match self.claims.book(&new).await {
            Ok(claim_id) => {
                tracing::info!(claim_id = %claim_id, amount, "pickup booked");
                Ok(MenuReply::terminal(texts::booking_done(
                    claim_id.as_i64(),
                    amount,
                )))
            }
            Err(err) if err.code == ErrorCode::SubjectAlreadyClaimed => {
                Ok(MenuReply::terminal(texts::subject_already_claimed()))
            }
            Err(err) if err.code == ErrorCode::SubjectNotFound => {
                Ok(MenuReply::terminal(texts::subject_not_found()))
            }
            Err(err) => Err(err),
        }
    }

    async fn cancel(
        &self,
        trail: &InputTrail,
        subscriber: &Subscriber,
    ) -> Result<MenuReply, DomainError> {
        let claim_id = ClaimId::parse(trail.last())?;
        if self.claims.cancel(claim_id, subscriber.id()).await? {
            Ok(MenuReply::terminal(texts::booking_cancelled()))
        } else {
            Ok(MenuReply::terminal(texts::booking_not_found()))
        }
    }

    async fn status(
        &self,
        trail: &InputTrail,
        subscriber: &Subscriber,
    ) -> Result<MenuReply, DomainError> {
        let claim_id = ClaimId::parse(trail.last())?;
        match self
            .claim_reader
            .find_for_owner(claim_id, subscriber.id())
            .await?
        {
            Some(claim) => Ok(MenuReply::terminal(texts::booking_status(&claim))),
            None => Ok(MenuReply::terminal(texts::booking_not_found())),
        }
    }

    async fn history(&self, subscriber: &Subscriber) -> Result<MenuReply, DomainError> {
        let claims = self
            .claim_reader
            .history_for_owner(subscriber.id(), self.settings.history_limit)
            .await?;
        if claims.is_empty() {
            Ok(MenuReply::terminal(texts::no_bookings()))
        } else {
            Ok(MenuReply::terminal(texts::booking_history(&claims)))
        }
    }
}

enum SubjectLookup {
    Available(Subject),
    Missing,
    Claimed,
}
