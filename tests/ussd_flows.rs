//! Full-session journeys through the turn handler with in-memory ports.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tuza_ussd::application::handlers::ussd::{HandleUssdTurn, MenuSettings, UssdTurn};
use tuza_ussd::domain::claim::{
    Claim, ClaimStatus, Facility, NewClaim, Subject, SubjectStatus,
};
use tuza_ussd::domain::foundation::{
    ClaimId, DomainError, ErrorCode, Msisdn, NationalId, SessionId, SubscriberId, Timestamp,
};
use tuza_ussd::domain::menu::{InputTrail, MenuReply};
use tuza_ussd::domain::subscriber::{NewSubscriber, Subscriber};
use tuza_ussd::ports::{
    ClaimReader, ClaimRepository, FacilityReader, SessionPosition, SubjectReader,
    SubscriberRepository,
};

const RESET_CODE: &str = "*662*800*100#";
const DAILY_FEE: i64 = 19_000;

// ════════════════════════════════════════════════════════════════════════════
// In-memory ports
// ════════════════════════════════════════════════════════════════════════════

struct MemoryPosition {
    levels: Mutex<HashMap<String, u32>>,
}

#[async_trait]
impl SessionPosition for MemoryPosition {
    async fn current(
        &self,
        session_id: &SessionId,
        _trail: &InputTrail,
    ) -> Result<u32, DomainError> {
        Ok(*self
            .levels
            .lock()
            .unwrap()
            .get(session_id.as_str())
            .unwrap_or(&0))
    }

    async fn try_advance(
        &self,
        session_id: &SessionId,
        expected: u32,
        next: u32,
    ) -> Result<bool, DomainError> {
        let mut levels = self.levels.lock().unwrap();
        let current = levels.get(session_id.as_str()).copied().unwrap_or(0);
        if current == expected {
            levels.insert(session_id.as_str().to_string(), next);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn reset(&self, session_id: &SessionId) -> Result<(), DomainError> {
        self.levels
            .lock()
            .unwrap()
            .insert(session_id.as_str().to_string(), 1);
        Ok(())
    }
}

struct MemorySubscribers {
    rows: Mutex<Vec<Subscriber>>,
}

#[async_trait]
impl SubscriberRepository for MemorySubscribers {
    async fn find_by_msisdn(&self, msisdn: &Msisdn) -> Result<Option<Subscriber>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.msisdn().key() == msisdn.key())
            .cloned())
    }

    async fn create(&self, new: &NewSubscriber) -> Result<Subscriber, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|s| s.msisdn().key() == new.msisdn().key()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateRegistration,
                "phone already registered",
            ));
        }
        let stored = Subscriber::reconstitute(
            SubscriberId::new(rows.len() as i64 + 1),
            new.msisdn().clone(),
            new.full_name().to_string(),
            new.email().to_string(),
            new.national_id().clone(),
            new.city().to_string(),
            new.language(),
            Timestamp::now(),
        );
        rows.push(stored.clone());
        Ok(stored)
    }
}

struct FixedFacilities(Vec<Facility>);

#[async_trait]
impl FacilityReader for FixedFacilities {
    async fn list(&self) -> Result<Vec<Facility>, DomainError> {
        Ok(self.0.clone())
    }
}

struct MemorySubjects {
    rows: Mutex<Vec<Subject>>,
}

#[async_trait]
impl SubjectReader for MemorySubjects {
    async fn find_by_national_id(
        &self,
        national_id: &NationalId,
    ) -> Result<Option<Subject>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.national_id() == national_id)
            .cloned())
    }
}

struct MemoryClaims {
    subjects: Arc<MemorySubjects>,
    claims: Mutex<Vec<Claim>>,
}

#[async_trait]
impl ClaimRepository for MemoryClaims {
    async fn book(&self, new: &NewClaim) -> Result<ClaimId, DomainError> {
        let mut subjects = self.subjects.rows.lock().unwrap();
        let Some(pos) = subjects
            .iter()
            .position(|s| s.national_id() == &new.subject_national_id)
        else {
            return Err(DomainError::new(ErrorCode::SubjectNotFound, "no subject"));
        };
        if !subjects[pos].is_unclaimed() {
            return Err(DomainError::new(
                ErrorCode::SubjectAlreadyClaimed,
                "already claimed",
            ));
        }
        let current = subjects[pos].clone();
        subjects[pos] = Subject::reconstitute(
            current.national_id().clone(),
            current.full_name().to_string(),
            current.facility_id(),
            *current.registered_on(),
            SubjectStatus::Claimed,
        );

        let mut claims = self.claims.lock().unwrap();
        let id = ClaimId::new(claims.len() as i64 + 1);
        claims.push(Claim::reconstitute(
            id,
            new.owner,
            new.subject_national_id.clone(),
            new.facility_id,
            new.relationship,
            new.payment_method,
            new.pickup_at,
            new.amount,
            ClaimStatus::Scheduled,
        ));
        Ok(id)
    }

    async fn cancel(&self, claim_id: ClaimId, owner: SubscriberId) -> Result<bool, DomainError> {
        let mut claims = self.claims.lock().unwrap();
        let found = claims.iter().position(|c| {
            c.id() == claim_id && c.owner() == owner && c.status() == ClaimStatus::Scheduled
        });
        match found {
            Some(pos) => {
                let c = claims[pos].clone();
                claims[pos] = Claim::reconstitute(
                    c.id(),
                    c.owner(),
                    c.subject_national_id().clone(),
                    c.facility_id(),
                    c.relationship(),
                    c.payment_method(),
                    *c.pickup_at(),
                    c.amount(),
                    ClaimStatus::Cancelled,
                );
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ClaimReader for MemoryClaims {
    async fn find_for_owner(
        &self,
        claim_id: ClaimId,
        owner: SubscriberId,
    ) -> Result<Option<Claim>, DomainError> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == claim_id && c.owner() == owner)
            .cloned())
    }

    async fn history_for_owner(
        &self,
        owner: SubscriberId,
        limit: u32,
    ) -> Result<Vec<Claim>, DomainError> {
        Ok(self
            .claims
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|c| c.owner() == owner)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Harness
// ════════════════════════════════════════════════════════════════════════════

struct World {
    handler: HandleUssdTurn,
}

fn world(subjects: Vec<Subject>) -> World {
    let position = Arc::new(MemoryPosition {
        levels: Mutex::new(HashMap::new()),
    });
    let subscribers = Arc::new(MemorySubscribers {
        rows: Mutex::new(Vec::new()),
    });
    let subjects = Arc::new(MemorySubjects {
        rows: Mutex::new(subjects),
    });
    let claims = Arc::new(MemoryClaims {
        subjects: subjects.clone(),
        claims: Mutex::new(Vec::new()),
    });
    let handler = HandleUssdTurn::new(
        position,
        subscribers,
        Arc::new(FixedFacilities(vec![
            Facility::new(1, "CHUK"),
            Facility::new(2, "King Faisal"),
        ])),
        subjects,
        claims.clone(),
        claims,
        MenuSettings {
            reset_code: RESET_CODE.to_string(),
            daily_storage_fee: DAILY_FEE,
            history_limit: 5,
        },
    );
    World { handler }
}

async fn dial(world: &World, session: &str, phone: &str, text: &str) -> MenuReply {
    world
        .handler
        .handle(UssdTurn {
            session_id: SessionId::new(session).unwrap(),
            msisdn: Msisdn::new(phone).unwrap(),
            text: text.to_string(),
        })
        .await
}

/// Walks a full trail turn by turn and returns the last reply.
async fn walk(world: &World, session: &str, phone: &str, inputs: &[&str]) -> MenuReply {
    let mut reply = dial(world, session, phone, "").await;
    let mut trail = String::new();
    for input in inputs {
        if !trail.is_empty() {
            trail.push('*');
        }
        trail.push_str(input);
        reply = dial(world, session, phone, &trail).await;
    }
    reply
}

fn subject_registered_seconds_ago(secs: i64) -> Subject {
    Subject::reconstitute(
        NationalId::parse("55555").unwrap(),
        "John Doe".to_string(),
        1,
        Timestamp::now().minus_seconds(secs),
        SubjectStatus::Unclaimed,
    )
}

const PHONE_A: &str = "+250781234567";
const PHONE_B: &str = "+250788888888";

async fn register(world: &World, session: &str, phone: &str) -> MenuReply {
    walk(
        world,
        session,
        phone,
        &["1", "1", "Jane Doe", "jane@x.com", "1234567", "Kigali"],
    )
    .await
}

// ════════════════════════════════════════════════════════════════════════════
// Journeys
// ════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn registration_carries_over_to_the_next_session() {
    let w = world(vec![]);

    let done = register(&w, "s1", PHONE_A).await;
    assert!(!done.continues());
    assert!(done.text().contains("Registration successful"));

    let next = dial(&w, "s2", PHONE_A, "").await;
    assert!(next.continues());
    assert!(next.text().contains("Welcome back, Jane Doe"));
}

#[tokio::test]
async fn registered_phone_gets_member_tree_not_visitor_tree() {
    let w = world(vec![]);
    register(&w, "s1", PHONE_A).await;

    // The visitor tree is gone for this phone; an unregistered phone
    // walking the same trail in parallel still goes through.
    let other = register(&w, "s2", PHONE_B).await;
    assert!(other.text().contains("Registration successful"));

    let root = dial(&w, "s3", PHONE_A, "").await;
    assert!(root.text().contains("Welcome back"));
}

#[tokio::test]
async fn booking_bills_ceiling_days_and_survives_into_status_and_history() {
    // 2.3 days of storage bills as 3 full days.
    let w = world(vec![subject_registered_seconds_ago(198_720)]);
    register(&w, "s1", PHONE_A).await;

    let booked = walk(
        &w,
        "s2",
        PHONE_A,
        &["1", "1", "55555", "2", "1", "2026-09-14", "10:30"],
    )
    .await;
    assert!(!booked.continues());
    assert!(booked.text().contains("Booking ID: 1"));
    assert!(booked.text().contains("57000 RWF"));

    let status = walk(&w, "s3", PHONE_A, &["3", "1"]).await;
    assert!(status.text().contains("Booking #1"));
    assert!(status.text().contains("Scheduled"));
    assert!(status.text().contains("2026-09-14 10:30"));

    let history = walk(&w, "s4", PHONE_A, &["4"]).await;
    assert!(history.text().contains("Your bookings:"));
    assert!(history.text().contains("#1"));
}

#[tokio::test]
async fn claimed_subject_cannot_be_booked_twice() {
    let w = world(vec![subject_registered_seconds_ago(3_600)]);
    register(&w, "s1", PHONE_A).await;
    register(&w, "s2", PHONE_B).await;

    let first = walk(
        &w,
        "s3",
        PHONE_A,
        &["1", "1", "55555", "2", "1", "2026-09-14", "10:30"],
    )
    .await;
    assert!(first.text().contains("Booking ID: 1"));

    // The second caller is stopped at the subject guard.
    let second = walk(&w, "s4", PHONE_B, &["1", "1", "55555"]).await;
    assert!(!second.continues());
    assert!(second.text().contains("already been claimed"));
}

#[tokio::test]
async fn cancelled_booking_reads_back_cancelled_and_cannot_cancel_again() {
    let w = world(vec![subject_registered_seconds_ago(3_600)]);
    register(&w, "s1", PHONE_A).await;
    walk(
        &w,
        "s2",
        PHONE_A,
        &["1", "1", "55555", "2", "1", "2026-09-14", "10:30"],
    )
    .await;

    let cancelled = walk(&w, "s3", PHONE_A, &["2", "1"]).await;
    assert!(cancelled.text().contains("cancelled successfully"));

    let status = walk(&w, "s4", PHONE_A, &["3", "1"]).await;
    assert!(status.text().contains("Cancelled"));

    let again = walk(&w, "s5", PHONE_A, &["2", "1"]).await;
    assert!(again.text().contains("not found or already closed"));
}

#[tokio::test]
async fn bookings_are_invisible_to_other_subscribers() {
    let w = world(vec![subject_registered_seconds_ago(3_600)]);
    register(&w, "s1", PHONE_A).await;
    register(&w, "s2", PHONE_B).await;
    walk(
        &w,
        "s3",
        PHONE_A,
        &["1", "1", "55555", "2", "1", "2026-09-14", "10:30"],
    )
    .await;

    let status = walk(&w, "s4", PHONE_B, &["3", "1"]).await;
    assert!(status.text().contains("Booking not found"));

    let cancel = walk(&w, "s5", PHONE_B, &["2", "1"]).await;
    assert!(cancel.text().contains("not found or already closed"));

    let owner_view = walk(&w, "s6", PHONE_A, &["3", "1"]).await;
    assert!(owner_view.text().contains("Booking #1"));
}

#[tokio::test]
async fn reset_code_always_lands_on_the_root_menu() {
    let w = world(vec![]);
    register(&w, "s1", PHONE_A).await;

    dial(&w, "s2", PHONE_A, "").await;
    dial(&w, "s2", PHONE_A, "1").await;

    for trail in ["1**662*800*100#", RESET_CODE, "1*2**662*800*100#"] {
        let reply = dial(&w, "s2", PHONE_A, trail).await;
        assert!(reply.continues(), "reset should reopen the menu: {}", trail);
        assert!(reply.text().contains("Welcome back"));
    }
}

#[tokio::test]
async fn menu_answers_normally_on_the_turns_after_a_reset() {
    let w = world(vec![]);
    register(&w, "s1", PHONE_A).await;

    dial(&w, "s2", PHONE_A, "").await;
    let root = dial(&w, "s2", PHONE_A, "1*662*800*100#").await;
    assert!(root.continues());
    assert!(root.text().contains("Welcome back"));

    // The gateway keeps the reset code in the trail; options dialed after
    // it must work exactly as from a fresh root.
    let prompt = dial(&w, "s2", PHONE_A, "1*662*800*100#*3").await;
    assert!(prompt.continues());
    assert!(prompt.text().contains("booking ID"));

    let reply = dial(&w, "s2", PHONE_A, "1*662*800*100#*3*9").await;
    assert!(!reply.continues());
    assert!(reply.text().contains("Booking not found"));
}

#[tokio::test]
async fn input_after_a_finished_flow_reports_a_dead_session() {
    let w = world(vec![subject_registered_seconds_ago(3_600)]);
    register(&w, "s1", PHONE_A).await;
    walk(
        &w,
        "s2",
        PHONE_A,
        &["1", "1", "55555", "2", "1", "2026-09-14", "10:30"],
    )
    .await;

    let stale = dial(&w, "s2", PHONE_A, "1*1*55555*2*1*2026-09-14*10:30*1").await;
    assert!(!stale.continues());
    assert!(stale.text().contains("session has ended"));
}
