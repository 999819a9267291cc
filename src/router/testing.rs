//! End-to-end router tests
//!
//! Drive whole conversations through `FlowRouter::handle` against an
//! in-memory database and a tempdir file store, asserting on replies and
//! persisted rows.

use super::state::SessionState;
use super::FlowRouter;
use crate::db::{ApplicationStatus, Database, PostingStatus};
use crate::session::SessionStore;
use crate::transport::{
    InboundEvent, InboundPayload, LocalFileStore, OutboundBody, OutboundMessage,
};
use std::sync::Arc;
use std::time::Duration;

struct Fixture {
    router: FlowRouter,
    _dir: tempfile::TempDir,
}

fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let router = FlowRouter::new(
        Database::open_in_memory().unwrap(),
        Arc::new(SessionStore::new(Duration::from_secs(600))),
        Arc::new(LocalFileStore::new(dir.path().join("cv"))),
    );
    Fixture { router, _dir: dir }
}

impl Fixture {
    async fn text(&self, sender: &str, text: &str) -> Vec<OutboundMessage> {
        self.router
            .handle(InboundEvent {
                sender: sender.to_string(),
                payload: InboundPayload::Text {
                    text: text.to_string(),
                },
            })
            .await
    }

    async fn document(
        &self,
        sender: &str,
        filename: &str,
        mime: &str,
        data: Vec<u8>,
    ) -> Vec<OutboundMessage> {
        self.router
            .handle(InboundEvent {
                sender: sender.to_string(),
                payload: InboundPayload::Document {
                    filename: filename.to_string(),
                    mime: mime.to_string(),
                    data,
                },
            })
            .await
    }

    async fn register_seeker(&self, channel: &str, name: &str) {
        self.text(channel, "hi").await;
        self.text(channel, "1").await;
        self.text(channel, name).await;
        self.text(channel, "Bandung").await;
    }

    async fn register_employer(&self, channel: &str, company: &str) {
        self.text(channel, "hi").await;
        self.text(channel, "2").await;
        self.text(channel, company).await;
        self.text(channel, "Jakarta").await;
    }

    /// Drive the posting flow to publication; returns nothing, the posting
    /// gets the next JOB id.
    async fn publish_posting(&self, channel: &str, position: &str, skills: &str) {
        self.text(channel, "1").await;
        self.text(channel, position).await;
        self.text(channel, "Builds and maintains services").await;
        self.text(channel, "Remote").await;
        self.text(channel, skills).await;
        self.text(channel, "ya").await;
    }
}

fn body(message: &OutboundMessage) -> &str {
    match &message.body {
        OutboundBody::Text { text } => text,
        OutboundBody::Document { .. } => panic!("expected text reply"),
    }
}

fn single(replies: &[OutboundMessage]) -> &str {
    assert_eq!(replies.len(), 1, "expected one reply, got {replies:?}");
    body(&replies[0])
}

const SEEKER: &str = "628111@wa";
const EMPLOYER: &str = "628222@wa";

#[tokio::test]
async fn unregistered_sender_always_gets_role_prompt() {
    let fx = fixture();
    let replies = fx.text(SEEKER, "anything at all").await;
    assert!(single(&replies).contains("1. Job seeker"));
    assert_eq!(fx.router.sessions.get(SEEKER), Some(SessionState::ChooseRole));
}

#[tokio::test]
async fn seeker_registration_end_to_end() {
    let fx = fixture();
    fx.text(SEEKER, "hello").await;

    let replies = fx.text(SEEKER, "1").await;
    assert!(single(&replies).contains("full name"));

    let replies = fx.text(SEEKER, "Budi").await;
    assert!(single(&replies).contains("Budi"));

    let replies = fx.text(SEEKER, "Bandung").await;
    assert!(single(&replies).contains("all set"));

    let identity = crate::identity::resolve(&fx.router.db, SEEKER).unwrap().unwrap();
    assert_eq!(identity.user.name, "Budi");
    assert!(identity.profile_id.starts_with("JSK"));
    assert!(fx.router.sessions.get(SEEKER).is_none());
}

#[tokio::test]
async fn employer_registration_end_to_end() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;

    let identity = crate::identity::resolve(&fx.router.db, EMPLOYER).unwrap().unwrap();
    assert!(identity.profile_id.starts_with("CMP"));
    assert_eq!(identity.user.name, "PT Maju");
}

#[tokio::test]
async fn invalid_role_choice_reprompts_without_advancing() {
    let fx = fixture();
    fx.text(SEEKER, "hi").await;
    let replies = fx.text(SEEKER, "banana").await;
    assert!(single(&replies).contains("1 (job seeker) or 2"));
    assert_eq!(fx.router.sessions.get(SEEKER), Some(SessionState::ChooseRole));
}

#[tokio::test]
async fn empty_name_is_rejected() {
    let fx = fixture();
    fx.text(SEEKER, "hi").await;
    fx.text(SEEKER, "1").await;
    let replies = fx.text(SEEKER, "   ").await;
    assert!(single(&replies).contains("can't be empty"));
    assert_eq!(fx.router.sessions.get(SEEKER), Some(SessionState::SeekerName));
}

#[tokio::test]
async fn menu_escape_discards_in_progress_flow() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.text(EMPLOYER, "1").await;
    fx.text(EMPLOYER, "Half-entered position").await;

    let replies = fx.text(EMPLOYER, "menu").await;
    assert!(single(&replies).contains("What would you like to do?"));
    assert!(fx.router.sessions.get(EMPLOYER).is_none());

    // Restarting begins from the first step, not the abandoned one.
    let replies = fx.text(EMPLOYER, "1").await;
    assert!(single(&replies).contains("position title"));
}

#[tokio::test]
async fn posting_flow_publishes_with_skills() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;

    fx.text(EMPLOYER, "1").await;
    fx.text(EMPLOYER, "Backend Engineer").await;
    fx.text(EMPLOYER, "Builds APIs").await;
    fx.text(EMPLOYER, "Remote").await;
    let replies = fx.text(EMPLOYER, "Go, SQL").await;
    let summary = single(&replies);
    assert!(summary.contains("Backend Engineer"));
    assert!(summary.contains("Go, SQL"));

    let replies = fx.text(EMPLOYER, "ya").await;
    assert!(single(&replies).contains("JOB001"));

    let detail = fx.router.db.posting_detail("JOB001").unwrap().unwrap();
    assert_eq!(detail.status, PostingStatus::Active);
    assert_eq!(detail.skills, vec!["Go", "SQL"]);
    assert!(fx.router.sessions.get(EMPLOYER).is_none());
}

#[tokio::test]
async fn posting_confirm_anything_but_yes_cancels() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.text(EMPLOYER, "1").await;
    fx.text(EMPLOYER, "Backend Engineer").await;
    fx.text(EMPLOYER, "Builds APIs").await;
    fx.text(EMPLOYER, "Remote").await;
    fx.text(EMPLOYER, "Go").await;

    let replies = fx.text(EMPLOYER, "hmm no").await;
    assert!(single(&replies).contains("discarded"));
    assert!(fx.router.db.active_postings().unwrap().is_empty());
    assert!(fx.router.sessions.get(EMPLOYER).is_none());
}

#[tokio::test]
async fn duplicate_skills_collapse_to_one_link() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go, go, GO").await;

    let detail = fx.router.db.posting_detail("JOB001").unwrap().unwrap();
    assert_eq!(detail.skills, vec!["Go"]);
}

#[tokio::test]
async fn browse_apply_with_cv_end_to_end() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    let replies = fx.text(SEEKER, "1").await;
    let listing = single(&replies);
    assert!(listing.contains("Backend Engineer"));
    assert!(listing.contains("JOB001"));

    let replies = fx.text(SEEKER, "1").await;
    assert!(single(&replies).contains("lamar JOB001"));

    let replies = fx.text(SEEKER, "lamar JOB001").await;
    assert!(single(&replies).contains("Send your CV"));

    let replies = fx
        .document(SEEKER, "cv.pdf", "application/pdf", b"%PDF-1.4".to_vec())
        .await;
    assert!(single(&replies).contains("submitted"));
    assert!(fx.router.sessions.get(SEEKER).is_none());

    let seeker = crate::identity::resolve(&fx.router.db, SEEKER).unwrap().unwrap();
    assert!(fx.router.db.application_exists(&seeker.profile_id, "JOB001").unwrap());

    // File landed in the store under the generated name.
    let applicants = fx.router.db.posting_applicants("JOB001").unwrap();
    let stored = applicants[0].resume_stored_name.clone().unwrap();
    assert!(fx.router.files.exists(&stored).await);
}

#[tokio::test]
async fn selecting_by_posting_id_also_works() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    fx.text(SEEKER, "1").await;
    let replies = fx.text(SEEKER, "job001").await;
    assert!(single(&replies).contains("Backend Engineer"));
    assert!(fx.router.sessions.get(SEEKER).is_none());
}

#[tokio::test]
async fn viewing_a_detail_does_not_start_an_application() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    fx.text(SEEKER, "1").await;
    let replies = fx.text(SEEKER, "1").await;
    assert!(single(&replies).contains("lamar JOB001"));
    assert!(fx.router.sessions.get(SEEKER).is_none());

    // A document right after browsing must not file an application.
    let replies = fx
        .document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec())
        .await;
    assert!(single(&replies).contains("lamar"));
    let seeker = crate::identity::resolve(&fx.router.db, SEEKER).unwrap().unwrap();
    assert!(!fx.router.db.application_exists(&seeker.profile_id, "JOB001").unwrap());
}

#[tokio::test]
async fn applied_seeker_can_still_view_posting_details() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;
    fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec()).await;

    fx.text(SEEKER, "1").await;
    let replies = fx.text(SEEKER, "1").await;
    let detail = single(&replies);
    assert!(detail.contains("Backend Engineer"));
    assert!(detail.contains("already applied"));
    assert!(fx.router.sessions.get(SEEKER).is_none());
}

#[tokio::test]
async fn numeric_pick_resolves_against_the_pinned_listing() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Alpha Role", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    fx.text(SEEKER, "1").await;

    // A posting published after the listing must not shift the numbers
    // the seeker is looking at.
    fx.publish_posting(EMPLOYER, "Beta Role", "SQL").await;

    let replies = fx.text(SEEKER, "2").await;
    assert!(single(&replies).contains("couldn't find that posting"));

    let replies = fx.text(SEEKER, "1").await;
    assert!(single(&replies).contains("Alpha Role"));
}

#[tokio::test]
async fn direct_apply_command_skips_the_listing() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    let replies = fx.text(SEEKER, "lamar job001").await;
    assert!(single(&replies).contains("Send your CV"));
    assert!(matches!(
        fx.router.sessions.get(SEEKER),
        Some(SessionState::UploadCv { .. })
    ));

    fx.text(SEEKER, "menu").await;
    let replies = fx.text(SEEKER, "apply JOB777").await;
    assert!(single(&replies).contains("couldn't find that posting"));
}

#[tokio::test]
async fn reapplying_is_blocked() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    fx.text(SEEKER, "lamar JOB001").await;
    fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec()).await;

    let replies = fx.text(SEEKER, "lamar JOB001").await;
    assert!(single(&replies).contains("already applied"));
    assert!(fx.router.sessions.get(SEEKER).is_none());
}

#[tokio::test]
async fn cv_validation_failures_keep_the_upload_step() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;

    let replies = fx.document(SEEKER, "photo.png", "image/png", b"png".to_vec()).await;
    assert!(single(&replies).contains("PDF, DOC or DOCX"));

    let oversized = vec![0u8; crate::validation::MAX_CV_BYTES + 1];
    let replies = fx.document(SEEKER, "cv.pdf", "application/pdf", oversized).await;
    assert!(single(&replies).contains("5 MB"));

    // Still waiting for the CV; nothing recorded.
    assert!(matches!(
        fx.router.sessions.get(SEEKER),
        Some(SessionState::UploadCv { .. })
    ));
    let seeker = crate::identity::resolve(&fx.router.db, SEEKER).unwrap().unwrap();
    assert!(!fx.router.db.application_exists(&seeker.profile_id, "JOB001").unwrap());

    // A valid resend then succeeds.
    let replies = fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec()).await;
    assert!(single(&replies).contains("submitted"));
}

#[tokio::test]
async fn storage_failure_keeps_the_upload_step() {
    use crate::transport::FileStore;
    use async_trait::async_trait;

    struct BrokenStore;

    #[async_trait]
    impl FileStore for BrokenStore {
        async fn put(&self, _name: &str, _data: &[u8]) -> std::io::Result<()> {
            Err(std::io::Error::other("disk full"))
        }
        async fn get(&self, _name: &str) -> std::io::Result<Vec<u8>> {
            Err(std::io::Error::other("disk full"))
        }
        async fn exists(&self, _name: &str) -> bool {
            false
        }
    }

    let fx = Fixture {
        router: FlowRouter::new(
            Database::open_in_memory().unwrap(),
            Arc::new(SessionStore::new(Duration::from_secs(600))),
            Arc::new(BrokenStore),
        ),
        _dir: tempfile::tempdir().unwrap(),
    };
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;

    let replies = fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec()).await;
    assert!(single(&replies).contains("send it again"));
    assert!(matches!(
        fx.router.sessions.get(SEEKER),
        Some(SessionState::UploadCv { .. })
    ));
    let seeker = crate::identity::resolve(&fx.router.db, SEEKER).unwrap().unwrap();
    assert!(!fx.router.db.application_exists(&seeker.profile_id, "JOB001").unwrap());
}

#[tokio::test]
async fn batal_cancels_like_menu() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.text(EMPLOYER, "1").await;
    fx.text(EMPLOYER, "Half-entered").await;

    let replies = fx.text(EMPLOYER, "batal").await;
    assert!(single(&replies).contains("What would you like to do?"));
    assert!(fx.router.sessions.get(EMPLOYER).is_none());
}

#[tokio::test]
async fn role_choice_accepts_keywords() {
    let fx = fixture();
    fx.text(SEEKER, "hi").await;
    let replies = fx.text(SEEKER, "pencari").await;
    assert!(single(&replies).contains("full name"));

    fx.text(EMPLOYER, "hi").await;
    let replies = fx.text(EMPLOYER, "Employer").await;
    assert!(single(&replies).contains("company name"));
}

#[tokio::test]
async fn text_while_awaiting_cv_asks_for_document() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;

    let replies = fx.text(SEEKER, "here is my cv").await;
    assert!(single(&replies).contains("document"));
    assert!(matches!(
        fx.router.sessions.get(SEEKER),
        Some(SessionState::UploadCv { .. })
    ));
}

#[tokio::test]
async fn filter_lists_only_matching_postings() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go, SQL").await;
    fx.publish_posting(EMPLOYER, "Designer", "Figma").await;
    fx.register_seeker(SEEKER, "Budi").await;

    let replies = fx.text(SEEKER, "filter go").await;
    let listing = single(&replies);
    assert!(listing.contains("Backend Engineer"));
    assert!(!listing.contains("Designer"));

    let replies = fx.text(SEEKER, "filter cobol").await;
    assert!(single(&replies).contains("No openings match"));
}

#[tokio::test]
async fn application_status_listing() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    let replies = fx.text(SEEKER, "2").await;
    assert!(single(&replies).contains("haven't applied"));

    fx.text(SEEKER, "lamar JOB001").await;
    fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec()).await;

    let replies = fx.text(SEEKER, "2").await;
    let listing = single(&replies);
    assert!(listing.contains("Backend Engineer"));
    assert!(listing.contains("Submitted"));
}

#[tokio::test]
async fn applicant_listing_and_cv_retrieval() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;
    fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF-data".to_vec()).await;

    let replies = fx.text(EMPLOYER, "2").await;
    assert!(single(&replies).contains("Backend Engineer"));

    let replies = fx.text(EMPLOYER, "1").await;
    let listing = single(&replies);
    assert!(listing.contains("Budi"));
    assert!(listing.contains("APP001"));

    let replies = fx.text(EMPLOYER, "1").await;
    assert_eq!(replies.len(), 2);
    match &replies[1].body {
        OutboundBody::Document { filename, mime, data } => {
            assert_eq!(filename, "cv.pdf");
            assert_eq!(mime, "application/pdf");
            assert_eq!(data, b"%PDF-data");
        }
        other => panic!("expected document, got {other:?}"),
    }
    assert!(fx.router.sessions.get(EMPLOYER).is_none());
}

#[tokio::test]
async fn accept_command_updates_status_and_notifies_applicant() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;
    fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec()).await;

    let replies = fx.text(EMPLOYER, "terima APP001").await;
    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0].to, EMPLOYER);
    assert!(body(&replies[0]).contains("Accepted"));
    assert_eq!(replies[1].to, SEEKER);
    assert!(body(&replies[1]).contains("accepted"));

    let seeker = crate::identity::resolve(&fx.router.db, SEEKER).unwrap().unwrap();
    let rows = fx.router.db.seeker_applications(&seeker.profile_id).unwrap();
    assert_eq!(rows[0].status, ApplicationStatus::Accepted);
}

#[tokio::test]
async fn status_commands_require_ownership() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;
    fx.document(SEEKER, "cv.pdf", "application/pdf", b"%PDF".to_vec()).await;

    fx.register_employer("628333@wa", "PT Lain").await;
    let replies = fx.text("628333@wa", "terima APP001").await;
    assert!(single(&replies).contains("couldn't find application"));
    let replies = fx.text("628333@wa", "tutup JOB001").await;
    assert!(single(&replies).contains("couldn't find posting"));

    let seeker = crate::identity::resolve(&fx.router.db, SEEKER).unwrap().unwrap();
    let rows = fx.router.db.seeker_applications(&seeker.profile_id).unwrap();
    assert_eq!(rows[0].status, ApplicationStatus::Submitted);
}

#[tokio::test]
async fn posting_toggle_commands_work_from_any_state() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;

    // Mid-flow: start another posting, then toggle the first one.
    fx.text(EMPLOYER, "1").await;
    let replies = fx.text(EMPLOYER, "tutup JOB001").await;
    assert!(single(&replies).contains("closed"));
    assert_eq!(
        fx.router.sessions.get(EMPLOYER),
        Some(SessionState::PostPosition)
    );

    let detail = fx.router.db.posting_detail("JOB001").unwrap().unwrap();
    assert_eq!(detail.status, PostingStatus::Closed);

    // Closed postings vanish from the seeker listing.
    fx.register_seeker(SEEKER, "Budi").await;
    let replies = fx.text(SEEKER, "1").await;
    assert!(single(&replies).contains("no open positions"));

    let replies = fx.text(EMPLOYER, "aktifkan JOB001").await;
    assert!(single(&replies).contains("open again"));
}

#[tokio::test]
async fn mismatched_session_state_recovers() {
    let fx = fixture();
    fx.register_seeker(SEEKER, "Budi").await;

    // A seeker holding an employer-only state can only come from a bug or
    // a stale store; the router resets rather than guessing.
    fx.router.sessions.set(SEEKER, SessionState::PostPosition);
    let replies = fx.text(SEEKER, "whatever").await;
    assert!(single(&replies).contains("reset"));
    assert!(fx.router.sessions.get(SEEKER).is_none());
}

#[tokio::test]
async fn image_while_awaiting_cv_is_rejected() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;
    fx.text(SEEKER, "lamar JOB001").await;

    let replies = fx
        .router
        .handle(InboundEvent {
            sender: SEEKER.to_string(),
            payload: InboundPayload::Image,
        })
        .await;
    assert!(single(&replies).contains("PDF, DOC or DOCX"));
}

#[tokio::test]
async fn unknown_menu_input_is_handled() {
    let fx = fixture();
    fx.register_seeker(SEEKER, "Budi").await;
    let replies = fx.text(SEEKER, "gibberish").await;
    assert!(single(&replies).contains("didn't understand"));
}

#[tokio::test]
async fn indonesian_menu_synonyms_work() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;
    fx.register_seeker(SEEKER, "Budi").await;

    let replies = fx.text(SEEKER, "loker").await;
    assert!(single(&replies).contains("Backend Engineer"));

    let replies = fx.text(EMPLOYER, "pelamar").await;
    assert!(single(&replies).contains("Backend Engineer"));
}

#[tokio::test]
async fn manage_menu_shows_toggle_instructions() {
    let fx = fixture();
    fx.register_employer(EMPLOYER, "PT Maju").await;
    fx.publish_posting(EMPLOYER, "Backend Engineer", "Go").await;

    let replies = fx.text(EMPLOYER, "3").await;
    let listing = single(&replies);
    assert!(listing.contains("tutup"));
    assert!(listing.contains("JOB001"));

    let replies = fx.text(EMPLOYER, "1").await;
    assert!(single(&replies).contains("tutup JOB001"));
    assert!(fx.router.sessions.get(EMPLOYER).is_none());
}
