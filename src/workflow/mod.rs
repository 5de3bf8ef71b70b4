//! Form workflows: validate locally, call the server, update the cache
//!
//! Each workflow runs its client-side checks first, then holds the form's
//! [`SubmitGuard`] for the duration of the request. Dropping the returned
//! future abandons the request and releases the guard.

mod assess;
mod cache;
mod guard;
mod registration;
mod schedule;
mod upload;

pub use assess::{prepare_assessment, submit_assessment};
pub use cache::SeminarCache;
pub use guard::{SubmitGuard, SubmitTicket};
pub use registration::{
    confirm_registration, is_valid_nip, prepare_registration, register_research, RegistrationForm,
};
pub use schedule::{parse_schedule_time, prepare_schedule, schedule_seminar, ScheduleForm};
pub use upload::{
    apply_upload_response, check_upload_target, is_replacement, read_document_files,
    upload_documents, UploadOutcome, UploadRequest,
};
