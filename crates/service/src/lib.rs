//! Service layer for the guestbook.
//! - Holds the record/list rules independent of the web framework.
//! - Talks to storage only through `SubmissionRepository`.

pub mod errors;
pub mod submission;
