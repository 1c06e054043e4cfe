//! Submission module: domain, repository and service layers.
//!
//! Both the backend and the standalone deployment run their `/submit` and `/view`
//! handlers through `SubmissionService`.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::SubmissionService;
