//! Threat model core: the resource posture data model, the predicate
//! language used by security checks, and the merge/evaluation services.
pub mod domain;
pub mod predicate;
pub mod services;
