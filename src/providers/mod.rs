//! Provider submitters.
//!
//! One submodule per provider family. Every submitter receives already
//! normalized, already batched URLs and translates the provider-specific
//! HTTP exchange into uniform [`SubmissionResult`](crate::report::SubmissionResult)s.

mod bulk;
mod signed;

pub(crate) use bulk::BulkSubmitter;
pub(crate) use signed::{SignedOutcome, SignedSubmitter};
