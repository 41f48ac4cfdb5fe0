//! port-patch — canonical TCP/NodePort overlay-patch merging for
//! kustomization documents.
//!
//! A kustomization overlay carries a `patches` list whose entries embed
//! RFC 6902-style `add` fragments; for the two port families this tool
//! manages, each fragment's value is a literal block of `port: target`
//! lines. This crate locates the managed fragment for a target path, merges
//! new pairs into it under the family's conflict policy, and re-emits the
//! canonical, numerically sorted form, leaving every other patch entry
//! untouched.
//!
//! # Modules
//!
//! - [`fragment`] — decode/encode of the literal-block body
//! - [`locate`] — managed-vs-opaque entry classification and lookup
//! - [`policy`] — merge-update and exclusive conflict policies
//! - [`merge`] — the orchestrating engine
//! - [`family`] — the fixed tcp / nodeport path families
//! - [`report`] — merge summaries
//! - [`document`] — YAML file load/render/save
//! - [`hostname`] — RFC 1123 hostname-syntax validation
//! - [`value_util`] — generic YAML deep-merge and key-sort helpers

pub mod document;
pub mod family;
pub mod fragment;
pub mod hostname;
pub mod locate;
pub mod merge;
pub mod policy;
pub mod report;
pub mod types;
pub mod value_util;

pub use family::PathFamily;
pub use merge::merge;
pub use policy::MergePolicy;
pub use report::{MergeAction, Report};
pub use types::{DocumentError, MergeError, PortMapping};
