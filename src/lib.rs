//! Reports AWS CodePipeline stage transitions as GitHub commit statuses.
//!
//! One [`handler::Handler`] invocation takes a CodePipeline "Stage Execution
//! State Change" event, drops it when the branch whitelist or the Source
//! stage rule says so, resolves the commit the execution built, obtains a
//! GitHub credential and posts exactly one commit status.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod handler;
pub mod payload;
pub mod providers;
