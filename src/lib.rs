//! # icp-mgr
//!
//! A small developer companion for Internet Computer projects made of a web
//! frontend and one or more backend canisters.
//!
//! This library provides the core functionality for the `icp-mgr` CLI tool:
//! rendering an annotated project tree with per-language line counts,
//! removing build and dependency artifacts, and driving the external `npm`
//! and `dfx` tools to build the frontend and redeploy the canisters.

pub mod cleaner;
pub mod cli;
pub mod config;
pub mod exclusions;
pub mod logging;
pub mod orchestrator;
pub mod process;
pub mod tree;
