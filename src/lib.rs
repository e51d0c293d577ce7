//! Jiwa: a small JIRA client for the command line.
//!
//! The [`api`] module is a typed client for the JIRA REST API, including
//! moving issues by status name. The remaining modules make up the
//! command-line tool built on top of it.

pub mod api;
pub mod batch;
pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod input;
pub mod keys;
pub mod logging;
pub mod output;
