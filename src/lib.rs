//! Energy Intake: conversational household energy survey and cost estimator.

pub mod api;
pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod intake;
pub mod repl;
