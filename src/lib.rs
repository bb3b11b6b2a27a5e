//! repo-review: interactive codebase review sessions backed by hosted LLMs
//!
//! This tool scans a local source tree, summarizes its shape and contents,
//! and submits that summary together with user-supplied context to a hosted
//! LLM provider (Anthropic or Google) for natural-language analysis.

pub mod cli;
pub mod config;
pub mod domain;
pub mod prompt;
pub mod provider;
pub mod scan;
pub mod session;
pub mod utils;
