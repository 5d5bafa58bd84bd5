//! Test helpers module
//!
//! This module provides utilities and helpers for testing the group reviews API.
//! It includes mock servers, database helpers, and test context setup.

#![allow(dead_code)]

pub mod database_helper;
pub mod telegram_mock;
pub mod test_context;
pub mod test_data;
pub mod vk_mock;

pub use database_helper::*;
pub use telegram_mock::*;
pub use test_context::*;
pub use test_data::*;
pub use vk_mock::*;
