// ABOUTME: Library crate for the WAVED client exposing the registration wizard and platform API

#![allow(missing_docs)]

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod navigation;
pub mod register;
pub mod session;
pub mod verification;
