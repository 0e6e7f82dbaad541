//! Allies Hub - matchmaking core for a chat-platform ally finder bot
//!
//! This crate implements the profile lifecycle, candidate browsing, invite
//! protocol, and report-driven moderation behind ports for the chat
//! transport and the persistence store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
