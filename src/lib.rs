//! Booking backend - A restaurant table-booking service
//!
//! This library provides the core functionality for the booking backend:
//! sessions with seat accounting, guest bookings, signup/login, and a
//! WebSocket channel for live cancellation notices.

pub mod api;
pub mod config;
pub mod db;
pub mod hub;
pub mod models;
pub mod services;
