//! HTTP front end: interactive page and JSON API

pub mod api;
