//! Transcode Service Client
//!
//! This library provides the client-side core for a chunked distributed
//! video transcoding service: parameter validation, multipart job
//! submission, a cancelable polling loop that reconciles the local job
//! snapshot against the server, and artifact retrieval.

pub mod config;
pub mod models;
pub mod services;
