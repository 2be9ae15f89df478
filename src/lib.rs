//! # Geoindice
//!
//! A geography-tip lookup service. Callers query and add short "indice"
//! records (country, region, category, free-text content, and associated
//! keywords) used to help recognize geographic locations.
//!
//! All state lives in SQLite across three normalized tables (`indice`,
//! `keyword`, `indice_keyword`); keywords are globally deduplicated and
//! linked many-to-many. The store is queried through a thin service façade
//! from both a CLI and a JSON HTTP API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────┐   ┌──────────────┐   ┌───────────────┐
//! │   CLI   │──▶│ QueryService │──▶│    SQLite     │
//! │  HTTP   │   │    store     │   │ indice/keyword │
//! └─────────┘   └──────────────┘   └───────────────┘
//! ```
//!
//! Startup order is fixed: [`schema::ensure_schema`] →
//! [`seed::seed_if_empty`] → serve.
//!
//! ## Quick Start
//!
//! ```bash
//! geoindice init                # create database and schema
//! geoindice seed                # load the sample corpus if empty
//! geoindice list --category Langue
//! geoindice random
//! geoindice serve               # start the HTTP server
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`schema`] | Idempotent schema creation |
//! | [`store`] | Repository over the indice tables |
//! | [`seed`] | Seed-on-empty initialization |
//! | [`service`] | Query service façade |
//! | [`server`] | JSON HTTP server |
//! | [`db`] | Database connection pool |
//! | [`error`] | Failure taxonomy |

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod schema;
pub mod seed;
pub mod server;
pub mod service;
pub mod store;
