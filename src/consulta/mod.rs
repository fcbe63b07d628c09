//! Consulta module for appointment records held by the external API.
//!
//! This module handles:
//! - Record and payload types
//! - The Consulta API client and its explicit call outcomes
//! - Looking up a single record in a listing
//! - Mock API server for testing

pub mod client;
pub mod lookup;
pub mod mock;
pub mod types;

pub use client::{ApiOutcome, ConsultaClient, Endpoint};
pub use lookup::find_by_id;
pub use mock::{MockConfig, MockConsultaApi, RecordedCall};
pub use types::{Consulta, ConsultaForm, ConsultaId, ConsultaUpdate, NewConsulta};
