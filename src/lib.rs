//! Client library for the retrieval endpoint of the Pocket read-later service.
//!
//! A call goes through three stages: [`pocket_api::query`] assembles the request from
//! optional filters and [`pocket_api::credentials::Credentials`], a
//! [`pocket_api::transport::PocketTransport`] posts it as JSON, and
//! [`pocket_api::normalize`] decodes the body and flattens the keyed item list.
//! [`pocket_api::client::PocketClient`] wires the three together.

pub mod cache;
pub mod pocket_api;
