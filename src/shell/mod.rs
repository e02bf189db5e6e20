// Composition root for the tracked times API.
//
// Responsibilities
// - Read config from file and environment.
// - Instantiate concrete infrastructure implementations.
// - Wire implementations into use case handlers and expose them over HTTP and GraphQL.

pub mod config;
pub mod graphql;
pub mod http;
pub mod identity;
pub mod state;
