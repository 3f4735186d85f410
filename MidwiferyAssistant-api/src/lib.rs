// MidwiferyAssistant-api lib.rs
//
// HTTP layer of the MidwiferyAssistant application: public entities,
// handlers, routes and the OpenAPI document.

pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;
