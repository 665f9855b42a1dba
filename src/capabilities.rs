//! Capability set: HTTP for the REST backend, key-value for draft
//! persistence, render to wake the shell. We use Crux's built-in
//! capabilities directly; they cover everything this app needs.

use crux_core::render::Render;
use crux_http::Http;
use crux_kv::KeyValue;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub http: Http<Event>,
    pub key_value: KeyValue<Event>,
    pub render: Render<Event>,
}
