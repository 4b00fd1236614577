#![allow(dead_code)]

use std::cell::RefCell;

use replica::{DiagnosticSink, Value};
use serde_json::json;

pub fn v(value: serde_json::Value) -> Value {
    Value::from(value)
}

/// A nested application state in the shape the builder is typically used
/// with: a keyed root, nested records, arrays of scalars, and null leaves
/// waiting to be filled in.
pub fn session_state() -> Value {
    v(json!({
        "session": {
            "user": {
                "name": null,
                "roles": [],
                "profile": {
                    "display_name": null,
                    "tags": ["new"]
                }
            },
            "settings": {
                "theme": "dark",
                "flags": ["beta"]
            }
        },
        "revision": 7
    }))
}

/// A flat, untyped state for the simpler flows.
pub fn simple_state() -> Value {
    v(json!({
        "label": "initial",
        "items": ["initial"],
        "nested": {
            "label": "initial"
        }
    }))
}

/// Sink that records every warning for later assertions.
#[derive(Default)]
pub struct CapturingSink {
    messages: RefCell<Vec<String>>,
}

impl CapturingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl DiagnosticSink for CapturingSink {
    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
