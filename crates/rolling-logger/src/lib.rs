//! Rolling Logger
//!
//! A `tracing` layer that mirrors every event to the console and keeps the
//! newest entries in a fixed-size circular buffer.

use std::collections::VecDeque;
use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};

/// Entries kept when the caller does not ask for a specific size
pub const DEFAULT_CAPACITY: usize = 200;

/// One captured log event
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:>5} [{}] {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Circular buffer of the most recent entries
#[derive(Debug)]
pub struct RollingBuffer {
    capacity: usize,
    entries: Mutex<VecDeque<LogEntry>>,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append an entry, evicting the oldest one when full
    pub fn push(&self, entry: LogEntry) {
        let mut entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Copy of the retained entries, oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.iter().cloned().collect()
    }

    /// Retained entries as display lines, oldest first
    pub fn dump(&self) -> String {
        let entries = self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut out = String::new();
        for entry in entries.iter() {
            let _ = writeln!(out, "{}", entry);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

/// Collects the `message` field and any structured fields of an event
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}

/// Layer that records events into a [`RollingBuffer`]
pub struct RollingLayer {
    buffer: Arc<RollingBuffer>,
    echo: bool,
}

impl RollingLayer {
    /// Record and echo to the console
    pub fn new(buffer: Arc<RollingBuffer>) -> Self {
        Self { buffer, echo: true }
    }

    /// Record only
    pub fn silent(buffer: Arc<RollingBuffer>) -> Self {
        Self { buffer, echo: false }
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let meta = event.metadata();
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: *meta.level(),
            target: meta.target().to_string(),
            message: visitor.finish(),
        };

        if self.echo {
            emit(&entry);
        }
        self.buffer.push(entry);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(entry: &LogEntry) {
    let line = wasm_bindgen::JsValue::from_str(&entry.to_string());
    match entry.level {
        Level::ERROR => web_sys::console::error_1(&line),
        Level::WARN => web_sys::console::warn_1(&line),
        Level::INFO => web_sys::console::info_1(&line),
        _ => web_sys::console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(entry: &LogEntry) {
    eprintln!("{}", entry);
}

/// Install the global subscriber. Returns the shared buffer.
pub fn init(level: Level, capacity: usize) -> Result<Arc<RollingBuffer>, TryInitError> {
    let buffer = Arc::new(RollingBuffer::new(capacity));
    tracing_subscriber::registry()
        .with(LevelFilter::from_level(level))
        .with(RollingLayer::new(buffer.clone()))
        .try_init()?;
    Ok(buffer)
}
