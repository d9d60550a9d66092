//! Flow event printer

use huddle_application::{FlowEvent, FlowOutput};
use std::io::Write;
use std::sync::Mutex;
use tracing::warn;

/// Writes each flow event as one JSON line, `{"<port>": <payload>}`.
pub struct JsonLinesFlowOutput {
    out: Mutex<Box<dyn Write + Send>>,
}

impl JsonLinesFlowOutput {
    pub fn stdout() -> Self {
        Self::new(Box::new(std::io::stdout()))
    }

    pub fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }
}

impl FlowOutput for JsonLinesFlowOutput {
    fn send(&self, event: FlowEvent) {
        let line = match serde_json::to_string(&event) {
            Ok(line) => line,
            Err(e) => {
                warn!("Could not encode {} event: {}", event.port(), e);
                return;
            }
        };
        let Ok(mut out) = self.out.lock() else {
            warn!("Flow output is poisoned; dropping {} event", event.port());
            return;
        };
        if let Err(e) = writeln!(out, "{}", line).and_then(|()| out.flush()) {
            warn!("Could not write {} event: {}", event.port(), e);
        }
    }
}
