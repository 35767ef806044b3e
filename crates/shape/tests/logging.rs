//! Trace events emitted while parsing.

use std::io;
use std::sync::{Arc, Mutex};

use nebula_shape::prelude::*;

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Capture {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn capture_events(f: impl FnOnce()) -> String {
    let capture = Capture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    capture.contents()
}

#[test]
fn rejected_union_candidates_are_traced() {
    let logs = capture_events(|| {
        let _ = union![string(), number()].parse(&Value::Bool(true));
    });
    assert_eq!(logs.matches("union candidate rejected").count(), 2);
    assert!(logs.contains("parse failed"));
}

#[test]
fn recursion_guard_is_logged_at_debug() {
    let logs = capture_events(|| {
        let options = ParseOptions::default().with_max_depth(1);
        let _ = array(array(number())).parse_with(&Value::from(vec![vec![1]]), &options);
    });
    assert!(logs.contains("DEBUG"));
    assert!(logs.contains("recursion limit reached"));
}

#[test]
fn successful_parse_is_silent() {
    let logs = capture_events(|| {
        let _ = number().parse(&Value::from(1));
    });
    assert!(logs.is_empty());
}
