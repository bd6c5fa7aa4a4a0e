//! # Signal Bridge Demo
//!
//! This example walks through the life of the single callback slot:
//! 1. Events pushed before any registration go to the fallback path
//! 2. A registered callback receives every event, in order
//! 3. Re-registering replaces the callback
//! 4. A dropping sink discards events nobody listens to
//!
//! ## Run
//!
//! ```bash
//! cargo run --example signal_demo
//! ```

use parking_lot::Mutex;
use std::sync::Arc;

use keycard_signal::{Delivery, EventSink, SignalEmitter};

fn main() {
    println!("=================================================");
    println!("           KEYCARD SIGNAL BRIDGE DEMO");
    println!("=================================================\n");

    // =========================================================================
    // STEP 1: No callback registered yet
    // =========================================================================
    println!("1. Sending before registration...\n");

    let sink = EventSink::with_fallback(|payload: &str| {
        println!("   [fallback] {}", payload);
    });
    let emitter = SignalEmitter::new(sink.clone());

    let outcome = emitter
        .send_keycard_connected(&serde_json::json!({"reader": "demo"}))
        .expect("Failed to send signal");
    println!("   Outcome: {:?}\n", outcome);

    // =========================================================================
    // STEP 2: Register a callback
    // =========================================================================
    println!("2. Registering a callback...\n");

    let log = Arc::new(Mutex::new(Vec::new()));
    let callback_log = log.clone();
    sink.set_listener(move |payload: &str| {
        callback_log.lock().push(payload.to_string());
    });

    sink.notify("evt1");
    sink.notify("evt2");
    println!("   Log: {:?}\n", log.lock());

    // =========================================================================
    // STEP 3: Replace the callback
    // =========================================================================
    println!("3. Replacing the callback...\n");

    sink.set_listener(|payload: &str| println!("   [second] {}", payload));
    let outcome = sink.deliver("evt3");
    assert_eq!(outcome, Delivery::Delivered);
    println!(
        "   First callback still holds {} events\n",
        log.lock().len()
    );

    // =========================================================================
    // STEP 4: Dropping sink
    // =========================================================================
    println!("4. Dropping sink without a listener...\n");

    let quiet = EventSink::dropping();
    println!("   notify() -> {}", quiet.notify("lost"));
    println!("   deliver() -> {:?}", quiet.deliver("lost"));

    println!("\n=================================================");
    println!("                 DEMO COMPLETE");
    println!("=================================================");
}
