//! Minimal embedding example for revwatch-core
//!
//! This example demonstrates using revwatch-core as a library in a custom
//! application. Poll cycles are driven by hand, so the example runs
//! deterministically and exits on its own.

use revwatch_core::config::{EngineConfig, NotifierConfig, ReviewSourceConfig, RevwatchConfig};
use revwatch_core::{Notifier, Result, ReviewSource, RevwatchEngine};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Review source that replays a fixed review timeline
struct DemoSource {
    timeline: Mutex<VecDeque<Value>>,
}

impl DemoSource {
    fn new() -> Self {
        // Reviewing, still reviewing, then approved
        let timeline = VecDeque::from([
            json!({"homeworks": [
                {"homework_name": "fitness_tracker.zip", "status": "reviewing"}
            ]}),
            json!({"homeworks": [
                {"homework_name": "fitness_tracker.zip", "status": "reviewing"}
            ]}),
            json!({"homeworks": [
                {"homework_name": "fitness_tracker.zip", "status": "approved"}
            ]}),
        ]);

        Self {
            timeline: Mutex::new(timeline),
        }
    }
}

#[async_trait::async_trait]
impl ReviewSource for DemoSource {
    async fn fetch(&self, _from_date: i64) -> Result<Value> {
        let next = self.timeline.lock().unwrap().pop_front();
        Ok(next.unwrap_or_else(|| json!({ "homeworks": [] })))
    }

    fn source_name(&self) -> &'static str {
        "demo"
    }
}

/// Notifier that prints to stdout instead of a chat
struct ConsoleNotifier;

#[async_trait::async_trait]
impl Notifier for ConsoleNotifier {
    async fn send(&self, text: &str) -> Result<()> {
        println!("[Notify] {}", text);
        Ok(())
    }

    fn notifier_name(&self) -> &'static str {
        "console"
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Embedded revwatch-core Example ===\n");

    // The engine reads only the engine section here; the component
    // sections describe what a daemon would have built from them
    let config = RevwatchConfig {
        source: ReviewSourceConfig::Practicum {
            endpoint: None,
            token: "demo-token".to_string(),
        },
        notifier: NotifierConfig::Telegram {
            bot_token: "123456:demo".to_string(),
            chat_id: "0".to_string(),
        },
        engine: EngineConfig {
            poll_interval_secs: 600,
            event_channel_capacity: 100, // Small buffer for example
        },
    };

    // Create engine with custom components
    println!("1. Creating engine...");
    let (mut engine, mut event_rx) = RevwatchEngine::new(
        Box::new(DemoSource::new()),
        Box::new(ConsoleNotifier),
        config,
    )?;

    // Drive poll cycles by hand, no sleeping between them
    println!("2. Driving poll cycles...\n");
    for cycle in 1..=3 {
        println!("--- cycle {} ---", cycle);
        engine.run_cycle().await;

        while let Ok(event) = event_rx.try_recv() {
            println!("[Event] {:?}", event);
        }
        println!();
    }

    println!("=== Embedding Successful ===");
    println!("Key Points:");
    println!("- Engine lifecycle is fully controlled by the application");
    println!("- Cycles run on demand; the daemon's sleep loop is optional");
    println!("- All components are custom (not revwatchd defaults)");

    Ok(())
}
