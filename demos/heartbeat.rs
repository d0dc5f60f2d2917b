use chrono::Local;
use sentinel::{
    caretaker, ActiveChannelCheck, Caretaker, Config, ConnectionMonitor, ConnectionStatusSource,
    PeriodicScheduler,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Pretend connection manager; the channel drops every few seconds
struct FlakyChannel {
    up: AtomicBool,
}

impl ConnectionStatusSource for FlakyChannel {
    fn is_connected(&self, _context: &str) -> bool {
        self.up.load(Ordering::SeqCst)
    }
}

/// Prints a timestamp on every firing
struct Pulse;

#[caretaker(initial_delay = "500ms", fixed_rate = "${demo.pulse_rate:1s}")]
impl Caretaker for Pulse {
    fn run(&self) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(async move {
            let now = Local::now().format("%H:%M:%S%.3f");
            println!("[{}] pulse", now);
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".to_string()))
        .with_target(false)
        .init();

    let pulse = PeriodicScheduler::annotated(Pulse, &Config::default())?;

    let channel = Arc::new(FlakyChannel { up: AtomicBool::new(true) });
    let check = Arc::new(ActiveChannelCheck::new(channel.clone(), "default"));
    let monitor = ConnectionMonitor::new(check, || {
        println!("connection lost, would reconnect here");
    });
    let heartbeat = PeriodicScheduler::builder(monitor)
        .initial_delay(Duration::from_secs(1))
        .rate(Duration::from_millis(500))
        .build()?;

    pulse.start();
    heartbeat.start();
    // Redundant start only logs a warning
    heartbeat.start();

    let flipper = tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(3)).await;
            let was_up = channel.up.fetch_xor(true, Ordering::SeqCst);
            println!("channel is now {}", if was_up { "down" } else { "up" });
        }
    });

    println!("Press Ctrl+C to stop...");
    tokio::signal::ctrl_c().await?;

    flipper.abort();
    heartbeat.stop();
    pulse.stop();
    // Redundant stop only logs a warning
    pulse.stop();
    Ok(())
}
