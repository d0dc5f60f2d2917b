use sentinel::{EventHandler, HandlerError, InvocationErrorPolicy, Segment, SimpleEventHandlerInvoker};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
enum AccountEvent {
    Deposited { account: String, amount: i64 },
    Withdrawn { account: String, amount: i64 },
}

/// Balance projection that can be rebuilt from scratch
#[derive(Default)]
struct Balances {
    totals: Mutex<HashMap<String, i64>>,
}

impl EventHandler<AccountEvent, String> for Balances {
    fn handle(&self, event: &AccountEvent) -> Result<(), HandlerError> {
        let mut totals = self.totals.lock().map_err(|e| e.to_string())?;
        match event {
            AccountEvent::Deposited { account, amount } => *totals.entry(account.clone()).or_default() += amount,
            AccountEvent::Withdrawn { account, amount } => *totals.entry(account.clone()).or_default() -= amount,
        }
        Ok(())
    }

    fn prepare_reset(&self, payload: Option<&String>) -> Result<(), HandlerError> {
        println!("balances: reset requested ({:?})", payload);
        self.totals.lock().map_err(|e| e.to_string())?.clear();
        Ok(())
    }
}

/// Audit trail that refuses to be reset without a reason
struct AuditLog;

impl EventHandler<AccountEvent, String> for AuditLog {
    fn handle(&self, event: &AccountEvent) -> Result<(), HandlerError> {
        println!("audit: {:?}", event);
        Ok(())
    }

    fn prepare_reset(&self, payload: Option<&String>) -> Result<(), HandlerError> {
        match payload {
            Some(reason) => {
                println!("audit: replay because {}", reason);
                Ok(())
            }
            None => Err("audit log needs a reason to replay".into()),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .with_target(false)
        .init();

    let balances = Arc::new(Balances::default());
    let invoker = SimpleEventHandlerInvoker::<AccountEvent, String>::builder()
        .event_handler("projections", balances.clone())
        .event_handler("audit", Arc::new(AuditLog))
        .error_policy(InvocationErrorPolicy::Propagate)
        .build()?;

    let history = vec![
        AccountEvent::Deposited { account: "alice".into(), amount: 100 },
        AccountEvent::Withdrawn { account: "alice".into(), amount: 30 },
        AccountEvent::Deposited { account: "bob".into(), amount: 5 },
    ];

    for event in &history {
        invoker.handle(event, Segment::ROOT)?;
    }
    println!("balances: {:?}", balances.totals.lock().map_err(|e| e.to_string())?);

    // Without a reason the audit log objects, but balances is still cleared
    if let Err(err) = invoker.perform_reset(None) {
        println!("reset reported: {}", err);
    }

    invoker.perform_reset(Some(&"schema change".to_string()))?;
    for event in &history {
        invoker.handle(event, Segment::ROOT)?;
    }
    println!("balances after replay: {:?}", balances.totals.lock().map_err(|e| e.to_string())?);

    Ok(())
}
