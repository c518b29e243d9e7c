//! Basic logger usage example
//!
//! Demonstrates root construction, scoped loggers, typed fields and the
//! process-wide logger.
//!
//! Run with: cargo run --example basic_usage

use cleanstack_logging::field::{self, ObjectEncoder, ObjectMarshaler};
use cleanstack_logging::prelude::*;
use cleanstack_logging::{errorf, infof};
use std::sync::Arc;
use std::time::Duration;

struct Order {
    id: u64,
    items: Vec<String>,
}

impl ObjectMarshaler for Order {
    fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> Result<()> {
        enc.add_u64("id", self.id);
        enc.add_i64("item_count", self.items.len() as i64);
        Ok(())
    }
}

fn main() -> Result<()> {
    println!("=== Cleanstack Logging - Basic Usage Example ===\n");

    println!("1. Development logger (colored text on stderr):");
    let dev = logging::new_development("debug")?;
    dev.debug("starting up", &[field::string("version", "0.1.0")]);

    let svc = dev.named("svc").with(&[field::string("env", "local")]);
    svc.info(
        "order placed",
        &[
            field::object(
                "order",
                Order {
                    id: 42,
                    items: vec!["book".to_string(), "pen".to_string()],
                },
            ),
            field::duration("latency", Duration::from_millis(37)),
        ],
    );
    svc.warn("inventory low", &[field::int("remaining", 3)]);
    // Benign for console streams
    let _ = dev.sync();

    println!("\n2. Production logger (JSON on stderr):");
    let prod = logging::new_production("info")?;
    prod.debug("hidden below info", &[]);
    prod.named("db").info(
        "connected",
        &[
            field::strings("hosts", vec!["db-1".to_string(), "db-2".to_string()]),
            field::int64p("pool_size", Some(16)),
            field::stringp("replica", None),
        ],
    );
    let _ = prod.sync();

    println!("\n3. Formatted messages:");
    infof!(prod, "cache warmed in {} ms", 12);
    errorf!(prod, "retrying after {} failures", 2);
    let _ = prod.sync();

    println!("\n4. Process-wide logger:");
    let shared: SharedLogger = Arc::new(prod);
    logging::set_logger(shared);
    logging::get_logger().info("reachable from anywhere", &[]);
    let _ = logging::get_logger().sync();

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
