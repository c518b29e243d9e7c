//! Integration tests for the logging contract
//!
//! These tests verify:
//! - Field encoding through a real logger
//! - With/Named scoping and non-mutation
//! - Sync semantics in both dispatch modes
//! - File output and log injection prevention
//! - Root constructors, `must` and the global logger

use cleanstack_logging::field::{self, DictObject, ObjectEncoder, ObjectMarshaler};
use cleanstack_logging::logging::{self, Context, LoggerConfig, TracingContext};
use cleanstack_logging::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// JSON output with the environment's other encoder settings
fn memory_logger(config: LoggerConfig) -> (FieldLogger, MemoryAppender) {
    let memory = MemoryAppender::new();
    let logger = config
        .with_level("debug")
        .with_format(OutputFormat::Json)
        .build_with(Box::new(memory.clone()))
        .expect("Failed to build logger");
    (logger, memory)
}

/// Only the user-supplied fields of a JSON record
fn user_fields(record: &Value) -> Value {
    let mut object = record.as_object().cloned().unwrap_or_default();
    for key in ["ts", "level", "logger", "msg", "stacktrace"] {
        object.remove(key);
    }
    Value::Object(object)
}

#[test]
fn test_skip_and_nil_error_are_absent() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    let none: Option<io::Error> = None;
    logger.info(
        "profile",
        &[
            field::string("user", "alice"),
            field::int("age", 30),
            field::skip(),
            field::err_opt(none),
        ],
    );

    let record = &memory.records()[0];
    assert_eq!(user_fields(record), json!({"user": "alice", "age": 30}));
}

#[test]
fn test_reserved_field_keys_keep_entry_metadata() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    logger.named("disk").error(
        "disk full",
        &[
            field::string("msg", "x"),
            field::string("level", "debug"),
            field::string("logger", "other"),
            field::string("ts", "yesterday"),
            field::string("stacktrace", "none"),
        ],
    );

    let record = &memory.records()[0];
    assert_eq!(record["msg"], "disk full");
    assert_eq!(record["level"], "error");
    assert_eq!(record["logger"], "disk");
    assert_ne!(record["ts"], "yesterday");
    assert_eq!(record["fields.msg"], "x");
    assert_eq!(record["fields.level"], "debug");
    assert_eq!(record["fields.logger"], "other");
    assert_eq!(record["fields.ts"], "yesterday");
    assert_eq!(record["fields.stacktrace"], "none");
}

#[test]
fn test_development_named_with_scenario() {
    let (base, memory) = memory_logger(LoggerConfig::development());
    let child = base.named("svc").with(&[field::string("env", "test")]);

    child.info("from child", &[]);
    base.info("from base", &[]);

    let records = memory.records();
    assert_eq!(records[0]["logger"], "svc");
    assert_eq!(records[0]["env"], "test");
    assert_eq!(records[0]["level"], "INFO");
    assert!(records[1].get("logger").is_none());
    assert!(records[1].get("env").is_none());
}

#[test]
fn test_development_text_output() {
    let memory = MemoryAppender::new();
    let base = LoggerConfig::development()
        .build_with(Box::new(memory.clone()))
        .unwrap();

    base.named("svc")
        .with(&[field::string("env", "test")])
        .info("ready", &[]);

    let line = &memory.lines()[0];
    assert!(line.contains("[INFO ] svc - ready"));
    assert!(line.contains(r#""env":"test""#));
}

#[test]
fn test_logger_name_cannot_split_text_lines() {
    let memory = MemoryAppender::new();
    let logger = LoggerConfig::development()
        .build_with(Box::new(memory.clone()))
        .unwrap();

    logger.named("a\nINFO forged").info("real", &[]);

    let lines = memory.lines();
    assert_eq!(lines.len(), 1);
    assert!(!lines[0].contains('\n'));
    assert!(lines[0].contains("a\\nINFO forged - real"));
}

#[test]
fn test_sibling_loggers_are_independent() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    let first = logger.with(&[field::string("f1", "one")]);
    let second = logger.with(&[field::string("f2", "two")]);

    first.info("first", &[]);
    second.info("second", &[]);
    logger.info("root", &[]);

    let records = memory.records();
    assert_eq!(user_fields(&records[0]), json!({"f1": "one"}));
    assert_eq!(user_fields(&records[1]), json!({"f2": "two"}));
    assert_eq!(user_fields(&records[2]), json!({}));
}

#[test]
fn test_with_composes_in_order() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    logger
        .with(&[field::int("a", 1)])
        .with(&[field::int("b", 2)])
        .info("ordered", &[field::int("c", 3)]);

    let line = &memory.lines()[0];
    let a = line.find("\"a\"").unwrap();
    let b = line.find("\"b\"").unwrap();
    let c = line.find("\"c\"").unwrap();
    assert!(a < b && b < c);
}

#[test]
fn test_named_depth_matches_composite_name() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    logger.named("a").named("b").info("nested", &[]);
    logger.named("a.b").info("direct", &[]);
    logger.named("a").named("").info("empty segment", &[]);

    let records = memory.records();
    assert_eq!(records[0]["logger"], records[1]["logger"]);
    assert_eq!(records[0]["logger"], "a.b");
    assert_eq!(records[2]["logger"], "a");
}

#[test]
fn test_dict_of_every_kind_encodes() {
    struct Point;

    impl ObjectMarshaler for Point {
        fn marshal_log_object(&self, enc: &mut dyn ObjectEncoder) -> cleanstack_logging::Result<()> {
            enc.add_i64("x", 1);
            enc.add_i64("y", 2);
            Ok(())
        }
    }

    let (logger, memory) = memory_logger(LoggerConfig::production());
    let fields = vec![
        field::bool("bool", true),
        field::int64("int64", -5),
        field::uint8("uint8", 200),
        field::float64("float64", 1.5),
        field::float32("float32", 0.1),
        field::complex128("complex", field::Complex::new(1.0, -2.0)),
        field::string("string", "s"),
        field::binary("binary", vec![1u8, 2]),
        field::byte_string("bytes", b"text".to_vec()),
        field::duration("duration", Duration::from_millis(1500)),
        field::err(io::Error::other("oops")),
        field::reflect("reflect", &vec![1, 2]),
        field::stringer("stringer", 42),
        field::object("object", Point),
        field::strings("strings", vec!["a".to_string()]),
        field::int64s("nil_ints", None),
        field::skip(),
    ];

    logger.info("all kinds", &[field::dict("dict", fields)]);

    let dict = &memory.records()[0]["dict"];
    assert_eq!(dict["bool"], true);
    assert_eq!(dict["int64"], -5);
    assert_eq!(dict["string"], "s");
    assert_eq!(dict["error"], "oops");
    assert_eq!(dict["object"]["x"], 1);
    assert_eq!(dict.as_object().unwrap().len(), 16);
}

#[test]
fn test_nil_optional_fields_render_null() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    logger.info(
        "optional",
        &[
            field::int64p("some", Some(5)),
            field::int64p("none", None),
            field::stringp("name", None),
            field::strings("nil_slice", None),
            field::strings("empty_slice", Vec::new()),
        ],
    );

    let record = &memory.records()[0];
    assert_eq!(record["some"], 5);
    assert!(record["none"].is_null());
    assert!(record["name"].is_null());
    assert_eq!(record["empty_slice"], json!([]));
    assert_eq!(record["nil_slice"], json!([]));
}

#[test]
fn test_nested_marshaler_failure_keeps_entry() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    let failing = field::ObjectMarshalerFn(|_enc: &mut dyn ObjectEncoder| -> cleanstack_logging::Result<()> {
        Err(LoggerError::other("cannot marshal"))
    });
    logger.info("partial", &[field::string("before", "ok"), field::object("payload", failing)]);

    let record = &memory.records()[0];
    assert_eq!(record["before"], "ok");
    assert_eq!(record["payloadError"], "cannot marshal");
    assert_eq!(logger.dispatcher().metrics().encode_errors(), 1);
}

#[test]
fn test_sync_is_idempotent_across_derived_loggers() {
    let config = LoggerConfig::production().with_async_buffer(64);
    let (logger, memory) = memory_logger(config);
    let child = logger.named("child");

    for i in 0..20 {
        child.info("queued", &[field::int("i", i)]);
    }

    child.sync().unwrap();
    logger.sync().unwrap();
    child.sync().unwrap();

    assert_eq!(memory.len(), 20);
}

#[test]
fn test_file_output_and_injection_prevention() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("app.log");

    let logger = LoggerConfig::production()
        .with_file(&log_file)
        .build()
        .expect("Failed to build logger");

    logger.info("User login\nERROR fake entry\nINFO continuation", &[]);
    logger.warn("second", &[field::string("k", "v")]);
    logger.sync().expect("Failed to sync");

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: Value = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first["msg"], "User login\\nERROR fake entry\\nINFO continuation");
    let second: Value = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second["level"], "warn");
    assert_eq!(second["k"], "v");
}

#[test]
fn test_logfmt_file_output() {
    let temp_dir = TempDir::new().unwrap();
    let log_file = temp_dir.path().join("app.logfmt");

    let logger = LoggerConfig::production()
        .with_format(OutputFormat::Logfmt)
        .with_file(&log_file)
        .build()
        .unwrap();
    logger.named("db").info("connected", &[field::int("conns", 4)]);
    logger.sync().unwrap();

    let content = fs::read_to_string(&log_file).unwrap();
    assert!(content.contains("level=info"));
    assert!(content.contains("logger=db"));
    assert!(content.contains(r#"msg="connected""#));
    assert!(content.contains("conns=4"));
}

#[test]
fn test_error_level_carries_stacktrace() {
    let (logger, memory) = memory_logger(LoggerConfig::production());

    logger.info("no stack", &[]);
    logger.error("failed", &[]);

    let records = memory.records();
    assert!(records[0].get("stacktrace").is_none());
    if let Some(stack) = records[1].get("stacktrace") {
        assert!(stack.is_string());
    }
}

#[test]
fn test_stack_field_renders_at_log_time() {
    let (logger, memory) = memory_logger(LoggerConfig::production());
    let stack = field::stack("trace");

    logger.debug("not rendered", &[stack.clone()]);
    logger.dispatcher().set_min_level(LogLevel::Info);
    logger.debug("filtered", &[stack]);

    assert_eq!(memory.len(), 1);
    assert!(memory.records()[0]["trace"].is_string());
}

#[test]
fn test_context_methods_ignore_context() {
    let (logger, memory) = memory_logger(LoggerConfig::production());
    let ctx = Context::background()
        .with_tracing(TracingContext::new("trace-1", "span-1"))
        .with_value("request_id", "r-9");

    logger.info_context(&ctx, "with context", &[field::int("n", 1)]);
    logger.warnf_context(&ctx, format_args!("formatted {}", 2));

    let records = memory.records();
    assert_eq!(user_fields(&records[0]), json!({"n": 1}));
    assert_eq!(records[1]["msg"], "formatted 2");
    assert!(records[1].get("trace_id").is_none());
}

#[test]
fn test_root_constructors_validate_level() {
    assert!(logging::new_production("info").is_ok());
    assert!(logging::new_development("DEBUG").is_ok());
    assert!(logging::new_logger("development", "").is_ok());

    let err = logging::new_production("nonsense").unwrap_err();
    assert!(matches!(err, LoggerError::InvalidLevel { .. }));
}

#[test]
#[should_panic(expected = "invalid log level")]
fn test_must_panics_on_invalid_level() {
    logging::must(logging::new_logger("production", "nonsense"));
}

#[test]
fn test_global_logger_round_trip() {
    let (logger, memory) = memory_logger(LoggerConfig::production());
    let shared: SharedLogger = Arc::new(logger);

    logging::set_logger(Arc::clone(&shared));
    logging::get_logger().info("via global", &[]);

    assert!(logging::try_get_logger().is_some());
    assert_eq!(memory.records()[0]["msg"], "via global");
}

#[test]
fn test_dict_object_as_inline() {
    let (logger, memory) = memory_logger(LoggerConfig::production());
    let dict: DictObject = field::dict_object(vec![field::string("a", "x"), field::int("b", 2)]);

    logger.info("inline", &[field::inline(dict)]);

    assert_eq!(user_fields(&memory.records()[0]), json!({"a": "x", "b": 2}));
}
