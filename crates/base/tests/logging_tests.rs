use base::logging::{FileLogger, StdoutLogger};
use log::Log;
use std::fs;

#[test]
fn test_stdout_logger_implements_log_trait() {
    let logger = StdoutLogger::new("yolo_zed_node");

    let metadata = log::MetadataBuilder::new()
        .level(log::Level::Info)
        .target("test")
        .build();
    assert!(logger.enabled(&metadata));

    let record = log::RecordBuilder::new()
        .level(log::Level::Info)
        .target("test")
        .file(Some("test.rs"))
        .line(Some(42))
        .args(format_args!("test message"))
        .build();

    logger.log(&record);
    logger.flush();
}

#[test]
fn test_file_logger_creates_directory() {
    let test_dir = std::env::temp_dir().join(format!("base-log-test-{}-dir", std::process::id()));
    let _ = fs::remove_dir_all(&test_dir);

    let _logger = FileLogger::new(&test_dir, "node").expect("Failed to create FileLogger");
    assert!(test_dir.is_dir());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn test_file_logger_writes_ros_style_line() {
    let test_dir =
        std::env::temp_dir().join(format!("base-log-test-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&test_dir);

    let logger = FileLogger::new(&test_dir, "yolo_zed_node").expect("Failed to create FileLogger");

    let record = log::RecordBuilder::new()
        .level(log::Level::Error)
        .target("test")
        .file(Some("handler.rs"))
        .line(Some(100))
        .args(format_args!("Converted image is empty"))
        .build();
    logger.log(&record);
    logger.flush();

    let entries: Vec<_> = fs::read_dir(&test_dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .collect();
    assert_eq!(entries.len(), 1, "Should have exactly one log file");

    let content = fs::read_to_string(entries[0].path()).unwrap();
    assert!(content.starts_with("[ERROR] ["));
    assert!(content.contains("[yolo_zed_node]: Converted image is empty"));
    assert!(content.contains("(handler.rs:100)"));
    assert!(content.ends_with('\n'));

    fs::remove_dir_all(&test_dir).ok();
}
