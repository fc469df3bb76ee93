use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// A logger that writes ROS-style lines to stdout
pub struct StdoutLogger {
    name: String,
}

impl StdoutLogger {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A logger that writes to date-named files with automatic day rollover
pub struct FileLogger {
    name: String,
    state: Mutex<FileLoggerState>,
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

impl FileLogger {
    /// Create a new FileLogger that writes to the specified directory
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let current_date = format_today();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join(format!("{}.log", current_date)))?;

        Ok(FileLogger {
            name: name.into(),
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

/// Format one record the way rclcpp/rclpy console output does:
/// `[LEVEL] [secs.nanos] [name]: message`
pub fn format_record(name: &str, record: &Record) -> String {
    let (secs, nanos) = unix_now();
    format!(
        "[{}] [{}.{:09}] [{}]: {}",
        record.level(),
        secs,
        nanos,
        name,
        record.args()
    )
}

impl Log for StdoutLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        println!("{}", format_record(&self.name, record));
    }

    fn flush(&self) {
        std::io::stdout().flush().ok();
    }
}

impl Log for FileLogger {
    fn enabled(&self, _metadata: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        let today = format_today();
        if today != state.current_date {
            let new_file_path = state.dir.join(format!("{}.log", today));
            match OpenOptions::new()
                .create(true)
                .append(true)
                .open(&new_file_path)
            {
                Ok(new_file) => {
                    state.file = new_file;
                    state.current_date = today;
                }
                Err(e) => {
                    // keep writing to the old file
                    eprintln!("Failed to open new log file {:?}: {}", new_file_path, e);
                }
            }
        }

        let mut line = format_record(&self.name, record);
        if let (Some(file), Some(n)) = (record.file(), record.line()) {
            line.push_str(&format!(" ({}:{})", file, n));
        }
        line.push('\n');

        if let Err(e) = state.file.write_all(line.as_bytes()) {
            eprintln!("Failed to write to log file: {}", e);
            eprintln!("{}", line.trim_end());
        }
    }

    fn flush(&self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.file.flush().ok();
    }
}

fn unix_now() -> (u64, u32) {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    (now.as_secs(), now.subsec_nanos())
}

/// Format current date as YYYY-MM-DD (UTC)
pub fn format_today() -> String {
    let (secs, _) = unix_now();
    let (year, month, day) = civil_from_days((secs / 86400) as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Convert days since Unix epoch to civil date (year, month, day)
/// Uses Howard Hinnant's algorithm (public domain)
/// http://howardhinnant.github.io/date_algorithms.html
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

fn default_max_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install a `StdoutLogger` named after the node as the global logger.
///
/// Debug builds log at `Debug`, release builds at `Info`. Only the first
/// call per process takes effect.
pub fn init_stdout_logger(name: impl Into<String>) {
    let logger = StdoutLogger::new(name);
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(default_max_level());
    }
}

/// Install a `FileLogger` writing into `dir` as the global logger.
///
/// Returns an error if the directory cannot be created. Only the first
/// successful call per process takes effect.
pub fn init_file_logger(dir: impl Into<PathBuf>, name: impl Into<String>) -> std::io::Result<()> {
    let logger = FileLogger::new(dir, name)?;
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(default_max_level());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_civil_from_days_epoch() {
        assert_eq!(civil_from_days(0), (1970, 1, 1));
    }

    #[test]
    fn test_civil_from_days_leap_year() {
        // 2000-02-29
        assert_eq!(civil_from_days(11016), (2000, 2, 29));
    }

    #[test]
    fn test_format_record_ros_style() {
        let record = log::RecordBuilder::new()
            .level(log::Level::Warn)
            .target("test")
            .args(format_args!("frame dropped"))
            .build();
        let line = format_record("yolo_zed_node", &record);
        assert!(line.starts_with("[WARN] ["));
        assert!(line.ends_with("[yolo_zed_node]: frame dropped"));
    }

    #[test]
    fn test_file_logger_day_rollover() {
        let test_dir =
            std::env::temp_dir().join(format!("base-log-test-{}-rollover", std::process::id()));
        let _ = fs::remove_dir_all(&test_dir);

        let logger = FileLogger::new(&test_dir, "node").expect("Failed to create FileLogger");

        // pretend the logger was opened on an earlier day
        let stale_path = test_dir.join("1999-01-01.log");
        {
            let mut state = logger.state.lock().unwrap();
            state.current_date = "1999-01-01".to_string();
            state.file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&stale_path)
                .unwrap();
        }

        let record = log::RecordBuilder::new()
            .level(log::Level::Info)
            .target("test")
            .args(format_args!("after rollover"))
            .build();
        logger.log(&record);

        let today_path = test_dir.join(format!("{}.log", format_today()));
        let content = fs::read_to_string(&today_path).unwrap();
        assert!(content.contains("after rollover"));
        assert_eq!(fs::read_to_string(&stale_path).unwrap(), "");
        assert_eq!(logger.state.lock().unwrap().current_date, format_today());

        fs::remove_dir_all(&test_dir).ok();
    }
}
