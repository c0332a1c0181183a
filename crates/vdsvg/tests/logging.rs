use std::sync::Mutex;

struct CaptureLogger {
    records: Mutex<Vec<(log::Level, String)>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if let Ok(mut records) = self.records.lock() {
            records.push((record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

// The logger is global, so everything is checked in a single test.
#[test]
fn lossy_conversion_steps_are_warnings() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(log::LevelFilter::Trace);

    let xml = r#"<vector xmlns:android="http://schemas.android.com/apk/res/android">
        <path android:fillColor="@color/icon"/>
        <path android:fillColor="@color/icon" android:pathData="M1,1"/>
    </vector>"#;
    vdsvg::translate(xml).unwrap();

    let records = LOGGER.records.lock().unwrap();
    let warnings: Vec<&str> = records
        .iter()
        .filter(|(level, _)| *level == log::Level::Warn)
        .map(|(_, msg)| msg.as_str())
        .collect();

    assert!(warnings.contains(&"android:width is not set. Fallback to 24."));
    assert!(warnings.contains(&"android:height is not set. Fallback to 24."));
    assert!(warnings.contains(&"A path without android:pathData at 2:9. Skipped."));
    assert!(warnings.contains(&"'@color/icon' cannot be resolved. Using currentColor."));
}
