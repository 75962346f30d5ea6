use ecoleta_core::db::open_db_in_memory;
use ecoleta_core::{
    LocationFilter, LocationService, LocationServiceError, NewLocation, SqliteLocationRepository,
};
use log::{LevelFilter, Log, Metadata, Record};
use std::sync::Mutex;

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl Log for CaptureLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        self.lines
            .lock()
            .unwrap()
            .push(format!("{} {}", record.level(), record.args()));
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

fn take_lines() -> Vec<String> {
    std::mem::take(&mut *LOGGER.lines.lock().unwrap())
}

fn has_line(lines: &[String], parts: &[&str]) -> bool {
    lines
        .iter()
        .any(|line| parts.iter().all(|part| line.contains(part)))
}

#[test]
fn failed_operations_emit_error_events() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let mut conn = open_db_in_memory().unwrap();
    let mut service = LocationService::new(SqliteLocationRepository::try_new(&mut conn).unwrap());
    take_lines();

    let err = service.get_location(404).unwrap_err();
    assert!(matches!(err, LocationServiceError::NotFound(404)));
    let lines = take_lines();
    assert!(
        has_line(
            &lines,
            &["WARN", "event=location_get", "status=error", "error_code=location_not_found"]
        ),
        "missing get error event in {lines:?}"
    );

    service.set_image(404, "photo.jpg").unwrap_err();
    let lines = take_lines();
    assert!(
        has_line(
            &lines,
            &["event=location_set_image", "status=error", "error_code=location_not_found"]
        ),
        "missing set_image error event in {lines:?}"
    );

    let input = NewLocation {
        name: "Ponto".to_string(),
        email: "ponto@coleta.org".to_string(),
        whatsapp: "47999990000".to_string(),
        latitude: -27.2,
        longitude: -49.6,
        city: "Rio do Sul".to_string(),
        uf: "SC".to_string(),
        item_ids: vec![1, 999],
    };
    service.register(&input).unwrap_err();
    let lines = take_lines();
    assert!(has_line(
        &lines,
        &["event=location_register", "status=error", "error_code=item_not_found"]
    ));

    service.search(&LocationFilter::Unfiltered).unwrap();
    let lines = take_lines();
    assert!(has_line(&lines, &["event=location_search", "status=ok", "mode=all"]));
    assert!(!has_line(&lines, &["status=error"]));
}
