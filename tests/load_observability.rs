use std::sync::{Arc, Mutex};

use json_example_loader::loader::{
    load_with_options, try_load_with_options, CompositeObserver, LoadContext, LoadFormat, LoadObserver,
    LoadOptions, LoadRequest, LoadSeverity, LoadStats, TracingObserver,
};
use json_example_loader::LoadError;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("element {0} has no field 'a'")]
    MissingA(usize),
}

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<(LoadFormat, usize)>>,
    failures: Mutex<Vec<LoadSeverity>>,
    alerts: Mutex<Vec<LoadSeverity>>,
    transform_failures: Mutex<Vec<usize>>,
}

impl LoadObserver for RecordingObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.successes.lock().unwrap().push((ctx.format, stats.elements));
    }

    fn on_failure(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_transform_failure(&self, _ctx: &LoadContext, index: usize) {
        self.transform_failures.lock().unwrap().push(index);
    }

    fn on_alert(&self, _ctx: &LoadContext, severity: LoadSeverity, _error: &LoadError) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn opts_with(obs: &Arc<RecordingObserver>) -> LoadOptions {
    LoadOptions {
        observer: Some(obs.clone()),
        ..Default::default()
    }
}

#[test]
fn observer_receives_failure_and_alert_on_missing_file() {
    let obs = Arc::new(RecordingObserver::default());

    let err = load_with_options("tests/fixtures/does_not_exist.json", |e| e, &opts_with(&obs)).unwrap_err();
    assert!(err.is_file_access());

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Critical]);
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_without_alert_for_parse_error() {
    let obs = Arc::new(RecordingObserver::default());

    let _ = load_with_options("tests/fixtures/malformed.json", |e| e, &opts_with(&obs)).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![LoadSeverity::Error]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn lowered_alert_threshold_alerts_on_parse_error() {
    let obs = Arc::new(RecordingObserver::default());
    let opts = LoadOptions {
        alert_at_or_above: LoadSeverity::Error,
        ..opts_with(&obs)
    };

    let _ = load_with_options("tests/fixtures/object.json", |e| e, &opts).unwrap_err();

    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![LoadSeverity::Error]);
}

#[test]
fn observer_receives_success_stats() {
    let obs = Arc::new(RecordingObserver::default());

    let out = load_with_options("tests/fixtures/pairs.json", |e| e["a"].clone(), &opts_with(&obs)).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(obs.successes.lock().unwrap().clone(), vec![(LoadFormat::JsonArray, 2)]);
}

#[test]
fn observer_receives_failing_transform_index() {
    let obs = Arc::new(RecordingObserver::default());

    let result: Result<Vec<i64>, LoadError> = try_load_with_options(
        "tests/fixtures/pairs.json",
        |e| match e["a"].as_i64() {
            Some(2) => Err(LoadError::NotAnArray {
                found: json_example_loader::ElementKind::Number,
            }),
            Some(n) => Ok(n),
            None => Ok(0),
        },
        &opts_with(&obs),
    );

    assert!(result.is_err());
    assert_eq!(obs.transform_failures.lock().unwrap().clone(), vec![1]);
    assert!(obs.failures.lock().unwrap().is_empty());
    assert!(obs.successes.lock().unwrap().is_empty());
}

#[test]
fn ndjson_is_inferred_from_extension() {
    let obs = Arc::new(RecordingObserver::default());

    let names = load_with_options(
        "tests/fixtures/people.ndjson",
        |e| e["name"].as_str().unwrap_or_default().to_string(),
        &opts_with(&obs),
    )
    .unwrap();

    assert_eq!(names, vec!["Ada".to_string(), "Grace".to_string()]);
    assert_eq!(obs.successes.lock().unwrap().clone(), vec![(LoadFormat::Ndjson, 2)]);
}

#[test]
fn forced_format_overrides_extension() {
    let opts = LoadOptions {
        format: Some(LoadFormat::JsonArray),
        ..Default::default()
    };
    let err = load_with_options("tests/fixtures/people.ndjson", |e| e, &opts).unwrap_err();
    assert!(err.is_parse());
}

#[test]
fn composite_observer_fans_out() {
    let a = Arc::new(RecordingObserver::default());
    let b = Arc::new(RecordingObserver::default());
    let observers: Vec<Arc<dyn LoadObserver>> = vec![a.clone(), b.clone()];
    let composite = CompositeObserver::new(observers);

    let mut request = LoadRequest::new("tests/fixtures/pairs.json");
    request.options.observer = Some(Arc::new(composite));
    let out = request.run(|e| e).unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(a.successes.lock().unwrap().len(), 1);
    assert_eq!(b.successes.lock().unwrap().len(), 1);
}

#[test]
fn request_try_run_reports_transform_failure_and_returns_caller_error() {
    let obs = Arc::new(RecordingObserver::default());
    let mut request = LoadRequest::new("tests/fixtures/mixed.json");
    request.options.observer = Some(obs.clone());

    let mut index = 0;
    let result: Result<Vec<i64>, AppError> = request.try_run(|e| {
        let i = index;
        index += 1;
        e["id"].as_i64().ok_or(AppError::MissingA(i))
    });

    assert!(matches!(result, Err(AppError::MissingA(1))));
    assert_eq!(obs.transform_failures.lock().unwrap().clone(), vec![1]);
}

#[test]
fn request_try_run_converts_read_errors() {
    let request = LoadRequest::new("tests/fixtures/does_not_exist.json");
    let result: Result<Vec<i64>, AppError> = request.try_run(|_e| Ok(0));
    assert!(matches!(result, Err(AppError::Load(LoadError::FileAccess { .. }))));
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl CapturedLogs {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

#[test]
fn tracing_observer_emits_events() {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .finish();

    let opts = LoadOptions {
        observer: Some(Arc::new(TracingObserver)),
        ..Default::default()
    };

    tracing::subscriber::with_default(subscriber, || {
        let _ = load_with_options("tests/fixtures/pairs.json", |e| e, &opts).unwrap();
        let _ = load_with_options("tests/fixtures/does_not_exist.json", |e| e, &opts).unwrap_err();
        let _: Result<Vec<i64>, LoadError> = try_load_with_options(
            "tests/fixtures/pairs.json",
            |e| match e["a"].as_i64() {
                Some(2) => Err(LoadError::NotAnArray {
                    found: json_example_loader::ElementKind::Number,
                }),
                other => Ok(other.unwrap_or_default()),
            },
            &opts,
        );
    });

    let text = logs.text();
    let line = |needle: &str| text.lines().find(|l| l.contains(needle)).map(str::to_string);

    let ok = line("load ok").unwrap();
    assert!(ok.contains("INFO"));
    assert!(ok.contains("elements=2"));
    assert!(ok.contains("path=tests/fixtures/pairs.json"));

    let failed = line("load failed").unwrap();
    assert!(failed.contains("WARN"));
    assert!(failed.contains("severity=Critical"));
    assert!(failed.contains("does_not_exist.json"));

    let alert = line("load alert").unwrap();
    assert!(alert.contains("ERROR"));

    let transform = line("transform failed").unwrap();
    assert!(transform.contains("index=1"));
}
