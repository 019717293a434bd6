//! # Integration Tests
//!
//! End-to-end tests across crates.
//!
//! Covers:
//! - CSV file -> RecordLoader -> Dispatcher -> gateway
//! - Partial delivery failure
//! - Rejected input never reaches the gateway

#[cfg(test)]
mod e2e_tests {
    use std::collections::HashSet;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use contracts::{DeliveryError, DiagnosticEvent, SmsGateway};
    use dispatcher::{compose_message, DispatchError, Dispatcher, DispatcherConfig};
    use observability::RecordingDiagnostics;
    use record_loader::{LoadError, RecordLoader};
    use tempfile::NamedTempFile;
    use tokio::time::{sleep, Duration};

    /// Gateway that records deliveries and fails on chosen destinations
    #[derive(Default)]
    struct MockGateway {
        fail_destinations: HashSet<String>,
        delay_ms: u64,
        calls: AtomicUsize,
        delivered: Mutex<Vec<(String, String)>>,
    }

    impl SmsGateway for MockGateway {
        fn name(&self) -> &str {
            "mock"
        }

        async fn send(&self, body: &str, destination: &str) -> Result<(), DeliveryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.delay_ms > 0 {
                sleep(Duration::from_millis(self.delay_ms)).await;
            }
            if self.fail_destinations.contains(destination) {
                return Err(DeliveryError::gateway("mock", "radio off"));
            }
            self.delivered
                .lock()
                .unwrap()
                .push((destination.to_string(), body.to_string()));
            Ok(())
        }
    }

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    const TWO_ROWS: &str = "\
mobile,firstName,lastName,id,message
07123456789,Ann,Lee,7,Hi
07999999999,Bob,Stone,8,See you at 5
";

    /// Header + 2 valid rows: exactly 2 sends, both finished when dispatch returns
    #[tokio::test]
    async fn test_e2e_two_rows() {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let file = csv_file(TWO_ROWS);

        let loader = RecordLoader::new(diagnostics.clone());
        let gateway = Arc::new(MockGateway {
            delay_ms: 20,
            ..Default::default()
        });
        let dispatcher = Dispatcher::with_shared_gateway(
            Arc::clone(&gateway),
            diagnostics.clone(),
            DispatcherConfig::default(),
        );

        let report = dispatcher.run(loader.load(file.path())).await.unwrap();

        assert_eq!(report.total(), 2);
        assert!(report.is_success());
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 2);

        let delivered = gateway.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 2);
        let ann = delivered
            .iter()
            .find(|(destination, _)| destination == "07123456789")
            .unwrap();
        let expected = [
            "id: 7",
            "firstname: Ann",
            "lastname: Lee",
            "mobile number: 07123456789",
            "message: Hi",
        ];
        let mut cursor = 0;
        for line in expected {
            let at = ann.1[cursor..].find(line).expect(line);
            cursor += at + line.len();
        }

        let events = diagnostics.events();
        assert!(matches!(
            events.first(),
            Some(DiagnosticEvent::RecordsLoaded { count: 2, .. })
        ));
        assert_eq!(
            events.last(),
            Some(&DiagnosticEvent::DispatchFinished { sent: 2, failed: 0 })
        );
    }

    /// Gateway fails on the 2nd of 2 sends: the 1st still completes,
    /// the batch reports failure once gathered
    #[tokio::test]
    async fn test_e2e_second_send_fails() {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let file = csv_file(TWO_ROWS);

        let loader = RecordLoader::new(diagnostics.clone());
        let gateway = MockGateway {
            fail_destinations: HashSet::from(["07999999999".to_string()]),
            ..Default::default()
        };
        let dispatcher = Dispatcher::new(gateway, diagnostics.clone(), DispatcherConfig::default());

        let report = dispatcher.run(loader.load(file.path())).await.unwrap();
        assert_eq!(report.sent(), 1);
        assert_eq!(report.failed(), 1);

        let first = diagnostics.events_for("07123456789");
        assert_eq!(
            first,
            vec![
                DiagnosticEvent::SendStarted {
                    destination: "07123456789".into(),
                    name: "Ann Lee".into(),
                },
                DiagnosticEvent::SendCompleted {
                    destination: "07123456789".into(),
                    name: "Ann Lee".into(),
                },
            ]
        );
        let second = diagnostics.events_for("07999999999");
        assert!(matches!(second[1], DiagnosticEvent::SendFailed { .. }));

        assert!(matches!(
            report.into_result(),
            Err(DispatchError::PartialFailure {
                failed: 1,
                total: 2,
                ..
            })
        ));
    }

    /// Missing file: load signals abort, nothing is sent
    #[tokio::test]
    async fn test_e2e_missing_file_sends_nothing() {
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let dir = tempfile::tempdir().unwrap();

        let loader = RecordLoader::new(diagnostics.clone());
        let gateway = Arc::new(MockGateway::default());
        let dispatcher = Dispatcher::with_shared_gateway(
            Arc::clone(&gateway),
            diagnostics.clone(),
            DispatcherConfig::default(),
        );

        let loaded = loader.load(dir.path().join("sms_list.csv"));
        assert!(matches!(loaded, Err(LoadError::NotFound { .. })));

        let result = dispatcher.run(loaded).await;
        assert!(matches!(
            result,
            Err(DispatchError::Aborted(LoadError::NotFound { .. }))
        ));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
        assert!(diagnostics
            .events()
            .iter()
            .all(|e| matches!(e, DiagnosticEvent::ValidationFailed { .. })));
    }

    /// One malformed row rejects the whole file before any send
    #[tokio::test]
    async fn test_e2e_malformed_row_sends_nothing() {
        let file = csv_file(&format!("{TWO_ROWS}1234567890,Cy,Ng,9,Hey\n"));
        let gateway = Arc::new(MockGateway::default());
        let dispatcher = Dispatcher::with_shared_gateway(
            Arc::clone(&gateway),
            Arc::new(RecordingDiagnostics::new()),
            DispatcherConfig::default(),
        );

        let loaded = RecordLoader::new(Arc::new(RecordingDiagnostics::new())).load(file.path());
        let result = dispatcher.run(loaded).await;

        assert!(matches!(
            result,
            Err(DispatchError::Aborted(LoadError::MalformedRow { line: 4, .. }))
        ));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
    }

    /// Bounded dispatch still delivers every record
    #[tokio::test]
    async fn test_e2e_bounded_dispatch() {
        let mut content = String::from("mobile,firstName,lastName,id,message\n");
        for i in 0..10 {
            content.push_str(&format!("070000000{i:02},Name{i},Surname{i},{i},Msg {i}\n"));
        }
        let file = csv_file(&content);

        let gateway = Arc::new(MockGateway {
            delay_ms: 5,
            ..Default::default()
        });
        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let dispatcher = Dispatcher::with_shared_gateway(
            Arc::clone(&gateway),
            diagnostics.clone(),
            DispatcherConfig {
                max_concurrency: Some(3),
            },
        );

        let records = RecordLoader::new(diagnostics.clone())
            .load(file.path())
            .unwrap();
        let bodies: Vec<String> = records.iter().map(compose_message).collect();

        let report = dispatcher.dispatch_all(records).await;
        assert_eq!(report.sent(), 10);

        let delivered = gateway.delivered.lock().unwrap();
        for body in bodies {
            assert!(delivered.iter().any(|(_, b)| *b == body));
        }
    }

    /// Config file drives gateway choice and concurrency
    #[tokio::test]
    async fn test_e2e_from_config() {
        let file = csv_file(TWO_ROWS);
        let config = config_loader::ConfigLoader::load_from_str(
            &format!(
                "[input]\npath = {:?}\n\n[dispatch]\nmax_concurrency = 1\n\n[gateway]\nkind = \"log\"\n",
                file.path().display().to_string()
            ),
            config_loader::ConfigFormat::Toml,
        )
        .unwrap();

        let diagnostics = Arc::new(RecordingDiagnostics::new());
        let records = RecordLoader::new(diagnostics.clone())
            .load(&config.input.path)
            .unwrap();
        let dispatcher = dispatcher::create_dispatcher(&config, diagnostics.clone());

        let report = dispatcher.dispatch_all(records).await;
        assert!(report.is_success());
        assert!(diagnostics.events().contains(&DiagnosticEvent::DispatchStarted {
            total: 2,
            max_concurrency: Some(1),
        }));
    }
}
