//! Unit tests for NTP provider convergence

#[cfg(test)]
mod tests {
    use crate::{ntp, ConvergeError, DesiredState, Op};
    use ucsm_client::{MockUcsSession, UcsSessionTrait};

    fn servers(addrs: &[&str]) -> Vec<String> {
        addrs.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_present_creates_missing_servers() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.add_ntp_provider("10.0.0.1");

        let report = ntp::apply(
            &mock,
            &servers(&["10.0.0.1", "10.0.0.2"]),
            DesiredState::Present,
        )
        .await
        .expect("convergence failed");

        assert!(report.changed);
        assert_eq!(report.created, vec!["10.0.0.2"]);
        assert!(report.removed.is_empty());
        assert_eq!(mock.ntp_provider_names(), vec!["10.0.0.1", "10.0.0.2"]);
    }

    #[tokio::test]
    async fn test_present_is_idempotent() {
        let mock = MockUcsSession::new("https://test-ucs");
        let desired = servers(&["10.0.0.1", "10.0.0.2"]);

        let first = ntp::apply(&mock, &desired, DesiredState::Present)
            .await
            .expect("first run failed");
        assert!(first.changed);
        assert_eq!(first.created, desired);

        let second = ntp::apply(&mock, &desired, DesiredState::Present)
            .await
            .expect("second run failed");
        assert!(!second.changed);
        assert!(second.created.is_empty());
        assert!(second.removed.is_empty());
    }

    #[tokio::test]
    async fn test_present_then_absent_restores_device() {
        let mock = MockUcsSession::new("https://test-ucs");
        let desired = servers(&["10.0.0.1", "10.0.0.2"]);

        let created = ntp::apply(&mock, &desired, DesiredState::Present)
            .await
            .expect("present run failed");

        let removed = ntp::apply(&mock, &desired, DesiredState::Absent)
            .await
            .expect("absent run failed");

        assert!(removed.changed);
        assert_eq!(removed.removed, created.created);
        assert!(mock.ntp_provider_names().is_empty());
    }

    #[tokio::test]
    async fn test_empty_items_is_noop() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.add_ntp_provider("10.0.0.1");

        for state in [DesiredState::Present, DesiredState::Absent] {
            let report = ntp::apply(&mock, &[], state).await.expect("run failed");
            assert!(!report.changed);
            assert!(report.created.is_empty());
            assert!(report.removed.is_empty());
        }

        assert!(mock.mutations().is_empty());
    }

    #[tokio::test]
    async fn test_failure_aborts_remaining_items() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.fail_on("create:10.0.0.2");

        let result = ntp::apply(
            &mock,
            &servers(&["10.0.0.1", "10.0.0.2", "10.0.0.3"]),
            DesiredState::Present,
        )
        .await;

        match result {
            Err(ConvergeError::Operation { op, identity, .. }) => {
                assert_eq!(op, Op::Create);
                assert_eq!(identity, "10.0.0.2");
            }
            other => panic!("expected operation error, got {:?}", other),
        }

        // Only the first item was applied; the third was never attempted
        assert_eq!(mock.mutations(), vec!["create:10.0.0.1"]);

        // The session is still closed by the caller after a failed run
        mock.logout().await.expect("logout failed");
        assert!(mock.is_closed());
    }

    #[tokio::test]
    async fn test_duplicate_items_second_is_noop() {
        let mock = MockUcsSession::new("https://test-ucs");

        let report = ntp::apply(
            &mock,
            &servers(&["10.0.0.1", "10.0.0.1"]),
            DesiredState::Present,
        )
        .await
        .expect("convergence failed");

        assert_eq!(report.created, vec!["10.0.0.1"]);
        assert_eq!(mock.ntp_provider_names(), vec!["10.0.0.1"]);
    }

    #[tokio::test]
    async fn test_absent_deletes_only_first_duplicate() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.add_ntp_provider("10.0.0.1");
        mock.add_ntp_provider("10.0.0.1");

        let report = ntp::apply(&mock, &servers(&["10.0.0.1"]), DesiredState::Absent)
            .await
            .expect("convergence failed");

        assert_eq!(report.removed, vec!["10.0.0.1"]);
        // The duplicate is left for a subsequent invocation
        assert_eq!(mock.ntp_provider_names(), vec!["10.0.0.1"]);
    }
}
