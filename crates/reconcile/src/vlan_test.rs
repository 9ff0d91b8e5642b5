//! Unit tests for fabric VLAN convergence

#[cfg(test)]
mod tests {
    use crate::vlan::{self, VlanSpec};
    use crate::{ConvergeError, DesiredState};
    use ucsm_client::MockUcsSession;

    fn spec(name: &str, id: u32) -> VlanSpec {
        VlanSpec {
            name: name.to_string(),
            id,
        }
    }

    #[test]
    fn test_vlan_spec_parsing() {
        assert_eq!("prod=100".parse::<VlanSpec>(), Ok(spec("prod", 100)));
        assert_eq!(" dev = 42 ".parse::<VlanSpec>(), Ok(spec("dev", 42)));

        assert!("prod".parse::<VlanSpec>().is_err());
        assert!("prod=".parse::<VlanSpec>().is_err());
        assert!("prod=abc".parse::<VlanSpec>().is_err());
        assert!("=100".parse::<VlanSpec>().is_err());
    }

    #[tokio::test]
    async fn test_present_creates_missing_vlans() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.add_vlan("prod", 100);

        let report = vlan::apply(
            &mock,
            &[spec("prod", 100), spec("dev", 200)],
            DesiredState::Present,
        )
        .await
        .expect("convergence failed");

        assert!(report.changed);
        assert_eq!(report.created, vec!["dev"]);
        assert_eq!(
            mock.vlan_entries(),
            vec![("prod".to_string(), 100), ("dev".to_string(), 200)]
        );
    }

    #[tokio::test]
    async fn test_absent_removes_matching_vlan_and_reruns_clean() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.add_vlan("prod", 100);

        let report = vlan::apply(&mock, &[spec("prod", 100)], DesiredState::Absent)
            .await
            .expect("first run failed");
        assert!(report.changed);
        assert!(report.created.is_empty());
        assert_eq!(report.removed, vec!["prod"]);

        let rerun = vlan::apply(&mock, &[spec("prod", 100)], DesiredState::Absent)
            .await
            .expect("rerun failed");
        assert!(!rerun.changed);
        assert!(rerun.created.is_empty());
        assert!(rerun.removed.is_empty());
    }

    #[tokio::test]
    async fn test_identity_matches_on_name_and_id() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.add_vlan("prod", 200);

        // Same name, different id: not a match, so present creates
        let report = vlan::apply(&mock, &[spec("prod", 100)], DesiredState::Present)
            .await
            .expect("present run failed");
        assert_eq!(report.created, vec!["prod"]);
        assert_eq!(mock.vlan_entries().len(), 2);

        // And absent with a non-matching id is a no-op
        let report = vlan::apply(&mock, &[spec("prod", 300)], DesiredState::Absent)
            .await
            .expect("absent run failed");
        assert!(!report.changed);
        assert_eq!(mock.vlan_entries().len(), 2);
    }

    #[tokio::test]
    async fn test_scope_resolution_failure_is_fatal() {
        let mock = MockUcsSession::new("https://test-ucs");
        mock.fail_on("query:lan-cloud");

        let result = vlan::apply(&mock, &[spec("prod", 100)], DesiredState::Present).await;

        assert!(matches!(
            result,
            Err(ConvergeError::Scope { scope: "LAN cloud", .. })
        ));
        assert!(mock.mutations().is_empty());
    }
}
