//! Integration tests for the UCS manager client
//!
//! These tests require a reachable UCS manager.
//! Set UCS_ENDPOINT, UCS_USERNAME and UCS_PASSWORD environment variables to run.

use ucsm_client::UcsSession;

fn test_credentials() -> (String, String, String) {
    let endpoint = std::env::var("UCS_ENDPOINT")
        .unwrap_or_else(|_| "https://localhost:8443".to_string());
    let username = std::env::var("UCS_USERNAME")
        .expect("UCS_USERNAME environment variable must be set");
    let password = std::env::var("UCS_PASSWORD")
        .expect("UCS_PASSWORD environment variable must be set");
    (endpoint, username, password)
}

#[tokio::test]
#[ignore] // Requires reachable UCS manager
async fn test_login_logout() {
    let (endpoint, username, password) = test_credentials();

    let session = UcsSession::login(&endpoint, &username, &password)
        .await
        .expect("Failed to login");

    session.logout().await.expect("Failed to logout");
}

#[tokio::test]
#[ignore]
async fn test_query_ntp_providers() {
    let (endpoint, username, password) = test_credentials();

    let session = UcsSession::login(&endpoint, &username, &password)
        .await
        .expect("Failed to login");

    let datetime = session
        .datetime_service()
        .await
        .expect("Failed to resolve datetime service");
    let providers = session
        .query_ntp_providers(&datetime, None)
        .await
        .expect("Failed to query NTP providers");

    println!("Found {} NTP providers", providers.len());

    session.logout().await.expect("Failed to logout");
}

#[tokio::test]
#[ignore]
async fn test_query_vlans() {
    let (endpoint, username, password) = test_credentials();

    let session = UcsSession::login(&endpoint, &username, &password)
        .await
        .expect("Failed to login");

    let lan_cloud = session
        .lan_cloud()
        .await
        .expect("Failed to resolve LAN cloud");
    let vlans = session
        .query_vlans(&lan_cloud, None, None)
        .await
        .expect("Failed to query VLANs");

    println!("Found {} VLANs", vlans.len());

    session.logout().await.expect("Failed to logout");
}

#[tokio::test]
#[ignore]
async fn test_create_and_delete_ntp_provider() {
    let (endpoint, username, password) = test_credentials();

    let session = UcsSession::login(&endpoint, &username, &password)
        .await
        .expect("Failed to login");

    let datetime = session
        .datetime_service()
        .await
        .expect("Failed to resolve datetime service");

    let created = session
        .create_ntp_provider(&datetime, "192.0.2.123")
        .await
        .expect("Failed to create NTP provider");
    assert_eq!(created.name, "192.0.2.123");

    session
        .delete_ntp_provider(&created.dn)
        .await
        .expect("Failed to delete NTP provider");

    session.logout().await.expect("Failed to logout");
}
