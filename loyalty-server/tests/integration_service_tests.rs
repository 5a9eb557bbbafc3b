//! System integration service tests against an in-memory database.

use loyalty_server::db::repository::provisioning;
use loyalty_server::{AppState, Config, SystemIntegrationService};
use shared::models::BusinessCreationRequest;

async fn test_service() -> (AppState, SystemIntegrationService) {
    let config = Config::with_database_path(":memory:");
    let state = AppState::initialize(&config)
        .await
        .expect("Failed to initialize state");
    (state.clone(), SystemIntegrationService::new(state))
}

fn workflow_request(name: &str, owner: &str, shops: u32) -> BusinessCreationRequest {
    BusinessCreationRequest {
        business_name: name.to_string(),
        business_type: "restaurant".to_string(),
        owner_username: owner.to_string(),
        number_of_shops: shops,
        shop_attributes: None,
    }
}

#[tokio::test]
async fn integration_validation_succeeds_on_fresh_state() {
    let (state, service) = test_service().await;

    let report = service.validate_system_integration().await;

    assert!(report.success, "failed: {:?}", report.failed_components);
    assert!(!report.validated_components.is_empty());
    for component in [
        "database",
        "customer_repository",
        "membership_repository",
        "benefit_repository",
        "preference_repository",
        "customer_profile",
    ] {
        assert!(
            report.validated_components.iter().any(|c| c == component),
            "missing component: {component}"
        );
    }
    assert!(report.failed_components.is_empty());

    // Probe rows are cleaned up
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customer")
        .fetch_one(state.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn workflow_creates_requested_shops() {
    let (state, service) = test_service().await;

    let mut request = workflow_request("Harbor Kitchen", "owner1", 3);
    request.shop_attributes = Some(serde_json::json!({ "theme": "dark" }));

    let report = service.test_business_creation_workflow(&request).await;

    assert!(report.success, "errors: {:?}", report.errors);
    assert_eq!(report.shop_ids.len(), 3);
    assert_eq!(
        report.completed_steps,
        vec!["Creating owner user", "Creating business", "Creating 3 shops"]
    );
    let business_id = report.business_id.expect("business id should be set");

    let shops = provisioning::find_shops_by_business_id(state.pool(), business_id)
        .await
        .unwrap();
    assert_eq!(shops.len(), 3);
    for shop in &shops {
        let attrs = shop.attributes.as_deref().expect("attributes stored");
        assert!(attrs.contains("dark"));
    }
}

#[tokio::test]
async fn workflow_zero_shops_is_allowed() {
    let (_state, service) = test_service().await;

    let report = service
        .test_business_creation_workflow(&workflow_request("Solo", "owner2", 0))
        .await;

    assert!(report.success);
    assert!(report.shop_ids.is_empty());
    assert_eq!(report.completed_steps.last().unwrap(), "Creating 0 shops");
}

#[tokio::test]
async fn workflow_aborts_on_first_failing_step() {
    let (state, service) = test_service().await;

    let first = service
        .test_business_creation_workflow(&workflow_request("First Cafe", "owner3", 1))
        .await;
    assert!(first.success);

    // Same owner username again: the first step fails, nothing else runs
    let second = service
        .test_business_creation_workflow(&workflow_request("Second Cafe", "owner3", 2))
        .await;

    assert!(!second.success);
    assert!(second.completed_steps.is_empty());
    assert_eq!(second.errors.len(), 1);
    assert!(second.errors[0].contains("owner user"));
    assert!(second.business_id.is_none());
    assert!(second.shop_ids.is_empty());

    // No rollback: the first run's rows are still committed
    let businesses: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM business")
        .fetch_one(state.pool())
        .await
        .unwrap();
    assert_eq!(businesses, 1);
}

#[tokio::test]
async fn workflow_rejects_blank_request() {
    let (_state, service) = test_service().await;

    let report = service
        .test_business_creation_workflow(&workflow_request("", "owner4", 1))
        .await;

    assert!(!report.success);
    assert!(report.completed_steps.is_empty());
    assert!(!report.errors.is_empty());
}

#[tokio::test]
async fn health_check_covers_all_components() {
    let (_state, service) = test_service().await;

    let report = service.perform_system_health_check().await;

    assert!(report.healthy);
    for component in [
        "database",
        "customers",
        "memberships",
        "benefits",
        "preferences",
    ] {
        let check = report
            .components
            .get(component)
            .unwrap_or_else(|| panic!("missing component: {component}"));
        assert!(check.healthy);
    }
}

#[tokio::test]
async fn compatibility_passes_for_in_memory_backend() {
    let (_state, service) = test_service().await;

    let report = service.validate_cross_platform_compatibility();

    assert!(report.compatible);
    assert_eq!(report.supported_platforms.len(), 5);
    assert!(report.issues.values().all(|list| list.is_empty()));
}

#[tokio::test]
async fn compatibility_flags_non_portable_paths() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("loyalty.db");
    let config = Config::with_database_path(db_path.to_str().unwrap());
    let state = AppState::initialize(&config).await.unwrap();
    let service = SystemIntegrationService::new(state);

    let report = service.validate_cross_platform_compatibility();

    // tempdir paths are absolute, which mobile platforms reject
    assert!(!report.compatible);
    assert!(report.issues["linux"].is_empty());
    assert!(report.issues["windows"].is_empty());
    assert!(!report.issues["android"].is_empty());
    assert!(!report.issues["ios"].is_empty());
}
