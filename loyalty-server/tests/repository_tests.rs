//! Repository layer tests against an in-memory database.

use loyalty_server::{AppState, Config, RepoError, StagedRepository};
use shared::models::{
    BenefitCreate, BenefitType, CustomerCreate, MembershipCreate, MembershipTier,
};

async fn test_state() -> AppState {
    let config = Config::with_database_path(":memory:");
    AppState::initialize(&config)
        .await
        .expect("Failed to initialize state")
}

fn customer_create(name: &str, phone: &str) -> CustomerCreate {
    CustomerCreate {
        name: name.to_string(),
        phone: phone.to_string(),
        email: None,
        membership_number: None,
    }
}

#[tokio::test]
async fn staged_add_is_invisible_before_save() {
    let state = test_state().await;
    let customers = state.customers();

    let staged = customers.add(customer_create("Alice", "1000000001")).unwrap();
    assert!(staged.id > 0);

    // Not persisted yet
    let found = customers.find_by_id(staged.id).await.unwrap();
    assert!(found.is_none());

    let written = customers.save_changes().await.unwrap();
    assert_eq!(written, 1);

    let found = customers.find_by_id(staged.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Alice");
    assert!(found.is_active);
}

#[tokio::test]
async fn save_changes_commits_whole_stage() {
    let state = test_state().await;
    let customers = state.customers();

    customers.add(customer_create("Bob", "1000000002")).unwrap();
    customers.add(customer_create("Carol", "1000000003")).unwrap();
    assert_eq!(customers.save_changes().await.unwrap(), 2);

    // Stage was cleared; saving again writes nothing
    assert_eq!(customers.save_changes().await.unwrap(), 0);
}

#[tokio::test]
async fn duplicate_phone_is_a_persistence_error() {
    let state = test_state().await;
    let customers = state.customers();

    customers.add(customer_create("Dave", "1000000004")).unwrap();
    customers.save_changes().await.unwrap();

    customers.add(customer_create("Eve", "1000000004")).unwrap();
    let err = customers.save_changes().await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // Original row untouched
    let profile = customers
        .find_by_mobile_number("1000000004")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.customer.name, "Dave");
}

#[tokio::test]
async fn failed_save_persists_nothing_and_retains_stage() {
    let state = test_state().await;
    let customers = state.customers();

    customers.add(customer_create("Mina", "2000000001")).unwrap();
    customers.save_changes().await.unwrap();

    // One batch: a valid row plus a duplicate phone
    let valid = customers.add(customer_create("Noah", "2000000002")).unwrap();
    customers.add(customer_create("Omar", "2000000001")).unwrap();

    let err = customers.save_changes().await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));

    // The transaction rolled back: the valid row of the batch was
    // not persisted either
    assert!(customers.find_by_id(valid.id).await.unwrap().is_none());

    // The stage is retained after the failure: a retry hits the same
    // duplicate instead of silently writing nothing
    let err = customers.save_changes().await.unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
    assert!(customers.find_by_id(valid.id).await.unwrap().is_none());
}

#[tokio::test]
async fn add_validates_blank_fields() {
    let state = test_state().await;
    let err = state
        .customers()
        .add(customer_create("", "1000000005"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = state
        .customers()
        .add(customer_create("Frank", "  "))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn membership_invariants_are_enforced_at_add() {
    let state = test_state().await;
    let memberships = state.memberships();

    let err = memberships
        .add(MembershipCreate {
            customer_id: 1,
            tier: MembershipTier::Silver,
            discount_percentage: -1.0,
            points: 0,
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let err = memberships
        .add(MembershipCreate {
            customer_id: 1,
            tier: MembershipTier::Silver,
            discount_percentage: 5.0,
            points: -10,
        })
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn mobile_lookup_returns_full_profile() {
    let state = test_state().await;

    let customer = state
        .customers()
        .add(CustomerCreate {
            name: "Priya".to_string(),
            phone: "9876543210".to_string(),
            email: Some("priya@example.com".to_string()),
            membership_number: Some("M-1001".to_string()),
        })
        .unwrap();
    state.customers().save_changes().await.unwrap();

    state
        .memberships()
        .add(MembershipCreate {
            customer_id: customer.id,
            tier: MembershipTier::Platinum,
            discount_percentage: 15.0,
            points: 2500,
        })
        .unwrap();
    state.memberships().save_changes().await.unwrap();

    state
        .preferences()
        .set_preference(customer.id, "language", "en", "ui")
        .await
        .unwrap();

    let profile = state
        .customers()
        .find_by_mobile_number("9876543210")
        .await
        .unwrap()
        .expect("customer should be found by phone");

    assert_eq!(profile.customer.name, "Priya");
    let membership = profile.membership.expect("membership should be attached");
    assert_eq!(membership.tier, MembershipTier::Platinum);
    assert_eq!(membership.discount_percentage, 15.0);
    assert!(!profile.preferences.is_empty());
    assert_eq!(profile.preferences[0].value, "en");
    assert_eq!(profile.preferences[0].category, "ui");
}

#[tokio::test]
async fn mobile_lookup_unknown_phone_is_soft_not_found() {
    let state = test_state().await;
    let profile = state
        .customers()
        .find_by_mobile_number("0000000000")
        .await
        .unwrap();
    assert!(profile.is_none());
}

#[tokio::test]
async fn set_preference_upserts_by_key() {
    let state = test_state().await;
    let customer = state
        .customers()
        .add(customer_create("Grace", "1000000006"))
        .unwrap();
    state.customers().save_changes().await.unwrap();
    let preferences = state.preferences();

    preferences
        .set_preference(customer.id, "language", "en", "ui")
        .await
        .unwrap();
    preferences
        .set_preference(customer.id, "language", "zh", "ui")
        .await
        .unwrap();
    preferences
        .set_preference(customer.id, "theme", "dark", "ui")
        .await
        .unwrap();

    let list = preferences.find_by_customer_id(customer.id).await.unwrap();
    assert_eq!(list.len(), 2);
    // Upsert keeps insertion order
    assert_eq!(list[0].key, "language");
    assert_eq!(list[0].value, "zh");

    let dict = preferences
        .preferences_dictionary(customer.id)
        .await
        .unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict.get("language").map(String::as_str), Some("zh"));
    assert_eq!(dict.get("theme").map(String::as_str), Some("dark"));
}

#[tokio::test]
async fn benefits_scoped_to_membership() {
    let state = test_state().await;

    let customer = state
        .customers()
        .add(customer_create("Hana", "1000000007"))
        .unwrap();
    state.customers().save_changes().await.unwrap();

    let membership = state
        .memberships()
        .add(MembershipCreate {
            customer_id: customer.id,
            tier: MembershipTier::Gold,
            discount_percentage: 10.0,
            points: 100,
        })
        .unwrap();
    state.memberships().save_changes().await.unwrap();

    // Empty before any benefit is attached
    let rows = state
        .benefits()
        .find_by_membership_id(membership.id)
        .await
        .unwrap();
    assert!(rows.is_empty());

    state
        .benefits()
        .add(BenefitCreate {
            membership_id: membership.id,
            name: "Gold Discount".to_string(),
            description: Some("10% off all orders".to_string()),
            benefit_type: BenefitType::PercentageDiscount,
            value: 10.0,
        })
        .unwrap();
    state
        .benefits()
        .add(BenefitCreate {
            membership_id: membership.id,
            name: "Birthday Dessert".to_string(),
            description: None,
            benefit_type: BenefitType::FreeItem,
            value: 1.0,
        })
        .unwrap();
    assert_eq!(state.benefits().save_changes().await.unwrap(), 2);

    let rows = state
        .benefits()
        .find_by_membership_id(membership.id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].benefit_type, BenefitType::PercentageDiscount);

    // Other membership IDs see nothing
    let rows = state.benefits().find_by_membership_id(-1).await.unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn file_backed_database_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("loyalty.db");
    let config = Config::with_database_path(db_path.to_str().unwrap());

    let state = AppState::initialize(&config).await.unwrap();
    state
        .customers()
        .add(customer_create("Ivan", "1000000008"))
        .unwrap();
    state.customers().save_changes().await.unwrap();

    let profile = state
        .customers()
        .find_by_mobile_number("1000000008")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(profile.customer.name, "Ivan");
    assert!(db_path.exists());
}
