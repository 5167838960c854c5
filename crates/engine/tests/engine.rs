use chrono::NaiveDate;
use sea_orm::Database;

use engine::{Category, Engine, EngineError, MoneyCents, NewTransaction, TransactionPatch};
use migration::MigratorTrait;

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    Engine::builder().database(db).build()
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn new_tx(title: &str, cents: i64, on: &str, category: Category) -> NewTransaction {
    NewTransaction {
        title: title.to_string(),
        amount: MoneyCents::new(cents),
        date: date(on),
        category,
        description: None,
    }
}

#[tokio::test]
async fn add_and_get_roundtrip() {
    let engine = engine_with_db().await;

    let id = engine
        .add_transaction(NewTransaction {
            description: Some("weekly shop".to_string()),
            ..new_tx("Groceries run", 45_10, "2025-07-03", Category::Groceries)
        })
        .await
        .unwrap();

    let tx = engine.transaction(id).await.unwrap();
    assert_eq!(tx.title, "Groceries run");
    assert_eq!(tx.amount, MoneyCents::new(45_10));
    assert_eq!(tx.date, date("2025-07-03"));
    assert_eq!(tx.category, Category::Groceries);
    assert_eq!(tx.description.as_deref(), Some("weekly shop"));
}

#[tokio::test]
async fn list_is_ordered_by_date_ascending() {
    let engine = engine_with_db().await;

    engine
        .add_transaction(new_tx("later", 10_00, "2025-07-20", Category::Other))
        .await
        .unwrap();
    engine
        .add_transaction(new_tx("earlier", 10_00, "2025-06-01", Category::Other))
        .await
        .unwrap();

    let titles: Vec<_> = engine
        .transactions()
        .await
        .unwrap()
        .into_iter()
        .map(|tx| tx.title)
        .collect();
    assert_eq!(titles, ["earlier", "later"]);
}

#[tokio::test]
async fn negative_amount_and_blank_title_are_rejected() {
    let engine = engine_with_db().await;

    let err = engine
        .add_transaction(new_tx("refund?", -5_00, "2025-07-01", Category::Other))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));

    let err = engine
        .add_transaction(new_tx("   ", 5_00, "2025-07-01", Category::Other))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidTitle(_)));
}

#[tokio::test]
async fn partial_update_merges_fields() {
    let engine = engine_with_db().await;

    let id = engine
        .add_transaction(NewTransaction {
            description: Some("old note".to_string()),
            ..new_tx("Bus pass", 60_00, "2025-07-05", Category::Transportation)
        })
        .await
        .unwrap();

    let updated = engine
        .update_transaction(
            id,
            TransactionPatch {
                amount: Some(MoneyCents::new(65_00)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    // Only the amount changed; everything else survives the merge.
    assert_eq!(updated.amount, MoneyCents::new(65_00));
    assert_eq!(updated.title, "Bus pass");
    assert_eq!(updated.category, Category::Transportation);
    assert_eq!(updated.description.as_deref(), Some("old note"));

    let cleared = engine
        .update_transaction(
            id,
            TransactionPatch {
                description: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(cleared.description, None);

    let stored = engine.transaction(id).await.unwrap();
    assert_eq!(stored, cleared);
}

#[tokio::test]
async fn delete_removes_the_record() {
    let engine = engine_with_db().await;

    let id = engine
        .add_transaction(new_tx("Cinema", 14_00, "2025-07-12", Category::Entertainment))
        .await
        .unwrap();

    engine.delete_transaction(id).await.unwrap();

    let err = engine.transaction(id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    let err = engine.delete_transaction(id).await.unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn budget_upsert_is_idempotent_per_category_month() {
    let engine = engine_with_db().await;

    engine
        .set_budget(Category::FoodAndDining, "2025-07", MoneyCents::new(700_00))
        .await
        .unwrap();
    engine
        .set_budget(Category::FoodAndDining, "2025-07", MoneyCents::new(800_00))
        .await
        .unwrap();

    let budgets = engine.budgets(Some("2025-07")).await.unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].category, Category::FoodAndDining);
    assert_eq!(budgets[0].amount, MoneyCents::new(800_00));
}

#[tokio::test]
async fn budgets_filter_by_month_or_list_all() {
    let engine = engine_with_db().await;

    engine
        .set_budget(Category::Groceries, "2025-06", MoneyCents::new(600_00))
        .await
        .unwrap();
    engine
        .set_budget(Category::Groceries, "2025-07", MoneyCents::new(650_00))
        .await
        .unwrap();

    assert_eq!(engine.budgets(Some("2025-06")).await.unwrap().len(), 1);
    assert_eq!(engine.budgets(None).await.unwrap().len(), 2);
    assert!(engine.budgets(Some("2025-08")).await.unwrap().is_empty());

    let err = engine.budgets(Some("junk")).await.unwrap_err();
    assert!(matches!(err, EngineError::InvalidMonth(_)));
}

#[tokio::test]
async fn bad_month_token_is_rejected_on_save() {
    let engine = engine_with_db().await;

    let err = engine
        .set_budget(Category::Other, "2025-7", MoneyCents::new(100_00))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidMonth(_)));
}

#[tokio::test]
async fn dashboard_combines_ledger_and_budgets() {
    let engine = engine_with_db().await;

    engine
        .add_transaction(new_tx("jun rent", 1450_00, "2025-06-01", Category::BillsAndUtilities))
        .await
        .unwrap();
    engine
        .add_transaction(new_tx("jul rent", 1450_00, "2025-07-01", Category::BillsAndUtilities))
        .await
        .unwrap();
    engine
        .add_transaction(new_tx("jul dinner", 150_00, "2025-07-14", Category::FoodAndDining))
        .await
        .unwrap();
    engine
        .set_budget(Category::FoodAndDining, "2025-07", MoneyCents::new(800_00))
        .await
        .unwrap();

    let dashboard = engine.dashboard("2025-07").await.unwrap();
    assert_eq!(dashboard.monthly.len(), 2);
    assert_eq!(
        dashboard.insight.as_deref(),
        Some("You spent $150.00 more than the previous month.")
    );

    let food = dashboard
        .budget_vs_actual
        .iter()
        .find(|row| row.category == Category::FoodAndDining)
        .unwrap();
    assert_eq!(food.budgeted, MoneyCents::new(800_00));
    assert_eq!(food.actual, MoneyCents::new(150_00));
}
