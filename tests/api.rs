use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use sqlx::SqlitePool;

use superheroes::{HeroDetail, HeroPowerDetail, WELCOME_MESSAGE, create_router, seed, sql};

async fn seeded_server() -> (TestServer, SqlitePool) {
    let pool = sql::open_in_memory().await.unwrap();
    seed::seed(&pool, false).await.unwrap();
    let server = TestServer::new(create_router(pool.clone())).unwrap();
    (server, pool)
}

#[tokio::test]
async fn welcome() {
    let (server, _pool) = seeded_server().await;
    let response = server.get("/").await;
    response.assert_status_ok();
    response.assert_text(WELCOME_MESSAGE);
}

#[tokio::test]
async fn heroes_are_listed_as_summaries() {
    let (server, _pool) = seeded_server().await;

    let response = server.get("/heroes").await;
    response.assert_status_ok();
    let heroes: Vec<Value> = response.json();
    assert_eq!(heroes.len(), seed::HEROES.len());
    assert_eq!(
        heroes[0],
        json!({"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"})
    );
    for hero in &heroes {
        let mut keys: Vec<&String> = hero.as_object().unwrap().keys().collect();
        keys.sort();
        assert_eq!(keys, ["id", "name", "super_name"]);
    }
}

#[tokio::test]
async fn hero_detail_includes_powers() {
    let (server, _pool) = seeded_server().await;

    let response = server.get("/heroes/1").await;
    response.assert_status_ok();
    let hero: HeroDetail = response.json();
    assert_eq!(hero.super_name, "Ms. Marvel");
    let powers: Vec<(&str, String)> = hero
        .hero_powers
        .iter()
        .map(|hp| (hp.power.name.as_str(), hp.strength.to_string()))
        .collect();
    assert_eq!(
        powers,
        vec![
            ("flight", "Strong".to_string()),
            ("elasticity", "Average".to_string()),
        ]
    );
    assert!(hero.hero_powers.iter().all(|hp| hp.hero_id == 1));
}

#[tokio::test]
async fn create_average_hero_power() {
    let (server, _pool) = seeded_server().await;

    let response = server
        .post("/hero_powers")
        .json(&json!({"strength": "Average", "hero_id": 1, "power_id": 2}))
        .await;
    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let id = body["id"].as_i64().unwrap();
    assert_eq!(
        body,
        json!({
            "id": id,
            "hero_id": 1,
            "power_id": 2,
            "strength": "Average",
            "hero": {"id": 1, "name": "Kamala Khan", "super_name": "Ms. Marvel"},
            "power": {
                "id": 2,
                "name": "flight",
                "description": "gives the wielder the ability to fly through the skies at supersonic speed",
            },
        })
    );

    let hero: HeroDetail = server.get("/heroes/1").await.json();
    assert!(hero.hero_powers.iter().any(|hp| hp.id == id));
}

#[tokio::test]
async fn created_hero_power_round_trips_through_types() {
    let (server, _pool) = seeded_server().await;
    let created: HeroPowerDetail = server
        .post("/hero_powers")
        .json(&json!({"strength": "Weak", "hero_id": 4, "power_id": 3}))
        .await
        .json();
    assert_eq!(created.hero.super_name, "The Wasp");
    assert_eq!(created.power.name, "super human senses");
}

#[tokio::test]
async fn short_description_patch_is_rejected() {
    let (server, _pool) = seeded_server().await;
    let before: Value = server.get("/powers/4").await.json();

    let response = server
        .patch("/powers/4")
        .json(&json!({"description": "short"}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_json(&json!({"errors": ["description must be at least 20 characters long"]}));

    let after: Value = server.get("/powers/4").await.json();
    assert_eq!(before, after);
}

#[tokio::test]
async fn patch_of_missing_power_is_not_found() {
    let (server, _pool) = seeded_server().await;
    let response = server
        .patch("/powers/5")
        .json(&json!({"description": "short"}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"error": "Power not found"}));
}

#[tokio::test]
async fn deleting_a_hero_removes_their_hero_powers() {
    let (server, pool) = seeded_server().await;

    let mut tx = pool.begin().await.unwrap();
    assert!(sql::hero::delete(&mut tx, 1).await.unwrap());
    tx.commit().await.unwrap();

    server
        .get("/heroes/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let dangling: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM hero_powers WHERE hero_id = 1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(dangling, 0);

    let response = server
        .post("/hero_powers")
        .json(&json!({"strength": "Strong", "hero_id": 1, "power_id": 1}))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"error": "Hero not found"}));
}
