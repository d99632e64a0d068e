//! End-to-end HTTP flow: template catalogue -> bus model -> bus
//! provisioning -> status machine -> model change -> post-clone edits.
//!
//! Runs against a real on-disk SQLite database (tempdir) through the
//! full router with middleware, the same stack `main` serves.

use axum::Router;
use axum::body::{Body, to_bytes};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use fleet_server::api;
use fleet_server::core::{Config, ServerState};
use fleet_server::db::DbService;

struct TestApp {
    app: Router,
    // Keep the tempdir alive for the duration of the test
    _dir: tempfile::TempDir,
}

async fn setup() -> TestApp {
    let dir = tempfile::tempdir().expect("Failed to create tempdir");
    let db_path = dir.path().join("fleet.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("Failed to open database");
    let config = Config::with_overrides(db_path.to_string_lossy(), 0);
    let state = ServerState::new(config, db.pool);
    TestApp {
        app: api::create_router(state),
        _dir: dir,
    }
}

async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let response = app
        .clone()
        .oneshot(builder.body(body).expect("Failed to build request"))
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Response is not JSON")
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    request(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::POST, uri, Some(body)).await
}

async fn put(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    request(app, Method::PUT, uri, Some(body)).await
}

/// Create a template with one Premium zone and four seats, returning
/// the template id.
async fn seed_template(app: &Router, name: &str) -> i64 {
    let (status, template) = post(
        app,
        "/api/diagram-models",
        json!({
            "name": name,
            "max_capacity": 44,
            "num_floors": 1,
            "total_seats": 40,
            "seats_per_floor": [40],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let template_id = template["id"].as_i64().unwrap();

    let (status, _) = post(
        app,
        &format!("/api/diagram-models/{template_id}/zones"),
        json!({
            "name": "Premium",
            "row_numbers": [1, 2, 3],
            "price_multiplier": 1.5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    for (seat_number, row, col) in [("1A", 1, 1), ("1B", 1, 2), ("2A", 2, 1), ("2B", 2, 2)] {
        let (status, _) = post(
            app,
            &format!("/api/diagram-models/{template_id}/seats"),
            json!({
                "floor": 1,
                "seat_number": seat_number,
                "position_row": row,
                "position_col": col,
                "amenities": if col == 1 { json!(["WINDOW"]) } else { json!([]) },
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    template_id
}

async fn seed_bus_model(app: &Router, template_id: i64, model_name: &str) -> i64 {
    let (status, model) = post(
        app,
        "/api/bus-models",
        json!({
            "manufacturer": "Volvo",
            "model_name": model_name,
            "year": 2023,
            "max_capacity": 44,
            "num_floors": 1,
            "total_seats": 40,
            "default_diagram_model_id": template_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    model["id"].as_i64().unwrap()
}

#[tokio::test]
async fn full_provisioning_flow() {
    let t = setup().await;
    let app = &t.app;

    let template_id = seed_template(app, "Volvo 9700 Standard").await;
    let model_id = seed_bus_model(app, template_id, "9700").await;

    // Create a bus: the default template is cloned into a bus-owned diagram
    let (status, bus) = post(
        app,
        "/api/buses",
        json!({
            "registration_number": "AB-123-CD",
            "model_id": model_id,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bus["status"], "ACTIVE");
    let bus_id = bus["id"].as_i64().unwrap();
    let diagram_id = bus["seat_diagram_id"].as_i64().unwrap();

    // Cloned diagram carries the template's capacity and a derived name
    let (status, detail) = get(app, &format!("/api/buses/{bus_id}/seat-diagram")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["id"].as_i64().unwrap(), diagram_id);
    assert_eq!(detail["name"], "Volvo 9700 - AB-123-CD");
    assert_eq!(detail["total_seats"], 40);
    assert_eq!(detail["zones"].as_array().unwrap().len(), 1);
    assert_eq!(detail["seats"].as_array().unwrap().len(), 4);
    assert_eq!(detail["zones"][0]["name"], "Premium");
    assert_eq!(detail["zones"][0]["price_multiplier"], 1.5);

    // Same detail through the seat-diagrams surface
    let (status, direct) = get(app, &format!("/api/seat-diagrams/{diagram_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(direct["seats"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let t = setup().await;
    let app = &t.app;

    let template_id = seed_template(app, "Standard").await;
    let model_id = seed_bus_model(app, template_id, "9700").await;

    let payload = json!({ "registration_number": "XY-999-ZZ", "model_id": model_id });
    let (status, _) = post(app, "/api/buses", payload.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(app, "/api/buses", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn template_edits_do_not_touch_provisioned_buses() {
    let t = setup().await;
    let app = &t.app;

    let template_id = seed_template(app, "Standard").await;
    let model_id = seed_bus_model(app, template_id, "9700").await;

    let (_, bus) = post(
        app,
        "/api/buses",
        json!({ "registration_number": "AB-123-CD", "model_id": model_id }),
    )
    .await;
    let bus_id = bus["id"].as_i64().unwrap();

    // Rename the template and bump its capacity
    let (status, _) = put(
        app,
        &format!("/api/diagram-models/{template_id}"),
        json!({ "name": "Renamed", "total_seats": 50 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // The bus diagram is a snapshot, unaffected by the edit
    let (_, detail) = get(app, &format!("/api/buses/{bus_id}/seat-diagram")).await;
    assert_eq!(detail["total_seats"], 40);
    assert_eq!(detail["name"], "Volvo 9700 - AB-123-CD");
}

#[tokio::test]
async fn model_change_swaps_the_diagram_atomically() {
    let t = setup().await;
    let app = &t.app;

    let template_a = seed_template(app, "Layout A").await;
    let template_b = seed_template(app, "Layout B").await;
    let model_a = seed_bus_model(app, template_a, "9700").await;
    let model_b = seed_bus_model(app, template_b, "9900").await;

    let (_, bus) = post(
        app,
        "/api/buses",
        json!({ "registration_number": "AB-123-CD", "model_id": model_a }),
    )
    .await;
    let bus_id = bus["id"].as_i64().unwrap();
    let old_diagram_id = bus["seat_diagram_id"].as_i64().unwrap();

    let (status, updated) = put(
        app,
        &format!("/api/buses/{bus_id}"),
        json!({ "model_id": model_b }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let new_diagram_id = updated["seat_diagram_id"].as_i64().unwrap();
    assert_ne!(new_diagram_id, old_diagram_id);
    assert_eq!(updated["model_id"].as_i64().unwrap(), model_b);

    // Old diagram (and its children) are gone
    let (status, _) = get(app, &format!("/api/seat-diagrams/{old_diagram_id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // New diagram is a full clone of template B
    let (status, detail) = get(app, &format!("/api/seat-diagrams/{new_diagram_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["name"], "Volvo 9900 - AB-123-CD");
    assert_eq!(detail["seats"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn status_machine_is_enforced_over_http() {
    let t = setup().await;
    let app = &t.app;

    let template_id = seed_template(app, "Standard").await;
    let model_id = seed_bus_model(app, template_id, "9700").await;

    let (_, bus) = post(
        app,
        "/api/buses",
        json!({ "registration_number": "AB-123-CD", "model_id": model_id }),
    )
    .await;
    let bus_id = bus["id"].as_i64().unwrap();

    // Retire the bus
    let (status, bus) = put(
        app,
        &format!("/api/buses/{bus_id}"),
        json!({ "status": "RETIRED" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bus["status"], "RETIRED");

    // RETIRED may not go straight back to ACTIVE
    let (status, body) = put(
        app,
        &format!("/api/buses/{bus_id}"),
        json!({ "status": "ACTIVE" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "E0005");

    // The only exit from RETIRED is OUT_OF_SERVICE
    let (status, next) = get(app, &format!("/api/buses/{bus_id}/status/next")).await;
    assert_eq!(status, StatusCode::OK);
    let next: Vec<&str> = next
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(next, vec!["RETIRED", "OUT_OF_SERVICE"]);

    let (status, _) = put(
        app,
        &format!("/api/buses/{bus_id}"),
        json!({ "status": "OUT_OF_SERVICE" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, bus) = put(
        app,
        &format!("/api/buses/{bus_id}"),
        json!({ "status": "ACTIVE" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bus["status"], "ACTIVE");
}

#[tokio::test]
async fn post_clone_edits_are_scoped_to_the_owning_diagram() {
    let t = setup().await;
    let app = &t.app;

    let template_id = seed_template(app, "Standard").await;
    let model_id = seed_bus_model(app, template_id, "9700").await;

    let (_, bus_one) = post(
        app,
        "/api/buses",
        json!({ "registration_number": "AA-111-AA", "model_id": model_id }),
    )
    .await;
    let (_, bus_two) = post(
        app,
        "/api/buses",
        json!({ "registration_number": "BB-222-BB", "model_id": model_id }),
    )
    .await;
    let diagram_one = bus_one["seat_diagram_id"].as_i64().unwrap();
    let diagram_two = bus_two["seat_diagram_id"].as_i64().unwrap();

    let (_, detail_one) = get(app, &format!("/api/seat-diagrams/{diagram_one}")).await;
    let zone_id = detail_one["zones"][0]["id"].as_i64().unwrap();
    let seat_id = detail_one["seats"][0]["id"].as_i64().unwrap();

    // Edit through the owning diagram works
    let (status, zone) = put(
        app,
        &format!("/api/seat-diagrams/{diagram_one}/zones/{zone_id}"),
        json!({ "price_multiplier": 2.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(zone["price_multiplier"], 2.0);

    let (status, seat) = put(
        app,
        &format!("/api/seat-diagrams/{diagram_one}/seats/{seat_id}"),
        json!({ "amenities": ["WINDOW", "USB"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(seat["amenities"].as_array().unwrap().len(), 2);

    // The same zone id through another bus's diagram is not found
    let (status, _) = put(
        app,
        &format!("/api/seat-diagrams/{diagram_two}/zones/{zone_id}"),
        json!({ "price_multiplier": 3.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The other bus's clone is untouched
    let (_, detail_two) = get(app, &format!("/api/seat-diagrams/{diagram_two}")).await;
    assert_eq!(detail_two["zones"][0]["price_multiplier"], 1.5);
}

#[tokio::test]
async fn amenity_assignment_replaces_the_full_set() {
    let t = setup().await;
    let app = &t.app;

    let template_id = seed_template(app, "Standard").await;
    let model_id = seed_bus_model(app, template_id, "9700").await;

    let (_, bus) = post(
        app,
        "/api/buses",
        json!({ "registration_number": "AB-123-CD", "model_id": model_id }),
    )
    .await;
    let bus_id = bus["id"].as_i64().unwrap();

    let (_, wifi) = post(app, "/api/amenities", json!({ "name": "WiFi" })).await;
    let (_, wc) = post(app, "/api/amenities", json!({ "name": "WC" })).await;
    let wifi_id = wifi["id"].as_i64().unwrap();
    let wc_id = wc["id"].as_i64().unwrap();

    let (status, assigned) = put(
        app,
        &format!("/api/buses/{bus_id}/amenities"),
        json!({ "amenity_ids": [wifi_id, wc_id] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assigned.as_array().unwrap().len(), 2);

    // Replace, not merge: the new set drops WiFi
    let (status, assigned) = put(
        app,
        &format!("/api/buses/{bus_id}/amenities"),
        json!({ "amenity_ids": [wc_id] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = assigned
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["WC"]);

    // An amenity in use cannot be deleted
    let (status, body) = request(
        app,
        Method::DELETE,
        &format!("/api/amenities/{wc_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}

#[tokio::test]
async fn referenced_template_cannot_be_deleted() {
    let t = setup().await;
    let app = &t.app;

    let template_id = seed_template(app, "Standard").await;
    seed_bus_model(app, template_id, "9700").await;

    let (status, body) = request(
        app,
        Method::DELETE,
        &format!("/api/diagram-models/{template_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "E0004");
}
