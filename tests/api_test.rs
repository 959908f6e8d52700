//! Integration tests for API endpoints.
//!
//! The router is driven with `oneshot` against hand-written mock services,
//! so no database is needed. The database handle is disconnected on purpose.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use animal_farm::api::{create_router, AppState};
use animal_farm::domain::{
    AccountResponse, AnimalInput, AnimalResponse, AnimalType, AnimalTypeInput, AuthResponse,
    BreedInput, BreedResponse, LoginRequest, RegisterRequest, WeightingInput, WeightingResponse,
};
use animal_farm::errors::{AppError, AppResult};
use animal_farm::infra::Database;
use animal_farm::services::{
    AnimalService, AnimalTypeService, AuthService, BreedService, Claims, Services, UserService,
    WeightingService, REGISTRATION_MESSAGE,
};

const ADMIN_TOKEN: &str = "admin-token";
const USER_TOKEN: &str = "user-token";

/// Account behind `USER_TOKEN`
const USER_ID: Uuid = Uuid::from_u128(0x1111);
const ADMIN_ID: Uuid = Uuid::from_u128(0xAAAA);
/// Account that owns weighting 5
const OTHER_ID: Uuid = Uuid::from_u128(0x2222);

// =============================================================================
// Mock Services for Testing
// =============================================================================

struct MockAuthService;

#[async_trait]
impl AuthService for MockAuthService {
    async fn register(&self, _request: RegisterRequest) -> AppResult<String> {
        Ok(REGISTRATION_MESSAGE.to_string())
    }

    async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        if request.user_name == "alice" && request.password == "Secret1!" {
            Ok(AuthResponse {
                token: USER_TOKEN.to_string(),
                user_name: request.user_name,
                roles: vec!["User".to_string()],
                expiration: Utc::now() + Duration::minutes(60),
            })
        } else {
            Err(AppError::InvalidCredentials)
        }
    }

    async fn activate(&self, _user_id: Uuid, token: &str) -> AppResult<bool> {
        Ok(token == "good-token")
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let (sub, roles) = match token {
            ADMIN_TOKEN => (ADMIN_ID, vec!["Admin".to_string()]),
            USER_TOKEN => (USER_ID, vec!["User".to_string()]),
            _ => return Err(AppError::Unauthorized),
        };

        Ok(Claims {
            sub,
            name: "tester".to_string(),
            email: "tester@example.com".to_string(),
            roles,
            iss: "AnimalFarm".to_string(),
            aud: "AnimalFarmClient".to_string(),
            exp: Utc::now().timestamp() + 3600,
            iat: Utc::now().timestamp(),
        })
    }
}

struct MockUserService;

#[async_trait]
impl UserService for MockUserService {
    async fn list_users(&self) -> AppResult<Vec<AccountResponse>> {
        Ok(vec![AccountResponse {
            id: ADMIN_ID,
            user_name: "admin".to_string(),
            email: "admin@animalfarm.com".to_string(),
            is_active: true,
            roles: vec!["Admin".to_string()],
        }])
    }

    async fn activate_user(&self, id: Uuid) -> AppResult<()> {
        known_user(id)
    }

    async fn deactivate_user(&self, id: Uuid) -> AppResult<()> {
        known_user(id)
    }
}

fn known_user(id: Uuid) -> AppResult<()> {
    if id == USER_ID {
        Ok(())
    } else {
        Err(AppError::not_found(format!("User with id '{}' not found.", id)))
    }
}

/// Holds animal type 1 ("Bovine"), which still has breeds.
struct MockAnimalTypeService;

#[async_trait]
impl AnimalTypeService for MockAnimalTypeService {
    async fn list(&self) -> AppResult<Vec<AnimalType>> {
        Ok(vec![bovine()])
    }

    async fn get(&self, id: i32) -> AppResult<Option<AnimalType>> {
        Ok((id == 1).then(bovine))
    }

    async fn create(&self, input: AnimalTypeInput) -> AppResult<AnimalType> {
        Ok(AnimalType {
            id: 2,
            name: input.name,
        })
    }

    async fn update(&self, id: i32, input: AnimalTypeInput) -> AppResult<AnimalType> {
        Ok(AnimalType { id, name: input.name })
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        if id == 1 {
            return Err(AppError::conflict(
                "Animal type 'Bovine' cannot be deleted because 1 breed(s) reference it.",
            ));
        }
        Ok(())
    }
}

fn bovine() -> AnimalType {
    AnimalType {
        id: 1,
        name: "Bovine".to_string(),
    }
}

struct MockBreedService;

#[async_trait]
impl BreedService for MockBreedService {
    async fn list(&self) -> AppResult<Vec<BreedResponse>> {
        Ok(vec![holstein()])
    }

    async fn list_by_animal_type(&self, animal_type_id: i32) -> AppResult<Vec<BreedResponse>> {
        Ok(vec![holstein()]
            .into_iter()
            .filter(|b| b.animal_type_id == animal_type_id)
            .collect())
    }

    async fn get(&self, id: i32) -> AppResult<Option<BreedResponse>> {
        Ok((id == 4).then(holstein))
    }

    async fn create(&self, input: BreedInput) -> AppResult<BreedResponse> {
        Err(AppError::not_found(format!(
            "Animal type with id {} not found.",
            input.animal_type_id
        )))
    }

    async fn update(&self, _id: i32, _input: BreedInput) -> AppResult<BreedResponse> {
        Ok(holstein())
    }

    async fn delete(&self, _id: i32) -> AppResult<()> {
        Ok(())
    }
}

fn holstein() -> BreedResponse {
    BreedResponse {
        id: 4,
        name: "Holstein".to_string(),
        animal_type_id: 1,
        animal_type_name: "Bovine".to_string(),
    }
}

struct MockAnimalService;

#[async_trait]
impl AnimalService for MockAnimalService {
    async fn list(&self) -> AppResult<Vec<AnimalResponse>> {
        Ok(vec![])
    }

    async fn get(&self, _id: i32) -> AppResult<Option<AnimalResponse>> {
        Ok(None)
    }

    async fn create(&self, input: AnimalInput) -> AppResult<AnimalResponse> {
        Ok(AnimalResponse {
            id: 10,
            inventory_number: input.inventory_number,
            gender: input.gender,
            name: input.name,
            arrival_date: input.arrival_date,
            arrival_age_months: input.arrival_age_months,
            breed_id: input.breed_id,
            breed_name: "Holstein".to_string(),
            parent_animal_id: input.parent_animal_id,
            parent_animal_name: None,
        })
    }

    async fn update(&self, id: i32, _input: AnimalInput) -> AppResult<AnimalResponse> {
        Err(AppError::not_found(format!("Animal with id {} not found.", id)))
    }

    async fn delete(&self, _id: i32) -> AppResult<()> {
        Ok(())
    }
}

/// Weighting 5 belongs to `OTHER_ID`; everything else is missing.
struct MockWeightingService;

#[async_trait]
impl WeightingService for MockWeightingService {
    async fn list(&self, caller: Uuid) -> AppResult<Vec<WeightingResponse>> {
        Ok(vec![weighting(1, caller)])
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        caller: Uuid,
    ) -> AppResult<Vec<WeightingResponse>> {
        if user_id != caller && caller != ADMIN_ID {
            return Err(AppError::Forbidden);
        }
        Ok(vec![weighting(1, user_id)])
    }

    async fn get(&self, id: i32, caller: Uuid) -> AppResult<Option<WeightingResponse>> {
        match id {
            5 if caller == OTHER_ID || caller == ADMIN_ID => Ok(Some(weighting(5, OTHER_ID))),
            5 => Err(AppError::access_denied(
                "You do not have access to this weighting record.",
            )),
            _ => Ok(None),
        }
    }

    async fn create(&self, input: WeightingInput, caller: Uuid) -> AppResult<WeightingResponse> {
        let mut created = weighting(9, caller);
        created.animal_id = input.animal_id;
        created.date = input.date;
        created.weight_kg = input.normalized_weight();
        Ok(created)
    }

    async fn update(
        &self,
        _id: i32,
        _input: WeightingInput,
        _caller: Uuid,
    ) -> AppResult<WeightingResponse> {
        Err(AppError::conflict("A weighting for animal 1 on 2024-01-10 already exists."))
    }

    async fn delete(&self, id: i32, caller: Uuid) -> AppResult<()> {
        self.get(id, caller).await.map(|_| ())
    }
}

fn weighting(id: i32, user_id: Uuid) -> WeightingResponse {
    WeightingResponse {
        id,
        animal_id: 1,
        animal_name: "Daisy".to_string(),
        user_id,
        user_name: "tester".to_string(),
        date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
        weight_kg: Decimal::new(41250, 2),
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn app() -> Router {
    let services = Services::new(
        Arc::new(MockAuthService),
        Arc::new(MockUserService),
        Arc::new(MockAnimalTypeService),
        Arc::new(MockBreedService),
        Arc::new(MockAnimalService),
        Arc::new(MockWeightingService),
    );
    let database = Arc::new(Database::from_connection(DatabaseConnection::Disconnected));

    create_router(AppState::new(&services, database))
}

async fn send(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, body)
}

// =============================================================================
// Infrastructure Endpoints
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_banner() {
    let response = app()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"AnimalFarm API");
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let (status, body) = send(Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "unhealthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = send(Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "AnimalFarm API");
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_protected_route_requires_token() {
    let (status, body) = send(Method::GET, "/api/animals", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["statusCode"], 401);
}

#[tokio::test]
async fn test_unknown_token_is_rejected() {
    let (status, _) = send(Method::GET, "/api/animals", Some("forged"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_returns_message() {
    let payload = json!({
        "userName": "alice",
        "email": "alice@example.com",
        "password": "Secret1!"
    });
    let (status, body) = send(Method::POST, "/api/auth/register", None, Some(payload)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], REGISTRATION_MESSAGE);
}

#[tokio::test]
async fn test_register_validates_payload() {
    let payload = json!({ "userName": " ", "email": "nope", "password": "" });
    let (status, body) = send(Method::POST, "/api/auth/register", None, Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "One or more validation errors occurred.");
    assert_eq!(
        body["errors"],
        json!(["Email is invalid.", "Password is required.", "Username is required."])
    );
}

#[tokio::test]
async fn test_login_success_and_failure() {
    let good = json!({ "userName": "alice", "password": "Secret1!" });
    let (status, body) = send(Method::POST, "/api/auth/login", None, Some(good)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userName"], "alice");
    assert_eq!(body["roles"], json!(["User"]));
    assert!(body["token"].is_string());
    assert!(body["expiration"].is_string());

    let bad = json!({ "userName": "alice", "password": "wrong" });
    let (status, body) = send(Method::POST, "/api/auth/login", None, Some(bad)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid username or password.");
}

#[tokio::test]
async fn test_activation_link() {
    let uri = format!("/api/auth/activate?userId={}&token=good-token", USER_ID);
    let (status, body) = send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Account activated successfully.");

    let uri = format!("/api/auth/activate?userId={}&token=stale", USER_ID);
    let (status, body) = send(Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid activation link or token.");

    let (status, body) = send(Method::GET, "/api/auth/activate?userId=xyz", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid activation link or token.");
}

// =============================================================================
// Animal Types / Breeds / Animals
// =============================================================================

#[tokio::test]
async fn test_list_animal_types() {
    let (status, body) = send(Method::GET, "/api/animaltypes", Some(USER_TOKEN), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": 1, "name": "Bovine" }]));
}

#[tokio::test]
async fn test_missing_animal_type_is_404() {
    let (status, body) = send(Method::GET, "/api/animaltypes/99", Some(USER_TOKEN), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Animal type with id 99 not found.");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_create_animal_type_returns_201() {
    let payload = json!({ "name": "Ovine" });
    let (status, body) =
        send(Method::POST, "/api/animaltypes", Some(USER_TOKEN), Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 2, "name": "Ovine" }));
}

#[tokio::test]
async fn test_blank_animal_type_name_is_rejected() {
    let payload = json!({ "name": "" });
    let (status, body) =
        send(Method::POST, "/api/animaltypes", Some(USER_TOKEN), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Name is required."]));
}

#[tokio::test]
async fn test_malformed_json_is_a_validation_error() {
    let request = Request::post("/api/animaltypes")
        .header(header::AUTHORIZATION, format!("Bearer {}", USER_TOKEN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_animal_type_statuses() {
    let (status, body) =
        send(Method::DELETE, "/api/animaltypes/1", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["statusCode"], 409);

    let (status, body) =
        send(Method::DELETE, "/api/animaltypes/2", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_breeds_by_animal_type_route() {
    let (status, body) = send(
        Method::GET,
        "/api/breeds/by-animal-type/1",
        Some(USER_TOKEN),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["animalTypeName"], "Bovine");

    let (status, body) = send(Method::GET, "/api/breeds/4", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Holstein");
}

#[tokio::test]
async fn test_breed_with_unknown_type_is_404() {
    let payload = json!({ "name": "Jersey", "animalTypeId": 77 });
    let (status, body) = send(Method::POST, "/api/breeds", Some(USER_TOKEN), Some(payload)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Animal type with id 77 not found.");
}

#[tokio::test]
async fn test_create_animal_accepts_timestamp_dates() {
    let payload = json!({
        "inventoryNumber": "INV-0010",
        "gender": "Male",
        "name": "Ferdinand",
        "arrivalDate": "2024-03-15T23:30:00+02:00",
        "arrivalAgeMonths": 3,
        "breedId": 4
    });
    let (status, body) = send(Method::POST, "/api/animals", Some(USER_TOKEN), Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["arrivalDate"], "2024-03-15");
    assert_eq!(body["parentAnimalId"], Value::Null);
}

#[tokio::test]
async fn test_invalid_gender_is_rejected() {
    let payload = json!({
        "inventoryNumber": "INV-0011",
        "gender": "male",
        "name": "Ferdinand",
        "arrivalDate": "2024-03-15",
        "arrivalAgeMonths": 3,
        "breedId": 4
    });
    let (status, body) = send(Method::POST, "/api/animals", Some(USER_TOKEN), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Gender must be 'Male' or 'Female'."]));
}

// =============================================================================
// Weightings
// =============================================================================

#[tokio::test]
async fn test_weighting_is_owned_by_caller() {
    let payload = json!({ "animalId": 1, "date": "2024-02-01", "weightKg": 101.456 });
    let (status, body) =
        send(Method::POST, "/api/weightings", Some(USER_TOKEN), Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["userId"], USER_ID.to_string());
    assert_eq!(body["weightKg"], 101.46);
    assert_eq!(body["date"], "2024-02-01");
}

#[tokio::test]
async fn test_foreign_weighting_is_unauthorized() {
    let (status, body) = send(Method::GET, "/api/weightings/5", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "You do not have access to this weighting record.");

    let (status, body) = send(Method::GET, "/api/weightings/5", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], OTHER_ID.to_string());
}

#[tokio::test]
async fn test_missing_weighting_is_404() {
    let (status, body) = send(Method::GET, "/api/weightings/6", Some(USER_TOKEN), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Weighting with id 6 not found.");
}

#[tokio::test]
async fn test_weightings_by_user_scope() {
    let own = format!("/api/weightings/by-user/{}", USER_ID);
    let (status, _) = send(Method::GET, &own, Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);

    let other = format!("/api/weightings/by-user/{}", OTHER_ID);
    let (status, _) = send(Method::GET, &other, Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(Method::GET, &other, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["userId"], OTHER_ID.to_string());
}

#[tokio::test]
async fn test_zero_weight_is_rejected() {
    let payload = json!({ "animalId": 1, "date": "2024-02-01", "weightKg": 0 });
    let (status, body) =
        send(Method::POST, "/api/weightings", Some(USER_TOKEN), Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["Weight must be greater than zero."]));
}

// =============================================================================
// User Administration
// =============================================================================

#[tokio::test]
async fn test_user_admin_requires_admin_role() {
    let (status, body) = send(Method::GET, "/api/users", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["statusCode"], 403);

    let (status, body) = send(Method::GET, "/api/users", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["roles"], json!(["Admin"]));
    assert!(body[0].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_activate_and_deactivate_users() {
    let uri = format!("/api/users/{}/activate", USER_ID);
    let (status, body) = send(Method::PUT, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User activated successfully.");

    let uri = format!("/api/users/{}/deactivate", USER_ID);
    let (status, body) = send(Method::PUT, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deactivated successfully.");

    let uri = format!("/api/users/{}/activate", OTHER_ID);
    let (status, _) = send(Method::PUT, &uri, Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
