// tests/support/mod.rs
//! In-process stand-in for the biodata REST service.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use uuid::Uuid;

use biodata_karyawan::middleware::navigator::HistoryNavigator;
use biodata_karyawan::middleware::session::{MemoryCookieJar, TokenStore};
use biodata_karyawan::services::api_client::ApiClient;

pub const ADMIN_TOKEN: &str = "admin-token-0000-aaaa";
pub const USER_TOKEN: &str = "user-token-1111-bbbb";
pub const USER_EMAIL: &str = "budi@contoh.co.id";

#[derive(Debug, Clone)]
pub struct Seen {
    pub method: String,
    pub path: String,
    pub query: String,
    pub bearer: Option<String>,
}

#[derive(Default)]
pub struct MockState {
    /// token -> (email, role)
    pub tokens: HashMap<String, (String, String)>,
    /// Stored records in insertion order, each carrying `_id` and `email`.
    pub records: Vec<Value>,
    pub registered: Vec<String>,
    /// Returned once by the next `POST /biodata` instead of saving.
    pub save_failure: Option<(u16, Value)>,
    /// Every path listed here answers 401 regardless of token.
    pub expired_paths: Vec<String>,
    pub seen: Vec<Seen>,
}

type Shared = web::Data<Mutex<MockState>>;

pub struct MockApi {
    pub base_url: String,
    pub state: Shared,
    handle: ServerHandle,
}

fn lock(state: &Shared) -> std::sync::MutexGuard<'_, MockState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

fn bearer(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Logs the request and resolves its caller, or answers 401.
fn caller(req: &HttpRequest, state: &Shared) -> Result<(String, String), HttpResponse> {
    let mut st = lock(state);
    let token = bearer(req);
    st.seen.push(Seen {
        method: req.method().to_string(),
        path: req.path().to_string(),
        query: req.query_string().to_string(),
        bearer: token.clone(),
    });
    if st.expired_paths.iter().any(|p| p == req.path()) {
        return Err(HttpResponse::Unauthorized().json(json!({ "message": "Token expired" })));
    }
    token
        .and_then(|t| st.tokens.get(&t).cloned())
        .ok_or_else(|| HttpResponse::Unauthorized().json(json!({ "message": "Unauthorized" })))
}

fn require_admin(role: &str) -> Result<(), HttpResponse> {
    if role == "ADMIN" {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(json!({ "message": "Admin only" })))
    }
}

fn text_of(record: &Value, key: &str) -> String {
    record.get(key).and_then(Value::as_str).unwrap_or_default().to_lowercase()
}

async fn my_biodata(req: HttpRequest, state: Shared) -> HttpResponse {
    let (email, _) = match caller(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let st = lock(&state);
    match st.records.iter().find(|r| r["email"] == email) {
        Some(record) => HttpResponse::Ok().json(json!({ "message": "OK", "data": record })),
        None => HttpResponse::NotFound().json(json!({ "message": "Biodata not found" })),
    }
}

async fn save_biodata(req: HttpRequest, state: Shared, body: web::Json<Value>) -> HttpResponse {
    let (email, _) = match caller(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    let mut st = lock(&state);
    if let Some((status, body)) = st.save_failure.take() {
        let status = actix_web::http::StatusCode::from_u16(status)
            .unwrap_or(actix_web::http::StatusCode::BAD_REQUEST);
        return HttpResponse::build(status).json(body);
    }

    let mut record = body.into_inner();
    record["email"] = json!(email);
    if let Some(obj) = record.as_object_mut() {
        obj.remove("id");
    }
    // normalise the way the real service does: numbers and a derived label
    if let Some(salary) = record["gajiDiharapkan"].as_str().and_then(|s| s.parse::<u64>().ok()) {
        record["gajiDiharapkan"] = json!(salary);
    }
    let place = record["tempatLahir"].as_str().unwrap_or_default().to_string();
    let date = record["tanggalLahir"].as_str().unwrap_or_default().to_string();
    record["tempatTanggalLahir"] = json!(format!("{}, {}", place, date));

    let existing = st.records.iter().position(|r| r["email"] == email);
    let id = match existing {
        Some(i) => st.records[i]["_id"].clone(),
        None => json!(Uuid::new_v4().to_string()),
    };
    record["_id"] = id;
    record["createdAt"] = json!("2024-03-07T10:00:00.000Z");
    match existing {
        Some(i) => st.records[i] = record.clone(),
        None => st.records.push(record.clone()),
    }
    HttpResponse::Ok().json(json!({ "message": "Biodata saved successfully", "data": record }))
}

#[derive(serde::Deserialize)]
struct ListParams {
    page: Option<usize>,
    limit: Option<usize>,
    nama: Option<String>,
    posisi: Option<String>,
    pendidikan: Option<String>,
}

async fn list_biodata(req: HttpRequest, state: Shared, params: web::Query<ListParams>) -> HttpResponse {
    let (_, role) = match caller(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    if let Err(resp) = require_admin(&role) {
        return resp;
    }
    let st = lock(&state);
    let name = params.nama.clone().unwrap_or_default().to_lowercase();
    let position = params.posisi.clone().unwrap_or_default().to_lowercase();
    let matching: Vec<&Value> = st
        .records
        .iter()
        .filter(|r| text_of(r, "namaLengkap").contains(&name))
        .filter(|r| text_of(r, "posisiDilamar").contains(&position))
        .filter(|r| match &params.pendidikan {
            Some(level) => r["pendidikanTerakhir"]
                .as_array()
                .is_some_and(|edu| edu.iter().any(|e| e["jenjang"] == json!(level))),
            None => true,
        })
        .collect();

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).max(1);
    let total = matching.len();
    let pages = total.div_ceil(limit);
    let rows: Vec<&Value> = matching.into_iter().skip((page - 1) * limit).take(limit).collect();
    HttpResponse::Ok().json(json!({
        "message": "OK",
        "data": {
            "biodata": rows,
            "pagination": { "page": page, "limit": limit, "total": total, "pages": pages }
        }
    }))
}

async fn get_biodata(req: HttpRequest, state: Shared, id: web::Path<String>) -> HttpResponse {
    let (_, role) = match caller(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    if let Err(resp) = require_admin(&role) {
        return resp;
    }
    let st = lock(&state);
    match st.records.iter().find(|r| r["_id"] == json!(id.as_str())) {
        Some(record) => HttpResponse::Ok().json(json!({ "message": "OK", "data": record })),
        None => HttpResponse::NotFound().json(json!({ "message": "Biodata not found" })),
    }
}

async fn delete_biodata(req: HttpRequest, state: Shared, id: web::Path<String>) -> HttpResponse {
    let (_, role) = match caller(&req, &state) {
        Ok(c) => c,
        Err(resp) => return resp,
    };
    if let Err(resp) = require_admin(&role) {
        return resp;
    }
    let mut st = lock(&state);
    let before = st.records.len();
    st.records.retain(|r| r["_id"] != json!(id.as_str()));
    if st.records.len() == before {
        return HttpResponse::NotFound().json(json!({ "message": "Biodata not found" }));
    }
    HttpResponse::Ok().json(json!({ "message": "Biodata deleted" }))
}

async fn signup(state: Shared, body: web::Json<Value>) -> HttpResponse {
    let email = body["email"].as_str().unwrap_or_default().to_string();
    let mut st = lock(&state);
    st.seen.push(Seen {
        method: "POST".into(),
        path: "/api/auth/signup".into(),
        query: body.to_string(),
        bearer: None,
    });
    if st.registered.contains(&email) {
        return HttpResponse::BadRequest().json(json!({ "message": "Email already registered" }));
    }
    st.registered.push(email);
    HttpResponse::Created().json(json!({ "message": "User registered successfully" }))
}

impl MockApi {
    pub async fn start() -> Self {
        let mut initial = MockState::default();
        initial
            .tokens
            .insert(ADMIN_TOKEN.into(), ("admin@contoh.co.id".into(), "ADMIN".into()));
        initial
            .tokens
            .insert(USER_TOKEN.into(), (USER_EMAIL.into(), "USER".into()));
        let state = web::Data::new(Mutex::new(initial));

        let data = state.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/api/biodata/me", web::get().to(my_biodata))
                .route("/api/biodata/all", web::get().to(list_biodata))
                .route("/api/biodata", web::post().to(save_biodata))
                .route("/api/biodata/{id}", web::get().to(get_biodata))
                .route("/api/biodata/{id}", web::delete().to(delete_biodata))
                .route("/api/auth/signup", web::post().to(signup))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind mock api");

        let addr = server.addrs()[0];
        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);

        Self {
            base_url: format!("http://{}/api", addr),
            state,
            handle,
        }
    }

    /// Stores a record for `email` and returns its id.
    pub fn seed(&self, email: &str, mut record: Value) -> String {
        let id = Uuid::new_v4().to_string();
        record["_id"] = json!(id);
        record["email"] = json!(email);
        lock(&self.state).records.push(record);
        id
    }

    pub fn with_state<R>(&self, f: impl FnOnce(&mut MockState) -> R) -> R {
        f(&mut lock(&self.state))
    }

    pub fn seen(&self) -> Vec<Seen> {
        lock(&self.state).seen.clone()
    }

    pub async fn stop(self) {
        self.handle.stop(true).await;
    }
}

pub struct Harness {
    pub api: ApiClient,
    pub store: Arc<TokenStore<MemoryCookieJar>>,
    pub navigator: Arc<HistoryNavigator>,
}

/// A client wired to `mock`, signed in when `auth` is given.
pub fn harness(mock: &MockApi, auth: Option<(&str, &str)>) -> Harness {
    let store = Arc::new(TokenStore::new(MemoryCookieJar::default()));
    if let Some((token, role)) = auth {
        store.set_auth(token, role).expect("set auth");
    }
    let navigator = Arc::new(HistoryNavigator::default());
    let api = ApiClient::new(mock.base_url.clone(), store.clone(), navigator.clone());
    Harness {
        api,
        store,
        navigator,
    }
}

/// A record for the list endpoints.
pub fn employee(name: &str, position: &str, level: &str, major: &str) -> Value {
    json!({
        "namaLengkap": name,
        "posisiDilamar": position,
        "gajiDiharapkan": 8000000,
        "pendidikanTerakhir": [
            { "jenjang": level, "institusi": "Universitas Udayana", "jurusan": major, "tahunLulus": 2019, "ipk": 3.5 }
        ],
        "riwayatPelatihan": [],
        "riwayatPekerjaan": [],
        "orangTerdekatDapatDihubungi": [],
        "skill": []
    })
}
