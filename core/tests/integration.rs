//! Full CRUD lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then sends every operation
//! through `Router::send` with a ureq-backed `Transport`. Validates that the
//! built method, URL, headers and form bodies are accepted by a real server.

use restroute_core::{
    HttpMethod, HttpRequest, HttpResponse, Operation, Params, RestResource, Router, RouterError, Transport,
};
use serde::{Deserialize, Serialize};

const TOKEN: &str = "tok123";

#[derive(Debug, Deserialize, PartialEq)]
struct User {
    id: String,
    name: String,
    admin: bool,
}

#[derive(Serialize)]
struct NewUser<'a> {
    name: &'a str,
    admin: bool,
}

/// Executes requests with ureq.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses come back as data rather than `Err`.
struct UreqTransport;

impl Transport for UreqTransport {
    fn send(&self, req: HttpRequest) -> Result<HttpResponse, RouterError> {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(req.timeout))
            .build()
            .new_agent();

        let result = match req.method {
            HttpMethod::Get | HttpMethod::Delete => {
                let mut builder = if req.method == HttpMethod::Get {
                    agent.get(&req.url)
                } else {
                    agent.delete(&req.url)
                };
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                builder.call()
            }
            HttpMethod::Post | HttpMethod::Put => {
                let mut builder = if req.method == HttpMethod::Post {
                    agent.post(&req.url)
                } else {
                    agent.put(&req.url)
                };
                for (name, value) in &req.headers {
                    builder = builder.header(name.as_str(), value.as_str());
                }
                match req.body {
                    Some(body) => builder.send(body.as_bytes()),
                    None => builder.send_empty(),
                }
            }
        };
        let mut response = result.map_err(|e| RouterError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string().unwrap_or_default();

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }
}

fn parse<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> T {
    serde_json::from_str(&response.body).unwrap()
}

#[test]
fn crud_lifecycle() {
    // Step 1: start mock server on a random port.
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    let router = Router::new();
    let transport = UreqTransport;
    let users = RestResource::new(&format!("http://{addr}/"), "users");

    // Step 2: create without a token is refused before the body is read.
    let mut params = Params::new();
    params.insert("name".to_string(), "Mallory".into());
    let response = router.send(&transport, Operation::Create(&users, params), None).unwrap();
    assert_eq!(response.status, 401);

    // Step 3: create a user from a typed payload.
    let op = Operation::create_from(&users, &NewUser { name: "Alice", admin: false }).unwrap();
    let response = router.send(&transport, op, Some(TOKEN)).unwrap();
    assert_eq!(response.status, 201);
    let created: User = parse(&response);
    assert_eq!(created.name, "Alice");
    assert!(!created.admin);
    let id = created.id.clone();

    // Step 4: read it back without a token.
    let response = router.send(&transport, Operation::Read(&users, id.clone()), None).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(parse::<User>(&response), created);

    // Step 5: update with reserved characters in the value.
    let mut params = Params::new();
    params.insert("name".to_string(), "Alice & Bob".into());
    params.insert("admin".to_string(), true.into());
    let response = router
        .send(&transport, Operation::Update(&users, id.clone(), params), Some(TOKEN))
        .unwrap();
    assert_eq!(response.status, 200);
    let updated: User = parse(&response);
    assert_eq!(updated.name, "Alice & Bob");
    assert!(updated.admin);

    // Step 6: destroy without a token is refused by the server.
    let response = router.send(&transport, Operation::Destroy(&users, id.clone()), None).unwrap();
    assert_eq!(response.status, 401);

    // Step 7: destroy with a token.
    let response = router
        .send(&transport, Operation::Destroy(&users, id.clone()), Some(TOKEN))
        .unwrap();
    assert_eq!(response.status, 204);

    // Step 8: read after destroy.
    let response = router.send(&transport, Operation::Read(&users, id), None).unwrap();
    assert_eq!(response.status, 404);

    // Step 9: build errors never reach the server.
    let err = router
        .send(&transport, Operation::Read(&users, String::new()), None)
        .unwrap_err();
    assert!(matches!(err, RouterError::InvalidResource { .. }));
}
