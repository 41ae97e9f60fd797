//! Tests for the mock user API, driven through the full request pipeline.

#[cfg(test)]
mod api_tests {
    use serde_json::{json, Value};

    use crate::api::{build_server, User};
    use crate::server::{HttpServer, ServerConfig};
    use crate::test_support::MockTcpStream;

    struct Reply {
        status_line: String,
        head: String,
        body: String,
    }

    impl Reply {
        fn json(&self) -> Value {
            serde_json::from_str(&self.body).unwrap()
        }
    }

    async fn request(raw: &str) -> Reply {
        let server: HttpServer = build_server(ServerConfig::default()).await;
        let mut stream = MockTcpStream::new(raw.as_bytes());
        let _ = HttpServer::handle_connection(&mut stream, server.routes.clone(), &server.config.cors, 8192).await;

        let written = stream.written();
        let (head, body) = written.split_once("\r\n\r\n").unwrap();
        Reply {
            status_line: head.lines().next().unwrap().to_string(),
            head: head.to_string(),
            body: body.to_string(),
        }
    }

    async fn get(path: &str) -> Reply {
        request(&format!("GET {path} HTTP/1.1\r\nHost: localhost:8000\r\n\r\n")).await
    }

    #[tokio::test]
    async fn test_root_lists_endpoints() {
        let reply = get("/").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert!(reply.head.contains("Content-Type: application/json\r\n"));

        let body = reply.json();
        assert!(body["message"].is_string());
        assert_eq!(body["endpoints"]["root"], "/");
        assert_eq!(body["endpoints"]["health"], "/api/health");
        assert_eq!(body["endpoints"]["users"], "/api/users");
    }

    #[tokio::test]
    async fn test_health_body_is_exact() {
        let reply = get("/api/health").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert_eq!(reply.body, r#"{"status":"ok","message":"Backend is running"}"#);
    }

    #[tokio::test]
    async fn test_list_users_in_order() {
        let reply = get("/api/users").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert!(reply.head.contains("Content-Type: application/json\r\n"));

        let users: Vec<User> = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(
            users,
            vec![
                User::new(1, "Alice", "alice@example.com"),
                User::new(2, "Bob", "bob@example.com"),
                User::new(3, "Charlie", "charlie@example.com"),
            ]
        );
    }

    #[tokio::test]
    async fn test_get_user_echoes_id_but_reports_id_one() {
        let reply = get("/api/users/42").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert_eq!(
            reply.json(),
            json!({"id": 1, "name": "User 42", "email": "user42@example.com"})
        );
    }

    #[tokio::test]
    async fn test_get_user_with_empty_id() {
        let reply = get("/api/users/").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert_eq!(reply.json()["name"], "User ");
        assert_eq!(reply.json()["email"], "user@example.com");
    }

    #[tokio::test]
    async fn test_get_user_with_non_numeric_id() {
        let reply = get("/api/users/abc").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert_eq!(reply.json()["name"], "User abc");
        assert_eq!(reply.json()["id"], 1);
    }

    #[tokio::test]
    async fn test_get_user_decodes_percent_encoded_id() {
        let reply = get("/api/users/J%C3%BCrgen").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert_eq!(
            reply.json(),
            json!({"id": 1, "name": "User Jürgen", "email": "userJürgen@example.com"})
        );

        let reply = get("/api/users/Ada%20Lovelace").await;
        assert_eq!(reply.json()["name"], "User Ada Lovelace");
    }

    #[tokio::test]
    async fn test_percent_encoded_literal_segment_matches() {
        let reply = get("/api/%75sers").await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert_eq!(reply.json().as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_user_body_keys_are_lowercase() {
        let reply = get("/api/users/7").await;
        let body = reply.json();
        let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        for key in ["id", "name", "email"] {
            assert!(body.get(key).is_some(), "missing key {key}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let reply = get("/api/orders").await;
        assert_eq!(reply.status_line, "HTTP/1.1 404 Not Found");
    }

    #[tokio::test]
    async fn test_post_to_users_is_method_not_allowed() {
        let reply = request("POST /api/users HTTP/1.1\r\nHost: localhost:8000\r\n\r\n").await;
        assert_eq!(reply.status_line, "HTTP/1.1 405 Method Not Allowed");
        assert!(reply.head.contains("Allow: GET\r\n"));
    }

    #[tokio::test]
    async fn test_frontend_origin_gets_cors_headers() {
        let reply = request(
            "GET /api/users HTTP/1.1\r\nHost: localhost:8000\r\nOrigin: http://localhost:3000\r\n\r\n",
        ).await;
        assert!(reply.head.contains("Access-Control-Allow-Origin: http://localhost:3000\r\n"));
        assert!(reply.head.contains("Access-Control-Allow-Credentials: true\r\n"));
    }

    #[tokio::test]
    async fn test_foreign_origin_gets_body_without_cors() {
        let reply = request(
            "GET /api/health HTTP/1.1\r\nHost: localhost:8000\r\nOrigin: https://elsewhere.example\r\n\r\n",
        ).await;
        assert_eq!(reply.status_line, "HTTP/1.1 200 OK");
        assert_eq!(reply.json()["status"], "ok");
        assert!(!reply.head.contains("Access-Control-Allow-Origin"));
    }

    #[tokio::test]
    async fn test_preflight_for_user_route() {
        let reply = request(
            "OPTIONS /api/users/3 HTTP/1.1\r\nHost: localhost:8000\r\nOrigin: http://localhost:3000\r\nAccess-Control-Request-Method: PUT\r\nAccess-Control-Request-Headers: content-type\r\n\r\n",
        ).await;
        assert_eq!(reply.status_line, "HTTP/1.1 204 No Content");
        assert!(reply.head.contains("Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS\r\n"));
        assert!(reply.body.is_empty());
    }
}
