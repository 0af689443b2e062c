use httptrie::{InsertError, Router};
use hyper::service::Service;
use hyper::{header, Body, Method, Request, Response, StatusCode};

async fn users(_: Request<Body>) -> hyper::Result<Response<Body>> {
    let mut res = Response::new(Body::empty());
    res.headers_mut()
        .insert("x-route", header::HeaderValue::from_static("users"));
    Ok(res)
}

async fn files(_: Request<Body>) -> hyper::Result<Response<Body>> {
    let mut res = Response::new(Body::empty());
    res.headers_mut()
        .insert("x-route", header::HeaderValue::from_static("files"));
    Ok(res)
}

async fn teapot(_: Request<Body>) -> hyper::Result<Response<Body>> {
    let mut res = Response::new(Body::empty());
    *res.status_mut() = StatusCode::IM_A_TEAPOT;
    Ok(res)
}

fn request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn router() -> Router {
    Router::default()
        .get("/users", users)
        .unwrap()
        .put("/users", users)
        .unwrap()
        .get("/files/*path", files)
        .unwrap()
}

fn route_of(res: &Response<Body>) -> Option<&str> {
    res.headers().get("x-route").and_then(|v| v.to_str().ok())
}

#[tokio::test]
async fn serves_registered_routes() {
    let router = router();

    let res = router.serve(request(Method::GET, "/users")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(route_of(&res), Some("users"));

    let res = router
        .serve(request(Method::GET, "/files/a/b/c.txt"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(route_of(&res), Some("files"));
}

#[tokio::test]
async fn method_not_allowed() {
    let router = router();

    let res = router.serve(request(Method::POST, "/users")).await.unwrap();
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers().get(header::ALLOW).unwrap(), "GET, PUT");
}

#[tokio::test]
async fn not_found() {
    let router = router();

    let res = router.serve(request(Method::GET, "/posts")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().get(header::ALLOW).is_none());
}

#[tokio::test]
async fn method_not_allowed_disabled() {
    let router = router().handle_method_not_allowed(false);

    let res = router.serve(request(Method::POST, "/users")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn custom_fallbacks() {
    let router = router().not_found(teapot).method_not_allowed(files);

    let res = router.serve(request(Method::GET, "/nothing")).await.unwrap();
    assert_eq!(res.status(), StatusCode::IM_A_TEAPOT);

    let res = router.serve(request(Method::DELETE, "/users")).await.unwrap();
    assert_eq!(route_of(&res), Some("files"));
}

#[tokio::test]
async fn frozen_service() {
    let mut make = router().into_service();
    let mut service = make.call(()).await.unwrap();

    let res = service.call(request(Method::GET, "/users")).await.unwrap();
    assert_eq!(route_of(&res), Some("users"));

    let res = service.call(request(Method::GET, "/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[test]
fn rejects_invalid_routes() {
    assert_eq!(
        router().get("/users", users).err(),
        Some(InsertError::MethodAlreadyExists {
            method: Method::GET
        })
    );
    assert_eq!(
        Router::default().get("users", users).err(),
        Some(InsertError::MalformedRoute)
    );
    assert_eq!(
        Router::default().post("/files/*path/x", files).err(),
        Some(InsertError::InvalidWildcard)
    );
    assert_eq!(
        Router::default().delete("/us@rs", users).err(),
        Some(InsertError::InvalidCharacter { character: '@' })
    );
}

#[test]
fn lookup() {
    let router = router();

    assert!(router.lookup(&Method::GET, "/users").value().is_some());
    assert_eq!(router.lookup(&Method::POST, "/users").allowed(), vec![&Method::GET, &Method::PUT]);
    assert!(!router.lookup(&Method::GET, "/missing").found());
}
