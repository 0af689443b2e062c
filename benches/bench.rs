use criterion::{black_box, criterion_group, criterion_main, Criterion};
use httptrie::Tree;
use hyper::Method;

fn routes() -> Vec<&'static str> {
    vec![
        "/",
        "/authorizations",
        "/authorizations/:id",
        "/applications/:client_id/tokens/:access_token",
        "/events",
        "/repos/:owner/:repo/events",
        "/networks/:owner/:repo/events",
        "/orgs/:org/events",
        "/users/:user/received_events",
        "/users/:user/received_events/public",
        "/users/:user/events",
        "/users/:user/events/public",
        "/users/:user/events/orgs/:org",
        "/feeds",
        "/notifications",
        "/repos/:owner/:repo/notifications",
        "/notifications/threads/:id",
        "/notifications/threads/:id/subscription",
        "/repos/:owner/:repo/stargazers",
        "/users/:user/starred",
        "/user/starred",
        "/user/starred/:owner/:repo",
        "/gists",
        "/gists/public",
        "/gists/starred",
        "/gists/:id",
        "/gists/:id/star",
        "/search/repositories",
        "/search/code",
        "/search/issues",
        "/search/users",
        "/static/*filepath",
    ]
}

fn requests() -> Vec<&'static str> {
    vec![
        "/authorizations",
        "/users/:user/events/public",
        "/gists/starred",
        "/search/users",
        "/static/css/site.css",
        "/repos/:owner/:repo/stargazers",
        "/users/42/events",
        "/does/not/exist",
    ]
}

fn insert(c: &mut Criterion) {
    c.bench_function("insert", |b| {
        b.iter(|| {
            let mut tree = Tree::new();
            for route in routes() {
                tree.insert(Method::GET, route, true).unwrap();
            }
            black_box(tree)
        });
    });
}

fn resolve(c: &mut Criterion) {
    let mut tree = Tree::new();
    for route in routes() {
        tree.insert(Method::GET, route, true).unwrap();
    }
    let requests = requests();

    c.bench_function("resolve", |b| {
        b.iter(|| {
            for path in black_box(&requests) {
                black_box(tree.resolve(&Method::GET, path).into_parts());
            }
        });
    });
}

criterion_group!(benches, insert, resolve);
criterion_main!(benches);
