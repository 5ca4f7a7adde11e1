use criterion::{black_box, criterion_group, criterion_main, Criterion};
use setcookie::{Cookie, CookieJar};

fn benchmark_cookie_serialize(c: &mut Criterion) {
    let cookie = Cookie::new("session", "value with spaces+plus")
        .unwrap()
        .with_domain(Some("example.com"));

    c.bench_function("cookie_serialize", |b| {
        b.iter(|| black_box(&cookie).to_string())
    });
}

fn benchmark_jar_send(c: &mut Criterion) {
    let mut jar = CookieJar::new();
    for i in 0..20 {
        jar.add(Cookie::new(format!("cookie{}", i), "val").unwrap());
    }

    c.bench_function("jar_send", |b| {
        b.iter(|| jar.send(black_box(http::HeaderMap::new()), true))
    });
}

fn benchmark_jar_overwrite(c: &mut Criterion) {
    let mut jar = CookieJar::new();
    for i in 0..20 {
        jar.add(Cookie::new(format!("cookie{}", i), "val").unwrap());
    }

    c.bench_function("jar_overwrite", |b| {
        b.iter(|| jar.add(black_box(Cookie::new("cookie10", "replaced").unwrap())))
    });
}

criterion_group!(
    benches,
    benchmark_cookie_serialize,
    benchmark_jar_send,
    benchmark_jar_overwrite
);
criterion_main!(benches);
