use criterion::{black_box, criterion_group, criterion_main, Criterion};
use offlinify::encode::encode;
use offlinify::page::extract_snapshot;
use url::Url;

fn bench_encode(c: &mut Criterion) {
    let test_urls = vec![
        "https://example.com/",
        "https://example.com/path with spaces",
        "https://example.com/a?with=query&other=123",
        "http://cdn.example.com/deep/nested/asset/image.png",
        "https://example.com/UPPER/Case/Path.HTML#fragment",
    ];

    c.bench_function("encode_urls", |b| {
        b.iter(|| {
            for url in &test_urls {
                let _encoded = encode(black_box(url));
            }
        });
    });
}

fn bench_extract_snapshot(c: &mut Criterion) {
    let html = r#"
        <html>
            <head>
                <link rel="stylesheet" href="/style.css">
                <link rel="stylesheet" href="/theme.css">
                <script src="/script.js"></script>
                <script src="/utils.js"></script>
            </head>
            <body>
                <img src="/logo.png" alt="Logo">
                <img src="/banner.jpg" alt="Banner">
                <video src="/intro.mp4"></video>
                <a href="/about">About</a>
                <a href="/contact">Contact</a>
                <a href="/products">Products</a>
                <a href="https://other.com/external">External</a>
            </body>
        </html>
    "#;
    let base = Url::parse("https://example.com/").unwrap();

    c.bench_function("extract_snapshot", |b| {
        b.iter(|| {
            let _snapshot = extract_snapshot(black_box(html), &base).unwrap();
        });
    });
}

criterion_group!(benches, bench_encode, bench_extract_snapshot);
criterion_main!(benches);
