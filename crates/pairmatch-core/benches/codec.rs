use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pairmatch_core::codec::{decode, encode_session, encode_session_compact};
use pairmatch_core::model::{Answers, Profile, RelationshipType, SessionData};
use pairmatch_core::templates::{classic_template, StaticRegistry};

fn make_session() -> SessionData {
    let template = classic_template();
    let answers: Answers = template
        .questions
        .iter()
        .map(|q| (q.id, q.options[1].clone()))
        .collect();
    let profile = Profile {
        name: "Bench".into(),
        age: Some(30),
        gender: String::new(),
        relationship_type: RelationshipType::Dating,
        reflections: vec!["A fairly long reflection about how we met.".into()],
    };
    template.setup().into_session(profile, answers, None)
}

fn bench_codec(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let registry = StaticRegistry::builtin();
    let session = make_session();
    let code = rt.block_on(encode_session(&session)).unwrap();

    let mut group = c.benchmark_group("codec");

    group.bench_function("encode_full", |b| {
        b.iter(|| rt.block_on(encode_session(black_box(&session))))
    });

    group.bench_function("encode_compact", |b| {
        b.iter(|| rt.block_on(encode_session_compact(black_box(&session), &registry)))
    });

    group.bench_function("decode", |b| {
        b.iter(|| rt.block_on(decode(black_box(&code))))
    });

    group.finish();
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
