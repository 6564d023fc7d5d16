/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lb_core::LanguageProperties;
use lb_core::Property;
use lb_template::{I18n, TemplateEngine, Templates};
use serde_json::json;

const ROW: &str = concat!(
    r##"<table><tbody><tr id="row" class="template">"##,
    r##"<td>#name#</td><td class="optional">#note#</td>"##,
    r##"<td><ul class="tags list"><li>#tag#</li></ul></td>"##,
    r##"</tr></tbody></table>"##
);

const TAGS: &str = r##"<div><ul class="tags list"><li>#tag#</li></ul></div>"##;

fn bench_cloning(c: &mut Criterion) {
    let data = json!({
        "name": "January",
        "note": "quiet month",
        "tags list": [{ "tag": "a" }, { "tag": "b" }, { "tag": "c" }]
    });

    c.bench_function("Add 100 clones", |b| {
        b.iter(|| {
            let mut doc = lb_markup::parse(ROW).unwrap();
            let row = doc.element_by_id("row").unwrap();
            let mut templates = Templates::default();
            for _ in 0..100 {
                templates.add_clone(&mut doc, row, black_box(&data));
            }
            templates.remove_clones(&mut doc, row);
        })
    });

    c.bench_function("Process list of 100 items", |b| {
        let items: Vec<_> = (0..100).map(|i| json!({ "tag": i })).collect();
        let data = json!({ "tags list": items });
        let engine = TemplateEngine::default();
        b.iter(|| {
            let mut doc = lb_markup::parse(TAGS).unwrap();
            let root = doc.document_element().unwrap();
            engine.process(&mut doc, root, black_box(&data));
        })
    });
}

fn bench_i18n(c: &mut Criterion) {
    let mut props = LanguageProperties::new();
    props.add(
        "en",
        Property::map([
            ("title", Property::from("#greeting#, #user.name#")),
            ("greeting", Property::from("Hello")),
        ]),
    );
    let data = json!({ "user": { "name": "Ada" } });

    c.bench_function("Resolve nested property", |b| {
        let i18n = I18n::new(&props);
        b.iter(|| i18n.replace_params(black_box("#title#!"), &data, "en-US"))
    });
}

criterion_group!(benches, bench_cloning, bench_i18n);
criterion_main!(benches);
