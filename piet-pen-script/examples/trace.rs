// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Run a short command script against a recording painter and print what
//! it drew.
//!
//! Run with: RUST_LOG=trace cargo run -p piet-pen-script --example trace

use piet_pen::piet::Color;
use piet_pen::{PenSession, RecordingPainter};
use piet_pen_script::{Primitives, Value};

fn pt(x: f64, y: f64) -> Value {
    Value::from(vec![x, y])
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let script: Vec<(&str, Vec<Value>)> = vec![
        ("setFillColor", vec![Value::from(vec![0.2, 0.4, 0.8])]),
        ("setStrokeColor", vec![Value::Color(Color::rgb8(0x80, 0, 0))]),
        ("setStrokeWidth", vec![Value::Float(2.5)]),
        ("moveTo", vec![pt(10.0, 10.0)]),
        ("lineTo", vec![pt(90.0, 10.0)]),
        ("quadTo", vec![pt(90.0, 90.0), pt(130.0, 50.0)]),
        ("draw", vec![Value::Int(3)]),
        ("save", vec![]),
        ("rotate", vec![Value::Int(30), Value::Int(100), Value::Int(100)]),
        (
            "addAnnularWedge",
            vec![
                pt(100.0, 100.0),
                Value::Int(20),
                Value::Int(40),
                Value::Int(0),
                Value::Int(120),
            ],
        ),
        ("draw", vec![Value::Int(1)]),
        ("restore", vec![]),
        ("setFont", vec![Value::from("monospace")]),
        ("drawStringAtPoint", vec![Value::from("pen"), pt(10.0, 150.0)]),
        // refused: wrong type, then wrong arity
        ("setStrokeWidth", vec![Value::from("thick")]),
        ("lineTo", vec![]),
        ("restore", vec![]),
    ];

    let prims = Primitives::new();
    let mut session = PenSession::new();
    session.begin_painting(RecordingPainter::new());
    for (name, args) in &script {
        let status = prims.dispatch(&mut session, name, args);
        println!("{name:<18} -> {status:?}");
    }

    if let Some(painter) = session.end_painting() {
        for op in painter.ops() {
            println!("{op:?}");
        }
    }

    // everything is refused once the session has ended
    let status = prims.dispatch(&mut session, "draw", &[Value::Int(3)]);
    println!("draw after end     -> {status:?}");
}
