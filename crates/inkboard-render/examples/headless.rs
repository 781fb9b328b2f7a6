//! Drive the canvas without a window and print the resulting display list.
//!
//! Usage: `cargo run -p inkboard-render --example headless [snapshot.json]`

use inkboard_core::shapes::ShapeKind;
use inkboard_core::{Canvas, InteractionController, PointerEvent, Tool};
use inkboard_render::{DrawCommand, RecordingSurface, RenderContext, Renderer};
use kurbo::{Point, Rect, Size};
use std::{env, fs, process};

fn main() {
    env_logger::init();
    log::info!("Starting headless Inkboard");

    let mut canvas = Canvas::new();
    if let Some(path) = env::args().nth(1) {
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Failed to read {}: {}", path, e);
                process::exit(1);
            }
        };
        if let Err(e) = canvas.import_json(&json) {
            eprintln!("Failed to import {}: {}", path, e);
            process::exit(1);
        }
    }

    let surface_bounds = Rect::new(0.0, 0.0, 640.0, 480.0);
    let mut controller = InteractionController::new();
    let mut prompt = |_: &str| Some("Hello from headless".to_string());

    let gestures = [
        (Tool::Draw(ShapeKind::Rectangle), vec![(40.0, 40.0), (200.0, 140.0)]),
        (Tool::Draw(ShapeKind::Text), vec![(260.0, 60.0)]),
        (Tool::Draw(ShapeKind::Brush), vec![(60.0, 300.0), (120.0, 340.0), (200.0, 310.0)]),
    ];
    for (tool, points) in gestures {
        canvas.set_tool(tool);
        let mut events = points.iter().map(|&(x, y)| Point::new(x, y));
        let Some(first) = events.next() else {
            continue;
        };
        controller.handle_event(
            &mut canvas,
            PointerEvent::Down { position: first },
            surface_bounds,
            &mut prompt,
        );
        let mut last = first;
        for position in events {
            controller.handle_event(
                &mut canvas,
                PointerEvent::Move { position },
                surface_bounds,
                &mut prompt,
            );
            last = position;
        }
        controller.handle_event(
            &mut canvas,
            PointerEvent::Up { position: last },
            surface_bounds,
            &mut prompt,
        );
    }
    controller.handle_event(
        &mut canvas,
        PointerEvent::DoubleClick { position: Point::new(270.0, 70.0) },
        surface_bounds,
        &mut prompt,
    );

    let mut surface = RecordingSurface::new();
    if canvas.take_redraw_request() {
        let viewport = Size::new(surface_bounds.width(), surface_bounds.height());
        let ctx = RenderContext::from_canvas(&canvas, viewport);
        surface.build_scene(&ctx);
    }

    let (mut fills, mut strokes, mut texts) = (0, 0, 0);
    for command in surface.commands() {
        match command {
            DrawCommand::Clear { .. } => {}
            DrawCommand::FillPath { .. } => fills += 1,
            DrawCommand::StrokePath { .. } => strokes += 1,
            DrawCommand::FillText { text, .. } => {
                texts += 1;
                println!("text: {}", text);
            }
        }
    }
    println!(
        "{} shapes, {} fills, {} strokes, {} text runs",
        canvas.shapes().len(),
        fills,
        strokes,
        texts
    );

    match canvas.export_json() {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Export failed: {}", e),
    }
}
