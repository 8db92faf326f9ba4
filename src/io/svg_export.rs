//! SVG export
//!
//! Writes the drawing as one `<path>` per draw event, in list order. Paths go
//! through the same element replay as tessellation, so the file shows
//! exactly what is rendered.

use std::path::Path;

use bevy::color::Srgba;
use bevy::log::info;
use bevy::math::Vec2;
use svg::node::element::path::Data;
use svg::node::element::{Path as SvgPath, Rectangle};
use svg::Document;

use crate::core::errors::{PathEncodingError, SketchContext, SketchResult};
use crate::core::settings::BACKGROUND_COLOR;
use crate::editing::draw_event::DrawEvent;
use crate::rendering::path_bridge::{replay_elements, PathSink};

/// Collects replayed segments as SVG path data
#[derive(Default)]
struct SvgSink {
    data: Data,
}

impl SvgSink {
    fn push(&mut self, f: impl FnOnce(Data) -> Data) {
        self.data = f(std::mem::take(&mut self.data));
    }
}

impl PathSink for SvgSink {
    fn begin(&mut self, at: Vec2) {
        self.push(|data| data.move_to(vec![at.x, at.y]));
    }

    fn line_to(&mut self, to: Vec2) {
        self.push(|data| data.line_to(vec![to.x, to.y]));
    }

    fn cubic_bezier_to(&mut self, ctrl1: Vec2, ctrl2: Vec2, to: Vec2) {
        self.push(|data| {
            data.cubic_curve_to(vec![ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y])
        });
    }

    fn end(&mut self, close: bool) {
        if close {
            self.push(Data::close);
        }
    }
}

/// `#rrggbb`, alpha goes in a separate opacity attribute
fn svg_color(color: Srgba) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "#{:02x}{:02x}{:02x}",
        channel(color.red),
        channel(color.green),
        channel(color.blue)
    )
}

fn path_element(event: &DrawEvent) -> Result<SvgPath, PathEncodingError> {
    let mut sink = SvgSink::default();
    replay_elements(&event.path.elements(), &mut sink)?;

    let color = svg_color(event.pen_color);
    let opacity = event.pen_color.alpha;
    let element = SvgPath::new().set("d", sink.data);

    Ok(if event.is_filled_shape {
        element
            .set("fill", color)
            .set("fill-opacity", opacity)
            .set("stroke", "none")
    } else {
        element
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-opacity", opacity)
            .set("stroke-width", event.pen_width)
    })
}

/// Build the SVG document for `events` on a surface of `size`
pub fn svg_document(
    events: &[DrawEvent],
    size: Vec2,
) -> Result<Document, PathEncodingError> {
    let background = Rectangle::new()
        .set("x", 0.0)
        .set("y", 0.0)
        .set("width", size.x)
        .set("height", size.y)
        .set("fill", svg_color(BACKGROUND_COLOR));

    let mut document = Document::new()
        .set("width", size.x)
        .set("height", size.y)
        .set("viewBox", format!("0 0 {} {}", size.x, size.y))
        .add(background);

    for event in events {
        document = document.add(path_element(event)?);
    }
    Ok(document)
}

/// Write `events` to `destination` as SVG
pub fn export_svg(
    events: &[DrawEvent],
    size: Vec2,
    destination: &Path,
) -> SketchResult<()> {
    let document = svg_document(events, size)?;
    svg::save(destination, &document).with_file_context("write", destination)?;
    info!(
        "Exported {} draw events to {}",
        events.len(),
        destination.display()
    );
    Ok(())
}
