//! Display list → standalone SVG document.

use crate::paint::{DrawCmd, Scene, TextAlign};
use std::fmt::Write;

/// Rough advance width of a label, used to size weight-label backdrops
/// where no text metrics are available.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.6
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render a painted scene as an SVG string sized to the canvas.
pub fn render_svg(scene: &Scene, font_family: &str) -> String {
    let (width, height) = (scene.width, scene.height);
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    );
    svg.push_str("<defs>\n");
    svg.push_str("  <filter id=\"glow\" x=\"-20%\" y=\"-20%\" width=\"140%\" height=\"140%\">\n");
    svg.push_str("    <feGaussianBlur stdDeviation=\"2\" />\n");
    svg.push_str("  </filter>\n");
    svg.push_str("</defs>\n");
    let _ = writeln!(
        svg,
        "<style>\n  text {{ font-family: {}; }}\n</style>",
        escape(font_family)
    );

    for cmd in &scene.commands {
        render_cmd(&mut svg, cmd);
    }

    svg.push_str("</svg>\n");
    svg
}

fn render_cmd(out: &mut String, cmd: &DrawCmd) {
    match cmd {
        DrawCmd::Clear { width, height } => {
            let _ = writeln!(
                out,
                "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"none\" />"
            );
        }
        DrawCmd::Edge {
            line,
            color,
            width,
            glow,
            blur,
            ..
        } => {
            let (p0, p1) = (line.p0, line.p1);
            let _ = writeln!(
                out,
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{glow}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-opacity=\"0.6\" filter=\"url(#glow)\" />",
                p0.x,
                p0.y,
                p1.x,
                p1.y,
                width + blur
            );
            let _ = writeln!(
                out,
                "  <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{color}\" stroke-width=\"{width}\" stroke-linecap=\"round\" />",
                p0.x, p0.y, p1.x, p1.y
            );
        }
        DrawCmd::Label {
            anchor,
            text,
            color,
            align,
            font_size,
            backdrop,
        } => {
            if let Some(fill) = backdrop {
                let w = estimate_text_width(text, *font_size) + 8.0;
                let _ = writeln!(
                    out,
                    "  <rect x=\"{}\" y=\"{}\" width=\"{w}\" height=\"16\" fill=\"{fill}\" />",
                    anchor.x - w / 2.0,
                    anchor.y - 11.0
                );
            }
            let text_anchor = match align {
                TextAlign::Start => "start",
                TextAlign::Center => "middle",
            };
            let _ = writeln!(
                out,
                "  <text x=\"{}\" y=\"{}\" font-size=\"{font_size}\" fill=\"{color}\" text-anchor=\"{text_anchor}\">{}</text>",
                anchor.x,
                anchor.y,
                escape(text)
            );
        }
        DrawCmd::Node {
            disc,
            fill,
            stroke,
            stroke_width,
            ..
        } => {
            let _ = writeln!(
                out,
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"{stroke_width}\" />",
                disc.center.x, disc.center.y, disc.radius
            );
        }
        DrawCmd::Ring {
            circle,
            color,
            width,
            ..
        } => {
            let _ = writeln!(
                out,
                "  <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"none\" stroke=\"{color}\" stroke-width=\"{width}\" />",
                circle.center.x, circle.center.y, circle.radius
            );
        }
    }
}
