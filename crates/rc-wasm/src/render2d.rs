//! Canvas2D backend: replays a painted `Scene` onto an HTML `<canvas>`.

use rc_render::paint::{DrawCmd, Scene, TextAlign};
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

/// Backdrop padding around weight labels.
const LABEL_PAD: f64 = 4.0;
const LABEL_BOX_HEIGHT: f64 = 16.0;

pub fn render_scene(ctx: &CanvasRenderingContext2d, scene: &Scene, font_family: &str) {
    for cmd in &scene.commands {
        match cmd {
            DrawCmd::Clear { width, height } => ctx.clear_rect(0.0, 0.0, *width, *height),
            DrawCmd::Edge {
                line,
                color,
                width,
                glow,
                blur,
                ..
            } => {
                ctx.save();
                ctx.set_shadow_color(glow);
                ctx.set_shadow_blur(*blur);
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width);
                ctx.set_line_cap("round");
                ctx.begin_path();
                ctx.move_to(line.p0.x, line.p0.y);
                ctx.line_to(line.p1.x, line.p1.y);
                ctx.stroke();
                ctx.restore();
            }
            DrawCmd::Label {
                anchor,
                text,
                color,
                align,
                font_size,
                backdrop,
            } => {
                ctx.set_font(&format!("{font_size}px {font_family}"));
                if let Some(fill) = backdrop {
                    let w = ctx
                        .measure_text(text)
                        .map(|m| m.width())
                        .unwrap_or_else(|_| rc_render::svg::estimate_text_width(text, *font_size));
                    ctx.set_fill_style_str(fill);
                    ctx.fill_rect(
                        anchor.x - w / 2.0 - LABEL_PAD,
                        anchor.y - 11.0,
                        w + LABEL_PAD * 2.0,
                        LABEL_BOX_HEIGHT,
                    );
                }
                ctx.set_text_align(match align {
                    TextAlign::Start => "start",
                    TextAlign::Center => "center",
                });
                ctx.set_fill_style_str(color);
                let _ = ctx.fill_text(text, anchor.x, anchor.y);
            }
            DrawCmd::Node {
                disc,
                fill,
                stroke,
                stroke_width,
                ..
            } => {
                ctx.begin_path();
                let _ = ctx.arc(disc.center.x, disc.center.y, disc.radius, 0.0, TAU);
                ctx.set_fill_style_str(fill);
                ctx.fill();
                ctx.set_stroke_style_str(stroke);
                ctx.set_line_width(*stroke_width);
                ctx.stroke();
            }
            DrawCmd::Ring {
                circle,
                color,
                width,
                ..
            } => {
                ctx.begin_path();
                let _ = ctx.arc(circle.center.x, circle.center.y, circle.radius, 0.0, TAU);
                ctx.set_stroke_style_str(color);
                ctx.set_line_width(*width);
                ctx.stroke();
            }
        }
    }
}
