use gpui::{
    App, BorderStyle, Bounds, ContentMask, Corners, Edges, PathBuilder, Pixels, TextRun, Window,
    font, point, px, quad,
};

use crate::geom::{ScreenPoint, ScreenRect};
use crate::render::{
    Color, LineCap, LineSegment, LineStyle, RectStyle, RenderCommand, RenderList, TextStyle,
};

pub(crate) fn paint_list(list: &RenderList, font_family: &str, window: &mut Window, cx: &mut App) {
    let mut clip_stack: Vec<ContentMask<Pixels>> = Vec::new();
    for command in list.commands() {
        match command {
            RenderCommand::ClipRect(rect) => {
                let bounds = to_bounds(*rect);
                // Nested clips intersect with the enclosing one.
                let bounds = match clip_stack.last() {
                    Some(outer) => outer.bounds.intersect(&bounds),
                    None => bounds,
                };
                clip_stack.push(ContentMask { bounds });
            }
            RenderCommand::ClipEnd => {
                clip_stack.pop();
            }
            RenderCommand::Polyline { points, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_polyline(window, points, *style);
                });
            }
            RenderCommand::LineSegments { segments, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_segments(window, segments, *style);
                });
            }
            RenderCommand::Rect { rect, style } => {
                with_clip(window, &clip_stack, |window| {
                    paint_rect(window, *rect, *style);
                });
            }
            RenderCommand::Text {
                position,
                text,
                style,
            } => {
                with_clip(window, &clip_stack, |window| {
                    paint_text(window, cx, *position, text, style, font_family);
                });
            }
        }
    }
}

fn paint_polyline(window: &mut Window, points: &[ScreenPoint], style: LineStyle) {
    let [first, rest @ ..] = points else {
        return;
    };
    if rest.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    builder.move_to(point(px(first.x), px(first.y)));
    for pt in rest {
        builder.line_to(point(px(pt.x), px(pt.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
    let last = rest[rest.len() - 1];
    paint_caps(window, &[*first, last], style);
}

fn paint_segments(window: &mut Window, segments: &[LineSegment], style: LineStyle) {
    if segments.is_empty() {
        return;
    }
    let mut builder = PathBuilder::stroke(px(style.width.max(0.5)));
    for segment in segments {
        builder.move_to(point(px(segment.start.x), px(segment.start.y)));
        builder.line_to(point(px(segment.end.x), px(segment.end.y)));
    }
    if let Ok(path) = builder.build() {
        window.paint_path(path, to_rgba(style.color));
    }
    let ends: Vec<ScreenPoint> = segments
        .iter()
        .flat_map(|segment| [segment.start, segment.end])
        .collect();
    paint_caps(window, &ends, style);
}

/// Fill the stroke ends with the cap shape.
fn paint_caps(window: &mut Window, ends: &[ScreenPoint], style: LineStyle) {
    let radius = match style.cap {
        LineCap::Round => style.width * 0.5,
        LineCap::Square | LineCap::Butt => 0.0,
    };
    for pt in ends {
        let Some(cap) = style.cap_rect(*pt) else {
            return;
        };
        window.paint_quad(quad(
            to_bounds(cap),
            Corners::all(px(radius)),
            to_rgba(style.color),
            Edges::all(px(0.0)),
            to_rgba(style.color),
            BorderStyle::default(),
        ));
    }
}

fn paint_rect(window: &mut Window, rect: ScreenRect, style: RectStyle) {
    let quad = quad(
        to_bounds(rect),
        Corners::all(px(0.0)),
        to_rgba(style.fill),
        Edges::all(px(style.stroke_width)),
        to_rgba(style.stroke),
        BorderStyle::default(),
    );
    window.paint_quad(quad);
}

fn paint_text(
    window: &mut Window,
    cx: &mut App,
    position: ScreenPoint,
    text: &str,
    style: &TextStyle,
    font_family: &str,
) {
    if text.is_empty() {
        return;
    }
    let run = TextRun {
        len: text.len(),
        font: font(font_family.to_string()),
        color: to_hsla(style.color),
        background_color: None,
        underline: None,
        strikethrough: None,
    };
    let shaped = window
        .text_system()
        .shape_line(text.to_string().into(), px(style.size), &[run], None);
    let line_height = shaped.ascent + shaped.descent;
    let origin = point(px(position.x), px(position.y));
    if let Err(err) = shaped.paint(origin, line_height, window, cx) {
        log::warn!("failed to paint plot text {text:?}: {err}");
    }
}

fn to_rgba(color: Color) -> gpui::Rgba {
    gpui::Rgba {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

pub(crate) fn to_hsla(color: Color) -> gpui::Hsla {
    gpui::Hsla::from(to_rgba(color))
}

fn to_bounds(rect: ScreenRect) -> Bounds<Pixels> {
    Bounds::from_corners(
        point(px(rect.min.x), px(rect.min.y)),
        point(px(rect.max.x), px(rect.max.y)),
    )
}

fn with_clip(window: &mut Window, stack: &[ContentMask<Pixels>], f: impl FnOnce(&mut Window)) {
    if let Some(mask) = stack.last() {
        window.with_content_mask(Some(mask.clone()), f);
    } else {
        f(window);
    }
}
