//! Minimal deferred-rendering SVG canvas.

use std::fmt::Write as FmtWrite;

/// Stroke/fill style for a drawn element.
#[derive(Debug, Clone)]
pub struct Style {
    /// SVG fill color, `None` for no fill.
    pub fill: Option<String>,
    /// SVG stroke color, `None` for no stroke.
    pub stroke: Option<String>,
    /// Stroke width in user units.
    pub stroke_width: f64,
}

impl Style {
    /// Filled shape with no stroke.
    pub fn filled(color: &str) -> Self {
        Self { fill: Some(color.to_string()), stroke: None, stroke_width: 0.0 }
    }

    /// Stroked shape with no fill.
    pub fn stroked(color: &str, width: f64) -> Self {
        Self { fill: None, stroke: Some(color.to_string()), stroke_width: width }
    }

    fn attrs(&self) -> String {
        let fill = self.fill.as_deref().unwrap_or("none");
        match &self.stroke {
            Some(stroke) => format!(
                r#"fill="{fill}" stroke="{stroke}" stroke-width="{:.2}""#,
                self.stroke_width
            ),
            None => format!(r#"fill="{fill}""#),
        }
    }
}

/// An SVG element stored for deferred rendering.
#[derive(Debug, Clone)]
enum SvgElement {
    Rect { x: f64, y: f64, w: f64, h: f64, style: Style },
    Line { x1: f64, y1: f64, x2: f64, y2: f64, style: Style },
    Circle { cx: f64, cy: f64, r: f64, style: Style },
    Text { x: f64, y: f64, content: String, size: f64, anchor: &'static str },
}

/// Immediate-mode SVG canvas in user units.
#[derive(Debug)]
pub struct Canvas {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    elements: Vec<SvgElement>,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height, elements: Vec::new() }
    }

    /// Axis-aligned rectangle.
    pub fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, style: &Style) {
        self.elements.push(SvgElement::Rect { x, y, w, h, style: style.clone() });
    }

    /// Straight line segment.
    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, style: &Style) {
        self.elements.push(SvgElement::Line { x1, y1, x2, y2, style: style.clone() });
    }

    /// Filled or stroked circle.
    pub fn circle(&mut self, cx: f64, cy: f64, r: f64, style: &Style) {
        self.elements.push(SvgElement::Circle { cx, cy, r, style: style.clone() });
    }

    /// Text with the given anchor ("start", "middle", or "end").
    pub fn text(&mut self, x: f64, y: f64, content: &str, size: f64, anchor: &'static str) {
        self.elements.push(SvgElement::Text {
            x,
            y,
            content: content.to_string(),
            size,
            anchor,
        });
    }

    /// Serialize the canvas to a standalone SVG document.
    pub fn finish_svg(&self) -> String {
        let mut out = String::with_capacity(8 * 1024);
        writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        )
        .unwrap();
        writeln!(out, r#"<rect width="{}" height="{}" fill="white" />"#, self.width, self.height)
            .unwrap();

        for elem in &self.elements {
            match elem {
                SvgElement::Rect { x, y, w, h, style } => writeln!(
                    out,
                    r#"<rect x="{x:.2}" y="{y:.2}" width="{w:.2}" height="{h:.2}" {} />"#,
                    style.attrs()
                )
                .unwrap(),
                SvgElement::Line { x1, y1, x2, y2, style } => writeln!(
                    out,
                    r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" {} />"#,
                    style.attrs()
                )
                .unwrap(),
                SvgElement::Circle { cx, cy, r, style } => writeln!(
                    out,
                    r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{r:.2}" {} />"#,
                    style.attrs()
                )
                .unwrap(),
                SvgElement::Text { x, y, content, size, anchor } => writeln!(
                    out,
                    r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{size:.1}" text-anchor="{anchor}" fill="black">{}</text>"#,
                    escape_xml(content)
                )
                .unwrap(),
            }
        }

        out.push_str("</svg>\n");
        out
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
