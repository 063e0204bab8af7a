use cgmath::Vector2;
use eframe::egui::{self, Color32, Stroke};

/// Line width of every stroke, matching a 2D canvas' default.
const LINE_WIDTH: f32 = 1.0;

/// The drawing surface a field renders onto.
///
/// Mirrors an immediate 2D context: fill and stroke styles are state that
/// subsequent shape calls pick up. The surface's pixel size is not queried
/// here; the platform pushes it through `ParticleField::on_resize`.
pub trait Canvas {
    fn clear(&mut self);
    fn set_fill_style(&mut self, color: Color32);
    fn set_stroke_style(&mut self, color: Color32);
    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32);
    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>);
}

fn to_pos(origin: egui::Pos2, v: Vector2<f32>) -> egui::Pos2 {
    egui::pos2(origin.x + v.x, origin.y + v.y)
}

/// Paints through an egui [`egui::Painter`], offset by the panel origin.
pub struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
    fill: Color32,
    stroke: Color32,
}

impl<'a> PainterCanvas<'a> {
    pub fn new(painter: &'a egui::Painter, origin: egui::Pos2) -> Self {
        Self {
            painter,
            origin,
            fill: Color32::TRANSPARENT,
            stroke: Color32::TRANSPARENT,
        }
    }
}

impl Canvas for PainterCanvas<'_> {
    fn clear(&mut self) {
        // egui rebuilds its shape list every frame; nothing carries over.
    }

    fn set_fill_style(&mut self, color: Color32) {
        self.fill = color;
    }

    fn set_stroke_style(&mut self, color: Color32) {
        self.stroke = color;
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32) {
        self.painter
            .circle_filled(to_pos(self.origin, center), radius, self.fill);
    }

    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>) {
        self.painter.line_segment(
            [to_pos(self.origin, from), to_pos(self.origin, to)],
            Stroke::new(LINE_WIDTH, self.stroke),
        );
    }
}

/// One call recorded by [`Recorder`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Circle {
        center: Vector2<f32>,
        radius: f32,
        color: Color32,
    },
    Line {
        from: Vector2<f32>,
        to: Vector2<f32>,
        color: Color32,
    },
}

/// Canvas that keeps every draw call, for inspecting a frame after the fact.
///
/// A public test double: nothing in the render path uses it, but it lets
/// callers assert on what a field drew without an egui context.
#[derive(Debug)]
pub struct Recorder {
    pub commands: Vec<DrawCommand>,
    fill: Color32,
    stroke: Color32,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            commands: vec![],
            fill: Color32::TRANSPARENT,
            stroke: Color32::TRANSPARENT,
        }
    }
}

impl Recorder {
    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> + '_ {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Canvas for Recorder {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn set_fill_style(&mut self, color: Color32) {
        self.fill = color;
    }

    fn set_stroke_style(&mut self, color: Color32) {
        self.stroke = color;
    }

    fn fill_circle(&mut self, center: Vector2<f32>, radius: f32) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color: self.fill,
        });
    }

    fn stroke_line(&mut self, from: Vector2<f32>, to: Vector2<f32>) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color: self.stroke,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::vec2;

    #[test]
    fn recorder_tracks_style_state() {
        let mut canvas = Recorder::default();
        canvas.clear();
        canvas.set_fill_style(Color32::RED);
        canvas.fill_circle(vec2(1.0, 2.0), 5.0);
        canvas.set_stroke_style(Color32::BLUE);
        canvas.stroke_line(vec2(0.0, 0.0), vec2(3.0, 4.0));

        assert_eq!(
            canvas.commands,
            vec![
                DrawCommand::Clear,
                DrawCommand::Circle {
                    center: vec2(1.0, 2.0),
                    radius: 5.0,
                    color: Color32::RED,
                },
                DrawCommand::Line {
                    from: vec2(0.0, 0.0),
                    to: vec2(3.0, 4.0),
                    color: Color32::BLUE,
                },
            ]
        );
    }

    #[test]
    fn painter_canvas_offsets_by_origin() {
        let ctx = egui::Context::default();
        let output = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            let mut canvas = PainterCanvas::new(&painter, egui::pos2(10.0, 20.0));
            canvas.clear();
            canvas.set_fill_style(Color32::RED);
            canvas.fill_circle(vec2(1.0, 2.0), 5.0);
            canvas.set_stroke_style(Color32::BLUE);
            canvas.stroke_line(vec2(0.0, 0.0), vec2(3.0, 4.0));
        });

        let shapes: Vec<egui::Shape> = output
            .shapes
            .into_iter()
            .map(|clipped| clipped.1)
            .collect();
        assert_eq!(shapes.len(), 2);

        match &shapes[0] {
            egui::Shape::Circle(circle) => {
                assert_eq!(circle.center, egui::pos2(11.0, 22.0));
                assert_eq!(circle.radius, 5.0);
                assert_eq!(circle.fill, Color32::RED);
            }
            other => panic!("expected a circle, got {other:?}"),
        }
        match &shapes[1] {
            egui::Shape::LineSegment { points, stroke } => {
                assert_eq!(*points, [egui::pos2(10.0, 20.0), egui::pos2(13.0, 24.0)]);
                assert_eq!(*stroke, Stroke::new(1.0, Color32::BLUE));
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn clear_drops_previous_frame() {
        let mut canvas = Recorder::default();
        canvas.fill_circle(vec2(1.0, 1.0), 1.0);
        canvas.clear();
        assert_eq!(canvas.commands, vec![DrawCommand::Clear]);
    }
}
