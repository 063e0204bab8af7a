use anyhow::anyhow;
use artsy_background::{FieldConfig, FrameStatus, PainterCanvas, ParticleField, SurfaceSize};
use eframe::egui;
use log::error;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Reports a panel size as settled once two consecutive frames agree on it.
/// A window that is still being maximized shows its pre-maximize size first.
#[derive(Default)]
struct SettledSize {
    last: Option<SurfaceSize>,
}

impl SettledSize {
    fn observe(&mut self, size: SurfaceSize) -> bool {
        let settled = self.last == Some(size);
        self.last = Some(size);
        settled
    }
}

struct ArtsyBackground {
    config: FieldConfig,
    settle: SettledSize,
    // Created once the panel size has settled.
    field: Option<ParticleField>,
}

impl ArtsyBackground {
    fn new(config: FieldConfig) -> Self {
        Self {
            config,
            settle: SettledSize::default(),
            field: None,
        }
    }
}

impl eframe::App for ArtsyBackground {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let (hover, pressed, escape) = ctx.input(|i| {
            (
                i.pointer.hover_pos(),
                i.pointer.primary_down(),
                i.key_pressed(egui::Key::Escape),
            )
        });

        let mut status = FrameStatus::Stopped;

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (rect, _response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());
                let surface = SurfaceSize {
                    width: rect.width(),
                    height: rect.height(),
                };

                if self.field.is_none() {
                    if !self.settle.observe(surface) {
                        status = FrameStatus::Continue;
                        return;
                    }
                    match ParticleField::initialize(self.config, surface, StdRng::from_entropy()) {
                        Ok(field) => self.field = Some(field),
                        Err(err) => {
                            error!("could not start particle field: {err}");
                            return;
                        }
                    }
                }
                let Some(field) = self.field.as_mut() else {
                    return;
                };

                field.on_resize(surface);
                if let Some(pos) = hover {
                    field.on_pointer_move(pos.x - rect.min.x, pos.y - rect.min.y);
                }
                if pressed {
                    field.on_pointer_down();
                } else {
                    field.on_pointer_up();
                }
                if escape {
                    field.stop();
                }

                let mut canvas = PainterCanvas::new(ui.painter(), rect.min);
                status = field.on_frame(&mut canvas);
            });

        if status == FrameStatus::Continue {
            ctx.request_repaint();
        }
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = FieldConfig::default();
    config.validate()?;

    eframe::run_native(
        "Artsy Canvas Background",
        eframe::NativeOptions {
            renderer: eframe::Renderer::Wgpu,
            transparent: true,
            maximized: true,
            ..Default::default()
        },
        Box::new(move |_cc| Box::new(ArtsyBackground::new(config))),
    )
    .map_err(|err| anyhow!("particle background window failed: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(width: f32, height: f32) -> SurfaceSize {
        SurfaceSize { width, height }
    }

    #[test]
    fn first_size_is_never_settled() {
        let mut settle = SettledSize::default();
        assert!(!settle.observe(size(800.0, 600.0)));
    }

    #[test]
    fn size_settles_after_a_repeat() {
        let mut settle = SettledSize::default();
        assert!(!settle.observe(size(800.0, 600.0)));
        assert!(!settle.observe(size(1920.0, 1080.0)));
        assert!(settle.observe(size(1920.0, 1080.0)));
    }
}
