use eframe::egui;
use egui::{Color32, ColorImage, Key, RichText, TextureHandle, TextureOptions, Vec2};

use crate::config::config::Grid;
use crate::core::command::{Command, Flow};
use crate::core::display::{DisplaySurface, PageView, Slot};
use crate::core::page_controller::PageController;
use crate::i18n::en::*;

enum Cell {
    Image {
        texture: TextureHandle,
        caption: String,
        width_label: String,
        height_label: String,
    },
    Failed {
        caption: String,
        message: String,
    },
    Empty,
}

/// Holds the textures of the page currently on screen.
pub struct EguiSurface {
    ctx: egui::Context,
    heading: String,
    cells: Vec<Cell>,
}

impl EguiSurface {
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            heading: String::new(),
            cells: Vec::new(),
        }
    }

    fn upload(&self, index: usize, slot: Slot) -> Cell {
        match slot {
            Slot::Image(thumb) => {
                let size = [thumb.image.width() as usize, thumb.image.height() as usize];
                let color_image = ColorImage::from_rgba_unmultiplied(size, thumb.image.as_raw());
                let texture = self.ctx.load_texture(
                    format!("slot_{}", index),
                    color_image,
                    TextureOptions::LINEAR,
                );
                let (width_label, height_label) = dimension_labels(thumb.width, thumb.height);
                Cell::Image {
                    texture,
                    caption: thumb.caption,
                    width_label,
                    height_label,
                }
            }
            Slot::Failed { caption, message } => Cell::Failed { caption, message },
            Slot::Empty => Cell::Empty,
        }
    }
}

impl DisplaySurface for EguiSurface {
    fn draw(&mut self, view: PageView) {
        self.heading = batch_heading(view.page, view.total_pages);
        // Old textures are freed when their handles drop here.
        self.cells = view
            .slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| self.upload(i, slot))
            .collect();
        self.ctx.request_repaint();
    }
}

/// Keyboard shortcut for a page command.
pub fn command_for_key(key: Key) -> Option<Command> {
    match key {
        Key::N | Key::ArrowRight | Key::Space | Key::PageDown => Some(Command::Next),
        Key::B | Key::P | Key::ArrowLeft | Key::PageUp => Some(Command::Prev),
        Key::Q | Key::Escape => Some(Command::Quit),
        _ => None,
    }
}

pub struct BrowserApp {
    controller: PageController<EguiSurface>,
    grid: Grid,
}

impl BrowserApp {
    pub fn new(controller: PageController<EguiSurface>, grid: Grid) -> Self {
        Self { controller, grid }
    }

    fn keyboard_command(ctx: &egui::Context) -> Option<Command> {
        ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                egui::Event::Key {
                    key, pressed: true, ..
                } => command_for_key(*key),
                _ => None,
            })
        })
    }

    fn show_toolbar(&self, ctx: &egui::Context) -> Option<Command> {
        let mut command = None;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(&self.controller.surface().heading);
                ui.separator();

                if ui
                    .add_enabled(self.controller.can_go_previous(), egui::Button::new(BTN_PREV))
                    .clicked()
                {
                    command = Some(Command::Prev);
                }
                if ui
                    .add_enabled(self.controller.can_go_next(), egui::Button::new(BTN_NEXT))
                    .clicked()
                {
                    command = Some(Command::Next);
                }
                if ui.button(BTN_QUIT).clicked() {
                    command = Some(Command::Quit);
                }

                ui.separator();
                ui.weak(TEXT_KEYS);
            });
        });
        command
    }

    fn show_grid(&self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let cells = &self.controller.surface().cells;
            if cells.iter().all(|c| matches!(c, Cell::Empty)) {
                ui.centered_and_justified(|ui| {
                    ui.label(TEXT_NO_IMAGES);
                });
                return;
            }

            let spacing = ui.spacing().item_spacing;
            let available = ui.available_size();
            let cell_size = Vec2::new(
                (available.x - spacing.x * (self.grid.cols as f32 - 1.0)) / self.grid.cols as f32,
                (available.y - spacing.y * (self.grid.rows as f32 - 1.0)) / self.grid.rows as f32,
            );

            egui::Grid::new("page_grid")
                .num_columns(self.grid.cols)
                .show(ui, |ui| {
                    for (i, cell) in cells.iter().enumerate() {
                        Self::show_cell(ui, cell, cell_size);
                        if (i + 1) % self.grid.cols == 0 {
                            ui.end_row();
                        }
                    }
                });
        });
    }

    fn show_cell(ui: &mut egui::Ui, cell: &Cell, size: Vec2) {
        ui.allocate_ui(size, |ui| {
            ui.set_min_size(size);
            ui.vertical_centered(|ui| match cell {
                Cell::Image {
                    texture,
                    caption,
                    width_label,
                    height_label,
                } => {
                    ui.label(RichText::new(caption).strong());
                    let row = ui.text_style_height(&egui::TextStyle::Body);
                    let max = Vec2::new(size.x, (size.y - 3.0 * row).max(row));
                    ui.add(egui::Image::from_texture(texture).max_size(max));
                    ui.label(format!("{}   {}", width_label, height_label));
                }
                Cell::Failed { caption, message } => {
                    ui.label(RichText::new(caption).strong());
                    ui.colored_label(Color32::LIGHT_RED, message);
                }
                Cell::Empty => {
                    ui.label(TEXT_EMPTY_SLOT);
                }
            });
        });
    }
}

impl eframe::App for BrowserApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let keyed = Self::keyboard_command(ctx);
        let clicked = self.show_toolbar(ctx);

        if let Some(command) = clicked.or(keyed) {
            if self.controller.apply(command) == Flow::Quit {
                tracing::info!("quit requested");
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }

        self.show_grid(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(command_for_key(Key::N), Some(Command::Next));
        assert_eq!(command_for_key(Key::ArrowRight), Some(Command::Next));
        assert_eq!(command_for_key(Key::B), Some(Command::Prev));
        assert_eq!(command_for_key(Key::ArrowLeft), Some(Command::Prev));
        assert_eq!(command_for_key(Key::Q), Some(Command::Quit));
        assert_eq!(command_for_key(Key::Escape), Some(Command::Quit));
        assert_eq!(command_for_key(Key::F11), None);
    }

    #[test]
    fn test_surface_uploads_one_cell_per_slot() {
        use crate::core::display::Thumbnail;
        use image::RgbaImage;

        let mut surface = EguiSurface::new(egui::Context::default());
        surface.draw(PageView {
            page: 1,
            total_pages: 4,
            slots: vec![
                Slot::Image(Thumbnail {
                    caption: "a.png".into(),
                    width: 2,
                    height: 2,
                    image: RgbaImage::new(2, 2),
                }),
                Slot::Empty,
            ],
        });

        assert_eq!(surface.heading, "Batch 1 of 4");
        assert_eq!(surface.cells.len(), 2);
        assert!(matches!(surface.cells[0], Cell::Image { .. }));
        assert!(matches!(surface.cells[1], Cell::Empty));
    }
}
