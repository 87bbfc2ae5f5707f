use eframe::egui;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;

use crate::campus::CampusDescription;
use crate::geometry::{Point, Rect};
use crate::scene::{self, DrawCommand, LabelKind, RectKind};
use crate::selection::SelectedItem;
use crate::session::{Notice, NoticeKind, Session};
use crate::theme::Theme;

const MAP_PADDING: f32 = 24.0;
const MIN_LABEL_SIZE: f32 = 8.0;
const WARNING_DURATION: f32 = 2.5;
const INFO_DURATION: f32 = 4.0;
const TOAST_FADE: f32 = 0.5;

/// A fading notice at the bottom of the map. Stands in for blocking dialogs.
struct Toast {
    notice: Notice,
    start: Instant,
}

impl Toast {
    fn new(notice: Notice) -> Self {
        Self {
            notice,
            start: Instant::now(),
        }
    }

    fn duration(&self) -> f32 {
        match self.notice.kind {
            NoticeKind::Info => INFO_DURATION,
            NoticeKind::Warning => WARNING_DURATION,
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = self.duration();
        let fade_start = duration - TOAST_FADE;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / TOAST_FADE
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= self.duration()
    }
}

/// Maps campus coordinates onto the screen area of the map panel.
#[derive(Debug, Clone, Copy, PartialEq)]
struct MapTransform {
    bounds: Rect,
    scale: f32,
    offset: egui::Vec2,
}

impl MapTransform {
    /// Fit `bounds` into `screen`, preserving aspect ratio and centering.
    fn fit(bounds: Rect, screen: egui::Rect) -> Self {
        let inner = screen.shrink(MAP_PADDING);
        let w = (bounds.width as f32).max(1.0);
        let h = (bounds.height as f32).max(1.0);
        let scale = (inner.width() / w).min(inner.height() / h).max(0.01);
        let used = egui::vec2(w * scale, h * scale);
        let offset = inner.min.to_vec2() + (inner.size() - used) / 2.0;
        Self {
            bounds,
            scale,
            offset,
        }
    }

    fn to_screen(self, p: Point) -> egui::Pos2 {
        egui::pos2(
            (p.x - self.bounds.x) as f32 * self.scale + self.offset.x,
            (p.y - self.bounds.y) as f32 * self.scale + self.offset.y,
        )
    }

    fn to_campus(self, p: egui::Pos2) -> Point {
        Point::new(
            ((p.x - self.offset.x) / self.scale) as f64 + self.bounds.x,
            ((p.y - self.offset.y) / self.scale) as f64 + self.bounds.y,
        )
    }

    fn rect_to_screen(&self, r: &Rect) -> egui::Rect {
        egui::Rect::from_min_max(
            self.to_screen(r.origin()),
            self.to_screen(Point::new(r.right(), r.bottom())),
        )
    }
}

struct CampusApp {
    file: PathBuf,
    session: Session,
    theme: Theme,
    /// Buildings, hallways and classrooms; fixed for the life of the window.
    base_scene: Vec<DrawCommand>,
    bounds: Rect,
    toast: Option<Toast>,
}

impl CampusApp {
    fn new(file: PathBuf, campus: CampusDescription, theme: Theme) -> Self {
        let base_scene = scene::campus_scene(&campus);
        let bounds = campus.bounds().unwrap_or_default();
        Self {
            file,
            session: Session::new(campus),
            theme,
            base_scene,
            bounds,
            toast: None,
        }
    }

    fn notify(&mut self, notice: Notice) {
        match notice.kind {
            NoticeKind::Warning => tracing::info!(text = %notice.message, "warning shown"),
            NoticeKind::Info => tracing::debug!(text = %notice.message, "info shown"),
        }
        self.toast = Some(Toast::new(notice));
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.theme = self.theme.toggled();
        apply_visuals(ctx, &self.theme);
        self.notify(Notice::info(format!("Theme: {}", self.theme.name)));
    }

    fn calculate_path(&mut self) {
        match self.session.on_recompute_requested() {
            Ok(plan) => {
                tracing::info!(
                    stops = plan.annotations.len(),
                    length = plan.total_length(),
                    "path calculated"
                );
            }
            Err(notice) => self.notify(notice),
        }
    }

    fn draw_side_panel(&mut self, ui: &mut egui::Ui) {
        let catalog: Vec<SelectedItem> = self.session.campus().courses().collect();

        ui.heading("Available Courses:");
        ui.add_space(4.0);
        egui::ScrollArea::vertical()
            .id_salt("course-list")
            .max_height(ui.available_height() * 0.45)
            .show(ui, |ui| {
                for item in &catalog {
                    let mut checked = self.session.is_selected(item);
                    if ui.checkbox(&mut checked, item.to_string()).changed() {
                        let outcome = self.session.on_toggle(
                            &item.course,
                            &item.building,
                            &item.room,
                            checked,
                        );
                        // The checkbox is redrawn from the session next frame,
                        // so a rejected toggle reverts by itself.
                        if let Some(notice) = outcome.notice {
                            self.notify(notice);
                        }
                    }
                }
            });

        ui.separator();
        ui.heading(format!(
            "Selected Courses: {}/{}",
            self.session.selection().len(),
            self.session.capacity()
        ));
        for item in self.session.selection() {
            ui.label(item.to_string());
        }

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Calculate Path").clicked() {
                self.calculate_path();
            }
            if ui
                .add_enabled(
                    !self.session.selection().is_empty(),
                    egui::Button::new("Clear"),
                )
                .clicked()
            {
                self.session.clear();
            }
        });

        if let Some(plan) = self.session.plan() {
            ui.separator();
            ui.heading("Path:");
            for line in plan.itinerary() {
                ui.label(line);
            }
            if !plan.segments.is_empty() {
                ui.label(
                    egui::RichText::new(format!("Total distance: {:.0}", plan.total_length()))
                        .weak(),
                );
            }
        }
    }

    fn draw_map(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::click());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, self.theme.background);

        let transform = MapTransform::fit(self.bounds, rect);
        let selected_rooms: Vec<Rect> = self
            .session
            .selection()
            .iter()
            .filter_map(|i| self.session.campus().classroom_rect(&i.building, &i.room))
            .collect();

        for command in &self.base_scene {
            self.paint(&painter, &transform, command, &selected_rooms);
        }
        if let Some(plan) = self.session.plan() {
            for command in scene::path_scene(plan) {
                self.paint(&painter, &transform, &command, &selected_rooms);
            }
        }

        let hovered = response
            .hover_pos()
            .and_then(|p| self.session.campus().classroom_at(transform.to_campus(p)))
            .map(|(building, room, _)| (building.to_string(), room.to_string()));

        if response.clicked() {
            let info = response
                .interact_pointer_pos()
                .and_then(|p| self.session.campus().classroom_at(transform.to_campus(p)))
                .and_then(|(building, room, _)| self.session.classroom_info(building, room));
            if let Some(notice) = info {
                self.notify(notice);
            }
        }

        if let Some((building, room)) = hovered {
            if let Some(notice) = self.session.classroom_info(&building, &room) {
                response.on_hover_text(notice.message);
            }
        }
    }

    fn paint(
        &self,
        painter: &egui::Painter,
        transform: &MapTransform,
        command: &DrawCommand,
        selected_rooms: &[Rect],
    ) {
        let scale = transform.scale;
        match command {
            DrawCommand::Rect { kind, rect } => {
                let (mut fill, stroke) = self.theme.rect_colors(*kind);
                if *kind == RectKind::Classroom && selected_rooms.contains(rect) {
                    fill = self.theme.selected_fill;
                }
                let screen = transform.rect_to_screen(rect);
                painter.rect_filled(screen, 2.0, fill);
                if stroke != egui::Color32::TRANSPARENT {
                    painter.rect_stroke(
                        screen,
                        2.0,
                        egui::Stroke::new(1.0, stroke),
                        egui::StrokeKind::Inside,
                    );
                }
            }
            DrawCommand::Line { start, .. } => {
                let Some(end) = command.line_end() else {
                    return;
                };
                painter.line_segment(
                    [transform.to_screen(*start), transform.to_screen(end)],
                    egui::Stroke::new(self.theme.path_width, self.theme.path_color),
                );
            }
            DrawCommand::Label {
                kind,
                position,
                text,
            } => {
                let pos = transform.to_screen(*position);
                match kind {
                    LabelKind::Building => {
                        let size = (self.theme.building_label_size * scale).max(MIN_LABEL_SIZE);
                        painter.text(
                            pos,
                            egui::Align2::LEFT_TOP,
                            text,
                            egui::FontId::proportional(size),
                            self.theme.foreground,
                        );
                    }
                    LabelKind::Classroom => {
                        let size = (self.theme.label_size * scale).max(MIN_LABEL_SIZE);
                        painter.text(
                            pos,
                            egui::Align2::CENTER_CENTER,
                            text,
                            egui::FontId::proportional(size),
                            self.theme.foreground,
                        );
                    }
                    LabelKind::Sequence => {
                        let size = (self.theme.label_size * scale).max(MIN_LABEL_SIZE);
                        let galley = painter.layout_no_wrap(
                            text.clone(),
                            egui::FontId::monospace(size),
                            self.theme.sequence_foreground,
                        );
                        let badge = egui::Rect::from_min_size(
                            pos,
                            galley.rect.size() + egui::vec2(6.0, 2.0),
                        );
                        painter.rect_filled(badge, 3.0, self.theme.sequence_background);
                        painter.galley(
                            badge.min + egui::vec2(3.0, 1.0),
                            galley,
                            self.theme.sequence_foreground,
                        );
                    }
                }
            }
        }
    }

    fn draw_toast(&self, ctx: &egui::Context, ui: &egui::Ui, rect: egui::Rect) {
        let Some(toast) = &self.toast else {
            return;
        };
        let opacity = toast.opacity();
        if opacity <= 0.0 {
            return;
        }
        let toast_color = Theme::with_opacity(self.theme.foreground, opacity * 0.9);
        let toast_bg = Theme::with_opacity(self.theme.panel_background, opacity * 0.95);
        let galley = ui.painter().layout_no_wrap(
            toast.notice.message.clone(),
            egui::FontId::proportional(16.0),
            toast_color,
        );
        let padding = 12.0;
        let toast_rect = egui::Rect::from_min_size(
            egui::pos2(
                rect.center().x - galley.rect.width() / 2.0 - padding,
                rect.bottom() - galley.rect.height() - padding * 2.0 - 24.0,
            ),
            egui::vec2(
                galley.rect.width() + padding * 2.0,
                galley.rect.height() + padding * 2.0,
            ),
        );
        let painter = ui.painter();
        painter.rect_filled(toast_rect, 8.0, toast_bg);
        let border = self.theme.notice_border(toast.notice.kind);
        painter.rect_stroke(
            toast_rect,
            8.0,
            egui::Stroke::new(1.5, Theme::with_opacity(border, opacity)),
            egui::StrokeKind::Inside,
        );
        painter.galley(
            egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding),
            galley,
            toast_color,
        );
        ctx.request_repaint();
    }
}

impl eframe::App for CampusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();
        let mut toggle_theme = false;
        let mut calculate = false;

        ctx.input(|i| {
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
            } else if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
            } else if i.key_pressed(egui::Key::D) {
                toggle_theme = true;
            } else if i.key_pressed(egui::Key::Enter) {
                calculate = true;
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }
        if toggle_theme {
            self.toggle_theme(ctx);
        }
        if calculate {
            self.calculate_path();
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        egui::SidePanel::left("courses")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(
                        self.file
                            .file_name()
                            .unwrap_or_default()
                            .to_string_lossy()
                            .to_string(),
                    )
                    .weak(),
                );
                self.draw_side_panel(ui);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(self.theme.background).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.draw_map(ui);
                self.draw_toast(ctx, ui, rect);
            });
    }
}

fn apply_visuals(ctx: &egui::Context, theme: &Theme) {
    if theme.name == "dark" {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

pub fn run(file: PathBuf, windowed: bool, theme: &str) -> anyhow::Result<()> {
    let campus = CampusDescription::load(&file)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    if campus.building_count() == 0 {
        anyhow::bail!("No buildings found in {}", file.display());
    }

    let title = format!(
        "campusmap \u{2014} {}",
        file.file_name().unwrap_or_default().to_string_lossy()
    );

    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title(&title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(&title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let theme = Theme::from_name(theme);
    tracing::info!(file = %file.display(), theme = %theme.name, windowed, "opening map");

    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            apply_visuals(&cc.egui_ctx, &theme);
            Ok(Box::new(CampusApp::new(file, campus, theme)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_centers_and_scales_uniformly() {
        let bounds = Rect::new(100.0, 100.0, 200.0, 100.0);
        let screen = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(448.0, 448.0));
        let t = MapTransform::fit(bounds, screen);
        // 400 usable pixels for 200 units wide.
        assert!((t.scale - 2.0).abs() < 1e-6);
        let top_left = t.to_screen(Point::new(100.0, 100.0));
        assert!((top_left.x - 24.0).abs() < 1e-4);
        assert!((top_left.y - 124.0).abs() < 1e-4);
    }

    #[test]
    fn to_campus_inverts_to_screen() {
        let bounds = Rect::new(-50.0, 20.0, 300.0, 180.0);
        let screen = egui::Rect::from_min_size(egui::pos2(10.0, 30.0), egui::vec2(900.0, 500.0));
        let t = MapTransform::fit(bounds, screen);
        let p = Point::new(135.0, 135.0);
        let back = t.to_campus(t.to_screen(p));
        assert!((back.x - p.x).abs() < 1e-3);
        assert!((back.y - p.y).abs() < 1e-3);
    }

    #[test]
    fn empty_bounds_do_not_divide_by_zero() {
        let screen = egui::Rect::from_min_size(egui::pos2(0.0, 0.0), egui::vec2(100.0, 100.0));
        let t = MapTransform::fit(Rect::default(), screen);
        assert!(t.scale.is_finite());
    }

    #[test]
    fn warning_toast_expires_before_info() {
        let warning = Toast::new(Notice::warning("full"));
        let info = Toast::new(Notice::info("room"));
        assert!(warning.duration() < info.duration());
        assert_eq!(warning.opacity(), 1.0);
        assert!(!info.is_expired());
    }
}
