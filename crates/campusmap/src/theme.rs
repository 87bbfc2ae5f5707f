use eframe::egui::Color32;

use crate::scene::RectKind;
use crate::session::NoticeKind;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub accent: Color32,
    pub panel_background: Color32,
    pub building_fill: Color32,
    pub building_stroke: Color32,
    pub hallway_fill: Color32,
    pub classroom_fill: Color32,
    pub classroom_stroke: Color32,
    pub selected_fill: Color32,
    pub path_color: Color32,
    pub sequence_background: Color32,
    pub sequence_foreground: Color32,
    pub label_size: f32,
    pub building_label_size: f32,
    pub path_width: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            accent: Color32::from_rgb(0x52, 0x94, 0xE2),
            panel_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            building_fill: Color32::from_rgb(0x33, 0x3A, 0x45),
            building_stroke: Color32::from_rgb(0x8A, 0x94, 0xA6),
            hallway_fill: Color32::from_rgb(0x4A, 0x4A, 0x4A),
            classroom_fill: Color32::from_rgb(0x2B, 0x4C, 0x6F),
            classroom_stroke: Color32::from_rgb(0x5C, 0xB8, 0xFF),
            selected_fill: Color32::from_rgb(0x1E, 0x6A, 0x4A),
            path_color: Color32::from_rgb(0xFF, 0x7E, 0x67),
            sequence_background: Color32::from_rgb(0xFF, 0x7E, 0x67),
            sequence_foreground: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            label_size: 12.0,
            building_label_size: 14.0,
            path_width: 3.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::WHITE,
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            accent: Color32::from_rgb(0x0F, 0x34, 0x60),
            panel_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            building_fill: Color32::from_rgb(0xE8, 0xE8, 0xE8),
            building_stroke: Color32::from_rgb(0x55, 0x55, 0x55),
            hallway_fill: Color32::from_rgb(0xD0, 0xD0, 0xD0),
            classroom_fill: Color32::from_rgb(0xAD, 0xD8, 0xE6),
            classroom_stroke: Color32::from_rgb(0x1A, 0x6B, 0xB5),
            selected_fill: Color32::from_rgb(0x9A, 0xD9, 0xB5),
            path_color: Color32::from_rgb(0xC7, 0x3E, 0x1D),
            sequence_background: Color32::from_rgb(0xC7, 0x3E, 0x1D),
            sequence_foreground: Color32::WHITE,
            label_size: 12.0,
            building_label_size: 14.0,
            path_width: 3.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Fill and outline for a map rectangle.
    pub fn rect_colors(&self, kind: RectKind) -> (Color32, Color32) {
        match kind {
            RectKind::Building => (self.building_fill, self.building_stroke),
            RectKind::Hallway => (self.hallway_fill, Color32::TRANSPARENT),
            RectKind::Classroom => (self.classroom_fill, self.classroom_stroke),
        }
    }

    /// Outline color of a toast showing a notice of `kind`.
    pub fn notice_border(&self, kind: NoticeKind) -> Color32 {
        match kind {
            NoticeKind::Info => self.accent,
            NoticeKind::Warning => self.path_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_switches_between_light_and_dark() {
        assert_eq!(Theme::light().toggled().name, "dark");
        assert_eq!(Theme::dark().toggled().name, "light");
    }

    #[test]
    fn unknown_name_falls_back_to_light() {
        assert_eq!(Theme::from_name("sepia").name, "light");
    }

    #[test]
    fn hallways_have_no_outline() {
        let (_, stroke) = Theme::dark().rect_colors(RectKind::Hallway);
        assert_eq!(stroke, Color32::TRANSPARENT);
    }

    #[test]
    fn notice_border_follows_kind() {
        let theme = Theme::light();
        assert_eq!(theme.notice_border(NoticeKind::Info), theme.accent);
        assert_eq!(theme.notice_border(NoticeKind::Warning), theme.path_color);
        assert_ne!(
            Theme::dark().notice_border(NoticeKind::Info),
            theme.notice_border(NoticeKind::Info)
        );
    }
}
