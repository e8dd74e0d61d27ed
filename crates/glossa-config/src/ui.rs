use serde::{Deserialize, Serialize};

fn default_popup_width() -> u32 {
    350
}

fn default_popup_height() -> u32 {
    300
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    800
}

fn default_zoom_min() -> u16 {
    50
}

fn default_zoom_max() -> u16 {
    200
}

fn default_zoom_step() -> u16 {
    25
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_popup_width")]
    pub popup_width: u32,
    #[serde(default = "default_popup_height")]
    pub popup_height: u32,
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    #[serde(default = "default_zoom_min")]
    pub zoom_min: u16,
    #[serde(default = "default_zoom_max")]
    pub zoom_max: u16,
    #[serde(default = "default_zoom_step")]
    pub zoom_step: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            popup_width: default_popup_width(),
            popup_height: default_popup_height(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            zoom_min: default_zoom_min(),
            zoom_max: default_zoom_max(),
            zoom_step: default_zoom_step(),
        }
    }
}
