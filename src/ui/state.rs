use crate::terrain::GridParams;

pub struct UiState {
    pub params: GridParams,
    pub vsync_enabled: bool,
    pub show_stats: bool,
    pub show_help: bool,
}

impl UiState {
    pub fn new(params: GridParams, vsync_enabled: bool) -> Self {
        Self {
            params,
            vsync_enabled,
            show_stats: true,
            show_help: true,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(GridParams::default(), true)
    }
}
