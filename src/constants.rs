use ratatui::style::Color;

pub const STORAGE_KEY: &str = "sensei_flow_v9_state";
pub const EXPORT_FILE_NAME: &str = "sensei-flow-backup.json";

pub const PLAN_DAYS: u32 = 90;

pub const XP_SETTINGS: XpSettings = XpSettings {
    base_level_xp: 100,
    per_level_xp: 40,
    block_reward: 25,
    day_bonus: 50,
    axis_gain: 2,
};

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    tick_ms: 1000,
    target_fps: 10,
    focus_secs: 90 * 60,
};

pub const STORAGE_SETTINGS: StorageSettings = StorageSettings {
    max_backups: 10,
    backup_dir: "backups",
};

pub const INSIGHT_SETTINGS: InsightSettings = InsightSettings {
    axis_cap: 100,
    deep_notes_chars: 60,
};

pub const AXIS_COLORS: [Color; 3] = [
    Color::Rgb(0, 191, 255),
    Color::Rgb(139, 92, 246),
    Color::Rgb(255, 153, 0),
];

pub struct XpSettings {
    pub base_level_xp: u32,
    pub per_level_xp: u32,
    pub block_reward: u32,
    pub day_bonus: u32,
    pub axis_gain: u32,
}

pub struct TimeSettings {
    pub tick_ms: u64,
    pub target_fps: u64,
    pub focus_secs: u64,
}

pub struct StorageSettings {
    pub max_backups: usize,
    pub backup_dir: &'static str,
}

pub struct InsightSettings {
    pub axis_cap: u32,
    pub deep_notes_chars: usize,
}
