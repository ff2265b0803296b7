//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowRight as Move, LuArrowUp as Up, LuChevronRight as ChevronRight, LuCopy as Copy,
        LuDownload as Download, LuFile as File, LuFolder as Folder,
        LuFolderPlus as NewFolder, LuHouse as Home, LuPencil as Rename, LuRefreshCw as Refresh,
        LuTrash2 as Delete, LuUpload as Upload, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowRightSquare as Move, BsArrowUp as Up,
        BsChevronRight as ChevronRight, BsDownload as Download, BsFileEarmark as File,
        BsFiles as Copy, BsFolderFill as Folder, BsFolderPlus as NewFolder, BsHouseFill as Home,
        BsPencil as Rename, BsTrash as Delete, BsUpload as Upload,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(UP, Up);
themed_icon!(HOME, Home);
themed_icon!(FOLDER, Folder);
themed_icon!(FILE, File);
themed_icon!(NEW_FOLDER, NewFolder);
themed_icon!(UPLOAD, Upload);
themed_icon!(DOWNLOAD, Download);
themed_icon!(RENAME, Rename);
themed_icon!(COPY, Copy);
themed_icon!(MOVE, Move);
themed_icon!(DELETE, Delete);
themed_icon!(REFRESH, Refresh);
themed_icon!(CLOSE, Close);
