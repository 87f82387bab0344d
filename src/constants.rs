pub const WINDOW_WIDTH: i32 = 1280;           // Default window width
pub const WINDOW_HEIGHT: i32 = 800;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const SLIDE_WIDTH: i32 = 960;             // Slide frame width (also the decode size)
pub const SLIDE_HEIGHT: i32 = 540;            // Slide frame height
pub const SLIDE_GAP: i32 = 80;                // Space after each slide on the track
pub const SLIDE_ROUNDNESS: f32 = 0.08;        // Corner roundness of slide frames

pub const HERO_HEIGHT: i32 = 900;             // Height of the band above the track
pub const PAGE_TAIL: i32 = 400;               // Space below the control strip
pub const SCROLL_STEP: f32 = 80.0;            // Pixels per wheel notch / arrow press

pub const VIDEO_FPS: u32 = 30;                // Decoder output frame rate
pub const DECODE_QUEUE: usize = 8;            // Frames buffered ahead by the decoder

pub const TRACK_DURATION: f32 = 2.0;          // Track slide animation (seconds)
pub const ENTRANCE_DURATION: f32 = 0.5;       // Scroll trigger entrance animation (seconds)
pub const INDICATOR_DURATION: f32 = 0.5;      // Marker / fill retarget animation (seconds)

pub const READY_THRESHOLD: usize = 3;         // Slides with metadata needed (exclusive)

pub const MARKER_SIZE: f32 = 12.0;            // Collapsed marker diameter
pub const MARKER_SPACING: f32 = 16.0;         // Space between markers
pub const MARKER_NARROW_RATIO: f32 = 0.10;    // Expanded marker width, viewport < 1200px
pub const MARKER_WIDE_RATIO: f32 = 0.04;      // Expanded marker width, viewport >= 1200px
pub const MARKER_BREAKPOINT: f32 = 1200.0;    // Viewport width switching the ratio

pub const STRIP_MARGIN_TOP: i32 = 40;         // Space between track and control strip
pub const STRIP_HEIGHT: i32 = 52;             // Control strip pill height
pub const STRIP_PADDING: f32 = 28.0;          // Horizontal pill padding
pub const BUTTON_SIZE: i32 = 56;              // Control button diameter
pub const BUTTON_GAP: i32 = 16;               // Space between pill and button

pub const CAPTION_SIZE: i32 = 28;             // Caption font size
pub const CAPTION_LINE: i32 = 34;             // Caption line height
pub const CAPTION_TOP: i32 = 48;              // Caption block offset from frame top
pub const CAPTION_LEFT: f32 = 0.05;           // Caption block offset, fraction of width
