//! Общие константы формата (имена снапшотов, gzip, ENV).

// -------- Canonical filename --------
/// chrono-формат имени снапшота: `YYYY.MM.DD-HH:MM:SS`.
pub const PIT_FORMAT: &str = "%Y.%m.%d-%H:%M:%S";
pub const PIT_FILENAME_LEN: usize = 19; // "2024.06.15-08:00:30"

// -------- Spec grammar --------
pub const SPEC_MIN_DIGITS: usize = 8; // YYYYMMDD
pub const MIN_YEAR: i32 = 1; // года 0000 нет
pub const SPEC_MAX_DIGITS: usize = 14; // YYYYMMDDHHMMSS, остальное игнорируется

// Дата без времени = "весь день включительно".
pub const DATE_ONLY_HOUR: u32 = 23;
pub const DATE_ONLY_MINUTE: u32 = 59;
pub const DATE_ONLY_SECOND: u32 = 59;

// -------- Compression --------
pub const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// -------- ENV --------
pub const ENV_DIR: &str = "PITS_DIR";
pub const ENV_GZIP: &str = "PITS_GZIP";
pub const ENV_GZIP_LEVEL: &str = "PITS_GZIP_LEVEL";
pub const ENV_BUF_CAPACITY: &str = "PITS_BUF_CAPACITY";

pub const DEFAULT_GZIP_LEVEL: u32 = 6;
pub const DEFAULT_BUF_CAPACITY: usize = 64 * 1024;
