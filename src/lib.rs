//! pits — point-in-time storage.
//!
//! Каталог снапшотов с именами `YYYY.MM.DD-HH:MM:SS`: запись нового снапшота
//! "на сейчас" (или на заданный момент) и чтение файла, актуального на момент T
//! (последний снапшот с моментом <= T). gzip при чтении определяется сам.

// Базовые модули
pub mod consts;
pub mod error;
pub mod clock;
pub mod config;

// Ядро: парсер спецификации, резолвер путей, открытие потоков
pub mod pit;
pub mod resolve;
pub mod stream;

// Обёртка goto()/open в стиле "перейти к моменту"
pub mod pit_file;

// Удобные реэкспорты
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::PitsConfig;
pub use error::{PitError, Result};
pub use pit::{parse_point_in_time, PointInTime};
pub use pit_file::{goto, read_now, write_now, PointInTimeFile};
pub use resolve::{
    expand_home, list_snapshots, resolve_for_read, resolve_for_write, ReadHandle, Snapshot,
    WriteHandle,
};
pub use stream::{
    open_read, open_write, with_reader, with_writer, PitReader, PitWriter, StreamOptions,
};
