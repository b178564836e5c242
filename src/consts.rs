//! Общие константы (пути по умолчанию, каталог, пагинация).

// -------- Files (relative to the current directory) --------
pub const WORKING_FILE: &str = "db.hyper";
pub const OUTPUT_FILE: &str = "extract.csv";
// Sidecar lock next to the working copy: <working>.lock
pub const LOCK_SUFFIX: &str = "lock";

// -------- Catalog --------
pub const DEFAULT_SCHEMA: &str = "Extract";

// -------- Pagination --------
pub const DEFAULT_CHUNK_LIMIT: u64 = 100_000;
// Колонка сортировки для LIMIT/OFFSET-страниц (бизнес-колонка, не rowid).
pub const DEFAULT_ORDER_COLUMN: &str = "kpi_date";

// -------- Exit codes --------
pub const EXIT_ENGINE_ERROR: i32 = 1;
pub const EXIT_OTHER_ERROR: i32 = 2;
