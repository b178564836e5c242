use env_logger::{Builder, Env};
use log::error;

use ExtractCsv::error::exit_code;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт info.
    // Пример: RUST_LOG=debug ./extractcsv sample.hyper
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = ExtractCsv::cli::run() {
        // 1: ошибка движка, 2: остальные ошибки.
        error!("{:#}", e);
        std::process::exit(exit_code(&e));
    }
}
