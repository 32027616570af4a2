fn main() {
    if let Err(err) = row_config_engine::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
