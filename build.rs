fn main() {
    // Host builds (library + tests) have no ESP-IDF environment to export.
    if std::env::var("CARGO_FEATURE_EMBEDDED").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
