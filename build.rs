fn main() {
    // Propagates ESP-IDF link/compile settings when cross-compiling for the
    // device. No-op for host-target builds.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
