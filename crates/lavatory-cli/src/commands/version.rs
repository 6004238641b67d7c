//! Version command implementation.

/// Package version line.
pub fn version_string() -> String {
    format!("lavatory {}", env!("CARGO_PKG_VERSION"))
}

/// Execute the version command.
pub fn execute_version() {
    println!("{}", version_string());
}
