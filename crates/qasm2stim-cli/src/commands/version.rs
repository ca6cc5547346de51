//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - OpenQASM 2 to Stim circuit translation",
        style("qasm2stim").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qasm2stim-core   Single-pass translation engine and gate table");
    println!("  qasm2stim-batch  File loading, directory conversion, configuration");
    println!("  qasm2stim-cli    Command-line interface");
    println!();
    println!("License: {}", style(env!("CARGO_PKG_LICENSE")).dim());
}
