//! Gates command implementation.

use console::style;
use qasm2stim_core::{GateTable, MAX_GATE_NAME_LEN};

/// Execute the gates command.
pub fn execute() {
    let table = GateTable::standard();

    println!("{}", style("Supported gates").bold());
    println!();
    println!("  {:<10} {}", style("OpenQASM").dim(), style("Stim").dim());
    for entry in table.entries() {
        println!("  {:<10} {}", style(entry.qasm).green(), style(entry.stim).cyan());
    }
    println!();
    println!(
        "{} gates. `creg`, `include`, `gate` and `//` lines are skipped; mnemonics longer than {} bytes are rejected.",
        table.len(),
        MAX_GATE_NAME_LEN
    );
}
