//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - Grover's search over a 1024-entry friend directory",
        style("qff").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  qff-ir           Circuit intermediate representation");
    println!("  qff-compile      Transpilation passes");
    println!("  qff-hal          Backend abstraction");
    println!("  qff-adapter-sim  Statevector simulator");
    println!("  qff-finder       Directory, oracle, search driver, reports");
    println!("  qff-dashboard    Web dashboard");
    println!("  qff-cli          Command-line interface");
    println!();
    println!("License: {}", style("Apache-2.0").dim());
}
