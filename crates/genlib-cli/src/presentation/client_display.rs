//! Detected client output.

use genlib_core::{GameClient, InstallationScan};

use super::tables::{print_separator, truncate_string};

/// Print detected clients as a table.
pub fn print_clients(clients: &[GameClient]) {
    if clients.is_empty() {
        println!("No game clients found.");
        return;
    }

    println!("Found {} client(s):\n", clients.len());
    println!(
        "{:<28} {:<10} {:<14} {:<16} {:<12} Executable",
        "Name", "Game", "Version", "Publisher", "Status"
    );
    print_separator(110);

    for client in clients {
        let publisher = client
            .publisher_type
            .as_deref()
            .unwrap_or_else(|| client.install_channel.slug());
        let status = if client.is_unknown() {
            "unknown"
        } else if client.needs_acquisition() {
            "acquire"
        } else if client.is_registered() {
            "registered"
        } else {
            "identified"
        };

        println!(
            "{:<28} {:<10} {:<14} {:<16} {:<12} {}",
            truncate_string(&client.name, 27),
            client.game_type.display_name(),
            truncate_string(&client.version, 13),
            truncate_string(publisher, 15),
            status,
            client.executable_path.display()
        );
        if client.is_registered() {
            println!("    id: {}", client.id);
        }
    }
}

/// Print per-installation scan progress.
pub fn print_scans(scans: &[InstallationScan]) {
    for scan in scans {
        println!("  {:<24} {:?}", scan.installation_id, scan.state());
    }
}
