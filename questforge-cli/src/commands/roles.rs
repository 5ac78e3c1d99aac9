use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use questforge_core::Role;

/// Print every role, most privileged first
pub fn run() -> Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Role").fg(Color::Cyan),
        Cell::new("Label").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
    ]);

    for role in Role::ALL {
        table.add_row(vec![
            Cell::new(role.as_str()),
            Cell::new(role.label()),
            Cell::new(role.description()),
        ]);
    }

    println!("{table}");
    Ok(())
}
