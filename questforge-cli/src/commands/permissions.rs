use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use questforge_core::{Capability, PermissionSet, Role};

#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Only show this role (e.g. "team lead", project_manager)
    #[arg(long)]
    pub role: Option<Role>,
}

pub fn run(args: PermissionsArgs) -> Result<()> {
    let roles = match args.role {
        Some(role) => vec![role],
        None => Role::ALL.to_vec(),
    };
    println!("{}", capability_table(&roles));
    Ok(())
}

/// Capabilities down, roles across
fn capability_table(roles: &[Role]) -> Table {
    let sets: Vec<PermissionSet> = roles.iter().map(Role::permissions).collect();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Capability").fg(Color::Cyan)];
    header.extend(roles.iter().map(|role| Cell::new(role.label()).fg(Color::Cyan)));
    table.set_header(header);

    for capability in Capability::ALL {
        let mut row = vec![Cell::new(capability.as_str())];
        row.extend(sets.iter().map(|set| mark(set.allows(capability))));
        table.add_row(row);
    }
    table
}

fn mark(allowed: bool) -> Cell {
    if allowed {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("-").fg(Color::DarkGrey)
    }
}
